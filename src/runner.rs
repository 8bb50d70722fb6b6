//! Runs RuboCop once over a set of paths and reports the outcome.

use serde::Serialize;

use crate::command::{build_command, CommandArgs};
use crate::error::RunnerError;
use crate::executor::Executor;
use crate::notify::{should_notify, Notification, Notifier};
use crate::options::RunOptions;
use crate::result::{utf8_path, InspectionResult, ResultStore};
use crate::summary::summary_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub passed: bool,
    pub result: InspectionResult,
}

/// Owns one private report file, so overlapping runs need separate runners.
pub struct Runner<E, N> {
    options: RunOptions,
    store: ResultStore,
    executor: E,
    notifier: N,
    last: Option<RunOutcome>,
}

impl<E: Executor, N: Notifier> Runner<E, N> {
    pub fn new(options: RunOptions, executor: E, notifier: N) -> Self {
        Self {
            options,
            store: ResultStore::new(),
            executor,
            notifier,
            last: None,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn build_command(&mut self, paths: &[String]) -> Result<CommandArgs, RunnerError> {
        let json_path = utf8_path(self.store.temporary_output_path()?)?;
        Ok(build_command(&self.options, json_path, paths))
    }

    /// Returns whether RuboCop exited cleanly. Spawn failures and unreadable
    /// reports are errors, never a failed run.
    pub fn run(&mut self, paths: &[String]) -> Result<bool, RunnerError> {
        self.last = None;
        let command = self.build_command(paths)?;
        self.store.clear()?;
        tracing::debug!(command = %command, "running rubocop");

        let passed = self.executor.execute(&command)?;
        let result = self.store.load()?;
        tracing::info!(
            passed,
            offences = result.summary.offence_count,
            inspected = result.summary.inspected_file_count,
            "rubocop run finished"
        );

        let message = summary_text(&result.summary);
        self.last = Some(RunOutcome { passed, result });
        if should_notify(passed, self.options.notification()) {
            self.notifier.notify(&Notification::new(message, passed))?;
        }
        Ok(passed)
    }

    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last.as_ref()
    }

    pub fn summary_text(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|outcome| summary_text(&outcome.result.summary))
    }

    /// Paths with offences from the last run; empty before the first run.
    pub fn failed_paths(&self) -> Vec<String> {
        self.last
            .as_ref()
            .map(|outcome| outcome.result.failed_paths())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationImage;
    use crate::options::{CliSpec, NotificationMode};
    use crate::result::SAMPLE_REPORT;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writes a canned report to the `--out` path and exits as configured.
    struct FakeRubocop {
        passed: bool,
        report: &'static str,
        seen: Rc<RefCell<Vec<CommandArgs>>>,
    }

    impl Executor for FakeRubocop {
        fn execute(&self, command: &CommandArgs) -> Result<bool, RunnerError> {
            self.seen.borrow_mut().push(command.clone());
            let path = command.json_output_path().expect("json output path");
            std::fs::write(path, self.report).expect("write report");
            Ok(self.passed)
        }
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier {
        sent: Rc<RefCell<Vec<Notification>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) -> Result<(), RunnerError> {
            self.sent.borrow_mut().push(notification.clone());
            Ok(())
        }
    }

    struct Harness {
        runner: Runner<FakeRubocop, RecordingNotifier>,
        seen: Rc<RefCell<Vec<CommandArgs>>>,
        sent: Rc<RefCell<Vec<Notification>>>,
    }

    fn harness(mode: NotificationMode, passed: bool, report: &'static str) -> Harness {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let notifier = RecordingNotifier::default();
        let sent = Rc::clone(&notifier.sent);
        let executor = FakeRubocop {
            passed,
            report,
            seen: Rc::clone(&seen),
        };
        let options = RunOptions::new(&CliSpec::Absent, mode).unwrap();
        Harness {
            runner: Runner::new(options, executor, notifier),
            seen,
            sent,
        }
    }

    fn paths() -> Vec<String> {
        vec!["spec/spec_helper.rb".to_string()]
    }

    #[test]
    fn executes_rubocop_with_built_command() {
        let mut h = harness(NotificationMode::Always, true, SAMPLE_REPORT);
        h.runner.run(&paths()).unwrap();
        let seen = h.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].program(), "rubocop");
        assert_eq!(seen[0].as_slice().last().unwrap(), "spec/spec_helper.rb");
    }

    #[test]
    fn returns_exit_status() {
        let mut h = harness(NotificationMode::Never, true, SAMPLE_REPORT);
        assert!(h.runner.run(&paths()).unwrap());
        let mut h = harness(NotificationMode::Never, false, SAMPLE_REPORT);
        assert!(!h.runner.run(&paths()).unwrap());
    }

    #[test]
    fn notification_follows_mode() {
        let cases = [
            (NotificationMode::Always, true, true),
            (NotificationMode::Always, false, true),
            (NotificationMode::OnFailureOnly, true, false),
            (NotificationMode::OnFailureOnly, false, true),
            (NotificationMode::Never, true, false),
            (NotificationMode::Never, false, false),
        ];
        for (mode, passed, notifies) in cases {
            let mut h = harness(mode, passed, SAMPLE_REPORT);
            h.runner.run(&paths()).unwrap();
            assert_eq!(
                h.sent.borrow().len(),
                usize::from(notifies),
                "mode={mode:?} passed={passed}"
            );
        }
    }

    #[test]
    fn notification_payload() {
        let mut h = harness(NotificationMode::Always, false, SAMPLE_REPORT);
        h.runner.run(&paths()).unwrap();
        let sent = h.sent.borrow();
        assert_eq!(sent[0].message, "2 files inspected, 2 offences detected");
        assert_eq!(sent[0].title, "RuboCop results");
        assert_eq!(sent[0].image, NotificationImage::Failed);
    }

    #[test]
    fn failed_paths_from_report() {
        let mut h = harness(NotificationMode::Never, false, SAMPLE_REPORT);
        assert!(h.runner.failed_paths().is_empty());
        h.runner.run(&paths()).unwrap();
        assert_eq!(h.runner.failed_paths(), vec!["lib/bar.rb"]);
        let outcome = h.runner.last_outcome().unwrap();
        assert!(!outcome.passed);
        assert_eq!(outcome.result.summary.offence_count, 2);
    }

    #[test]
    fn malformed_report_is_an_error() {
        let mut h = harness(NotificationMode::Always, true, "not json");
        let err = h.runner.run(&paths()).unwrap_err();
        assert!(matches!(err, RunnerError::MalformedResult { .. }));
        assert!(h.sent.borrow().is_empty());
        assert!(h.runner.last_outcome().is_none());
    }

    #[test]
    fn report_path_is_reused_across_runs() {
        let mut h = harness(NotificationMode::Never, true, SAMPLE_REPORT);
        h.runner.run(&paths()).unwrap();
        h.runner.run(&paths()).unwrap();
        let seen = h.seen.borrow();
        assert_eq!(seen[0].json_output_path(), seen[1].json_output_path());
        let command = h.runner.build_command(&paths()).unwrap();
        assert_eq!(command.json_output_path(), seen[0].json_output_path());
    }

    #[test]
    fn command_targets_the_store_path() {
        let mut h = harness(NotificationMode::Never, true, SAMPLE_REPORT);
        h.runner.run(&paths()).unwrap();
        let store_path = h
            .runner
            .store
            .temporary_output_path()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let seen = h.seen.borrow();
        assert_eq!(seen[0].json_output_path(), Some(store_path.as_str()));
        let json_flags = seen[0]
            .as_slice()
            .iter()
            .filter(|arg| arg.as_str() == "json")
            .count();
        assert_eq!(json_flags, 1);
    }
}
