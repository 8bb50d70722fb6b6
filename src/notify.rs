//! Notification policy and the notifier seam.

use serde::Serialize;
use std::fmt;
use std::process::{Command, Stdio};

use crate::error::RunnerError;
use crate::options::NotificationMode;

pub const NOTIFICATION_TITLE: &str = "RuboCop results";

/// Desktop notifiers tried in order by [`desktop_notifier`].
const DESKTOP_NOTIFIERS: [&[&str]; 2] = [
    &[
        "notify-send",
        "--app-name",
        "rubocop-guard",
        "--urgency",
        "{urgency}",
        "--icon",
        "{icon}",
        "{title}",
        "{message}",
    ],
    &[
        "terminal-notifier",
        "-group",
        "rubocop-guard",
        "-title",
        "{title}",
        "-subtitle",
        "{image}",
        "-message",
        "{message}",
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationImage {
    Success,
    Failed,
}

impl NotificationImage {
    pub fn for_outcome(passed: bool) -> Self {
        if passed {
            Self::Success
        } else {
            Self::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    /// freedesktop urgency level.
    pub fn urgency(self) -> &'static str {
        match self {
            Self::Success => "normal",
            Self::Failed => "critical",
        }
    }

    /// freedesktop icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "dialog-information",
            Self::Failed => "dialog-error",
        }
    }
}

impl fmt::Display for NotificationImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub title: String,
    pub image: NotificationImage,
}

impl Notification {
    pub fn new(message: String, passed: bool) -> Self {
        Self {
            message,
            title: NOTIFICATION_TITLE.to_string(),
            image: NotificationImage::for_outcome(passed),
        }
    }
}

pub fn should_notify(passed: bool, mode: NotificationMode) -> bool {
    match mode {
        NotificationMode::Always => true,
        NotificationMode::OnFailureOnly => !passed,
        NotificationMode::Never => false,
    }
}

pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Result<(), RunnerError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: &Notification) -> Result<(), RunnerError> {
        (**self).notify(notification)
    }
}

/// Emits notifications as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), RunnerError> {
        tracing::info!(
            title = %notification.title,
            image = %notification.image,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// Runs an external command, filling `{title}`, `{message}`, `{image}`,
/// `{urgency}` and `{icon}`.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    argv: Vec<String>,
}

impl CommandNotifier {
    pub fn new(argv: Vec<String>) -> Result<Self, RunnerError> {
        if argv.is_empty() {
            return Err(RunnerError::InvalidOptionType {
                option: "notifier",
                expected: "non-empty command",
                actual: "empty command".to_string(),
            });
        }
        Ok(Self { argv })
    }

    /// Shell-split a command string such as `notify-send {title} {message}`.
    pub fn parse(command: &str) -> Result<Self, RunnerError> {
        let argv = shell_words::split(command).map_err(|err| RunnerError::InvalidOptionType {
            option: "notifier",
            expected: "shell command",
            actual: format!("unparseable string ({err})"),
        })?;
        Self::new(argv)
    }

    pub fn argv_for(&self, notification: &Notification) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| {
                arg.replace("{title}", &notification.title)
                    .replace("{message}", &notification.message)
                    .replace("{image}", notification.image.as_str())
                    .replace("{urgency}", notification.image.urgency())
                    .replace("{icon}", notification.image.icon())
            })
            .collect()
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), RunnerError> {
        let mut argv = self.argv_for(notification);
        let program = argv.remove(0);
        let status = Command::new(&program)
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|err| RunnerError::Notification {
                message: format!("spawn {program}: {err}"),
            })?;
        if !status.success() {
            return Err(RunnerError::Notification {
                message: format!("{program} exited with {status}"),
            });
        }
        Ok(())
    }
}

/// Auto-detected desktop notifier. Delivery failures (no session bus over
/// SSH or in CI) are logged and the notification goes to the log instead.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    command: Option<CommandNotifier>,
}

impl DesktopNotifier {
    pub fn with_command(command: CommandNotifier) -> Self {
        Self {
            command: Some(command),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), RunnerError> {
        if let Some(command) = &self.command {
            match command.notify(notification) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::warn!(error = %err, "desktop notifier failed; logging instead"),
            }
        }
        LogNotifier.notify(notification)
    }
}

/// First desktop notifier found on `PATH`, else log output.
pub fn desktop_notifier() -> Box<dyn Notifier> {
    for template in DESKTOP_NOTIFIERS {
        if which::which(template[0]).is_ok() {
            let argv = template.iter().map(|arg| arg.to_string()).collect();
            if let Ok(notifier) = CommandNotifier::new(argv) {
                tracing::debug!(program = template[0], "using desktop notifier");
                return Box::new(DesktopNotifier::with_command(notifier));
            }
        }
    }
    tracing::warn!("no desktop notifier on PATH; notifications go to the log");
    Box::new(DesktopNotifier::default())
}
