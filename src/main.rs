use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rubocop_guard::cli::RootArgs;
use rubocop_guard::config::{self, FileConfig};
use rubocop_guard::{desktop_notifier, Notifier, Runner, RunnerError, SystemExecutor};

/// RuboCop ran and reported offences (or otherwise exited non-zero).
const EXIT_FAILED: u8 = 1;
/// The run could not be completed: bad config, spawn failure, unreadable report.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &RootArgs) -> Result<bool> {
    let file = match config::config_path(args.config.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            config::load_config(&path)?
        }
        None => FileConfig::default(),
    };
    let resolved = config::resolve(&file, &args.overrides())?;
    let notifier: Box<dyn Notifier> = match resolved.notifier {
        Some(notifier) => Box::new(notifier),
        None => desktop_notifier(),
    };

    let mut runner = Runner::new(resolved.options, SystemExecutor, notifier);
    let passed = match runner.run(&args.paths) {
        Ok(passed) => passed,
        // The run itself finished; report it and surface the notifier failure on stderr.
        Err(err @ RunnerError::Notification { .. }) => {
            tracing::error!(error = %err, "notification not delivered");
            runner
                .last_outcome()
                .map(|outcome| outcome.passed)
                .ok_or_else(|| anyhow!(err))?
        }
        Err(err) => return Err(err).context("rubocop run"),
    };

    if args.json {
        if let Some(outcome) = runner.last_outcome() {
            println!(
                "{}",
                serde_json::to_string_pretty(outcome).context("serialize run outcome")?
            );
        }
    } else if args.failed_paths {
        for path in runner.failed_paths() {
            println!("{path}");
        }
    } else if let Some(text) = runner.summary_text() {
        println!("{text}");
    }
    Ok(passed)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
