//! CLI argument parsing for a single inspection run.
use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::options::NotificationMode;

#[derive(Parser, Debug)]
#[command(
    name = "rubocop-guard",
    version,
    about = "Run RuboCop on the given paths and report a pass/fail summary",
    after_help = "Examples:\n  rubocop-guard lib/foo.rb lib/bar.rb\n  rubocop-guard --cli '--format simple' --notification failed app\n  rubocop-guard --json --hide-stdout lib"
)]
pub struct RootArgs {
    /// Files or directories to inspect (RuboCop defaults apply when empty)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// JSON config file (defaults to $RUBOCOP_GUARD_CONFIG or the user config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra RuboCop arguments, split with shell quoting rules
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub cli: Option<String>,

    /// When to send a desktop notification
    #[arg(long, value_enum)]
    pub notification: Option<NotificationMode>,

    /// Do not add the default console formatter
    #[arg(long, overrides_with = "no_hide_stdout")]
    pub hide_stdout: bool,

    /// Add the default console formatter even if the config hides it
    #[arg(long, overrides_with = "hide_stdout")]
    pub no_hide_stdout: bool,

    /// RuboCop executable to run
    #[arg(long, value_name = "PROGRAM")]
    pub program: Option<String>,

    /// Notifier command with {title}, {message}, {image}, {urgency} and {icon} placeholders
    #[arg(long, value_name = "COMMAND")]
    pub notifier: Option<String>,

    /// Emit the run outcome as JSON
    #[arg(long, conflicts_with = "failed_paths")]
    pub json: bool,

    /// Print paths with offences, one per line
    #[arg(long)]
    pub failed_paths: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,
}

impl RootArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cli: self.cli.clone(),
            notification: self.notification,
            hide_stdout: match (self.hide_stdout, self.no_hide_stdout) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            program: self.program.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
