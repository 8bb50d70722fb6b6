//! Run RuboCop over a set of paths, read its JSON report, and decide whether
//! to notify.
//!
//! [`Runner`] composes the pieces: [`build_command`] lays out the argument
//! list, an [`Executor`] runs it, [`ResultStore`] parses the report from a
//! private temporary file, and the [`Notifier`] receives the summary line
//! according to the configured [`NotificationMode`].

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod notify;
pub mod options;
pub mod result;
pub mod runner;
pub mod summary;

pub use command::{build_command, include_formatter_for_console, CommandArgs};
pub use error::RunnerError;
pub use executor::{Executor, SystemExecutor};
pub use notify::{
    desktop_notifier, should_notify, CommandNotifier, DesktopNotifier, LogNotifier, Notification,
    NotificationImage, Notifier,
};
pub use options::{CliSpec, NotificationMode, RunOptions};
pub use result::{InspectedFile, InspectionResult, Location, Offence, ResultStore, Summary};
pub use runner::{RunOutcome, Runner};
pub use summary::summary_text;
