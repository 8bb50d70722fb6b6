//! Runner options and normalization of the loosely typed config surface.

use serde_json::Value;

use crate::error::{json_type_name, RunnerError};

pub const DEFAULT_PROGRAM: &str = "rubocop";

/// User-supplied extra arguments, as found in config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CliSpec {
    RawString(String),
    ArgList(Vec<String>),
    #[default]
    Absent,
}

impl CliSpec {
    /// Accept a string, an array of strings, or null; anything else is rejected.
    pub fn from_value(value: &Value) -> Result<Self, RunnerError> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(raw) => Ok(Self::RawString(raw.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(arg) => Ok(arg.clone()),
                    other => Err(invalid_cli(format!(
                        "array containing {}",
                        json_type_name(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::ArgList),
            other => Err(invalid_cli(json_type_name(other))),
        }
    }

    /// Normalize into an argument list, shell-splitting raw strings.
    pub fn resolve(&self) -> Result<Vec<String>, RunnerError> {
        match self {
            Self::Absent => Ok(Vec::new()),
            Self::ArgList(args) => Ok(args.clone()),
            Self::RawString(raw) => shell_words::split(raw)
                .map_err(|err| invalid_cli(format!("unparseable string ({err})"))),
        }
    }
}

fn invalid_cli(actual: impl Into<String>) -> RunnerError {
    RunnerError::InvalidOptionType {
        option: "cli",
        expected: "string, array of strings, or null",
        actual: actual.into(),
    }
}

/// When to emit a desktop notification after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NotificationMode {
    #[default]
    Always,
    #[value(name = "failed")]
    OnFailureOnly,
    Never,
}

impl NotificationMode {
    /// `true`, `false`, `"failed"`, or null (meaning the default).
    pub fn from_value(value: &Value) -> Result<Self, RunnerError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Bool(true) => Ok(Self::Always),
            Value::Bool(false) => Ok(Self::Never),
            Value::String(mode) if mode == "failed" => Ok(Self::OnFailureOnly),
            other => Err(RunnerError::InvalidOptionType {
                option: "notification",
                expected: "true, false, or \"failed\"",
                actual: match other {
                    Value::String(mode) => format!("string {mode:?}"),
                    other => json_type_name(other),
                },
            }),
        }
    }
}

/// Immutable options a [`crate::Runner`] is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    program: String,
    cli_args: Vec<String>,
    notification: NotificationMode,
    hide_stdout: bool,
}

impl RunOptions {
    pub fn new(cli: &CliSpec, notification: NotificationMode) -> Result<Self, RunnerError> {
        Ok(Self {
            program: DEFAULT_PROGRAM.to_string(),
            cli_args: cli.resolve()?,
            notification,
            hide_stdout: false,
        })
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_hide_stdout(mut self, hide_stdout: bool) -> Self {
        self.hide_stdout = hide_stdout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn cli_args(&self) -> &[String] {
        &self.cli_args
    }

    pub fn notification(&self) -> NotificationMode {
        self.notification
    }

    pub fn hide_stdout(&self) -> bool {
        self.hide_stdout
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            cli_args: Vec::new(),
            notification: NotificationMode::default(),
            hide_stdout: false,
        }
    }
}
