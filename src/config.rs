//! Config file loading and merging with command-line overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{json_type_name, RunnerError};
use crate::notify::CommandNotifier;
use crate::options::{CliSpec, NotificationMode, RunOptions};

pub const CONFIG_ENV: &str = "RUBOCOP_GUARD_CONFIG";

/// On-disk config. Loosely typed keys are validated when resolved.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub cli: Value,
    #[serde(default)]
    pub notification: Value,
    #[serde(default)]
    pub hide_stdout: bool,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub notifier: Value,
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub cli: Option<String>,
    pub notification: Option<NotificationMode>,
    pub hide_stdout: Option<bool>,
    pub program: Option<String>,
    pub notifier: Option<String>,
}

pub struct ResolvedConfig {
    pub options: RunOptions,
    pub notifier: Option<CommandNotifier>,
}

/// `explicit`, then `$RUBOCOP_GUARD_CONFIG`, then the user config dir.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("rubocop-guard").join("config.json"))
        .filter(|path| path.is_file())
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn resolve(file: &FileConfig, overrides: &Overrides) -> Result<ResolvedConfig> {
    let cli = match &overrides.cli {
        Some(raw) => CliSpec::RawString(raw.clone()),
        None => CliSpec::from_value(&file.cli)?,
    };
    let notification = match overrides.notification {
        Some(mode) => mode,
        None => NotificationMode::from_value(&file.notification)?,
    };
    let mut options = RunOptions::new(&cli, notification)
        .context("resolve cli option")?
        .with_hide_stdout(overrides.hide_stdout.unwrap_or(file.hide_stdout));
    if let Some(program) = overrides.program.as_ref().or(file.program.as_ref()) {
        options = options.with_program(program.clone());
    }

    let notifier = match &overrides.notifier {
        Some(command) => Some(CommandNotifier::parse(command)?),
        None => notifier_from_value(&file.notifier)?,
    };
    Ok(ResolvedConfig { options, notifier })
}

fn notifier_from_value(value: &Value) -> Result<Option<CommandNotifier>, RunnerError> {
    match value {
        Value::Null => Ok(None),
        Value::String(command) => CommandNotifier::parse(command).map(Some),
        Value::Array(_) => {
            let argv: Vec<String> =
                serde_json::from_value(value.clone()).map_err(|_| invalid_notifier(value))?;
            CommandNotifier::new(argv).map(Some)
        }
        other => Err(invalid_notifier(other)),
    }
}

fn invalid_notifier(value: &Value) -> RunnerError {
    RunnerError::InvalidOptionType {
        option: "notifier",
        expected: "string, array of strings, or null",
        actual: json_type_name(value),
    }
}
