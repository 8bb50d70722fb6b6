use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the runner. A non-zero tool exit is not one of them.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid type for `{option}` option: expected {expected}, got {actual}")]
    InvalidOptionType {
        option: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("failed to launch '{program}': {source}")]
    ProcessSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("malformed result file {}: {message}", path.display())]
    MalformedResult { path: PathBuf, message: String },

    #[error("notification failed: {message}")]
    Notification { message: String },

    #[error("temporary result file: {source}")]
    TempFile { source: std::io::Error },
}

impl RunnerError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedResult {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Short JSON type name used in option errors.
pub(crate) fn json_type_name(value: &serde_json::Value) -> String {
    let name = match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    };
    name.to_string()
}
