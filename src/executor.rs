use std::process::Command;

use crate::command::CommandArgs;
use crate::error::RunnerError;

/// Runs a built command and reports whether it exited with status 0.
pub trait Executor {
    fn execute(&self, command: &CommandArgs) -> Result<bool, RunnerError>;
}

/// Blocking subprocess executor; stdout and stderr pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, command: &CommandArgs) -> Result<bool, RunnerError> {
        let status = Command::new(command.program())
            .args(command.args())
            .status()
            .map_err(|source| RunnerError::ProcessSpawn {
                program: command.program().to_string(),
                source,
            })?;
        tracing::debug!(status = %status, "rubocop exited");
        Ok(status.success())
    }
}
