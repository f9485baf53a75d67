//! Subprocess execution for vendor CLI commands.

use crate::error::{ExporterError, Result};
use crate::navi::command::VendorCommand;
use std::future::Future;
use tokio::process::Command;
use tracing::debug;

/// Executes a [`VendorCommand`] and returns its standard output.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    fn run(&self, command: &VendorCommand) -> impl Future<Output = Result<String>> + Send;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &VendorCommand) -> Result<String> {
        debug!("Running {}: {}", command.label, command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExporterError::command_error(
                command.label,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            ExporterError::parse_error(format!("{} output is not UTF-8: {}", command.label, e))
        })?;

        Ok(command.filter.apply(&stdout))
    }
}
