//! Command executor for running external programs
//!
//! Programs are started directly with an argument vector; nothing goes
//! through a shell, so tokens and paths are never re-interpreted.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::{Error, Result};

/// Trait for executing external programs
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` in the given working directory and wait for it
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult>;
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Default command executor using tokio::process
pub struct ProcessCommandExecutor;

impl ProcessCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::generator(format!("Failed to execute '{program}': {e}")))?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Mock command executor for testing; records every invocation
#[cfg(test)]
pub struct MockCommandExecutor {
    pub result: CommandResult,
    pub calls: std::sync::Mutex<Vec<(String, Vec<String>)>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn with_result(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            result: CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        _working_dir: &Path,
    ) -> Result<CommandResult> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(self.result.clone())
    }
}
