//! Error types surfaced by the setup steps.
//!
//! Filesystem and config failures travel as `anyhow::Error` with path context;
//! only the failures callers branch on get a dedicated variant here.

use thiserror::Error;

/// Exit code reported when the shell itself could not be spawned.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// A child process exited non-zero or could not be spawned.
    #[error("command failed with exit code {exit_code}: {command}")]
    CommandFailure {
        /// The command string exactly as it was handed to the shell.
        command: String,
        exit_code: i32,
    },

    /// None of the interpreter candidates answered a version query.
    #[error("no interpreter found (tried {})", .candidates.join(", "))]
    NoInterpreterFound { candidates: Vec<String> },
}

impl SetupError {
    pub fn command_failure(command: &str, exit_code: i32) -> Self {
        Self::CommandFailure {
            command: command.to_string(),
            exit_code,
        }
    }
}
