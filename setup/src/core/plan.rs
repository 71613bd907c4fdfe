//! The fixed setup sequence as plain data.
//!
//! Building the plan is separate from running it so the step order, working
//! directories, and operator messages can be checked without side effects.

use std::path::PathBuf;

/// One mutating step of the setup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run a single command; failure aborts the setup.
    Command {
        announce: String,
        command: String,
        workdir: PathBuf,
    },
    /// Run installer commands in order until one succeeds.
    Install {
        announce: String,
        attempts: Vec<String>,
        workdir: PathBuf,
    },
    /// Replace `destination` with a copy of `source`.
    ReplaceDir {
        announce: String,
        source: PathBuf,
        destination: PathBuf,
    },
}

impl Step {
    /// Operator-facing line printed before the step starts.
    pub fn announce(&self) -> &str {
        match self {
            Step::Command { announce, .. }
            | Step::Install { announce, .. }
            | Step::ReplaceDir { announce, .. } => announce,
        }
    }
}

/// Ordered steps plus what the final run instruction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPlan {
    pub steps: Vec<Step>,
    /// Interpreter candidates, probed in order after all steps succeed.
    pub interpreters: Vec<String>,
    /// Script path shown in the final instruction, relative to the root.
    pub script: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announce_reads_every_variant() {
        let steps = [
            Step::Command {
                announce: "a".to_string(),
                command: "true".to_string(),
                workdir: PathBuf::from("."),
            },
            Step::Install {
                announce: "b".to_string(),
                attempts: vec!["true".to_string()],
                workdir: PathBuf::from("."),
            },
            Step::ReplaceDir {
                announce: "c".to_string(),
                source: PathBuf::from("x"),
                destination: PathBuf::from("y"),
            },
        ];
        let lines: Vec<&str> = steps.iter().map(Step::announce).collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
