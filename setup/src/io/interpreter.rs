//! Detection of a working interpreter command for the final run instruction.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use crate::error::SetupError;

/// Answers whether a program responds successfully to a version query.
pub trait VersionProbe {
    fn responds(&self, program: &str) -> bool;
}

/// Probe that runs `<program> --version` with all output discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl VersionProbe for CommandProbe {
    fn responds(&self, program: &str) -> bool {
        let status = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                debug!(program, err = %e, "probe could not spawn");
                false
            }
        }
    }
}

/// Return the first candidate that responds to the probe, in list order.
#[instrument(skip_all, fields(candidates = ?candidates))]
pub fn locate<P: VersionProbe>(candidates: &[String], probe: &P) -> Result<String, SetupError> {
    for candidate in candidates {
        if probe.responds(candidate) {
            debug!(interpreter = %candidate, "interpreter located");
            return Ok(candidate.clone());
        }
        debug!(candidate = %candidate, "candidate did not respond");
    }
    Err(SetupError::NoInterpreterFound {
        candidates: candidates.to_vec(),
    })
}
