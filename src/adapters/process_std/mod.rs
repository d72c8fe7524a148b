//! Blocking process runner backed by `std::process::Command`

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::ports::{ProcessOutput, ProcessPort};

/// Runs external tools to completion and captures their output
#[derive(Debug, Clone, Default)]
pub struct StdProcessAdapter;

impl StdProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPort for StdProcessAdapter {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, DomainError> {
        debug!("Running: {} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DomainError::ProcessLaunch {
                program: program.display().to_string(),
                reason: e.to_string(),
            })?;

        let result = ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            "{} exited with {:?} ({} bytes stderr)",
            program.display(),
            result.exit_code,
            result.stderr.len()
        );
        Ok(result)
    }
}
