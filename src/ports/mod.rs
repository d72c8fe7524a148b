// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::EncodeResult;
use crate::graph::GraphPlan;

/// Captured result of one finished external process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running external tools to completion
pub trait ProcessPort: Send + Sync {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is not an error here; only failing to start the
    /// process at all is reported as `DomainError::ProcessLaunch`.
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, DomainError>;
}

/// Port for media duration probing
pub trait ProbePort: Send + Sync {
    /// Duration of a media file in seconds
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// What the encoder is asked to produce
#[derive(Debug, Clone)]
pub struct EncodeJob {
    /// Encoder inputs in `-i` order: clips first, narration last
    pub inputs: Vec<PathBuf>,
    pub graph: GraphPlan,
    pub output: PathBuf,
}

/// Port for running the final encode
pub trait EncodePort: Send + Sync {
    /// Encode the job. A failed encode is an `Ok` result with `success == false`.
    fn encode(&self, job: &EncodeJob) -> Result<EncodeResult, DomainError>;
}

/// Port for file system operations
pub trait FsPort: Send + Sync {
    /// Check if file exists
    fn file_exists(&self, file_path: &Path) -> bool;

    /// Create the parent directory of `file_path` if needed
    fn prepare_output(&self, file_path: &Path) -> Result<(), DomainError>;
}
