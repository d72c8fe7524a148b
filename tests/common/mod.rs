//! Shared test utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use storyreel::ports::{ProcessOutput, ProcessPort};
use storyreel::DomainError;
use tempfile::TempDir;

/// Stand-in for the ffmpeg/ffprobe binaries.
///
/// Probe calls get `probe_stdout`, decode calls get `banner` on stderr, and
/// encode calls (those carrying `-filter_complex`) pop `encode_exits` in order.
pub struct FakeTools {
    pub probe_stdout: String,
    pub banner: String,
    encode_exits: Mutex<Vec<i32>>,
    pub calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeTools {
    pub fn new(probe_stdout: &str, encode_exits: Vec<i32>) -> Self {
        Self {
            probe_stdout: probe_stdout.to_string(),
            banner: String::new(),
            encode_exits: Mutex::new(encode_exits.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_banner(mut self, banner: &str) -> Self {
        self.banner = banner.to_string();
        self
    }

    pub fn encode_calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, args)| args.iter().any(|a| a == "-filter_complex"))
            .map(|(_, args)| args.clone())
            .collect()
    }

    pub fn programs(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl ProcessPort for FakeTools {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));

        let name = program.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.contains("ffprobe") {
            return Ok(ProcessOutput {
                exit_code: Some(0),
                stdout: self.probe_stdout.clone(),
                stderr: String::new(),
            });
        }
        if args.iter().any(|a| a == "-filter_complex") {
            let code = self.encode_exits.lock().unwrap().pop().unwrap_or(1);
            return Ok(ProcessOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr: format!("encoder exited with {}", code),
            });
        }
        Ok(ProcessOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: self.banner.clone(),
        })
    }
}

/// Placeholder media files in a temporary directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    /// Create a file with dummy content and return its path
    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, b"fake media data").expect("write fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
