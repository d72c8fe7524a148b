// Local filesystem adapter

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Filesystem adapter over `std::fs`
#[derive(Debug, Clone, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FsPort for LocalFsAdapter {
    fn file_exists(&self, file_path: &Path) -> bool {
        file_path.is_file()
    }

    fn prepare_output(&self, file_path: &Path) -> Result<(), DomainError> {
        let parent = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };
        if parent.is_dir() {
            return Ok(());
        }

        debug!("Creating output directory {}", parent.display());
        fs::create_dir_all(parent).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })
    }
}
