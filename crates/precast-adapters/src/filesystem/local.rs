//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use precast_core::{application::ports::Filesystem, error::PrecastResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn ensure_dir(&self, path: &Path) -> PrecastResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PrecastResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> PrecastResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy(&self, src: &Path, dst: &Path) -> PrecastResult<()> {
        std::fs::copy(src, dst)
            .map(|_| ())
            .map_err(|e| map_io_error(src, e, "copy file"))
    }

    fn remove_dir_all(&self, path: &Path) -> PrecastResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> precast_core::error::PrecastError {
    use precast_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
