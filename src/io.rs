//! I/O adapter boundary.
//!
//! The core never chooses paths or touches the filesystem on its own. Save and open take
//! closures that perform path selection plus the actual read/write, and the
//! [`DocumentStore`] trait is the seam the workbench uses to reach storage.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure of path selection, reading, or writing.
///
/// Cancellation and a missing file are deliberately the same kind of failure: either way the
/// operation is abandoned without touching session state.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("path selection was cancelled")]
    Cancelled,

    #[error("I/O error while reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Plain-text document storage.
pub trait DocumentStore {
    fn read(&mut self, path: &Path) -> Result<String, IoError>;
    fn write(&mut self, path: &Path, content: &str) -> Result<(), IoError>;
}

/// [`DocumentStore`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read(&mut self, path: &Path) -> Result<String, IoError> {
        fs::read_to_string(path).map_err(|source| IoError::read(path, source))
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<(), IoError> {
        fs::write(path, content).map_err(|source| IoError::write(path, source))
    }
}

/// Display name for a document stored at `path`.
pub fn basename(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::basename;

    #[test]
    fn basename_uses_final_component() {
        assert_eq!(basename(Path::new("/tmp/a.txt")), "a.txt");
        assert_eq!(basename(Path::new("notes")), "notes");
        assert_eq!(basename(Path::new("dir/sub/readme.md")), "readme.md");
    }

    #[test]
    fn basename_falls_back_to_full_path() {
        assert_eq!(basename(Path::new("/")), "/");
        assert_eq!(basename(Path::new("..")), "..");
    }
}
