use thiserror::Error;

use crate::core::document::DocumentId;
use crate::io::IoError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("document {0} is not open in this session")]
    NotFound(DocumentId),

    /// The document is open but the presentation layer holds no buffer for it.
    #[error("no buffer content available for document {0}")]
    MissingBuffer(DocumentId),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("save failed: {0}")]
    Io(#[from] IoError),
}

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("open failed: {0}")]
    Io(#[from] IoError),
}

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("I/O error while reading keymap at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keymap JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

impl SaveError {
    /// Returns whether the failure came from the user dismissing path selection.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Io(IoError::Cancelled))
    }
}

impl OpenError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Io(IoError::Cancelled))
    }
}
