//! Per-tab document state.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::fingerprint::Fingerprint;

/// Title given to documents that have never been loaded or saved.
pub const UNTITLED: &str = "Untitled";

/// Stable identity of an open document, independent of its (mutable, non-unique) title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// One open tab.
///
/// The live buffer is owned by the presentation layer; a document only remembers the
/// fingerprint of what was last loaded or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    title: String,
    saved: Fingerprint,
    path: Option<PathBuf>,
}

impl Document {
    pub(crate) fn new(id: DocumentId, title: String, content: &str) -> Self {
        Self {
            id,
            title,
            saved: Fingerprint::compute(content),
            path: None,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Base display name, without any dirty marker.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn saved_fingerprint(&self) -> Fingerprint {
        self.saved
    }

    /// Path this document was last opened from or saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn mark_persisted(&mut self, title: String, path: PathBuf, content: &str) {
        self.title = title;
        self.saved = Fingerprint::compute(content);
        self.path = Some(path);
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }
}
