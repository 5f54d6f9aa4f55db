//! The ordered set of open documents and which one is active.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::document::{Document, DocumentId, UNTITLED};
use crate::core::error::{OpenError, SaveError, SessionError};
use crate::io::{basename, IoError};

/// Result of removing a document from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub removed: DocumentId,
    /// Fresh untitled document created because the removed one was the last.
    pub replacement: Option<DocumentId>,
    pub active: DocumentId,
}

/// Open documents in tab order.
///
/// Invariant: never empty, and `active` always names a member.
#[derive(Debug, Clone)]
pub struct Session {
    documents: IndexMap<DocumentId, Document>,
    active: DocumentId,
    next_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a session holding one empty untitled document.
    pub fn new() -> Self {
        let first = DocumentId::from_raw(1);
        let mut documents = IndexMap::new();
        documents.insert(first, Document::new(first, UNTITLED.to_string(), ""));
        debug!(doc_id = %first, "session started");

        Self {
            documents,
            active: first,
            next_id: 2,
        }
    }

    /// Appends a document whose saved state is `content` and makes it active.
    pub fn create(&mut self, content: &str, title: impl Into<String>) -> DocumentId {
        let id = DocumentId::from_raw(self.next_id);
        self.next_id += 1;

        let document = Document::new(id, title.into(), content);
        debug!(doc_id = %id, title = document.title(), "document created");
        self.documents.insert(id, document);
        self.active = id;
        id
    }

    pub fn create_untitled(&mut self) -> DocumentId {
        self.create("", UNTITLED)
    }

    pub fn activate(&mut self, id: DocumentId) -> Result<(), SessionError> {
        if !self.documents.contains_key(&id) {
            return Err(SessionError::NotFound(id));
        }

        self.active = id;
        debug!(doc_id = %id, "document activated");
        Ok(())
    }

    pub fn document(&self, id: DocumentId) -> Result<&Document, SessionError> {
        self.documents.get(&id).ok_or(SessionError::NotFound(id))
    }

    /// Removes `id`. When it is the last document, the untitled replacement is created before
    /// the removal so the session never holds zero documents.
    pub fn remove(&mut self, id: DocumentId) -> Result<Removal, SessionError> {
        let Some(index) = self.documents.get_index_of(&id) else {
            return Err(SessionError::NotFound(id));
        };

        let replacement = if self.documents.len() == 1 {
            Some(self.create_untitled())
        } else {
            None
        };

        self.documents.shift_remove_index(index);

        if self.active == id {
            // Prefer the right neighbour, which now sits at `index`.
            let neighbour = index.min(self.documents.len() - 1);
            if let Some((next, _)) = self.documents.get_index(neighbour) {
                self.active = *next;
            }
        }

        debug!(doc_id = %id, active = %self.active, replaced = replacement.is_some(), "document removed");
        Ok(Removal {
            removed: id,
            replacement,
            active: self.active,
        })
    }

    /// Marks `id` as saved with `current_content` once `writer` reports where it was written.
    ///
    /// `writer` performs path selection and the write itself. Any failure leaves the document
    /// exactly as it was, so a failed save never clears the dirty marker.
    pub fn save_document<W>(
        &mut self,
        id: DocumentId,
        current_content: &str,
        writer: W,
    ) -> Result<(), SaveError>
    where
        W: FnOnce(&str) -> Result<PathBuf, IoError>,
    {
        if !self.documents.contains_key(&id) {
            return Err(SessionError::NotFound(id).into());
        }

        let path = match writer(current_content) {
            Ok(path) => path,
            Err(err) => {
                warn!(doc_id = %id, error = %err, "save abandoned");
                return Err(err.into());
            }
        };

        let document = self
            .documents
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;
        document.mark_persisted(basename(&path), path, current_content);
        debug!(doc_id = %id, title = document.title(), "document saved");
        Ok(())
    }

    /// Opens a new tab from whatever `reader` loads. Never merges into an existing tab.
    pub fn open_document<R>(&mut self, reader: R) -> Result<DocumentId, OpenError>
    where
        R: FnOnce() -> Result<(PathBuf, String), IoError>,
    {
        let (path, content) = match reader() {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(error = %err, "open abandoned");
                return Err(err.into());
            }
        };

        let id = self.create(&content, basename(&path));
        if let Some(document) = self.documents.get_mut(&id) {
            document.set_path(path);
        }
        Ok(id)
    }

    pub fn active_id(&self) -> DocumentId {
        self.active
    }

    pub fn active(&self) -> &Document {
        &self.documents[&self.active]
    }

    /// Documents in tab order.
    pub fn documents(&self) -> impl ExactSizeIterator<Item = &Document> + '_ {
        self.documents.values()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Zero-based tab position of `id`.
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.get_index_of(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }
}
