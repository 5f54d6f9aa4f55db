//! Dirty detection and confirmation gating for close and quit.
//!
//! Everything here is a pure function of a document's saved fingerprint and a snapshot of its
//! live buffer. The only side effect is the caller-supplied `confirm` prompt.

use tracing::trace;

use crate::core::document::{Document, DocumentId};
use crate::session::Session;

/// Appended to a tab label while its buffer differs from the saved content.
pub const DIRTY_MARKER: char = '*';

/// Outcome of a confirmation-gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

impl Decision {
    pub fn is_proceed(self) -> bool {
        self == Decision::Proceed
    }
}

/// Text of a yes/no confirmation shown before changes are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub message: &'static str,
}

pub const CONFIRM_CLOSE: Prompt = Prompt {
    title: "Unsaved changes",
    message: "you have unsaved changes, are you sure you want to close this tab?",
};

pub const CONFIRM_QUIT: Prompt = Prompt {
    title: "Unsaved changes",
    message: "you have unsaved changes, are you sure you want to quit?",
};

pub fn is_dirty(doc: &Document, current_content: &str) -> bool {
    let dirty = !doc.saved_fingerprint().matches(current_content);
    trace!(doc_id = %doc.id(), dirty, "dirty check");
    dirty
}

/// Tab label: the base title, plus a single [`DIRTY_MARKER`] while dirty.
pub fn display_title(doc: &Document, current_content: &str) -> String {
    if is_dirty(doc, current_content) {
        format!("{}{}", doc.title(), DIRTY_MARKER)
    } else {
        doc.title().to_string()
    }
}

/// Gates closing `doc`. `confirm` runs only when there is something to lose.
pub fn request_close<F>(doc: &Document, current_content: &str, confirm: F) -> Decision
where
    F: FnOnce() -> bool,
{
    gate(is_dirty(doc, current_content), confirm)
}

/// Gates quitting. `snapshot` yields each document's live content; a document without a
/// snapshot counts as dirty.
pub fn request_quit<S, F>(session: &Session, mut snapshot: S, confirm: F) -> Decision
where
    S: FnMut(DocumentId) -> Option<String>,
    F: FnOnce() -> bool,
{
    let any_dirty = session.documents().any(|doc| match snapshot(doc.id()) {
        Some(content) => is_dirty(doc, &content),
        None => true,
    });
    gate(any_dirty, confirm)
}

fn gate<F>(dirty: bool, confirm: F) -> Decision
where
    F: FnOnce() -> bool,
{
    if !dirty || confirm() {
        Decision::Proceed
    } else {
        Decision::Abort
    }
}
