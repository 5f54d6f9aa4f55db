//! Document-session state machine for tabbed text editors.
//!
//! Invariant: a [`Session`] is never empty, and a document's saved fingerprint only moves on
//! create, open, and successful save.
//!
//! # Public API Overview
//! - [`Session`] owns the open documents in tab order and the active one.
//! - [`policy`] derives dirty state and tab labels and gates close and quit behind a
//!   caller-supplied confirmation.
//! - [`io`] is the boundary to path selection and storage.
//! - [`Workbench`] maps UI events onto all of the above for a front end implementing [`Host`].

pub mod config;
pub mod logging;

pub mod core;
pub mod io;
pub mod policy;
pub mod session;
pub mod workbench;

/// Document model.
pub use crate::core::document::{Document, DocumentId, UNTITLED};
/// Error kinds.
pub use crate::core::error::{KeymapError, OpenError, SaveError, SessionError};
/// Content digest used for change detection.
pub use crate::core::fingerprint::Fingerprint;
/// Keybinding configuration and default mappings.
pub use crate::core::keybindings::{
    normalize_key, KeyBinding, KeyId, KeybindingsConfig, KeybindingsManager, SessionAction,
    DEFAULT_SESSION_KEYBINDINGS,
};
/// Storage seam.
pub use crate::io::{basename, DocumentStore, FsStore, IoError};
/// Transition policy.
pub use crate::policy::{
    display_title, is_dirty, request_close, request_quit, Decision, Prompt, CONFIRM_CLOSE,
    CONFIRM_QUIT, DIRTY_MARKER,
};
pub use crate::session::{Removal, Session};
pub use crate::workbench::{Host, TabEvent, Workbench};
