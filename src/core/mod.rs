//! Core data model.

pub mod document;
pub mod error;
pub mod fingerprint;
pub mod keybindings;
