//! Line-oriented front end for `tabbed_session`.
//!
//! Plain input lines are typed into the active tab; lines starting with `/` are commands
//! (`/help` lists them). The shell owns every tab's buffer and answers the workbench's
//! prompts from the same input stream, so a whole editing session can be scripted.

pub mod commands;
pub mod shell;
pub mod tab_strip;
