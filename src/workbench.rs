//! Event-level controller tying the session, the policy and the I/O boundary together.
//!
//! A front end forwards each UI event (key press, menu command) to one [`Workbench`] method.
//! The workbench never renders; it reports what changed through [`Host::on_tab_event`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::document::DocumentId;
use crate::core::error::{OpenError, SaveError, SessionError};
use crate::core::keybindings::SessionAction;
use crate::io::{DocumentStore, IoError};
use crate::policy::{self, Decision, Prompt, CONFIRM_CLOSE, CONFIRM_QUIT};
use crate::session::Session;

pub const ABOUT_TEXT: &str =
    "This application is a simple text editor which allows you to create, edit and save multiple tabs / files";
pub const SAVE_FAILED_STATUS: &str = "save operation unsuccessful";
pub const OPEN_FAILED_STATUS: &str = "open operation unsuccessful";

/// Tab-level change reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// A tab was added; its buffer starts out holding `content`.
    Opened {
        id: DocumentId,
        title: String,
        content: String,
    },
    Retitled {
        id: DocumentId,
        title: String,
    },
    Closed {
        id: DocumentId,
    },
    Activated {
        id: DocumentId,
    },
    Status(String),
}

/// Collaborators supplied by the presentation layer.
pub trait Host {
    /// Modal yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> bool;
    /// `None` means the user cancelled.
    fn choose_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf>;
    fn choose_open_path(&mut self) -> Option<PathBuf>;
    /// Current content of the buffer behind `id`; `None` when the host never received the
    /// matching [`TabEvent::Opened`].
    fn snapshot(&self, id: DocumentId) -> Option<String>;
    fn on_tab_event(&mut self, event: TabEvent);
}

pub struct Workbench<S> {
    session: Session,
    store: S,
    labels: HashMap<DocumentId, String>,
    started: bool,
    should_exit: bool,
}

impl<S: DocumentStore> Workbench<S> {
    pub fn new(store: S) -> Self {
        Self {
            session: Session::new(),
            store,
            labels: HashMap::new(),
            started: false,
            should_exit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once a quit request was allowed to proceed.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Announces the startup tab, plus any tab the host has not heard of yet. Only the first
    /// call has any effect.
    pub fn start(&mut self, host: &mut impl Host) {
        if self.started {
            return;
        }
        self.started = true;
        let unannounced: Vec<DocumentId> = self
            .session
            .ids()
            .filter(|id| !self.labels.contains_key(id))
            .collect();
        for id in unannounced {
            self.announce_opened(host, id, String::new());
        }
        host.on_tab_event(TabEvent::Activated {
            id: self.session.active_id(),
        });
    }

    pub fn new_document(&mut self, host: &mut impl Host) -> DocumentId {
        let id = self.session.create_untitled();
        self.announce_opened(host, id, String::new());
        host.on_tab_event(TabEvent::Activated { id });
        id
    }

    pub fn open_document(&mut self, host: &mut impl Host) -> Result<DocumentId, OpenError> {
        let loaded = match host.choose_open_path() {
            Some(path) => self.store.read(&path).map(|content| (path, content)),
            None => Err(IoError::Cancelled),
        };
        let content = loaded
            .as_ref()
            .map(|(_, content)| content.clone())
            .unwrap_or_default();

        match self.session.open_document(|| loaded) {
            Ok(id) => {
                self.announce_opened(host, id, content);
                host.on_tab_event(TabEvent::Activated { id });
                Ok(id)
            }
            Err(err) => {
                host.on_tab_event(TabEvent::Status(OPEN_FAILED_STATUS.to_string()));
                Err(err)
            }
        }
    }

    /// Saves whichever document is active at the time of the call.
    pub fn save_active(&mut self, host: &mut impl Host) -> Result<(), SaveError> {
        let id = self.session.active_id();
        self.save(host, id)
    }

    pub fn save(&mut self, host: &mut impl Host, id: DocumentId) -> Result<(), SaveError> {
        let suggested = self.session.document(id)?.path().map(Path::to_path_buf);
        let content = host.snapshot(id).ok_or(SessionError::MissingBuffer(id))?;

        let store = &mut self.store;
        let result = self.session.save_document(id, &content, |content| {
            let path = host
                .choose_save_path(suggested.as_deref())
                .ok_or(IoError::Cancelled)?;
            store.write(&path, content)?;
            Ok(path)
        });

        match result {
            Ok(()) => {
                self.refresh_label(host, id, &content)?;
                Ok(())
            }
            Err(err) => {
                host.on_tab_event(TabEvent::Status(SAVE_FAILED_STATUS.to_string()));
                Err(err)
            }
        }
    }

    /// Re-derives the tab label after the buffer behind `id` changed.
    pub fn buffer_changed(&mut self, host: &mut impl Host, id: DocumentId) -> Result<(), SessionError> {
        let content = host.snapshot(id).ok_or(SessionError::MissingBuffer(id))?;
        self.refresh_label(host, id, &content)
    }

    pub fn activate(&mut self, host: &mut impl Host, id: DocumentId) -> Result<(), SessionError> {
        self.session.activate(id)?;
        host.on_tab_event(TabEvent::Activated { id });
        Ok(())
    }

    pub fn close_active(&mut self, host: &mut impl Host) -> Result<Decision, SessionError> {
        let id = self.session.active_id();
        self.close(host, id)
    }

    /// Closes `id` unless the user declines to lose unsaved changes. Closing the last tab
    /// opens a fresh untitled one before the close is reported.
    pub fn close(&mut self, host: &mut impl Host, id: DocumentId) -> Result<Decision, SessionError> {
        let document = self.session.document(id)?;
        let decision = match host.snapshot(id) {
            Some(content) => {
                policy::request_close(document, &content, || host.confirm(&CONFIRM_CLOSE))
            }
            None => {
                if host.confirm(&CONFIRM_CLOSE) {
                    Decision::Proceed
                } else {
                    Decision::Abort
                }
            }
        };

        if decision == Decision::Abort {
            debug!(doc_id = %id, "close aborted");
            return Ok(decision);
        }

        let removal = self.session.remove(id)?;
        self.labels.remove(&id);
        if let Some(replacement) = removal.replacement {
            self.announce_opened(host, replacement, String::new());
        }
        host.on_tab_event(TabEvent::Closed { id });
        host.on_tab_event(TabEvent::Activated { id: removal.active });
        Ok(decision)
    }

    pub fn request_quit(&mut self, host: &mut impl Host) -> Decision {
        let mut snapshots: HashMap<DocumentId, String> = self
            .session
            .ids()
            .filter_map(|id| host.snapshot(id).map(|content| (id, content)))
            .collect();

        let decision = policy::request_quit(
            &self.session,
            |id| snapshots.remove(&id),
            || host.confirm(&CONFIRM_QUIT),
        );
        if decision.is_proceed() {
            self.should_exit = true;
        }
        debug!(?decision, "quit requested");
        decision
    }

    /// Runs the command bound to a menu entry or shortcut.
    pub fn dispatch(&mut self, host: &mut impl Host, action: SessionAction) {
        match action {
            SessionAction::NewDocument => {
                self.new_document(host);
            }
            SessionAction::OpenDocument => {
                if let Err(err) = self.open_document(host) {
                    warn!(error = %err, "open command failed");
                }
            }
            SessionAction::SaveDocument => {
                if let Err(err) = self.save_active(host) {
                    warn!(error = %err, "save command failed");
                }
            }
            SessionAction::CloseTab => {
                if let Err(err) = self.close_active(host) {
                    warn!(error = %err, "close command failed");
                }
            }
            SessionAction::Quit => {
                self.request_quit(host);
            }
            SessionAction::About => {
                host.on_tab_event(TabEvent::Status(ABOUT_TEXT.to_string()));
            }
        }
    }

    fn announce_opened(&mut self, host: &mut impl Host, id: DocumentId, content: String) {
        let Ok(document) = self.session.document(id) else {
            return;
        };
        let title = document.title().to_string();
        self.labels.insert(id, title.clone());
        host.on_tab_event(TabEvent::Opened { id, title, content });
    }

    fn refresh_label(
        &mut self,
        host: &mut impl Host,
        id: DocumentId,
        content: &str,
    ) -> Result<(), SessionError> {
        let title = policy::display_title(self.session.document(id)?, content);
        if self.labels.get(&id) == Some(&title) {
            return Ok(());
        }

        self.labels.insert(id, title.clone());
        host.on_tab_event(TabEvent::Retitled { id, title });
        Ok(())
    }
}
