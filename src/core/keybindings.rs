//! Session command keybindings.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::core::error::KeymapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    NewDocument,
    OpenDocument,
    SaveDocument,
    CloseTab,
    Quit,
    About,
}

impl SessionAction {
    /// Resolution order when two actions claim the same key.
    pub const ALL: [SessionAction; 6] = [
        SessionAction::NewDocument,
        SessionAction::OpenDocument,
        SessionAction::SaveDocument,
        SessionAction::CloseTab,
        SessionAction::Quit,
        SessionAction::About,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SessionAction::NewDocument => "New",
            SessionAction::OpenDocument => "Open",
            SessionAction::SaveDocument => "Save",
            SessionAction::CloseTab => "Close tab",
            SessionAction::Quit => "Exit",
            SessionAction::About => "About",
        }
    }
}

pub type KeyId = String;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl KeyBinding {
    fn into_keys(self) -> Vec<KeyId> {
        match self {
            KeyBinding::Single(key) => vec![key],
            KeyBinding::Multiple(keys) => keys,
        }
    }
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

/// Overrides applied on top of [`DEFAULT_SESSION_KEYBINDINGS`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct KeybindingsConfig {
    entries: HashMap<SessionAction, KeyBinding>,
}

impl KeybindingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: SessionAction, keys: K) {
        self.entries.insert(action, keys.into());
    }

    /// Parses `{"save_document": ["ctrl+s", "f2"], "quit": "ctrl+w"}`.
    pub fn from_json_str(json: &str) -> Result<Self, KeymapError> {
        serde_json::from_str(json).map_err(KeymapError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, KeymapError> {
        let json = std::fs::read_to_string(path).map_err(|source| KeymapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

pub static DEFAULT_SESSION_KEYBINDINGS: LazyLock<HashMap<SessionAction, Vec<KeyId>>> =
    LazyLock::new(|| {
        use SessionAction::*;

        let mut map = HashMap::new();
        map.insert(NewDocument, vec!["ctrl+n".to_string()]);
        map.insert(OpenDocument, vec!["ctrl+o".to_string()]);
        map.insert(SaveDocument, vec!["ctrl+s".to_string()]);
        map.insert(CloseTab, vec!["ctrl+q".to_string()]);
        map.insert(Quit, Vec::new());
        map.insert(About, vec!["f1".to_string()]);
        map
    });

/// Canonical form of a key id: lowercase, modifiers in `ctrl+alt+shift` order.
pub fn normalize_key(key: &str) -> Option<KeyId> {
    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;
    let mut base: Option<String> = None;

    for part in key.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "" => return None,
            "ctrl" | "control" => ctrl = true,
            "alt" | "meta" => alt = true,
            "shift" => shift = true,
            other => {
                if base.replace(other.to_string()).is_some() {
                    return None;
                }
            }
        }
    }

    let base = base?;
    let mut normalized = String::new();
    for (enabled, name) in [(ctrl, "ctrl+"), (alt, "alt+"), (shift, "shift+")] {
        if enabled {
            normalized.push_str(name);
        }
    }
    normalized.push_str(&base);
    Some(normalized)
}

pub struct KeybindingsManager {
    action_to_keys: HashMap<SessionAction, Vec<KeyId>>,
}

impl Default for KeybindingsManager {
    fn default() -> Self {
        Self::new(KeybindingsConfig::default())
    }
}

impl KeybindingsManager {
    pub fn new(config: KeybindingsConfig) -> Self {
        let mut manager = Self {
            action_to_keys: HashMap::new(),
        };
        manager.build_maps(config);
        manager
    }

    fn build_maps(&mut self, config: KeybindingsConfig) {
        self.action_to_keys.clear();

        for (action, keys) in DEFAULT_SESSION_KEYBINDINGS.iter() {
            self.action_to_keys
                .insert(*action, keys.iter().filter_map(|key| normalize_key(key)).collect());
        }

        for (action, binding) in config.entries {
            let keys = binding
                .into_keys()
                .iter()
                .filter_map(|key| normalize_key(key))
                .collect();
            self.action_to_keys.insert(action, keys);
        }
    }

    pub fn matches(&self, key: &str, action: SessionAction) -> bool {
        let Some(key) = normalize_key(key) else {
            return false;
        };
        self.action_to_keys
            .get(&action)
            .is_some_and(|keys| keys.contains(&key))
    }

    /// Action bound to `key`, first in [`SessionAction::ALL`] order on conflicts.
    pub fn resolve(&self, key: &str) -> Option<SessionAction> {
        let key = normalize_key(key)?;
        SessionAction::ALL.into_iter().find(|action| {
            self.action_to_keys
                .get(action)
                .is_some_and(|keys| keys.contains(&key))
        })
    }

    pub fn get_keys(&self, action: SessionAction) -> Vec<KeyId> {
        self.action_to_keys.get(&action).cloned().unwrap_or_default()
    }

    pub fn set_config(&mut self, config: KeybindingsConfig) {
        self.build_maps(config);
    }
}
