//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const LOG_ENV: &str = "TABBED_SESSION_LOG";
pub const LOG_FILE_ENV: &str = "TABBED_SESSION_LOG_FILE";
pub const KEYMAP_ENV: &str = "TABBED_SESSION_KEYMAP";
pub const TAB_WIDTH_ENV: &str = "TABBED_SESSION_TAB_WIDTH";

pub const DEFAULT_TAB_WIDTH: usize = 24;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// `tracing` filter directive; logging stays off when unset.
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub keymap_path: Option<PathBuf>,
    pub tab_width: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            log_file: None,
            keymap_path: None,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_filter: env_string_opt(LOG_ENV),
            log_file: env_string_opt(LOG_FILE_ENV).map(PathBuf::from),
            keymap_path: env_string_opt(KEYMAP_ENV).map(PathBuf::from),
            tab_width: env_string_opt(TAB_WIDTH_ENV)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|width| *width > 0)
                .unwrap_or(DEFAULT_TAB_WIDTH),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{EnvConfig, DEFAULT_TAB_WIDTH, KEYMAP_ENV, LOG_ENV, LOG_FILE_ENV, TAB_WIDTH_ENV};
    use std::env;
    use std::path::Path;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults() {
        let _lock = env_lock();
        let _g1 = set_env_guard(LOG_ENV, None);
        let _g2 = set_env_guard(LOG_FILE_ENV, None);
        let _g3 = set_env_guard(KEYMAP_ENV, None);
        let _g4 = set_env_guard(TAB_WIDTH_ENV, None);

        let config = EnvConfig::from_env();
        assert!(config.log_filter.is_none());
        assert!(config.log_file.is_none());
        assert!(config.keymap_path.is_none());
        assert_eq!(config.tab_width, DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn env_values_are_picked_up() {
        let _lock = env_lock();
        let _g1 = set_env_guard(LOG_ENV, Some("tabbed_session=debug"));
        let _g2 = set_env_guard(LOG_FILE_ENV, Some("/tmp/tabs.log"));
        let _g3 = set_env_guard(KEYMAP_ENV, Some("/etc/tabs/keymap.json"));
        let _g4 = set_env_guard(TAB_WIDTH_ENV, Some(" 12 "));

        let config = EnvConfig::from_env();
        assert_eq!(config.log_filter.as_deref(), Some("tabbed_session=debug"));
        assert_eq!(config.log_file.as_deref(), Some(Path::new("/tmp/tabs.log")));
        assert_eq!(
            config.keymap_path.as_deref(),
            Some(Path::new("/etc/tabs/keymap.json"))
        );
        assert_eq!(config.tab_width, 12);
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard(LOG_ENV, Some("  "));
        let _g2 = set_env_guard(TAB_WIDTH_ENV, Some("0"));

        let config = EnvConfig::from_env();
        assert!(config.log_filter.is_none());
        assert_eq!(config.tab_width, DEFAULT_TAB_WIDTH);

        let _g3 = set_env_guard(TAB_WIDTH_ENV, Some("wide"));
        assert_eq!(EnvConfig::from_env().tab_width, DEFAULT_TAB_WIDTH);
    }
}
