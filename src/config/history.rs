//! History storage configuration.

use serde::Deserialize;

/// Default number of chat lines retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Which history store backs `/history`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// In-process ring buffer, lost on restart.
    #[default]
    Memory,
    /// Embedded redb database file.
    Redb,
    /// History disabled.
    None,
}

/// History configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Backend type: "memory", "redb", "none".
    #[serde(default)]
    pub backend: HistoryBackend,
    /// Path to the redb file (redb backend only).
    #[serde(default = "default_history_path")]
    pub path: String,
    /// Number of most recent chat lines kept (default: 50).
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::default(),
            path: default_history_path(),
            capacity: default_capacity(),
        }
    }
}

fn default_history_path() -> String {
    "history.redb".to_string()
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_are_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: HistoryBackend,
        }
        let w: Wrapper = toml::from_str(r#"backend = "none""#).unwrap();
        assert_eq!(w.backend, HistoryBackend::None);
        assert!(toml::from_str::<Wrapper>(r#"backend = "sqlite""#).is_err());
    }
}
