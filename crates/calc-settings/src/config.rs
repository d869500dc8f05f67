//! Local configuration: where settings come from and how they are polled.
//!
//! Stored as TOML in the user's config directory. Missing or unreadable
//! files fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};
use crate::retry::RetryPolicy;

// =============================================================================
// ROOT CONFIG
// =============================================================================

/// Refresh configuration.
///
/// ```toml
/// settings_path = "/srv/classroom/capabilities.toml"
/// poll_interval_ms = 5000
///
/// [retry]
/// max_retries = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Administrator settings file. Defaults to `capabilities.toml` next to
    /// the config file.
    pub settings_path: Option<PathBuf>,

    /// Time between refreshes, in milliseconds.
    pub poll_interval_ms: u64,

    /// Retry behavior for each refresh.
    pub retry: RetryPolicy,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            poll_interval_ms: 5000,
            retry: RetryPolicy::default(),
        }
    }
}

impl SettingsConfig {
    /// Load config from the default path.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| SettingsError::io("create directory for", parent, err))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|source| SettingsError::Serialize { source })?;

        std::fs::write(path, content).map_err(|err| SettingsError::io("write", path, err))
    }

    /// Get the default config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Settings file to poll.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(|| config_dir().join("capabilities.toml"))
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "ClassCalc", "classcalc")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SettingsConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, SettingsConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = \"soon\"").unwrap();
        assert_eq!(SettingsConfig::load_from(&path), SettingsConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = SettingsConfig {
            settings_path: Some(dir.path().join("caps.json")),
            poll_interval_ms: 250,
            retry: RetryPolicy::no_retry(),
        };
        config.save_to(&path).unwrap();

        let loaded = SettingsConfig::load_from(&path);
        assert_eq!(loaded, config);
        assert_eq!(loaded.settings_file(), dir.path().join("caps.json"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[retry]\nmax_retries = 1\n").unwrap();
        let config = SettingsConfig::load_from(&path);
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert_eq!(config.poll_interval_ms, 5000);
    }

    #[test]
    fn test_default_settings_file_sits_next_to_config() {
        let config = SettingsConfig::default();
        assert_eq!(
            config.settings_file().parent(),
            SettingsConfig::config_path().parent()
        );
    }
}
