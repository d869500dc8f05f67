//! Settings snapshot.

use std::path::Path;

use calc_core::CapabilitySettings;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Complete, immutable copy of the administrator's settings.
///
/// ```toml
/// calculator_enabled = true
///
/// [capabilities]
/// sin = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    /// Global switch, checked by the UI before any key reaches the dispatcher.
    pub calculator_enabled: bool,
    pub capabilities: CapabilitySettings,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            calculator_enabled: true,
            capabilities: CapabilitySettings::default(),
        }
    }
}

impl SettingsSnapshot {
    #[must_use]
    pub fn new(calculator_enabled: bool, capabilities: CapabilitySettings) -> Self {
        Self {
            calculator_enabled,
            capabilities,
        }
    }

    /// Parse TOML text. `path` is only used for error reporting.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|err| SettingsError::Parse {
            format: "TOML",
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }

    /// Parse JSON text. `path` is only used for error reporting.
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| SettingsError::Parse {
            format: "JSON",
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| SettingsError::Serialize { source })
    }

    /// Effective state of every well-known capability key.
    pub fn effective_flags(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        calc_core::keys::ALL
            .iter()
            .map(|key| (*key, self.capabilities.is_enabled(key)))
    }
}
