//! Settings error types.
//!
//! Every failure carries a user-facing message and, where one exists, a
//! remediation hint. The refresher uses [`SettingsError::is_retryable`] to
//! decide whether another attempt can succeed.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Settings operation error.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File I/O error.
    #[error("Failed to {operation} settings file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content is not a valid snapshot.
    #[error("Invalid {format} in settings file: {path}")]
    Parse {
        format: &'static str,
        path: PathBuf,
        message: String,
    },

    /// Serializing settings for writing failed.
    #[error("Failed to serialize settings")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    /// A single fetch attempt took too long.
    #[error("Settings fetch timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },

    /// The source could not be reached.
    #[error("Settings source unavailable: {0}")]
    Unavailable(String),
}

impl SettingsError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io { source, .. } => !matches!(
                source.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::Timeout { .. } | Self::Unavailable(_) => true,
            Self::Parse { .. } | Self::Serialize { .. } => false,
        }
    }

    /// Get a user-friendly message for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {operation} the settings file at {}", path.display()),
            Self::Parse {
                format,
                path,
                message,
            } => format!(
                "The settings file at {} is not valid {format}: {message}",
                path.display()
            ),
            Self::Serialize { .. } => "An error occurred while saving the settings.".to_string(),
            Self::Timeout { after } => format!(
                "The settings source did not answer within {} seconds.",
                after.as_secs()
            ),
            Self::Unavailable(reason) => format!("The settings source is unavailable: {reason}"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Parse { .. } => Some(
                "Use `calculator_enabled = true|false` and a [capabilities] table of boolean flags."
                    .into(),
            ),
            Self::Serialize { .. } => None,
            Self::Timeout { .. } | Self::Unavailable(_) => {
                Some("The last known settings stay in effect; the next refresh will try again.".into())
            }
        }
    }
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
