//! Error types for the calculator core.
//!
//! The state machine itself never fails: numeric edge cases resolve to
//! sentinel values. Errors only arise when a UI label or raw number is
//! mapped onto the closed operation vocabulary.

use thiserror::Error;

/// A UI label or raw value did not name a known operation or mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOperationError {
    /// The label is not part of the vocabulary for `kind`.
    #[error("unknown {kind}: {label:?}")]
    UnknownLabel { kind: &'static str, label: String },

    /// The numeric value is not one of the supported settings for `kind`.
    #[error("unsupported {kind}: {value}")]
    UnsupportedValue { kind: &'static str, value: u32 },
}

impl ParseOperationError {
    pub(crate) fn unknown(kind: &'static str, label: &str) -> Self {
        Self::UnknownLabel {
            kind,
            label: label.to_string(),
        }
    }

    pub(crate) fn unsupported(kind: &'static str, value: u32) -> Self {
        Self::UnsupportedValue { kind, value }
    }
}

/// Result type alias for label parsing.
pub type Result<T> = std::result::Result<T, ParseOperationError>;
