//! User-visible rejection notices.

use std::fmt;

use calc_core::{BaseMode, CalculatorMode};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Short message shown to the user when a key press is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
        }
    }

    /// A function or group was switched off.
    #[must_use]
    pub fn function_disabled(capability: &str) -> Self {
        Self::new(
            "Function disabled",
            format!("{capability} is disabled by the administrator"),
            NoticeKind::Error,
        )
    }

    /// The whole calculator mode was switched off.
    #[must_use]
    pub fn mode_disabled(mode: CalculatorMode) -> Self {
        Self::new(
            "Mode disabled",
            format!("{mode} mode is disabled by the administrator"),
            NoticeKind::Error,
        )
    }

    /// The calculator as a whole was switched off.
    #[must_use]
    pub fn calculator_disabled() -> Self {
        Self::new(
            "Calculator disabled",
            "The calculator is disabled by the administrator",
            NoticeKind::Error,
        )
    }

    /// `digit` cannot be entered in `base`.
    #[must_use]
    pub fn invalid_digit(digit: char, base: BaseMode) -> Self {
        let valid = match base {
            BaseMode::Bin => "0-1",
            BaseMode::Oct => "0-7",
            BaseMode::Dec => "0-9",
            BaseMode::Hex => "0-9 and A-F",
        };
        Self::new(
            "Invalid digit",
            format!(
                "{} is not valid: only {valid} are valid in {} mode",
                digit.to_ascii_uppercase(),
                base.name()
            ),
            NoticeKind::Warning,
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
