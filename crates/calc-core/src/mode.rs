//! Calculator modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capability::keys;
use crate::error::ParseOperationError;

/// Which key layout and function set a calculator session exposes.
///
/// The state machine behaves identically in every mode; the mode only
/// decides which bindings the dispatcher offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    #[default]
    Standard,
    Scientific,
    Programmer,
}

impl CalculatorMode {
    pub const ALL: [CalculatorMode; 3] = [Self::Standard, Self::Scientific, Self::Programmer];

    /// Capability key that disables the whole mode.
    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Standard => keys::STANDARD_MODE,
            Self::Scientific => keys::SCIENTIFIC_MODE,
            Self::Programmer => keys::PROGRAMMER_MODE,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Scientific => "Scientific",
            Self::Programmer => "Programmer",
        }
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CalculatorMode {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "scientific" => Ok(Self::Scientific),
            "programmer" => Ok(Self::Programmer),
            _ => Err(ParseOperationError::unknown("mode", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("Programmer".parse(), Ok(CalculatorMode::Programmer));
        assert_eq!("scientific".parse(), Ok(CalculatorMode::Scientific));
        assert!("graphing".parse::<CalculatorMode>().is_err());
    }

    #[test]
    fn test_mode_capability_keys() {
        assert_eq!(CalculatorMode::Standard.capability_key(), "standard_mode");
        assert_eq!(CalculatorMode::Programmer.capability_key(), "programmer_mode");
    }
}
