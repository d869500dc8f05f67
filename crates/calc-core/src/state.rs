//! Calculator state.
//!
//! [`CalculatorState`] is the single aggregate the state machine transforms.
//! UIs read its fields; only [`crate::machine::transition`] produces new
//! values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseOperationError;
use crate::format;
use crate::numeric::word_mask;
use crate::ops::BinaryOp;

/// Interpretation of trigonometric input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Deg,
        }
    }

    /// Convert an angle expressed in this mode to radians.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Deg => (value * std::f64::consts::PI) / 180.0,
            Self::Rad => value,
        }
    }

    /// Convert an angle in radians to this mode.
    #[must_use]
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Deg => (radians * 180.0) / std::f64::consts::PI,
            Self::Rad => radians,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bit width used to mask programmer-mode values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WordSize {
    Byte,
    Word,
    #[default]
    DWord,
    QWord,
}

impl WordSize {
    pub const ALL: [WordSize; 4] = [Self::Byte, Self::Word, Self::DWord, Self::QWord];

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Word => 16,
            Self::DWord => 32,
            Self::QWord => 64,
        }
    }

    /// All-ones mask of this width.
    #[must_use]
    pub const fn mask(self) -> u64 {
        word_mask(self.bits())
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Byte => "BYTE",
            Self::Word => "WORD",
            Self::DWord => "DWORD",
            Self::QWord => "QWORD",
        }
    }
}

impl TryFrom<u32> for WordSize {
    type Error = ParseOperationError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::Byte),
            16 => Ok(Self::Word),
            32 => Ok(Self::DWord),
            64 => Ok(Self::QWord),
            other => Err(ParseOperationError::unsupported("word size", other)),
        }
    }
}

impl From<WordSize> for u32 {
    fn from(size: WordSize) -> Self {
        size.bits()
    }
}

impl fmt::Display for WordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric base used to parse and format the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BaseMode {
    Bin,
    Oct,
    #[default]
    Dec,
    Hex,
}

impl BaseMode {
    pub const ALL: [BaseMode; 4] = [Self::Hex, Self::Dec, Self::Oct, Self::Bin];

    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Bin => 2,
            Self::Oct => 8,
            Self::Dec => 10,
            Self::Hex => 16,
        }
    }

    /// Whether `digit` is a valid digit in this base (case-insensitive).
    #[must_use]
    pub fn accepts_digit(self, digit: char) -> bool {
        digit.is_digit(self.radix())
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bin => "BIN",
            Self::Oct => "OCT",
            Self::Dec => "DEC",
            Self::Hex => "HEX",
        }
    }

    /// Human name used in notices ("binary", "octal", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bin => "binary",
            Self::Oct => "octal",
            Self::Dec => "decimal",
            Self::Hex => "hexadecimal",
        }
    }
}

impl TryFrom<u32> for BaseMode {
    type Error = ParseOperationError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Self::Bin),
            8 => Ok(Self::Oct),
            10 => Ok(Self::Dec),
            16 => Ok(Self::Hex),
            other => Err(ParseOperationError::unsupported("base", other)),
        }
    }
}

impl From<BaseMode> for u32 {
    fn from(base: BaseMode) -> Self {
        base.radix()
    }
}

impl fmt::Display for BaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete calculator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Current operand text, representable in `base_mode`.
    pub display: String,
    /// Left operand of the pending binary operation.
    pub previous_value: Option<f64>,
    /// Pending operator; `Some` exactly while `previous_value` is `Some`.
    pub operation: Option<BinaryOp>,
    /// The next digit starts a fresh operand.
    pub waiting_for_operand: bool,
    /// Single memory register.
    pub memory: f64,
    /// Trace of the last operation, display only.
    pub history: String,
    /// UI pulse flag.
    pub is_animating: bool,
    pub angle_mode: AngleMode,
    pub word_size: WordSize,
    pub base_mode: BaseMode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous_value: None,
            operation: None,
            waiting_for_operand: false,
            memory: 0.0,
            history: String::new(),
            is_animating: false,
            angle_mode: AngleMode::default(),
            word_size: WordSize::default(),
            base_mode: BaseMode::default(),
        }
    }
}

impl CalculatorState {
    /// Fresh state with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric value of the display, read under `base_mode`.
    #[must_use]
    pub fn display_value(&self) -> f64 {
        format::parse_value(&self.display, self.base_mode)
    }

    /// Integer value of the display, read under `base_mode`.
    ///
    /// `None` when the display has no leading integer.
    #[must_use]
    pub fn display_integer(&self) -> Option<i128> {
        format::parse_integer(&self.display, self.base_mode)
    }

    /// Whole-number value of the display, read under `base_mode`.
    ///
    /// Exact inside `i128`, floating point beyond it. `None` when the
    /// display has no leading integer.
    #[must_use]
    pub fn display_whole(&self) -> Option<f64> {
        format::parse_whole(&self.display, self.base_mode)
    }

    /// The display as a two's-complement 64-bit word, 0 when unparsable.
    #[must_use]
    pub fn display_word(&self) -> u64 {
        match self.display_integer() {
            Some(value) => value as u64,
            None => self.display_whole().map_or(0, format::wrap_word),
        }
    }

    /// Whether a binary operation is waiting for its right operand.
    #[must_use]
    pub fn has_pending_operation(&self) -> bool {
        self.operation.is_some()
    }

    /// Render a value in the current base.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        format::format_value(value, self.base_mode)
    }
}
