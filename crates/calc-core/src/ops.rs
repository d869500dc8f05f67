//! Operation vocabulary.
//!
//! Every operation the calculator understands is a variant of one of the
//! closed enums below. UI labels map onto them through `FromStr`; capability
//! keys map onto them through `capability_key`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capability::keys;
use crate::error::ParseOperationError;
use crate::numeric::{FactorialCache, rotate_left, rotate_right};
use crate::state::{AngleMode, WordSize};

// =============================================================================
// Binary arithmetic
// =============================================================================

/// A pending binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
    #[serde(rename = "^")]
    Power,
    #[serde(rename = "mod")]
    Mod,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Mod,
    ];

    /// Symbol shown in history.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
            Self::Mod => "mod",
        }
    }

    /// Fold `left op right`. Division by zero yields `0`.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    0.0
                } else {
                    left / right
                }
            }
            Self::Power => left.powf(right),
            Self::Mod => left % right,
        }
    }

    /// Capability gating this operator; the four basic operators are ungated.
    #[must_use]
    pub const fn capability_key(self) -> Option<&'static str> {
        match self {
            Self::Power => Some(keys::POWER),
            Self::Mod => Some(keys::MOD),
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOp {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "×" | "*" => Ok(Self::Multiply),
            "÷" | "/" => Ok(Self::Divide),
            "^" => Ok(Self::Power),
            "mod" => Ok(Self::Mod),
            other => Err(ParseOperationError::unknown("operator", other)),
        }
    }
}

/// Operator key as pressed: a binary operator or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Binary(BinaryOp),
    Equals,
}

impl Operator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Binary(op) => op.symbol(),
            Self::Equals => "=",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> Option<&'static str> {
        match self {
            Self::Binary(op) => op.capability_key(),
            Self::Equals => None,
        }
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "=" {
            return Ok(Self::Equals);
        }
        s.parse().map(Self::Binary)
    }
}

// =============================================================================
// Unary arithmetic
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Reciprocal,
    Abs,
    Floor,
    Ceil,
    Round,
    Factorial,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 10] = [
        Self::Sqrt,
        Self::Cbrt,
        Self::Square,
        Self::Cube,
        Self::Reciprocal,
        Self::Abs,
        Self::Floor,
        Self::Ceil,
        Self::Round,
        Self::Factorial,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Reciprocal => "reciprocal",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Factorial => "factorial",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Sqrt => keys::SQRT,
            Self::Cbrt => keys::CBRT,
            Self::Square => keys::SQUARE,
            Self::Cube => keys::CUBE,
            Self::Reciprocal => keys::RECIPROCAL,
            Self::Abs => keys::ABS,
            Self::Floor => keys::FLOOR,
            Self::Ceil => keys::CEIL,
            Self::Round => keys::ROUND,
            Self::Factorial => keys::FACTORIAL,
        }
    }

    /// Evaluate on `value`.
    ///
    /// Factorial applies to `floor(|value|)` and reads through `cache`.
    pub fn apply(self, value: f64, cache: &mut FactorialCache) -> f64 {
        match self {
            Self::Sqrt => value.sqrt(),
            Self::Cbrt => value.cbrt(),
            Self::Square => value * value,
            Self::Cube => value * value * value,
            Self::Reciprocal => {
                if value == 0.0 {
                    0.0
                } else {
                    1.0 / value
                }
            }
            Self::Abs => value.abs(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            Self::Round => round_half_up(value),
            Self::Factorial => {
                if value.is_nan() {
                    f64::NAN
                } else if value.is_infinite() {
                    f64::INFINITY
                } else {
                    // saturating cast; anything above 170 is infinite anyway
                    cache.get(value.abs().floor() as i64)
                }
            }
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnaryOp {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqrt" | "√" => Ok(Self::Sqrt),
            "cbrt" | "∛" => Ok(Self::Cbrt),
            "square" | "x²" => Ok(Self::Square),
            "cube" | "x³" => Ok(Self::Cube),
            "reciprocal" | "1/x" => Ok(Self::Reciprocal),
            "abs" | "|x|" => Ok(Self::Abs),
            "floor" => Ok(Self::Floor),
            "ceil" => Ok(Self::Ceil),
            "round" => Ok(Self::Round),
            "factorial" | "n!" | "!" => Ok(Self::Factorial),
            other => Err(ParseOperationError::unknown("unary operation", other)),
        }
    }
}

/// Round half toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

// =============================================================================
// Trigonometry
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl TrigFunction {
    pub const ALL: [TrigFunction; 9] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Sin => keys::SIN,
            Self::Cos => keys::COS,
            Self::Tan => keys::TAN,
            Self::Asin => keys::ASIN,
            Self::Acos => keys::ACOS,
            Self::Atan => keys::ATAN,
            Self::Sinh => keys::SINH,
            Self::Cosh => keys::COSH,
            Self::Tanh => keys::TANH,
        }
    }

    /// Group capability: `hyperbolic` for sinh/cosh/tanh, else `trigonometric`.
    #[must_use]
    pub const fn group_key(self) -> &'static str {
        if self.is_hyperbolic() {
            keys::HYPERBOLIC
        } else {
            keys::TRIGONOMETRIC
        }
    }

    #[must_use]
    pub const fn is_inverse(self) -> bool {
        matches!(self, Self::Asin | Self::Acos | Self::Atan)
    }

    #[must_use]
    pub const fn is_hyperbolic(self) -> bool {
        matches!(self, Self::Sinh | Self::Cosh | Self::Tanh)
    }

    /// Evaluate on `value` under `angle`.
    ///
    /// Domain errors surface as `NaN`.
    #[must_use]
    pub fn apply(self, value: f64, angle: AngleMode) -> f64 {
        match self {
            Self::Sin => angle.to_radians(value).sin(),
            Self::Cos => angle.to_radians(value).cos(),
            Self::Tan => angle.to_radians(value).tan(),
            Self::Asin => angle.from_radians(value.asin()),
            Self::Acos => angle.from_radians(value.acos()),
            Self::Atan => angle.from_radians(value.atan()),
            Self::Sinh => value.sinh(),
            Self::Cosh => value.cosh(),
            Self::Tanh => value.tanh(),
        }
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrigFunction {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|func| func.label() == s)
            .ok_or_else(|| ParseOperationError::unknown("trigonometric function", s))
    }
}

// =============================================================================
// Logarithms and exponentials
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogFunction {
    Log,
    Ln,
    Log2,
    Exp,
    Pow10,
    Pow2,
}

impl LogFunction {
    pub const ALL: [LogFunction; 6] = [
        Self::Log,
        Self::Ln,
        Self::Log2,
        Self::Exp,
        Self::Pow10,
        Self::Pow2,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Log2 => "log2",
            Self::Exp => "exp",
            Self::Pow10 => "pow10",
            Self::Pow2 => "pow2",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Log => keys::LOG,
            Self::Ln => keys::LN,
            Self::Log2 => keys::LOG2,
            Self::Exp => keys::EXP,
            Self::Pow10 => keys::POW10,
            Self::Pow2 => keys::POW2,
        }
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
            Self::Log2 => value.log2(),
            Self::Exp => value.exp(),
            Self::Pow10 => 10f64.powf(value),
            Self::Pow2 => value.exp2(),
        }
    }
}

impl fmt::Display for LogFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogFunction {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|func| func.label() == s)
            .ok_or_else(|| ParseOperationError::unknown("logarithmic function", s))
    }
}

// =============================================================================
// Constants
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
    Phi,
}

impl Constant {
    pub const ALL: [Constant; 3] = [Self::Pi, Self::E, Self::Phi];

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
            Self::Phi => (1.0 + 5f64.sqrt()) / 2.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Phi => "phi",
        }
    }

    /// Glyph used in history.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
            Self::Phi => "φ",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Pi => keys::PI,
            Self::E => keys::E,
            Self::Phi => keys::PHI,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Constant {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|constant| constant.label() == s || constant.symbol() == s)
            .ok_or_else(|| ParseOperationError::unknown("constant", s))
    }
}

// =============================================================================
// Bitwise
// =============================================================================

/// Two-operand bitwise operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Lsh,
    Rsh,
    Rol,
    Ror,
}

impl BitwiseOp {
    pub const ALL: [BitwiseOp; 9] = [
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Nand,
        Self::Nor,
        Self::Lsh,
        Self::Rsh,
        Self::Rol,
        Self::Ror,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Lsh => "lsh",
            Self::Rsh => "rsh",
            Self::Rol => "rol",
            Self::Ror => "ror",
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::And => keys::AND,
            Self::Or => keys::OR,
            Self::Xor => keys::XOR,
            Self::Nand => keys::NAND,
            Self::Nor => keys::NOR,
            Self::Lsh => keys::LSH,
            Self::Rsh => keys::RSH,
            Self::Rol => keys::ROL,
            Self::Ror => keys::ROR,
        }
    }

    /// `shift_ops` for shifts and rotations, `bitwise_ops` otherwise.
    #[must_use]
    pub const fn group_key(self) -> &'static str {
        if self.is_shift() {
            keys::SHIFT_OPS
        } else {
            keys::BITWISE_OPS
        }
    }

    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::Lsh | Self::Rsh | Self::Rol | Self::Ror)
    }

    /// Evaluate `value op operand` within `size`. The result is masked.
    #[must_use]
    pub fn apply(self, value: u64, operand: u64, size: WordSize) -> u64 {
        let mask = size.mask();
        let bits = size.bits();
        let value = value & mask;
        let result = match self {
            Self::And => value & operand,
            Self::Or => value | operand,
            Self::Xor => value ^ operand,
            Self::Nand => !(value & operand),
            Self::Nor => !(value | operand),
            Self::Lsh => shift_amount(operand)
                .and_then(|shift| value.checked_shl(shift))
                .unwrap_or(0),
            Self::Rsh => shift_amount(operand)
                .and_then(|shift| value.checked_shr(shift))
                .unwrap_or(0),
            Self::Rol => rotate_left(value, rotation_amount(operand, bits), bits),
            Self::Ror => rotate_right(value, rotation_amount(operand, bits), bits),
        };
        result & mask
    }
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BitwiseOp {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.label() == lower)
            .ok_or_else(|| ParseOperationError::unknown("bitwise operation", s))
    }
}

fn shift_amount(operand: u64) -> Option<u32> {
    u32::try_from(operand).ok()
}

fn rotation_amount(operand: u64, bits: u32) -> u32 {
    // bits is at most 64, so the remainder fits
    (operand % u64::from(bits.max(1))) as u32
}

/// A complete bitwise operation: unary `not`, or a binary operator with its
/// right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOperation {
    Not,
    Binary(BitwiseOp, u64),
}

impl BitwiseOperation {
    /// Build from a UI label and the operand a binary operator would use.
    pub fn from_label(label: &str, operand: u64) -> crate::error::Result<Self> {
        if label.eq_ignore_ascii_case("not") {
            return Ok(Self::Not);
        }
        label.parse().map(|op| Self::Binary(op, operand))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Binary(op, _) => op.label(),
        }
    }

    #[must_use]
    pub const fn capability_key(self) -> &'static str {
        match self {
            Self::Not => keys::NOT,
            Self::Binary(op, _) => op.capability_key(),
        }
    }

    #[must_use]
    pub const fn group_key(self) -> &'static str {
        match self {
            Self::Not => keys::BITWISE_OPS,
            Self::Binary(op, _) => op.group_key(),
        }
    }

    /// Evaluate on `value` within `size`.
    #[must_use]
    pub fn apply(self, value: u64, size: WordSize) -> u64 {
        match self {
            Self::Not => !value & size.mask(),
            Self::Binary(op, operand) => op.apply(value, operand, size),
        }
    }
}
