//! Capability gate.
//!
//! Capabilities are opt-out feature flags: a key that is absent from the
//! settings is enabled. Only an explicit `false` disables a function.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known capability keys.
pub mod keys {
    // Modes
    pub const STANDARD_MODE: &str = "standard_mode";
    pub const SCIENTIFIC_MODE: &str = "scientific_mode";
    pub const PROGRAMMER_MODE: &str = "programmer_mode";

    // Groups
    pub const TRIGONOMETRIC: &str = "trigonometric";
    pub const HYPERBOLIC: &str = "hyperbolic";
    pub const LOGARITHMS: &str = "logarithms";
    pub const CONSTANTS: &str = "constants";
    pub const MEMORY_FUNCTIONS: &str = "memory_functions";
    pub const BITWISE_OPS: &str = "bitwise_ops";
    pub const SHIFT_OPS: &str = "shift_ops";
    pub const CONVERSIONS_PROG: &str = "conversions_prog";
    pub const WORD_SIZE: &str = "word_size";
    pub const DEG_RAD: &str = "deg_rad";

    // Arithmetic
    pub const PERCENTAGE: &str = "percentage";
    pub const POWER: &str = "power";
    pub const MOD: &str = "mod";
    pub const SQRT: &str = "sqrt";
    pub const CBRT: &str = "cbrt";
    pub const SQUARE: &str = "square";
    pub const SQUARE_SCI: &str = "square_sci";
    pub const CUBE: &str = "cube";
    pub const RECIPROCAL: &str = "reciprocal";
    pub const RECIPROCAL_SCI: &str = "reciprocal_sci";
    pub const ABS: &str = "abs";
    pub const FLOOR: &str = "floor";
    pub const CEIL: &str = "ceil";
    pub const ROUND: &str = "round";
    pub const FACTORIAL: &str = "factorial";

    // Trigonometry
    pub const SIN: &str = "sin";
    pub const COS: &str = "cos";
    pub const TAN: &str = "tan";
    pub const ASIN: &str = "asin";
    pub const ACOS: &str = "acos";
    pub const ATAN: &str = "atan";
    pub const SINH: &str = "sinh";
    pub const COSH: &str = "cosh";
    pub const TANH: &str = "tanh";

    // Logarithms
    pub const LOG: &str = "log";
    pub const LN: &str = "ln";
    pub const LOG2: &str = "log2";
    pub const EXP: &str = "exp";
    pub const POW10: &str = "pow10";
    pub const POW2: &str = "pow2";

    // Constants
    pub const PI: &str = "pi";
    pub const E: &str = "e";
    pub const PHI: &str = "phi";

    // Bitwise
    pub const AND: &str = "and";
    pub const OR: &str = "or";
    pub const XOR: &str = "xor";
    pub const NOT: &str = "not";
    pub const NAND: &str = "nand";
    pub const NOR: &str = "nor";
    pub const LSH: &str = "lsh";
    pub const RSH: &str = "rsh";
    pub const ROL: &str = "rol";
    pub const ROR: &str = "ror";

    /// Every well-known key, modes and groups first.
    pub const ALL: &[&str] = &[
        STANDARD_MODE,
        SCIENTIFIC_MODE,
        PROGRAMMER_MODE,
        TRIGONOMETRIC,
        HYPERBOLIC,
        LOGARITHMS,
        CONSTANTS,
        MEMORY_FUNCTIONS,
        BITWISE_OPS,
        SHIFT_OPS,
        CONVERSIONS_PROG,
        WORD_SIZE,
        DEG_RAD,
        PERCENTAGE,
        POWER,
        MOD,
        SQRT,
        CBRT,
        SQUARE,
        SQUARE_SCI,
        CUBE,
        RECIPROCAL,
        RECIPROCAL_SCI,
        ABS,
        FLOOR,
        CEIL,
        ROUND,
        FACTORIAL,
        SIN,
        COS,
        TAN,
        ASIN,
        ACOS,
        ATAN,
        SINH,
        COSH,
        TANH,
        LOG,
        LN,
        LOG2,
        EXP,
        POW10,
        POW2,
        PI,
        E,
        PHI,
        AND,
        OR,
        XOR,
        NOT,
        NAND,
        NOR,
        LSH,
        RSH,
        ROL,
        ROR,
    ];
}

/// Mapping of capability key to enabled flag.
///
/// Supplied by an external collaborator and replaced wholesale on refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySettings {
    flags: BTreeMap<String, bool>,
}

impl CapabilitySettings {
    /// Empty settings: everything is enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is enabled. Absent keys are enabled.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.flags.get(key).copied() != Some(false)
    }

    /// Whether every key in `keys` is enabled.
    #[must_use]
    pub fn is_enabled_all(&self, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.is_enabled(key))
    }

    /// First key in `keys` that is disabled, if any.
    #[must_use]
    pub fn first_disabled<'a>(&self, keys: &[&'a str]) -> Option<&'a str> {
        keys.iter().copied().find(|key| !self.is_enabled(key))
    }

    /// Set an explicit flag for `key`.
    pub fn set(&mut self, key: impl Into<String>, enabled: bool) {
        self.flags.insert(key.into(), enabled);
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.set(key, enabled);
        self
    }

    /// Remove the explicit flag for `key`, returning it to default-allow.
    pub fn unset(&mut self, key: &str) -> Option<bool> {
        self.flags.remove(key)
    }

    /// Iterate explicit flags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(key, enabled)| (key.as_str(), *enabled))
    }

    /// Number of explicit flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when no flag is set explicitly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for CapabilitySettings {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Free-function form of [`CapabilitySettings::is_enabled`].
#[must_use]
pub fn is_enabled(settings: &CapabilitySettings, key: &str) -> bool {
    settings.is_enabled(key)
}
