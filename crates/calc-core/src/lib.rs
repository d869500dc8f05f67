//! Calculator computation core.
//!
//! This crate holds the calculator state and every operation that
//! transforms it, independent of any UI:
//!
//! - [`numeric`]: factorial memo, word masks and bit rotation
//! - [`capability`]: default-allow feature flags and well-known keys
//! - [`ops`]: closed operation vocabulary with label parsing
//! - [`state`] and [`machine`]: the state aggregate and its pure transitions
//! - [`format`]: reading and rendering the display under a numeric base
//!
//! # Example
//!
//! ```
//! use calc_core::{BinaryOp, Calculator, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.input_digit('7');
//! calc.perform_operation(BinaryOp::Multiply);
//! calc.input_digit('6');
//! let state = calc.perform_operation(Operator::Equals);
//! assert_eq!(state.display, "42");
//! ```

pub mod capability;
pub mod error;
pub mod format;
pub mod machine;
pub mod mode;
pub mod numeric;
pub mod ops;
pub mod state;

pub use capability::{CapabilitySettings, is_enabled, keys};
pub use error::{ParseOperationError, Result};
pub use machine::{Calculator, Input, transition};
pub use mode::CalculatorMode;
pub use numeric::{FactorialCache, factorial, rotate_left, rotate_right, word_mask};
pub use ops::{
    BinaryOp, BitwiseOp, BitwiseOperation, Constant, LogFunction, Operator, TrigFunction, UnaryOp,
};
pub use state::{AngleMode, BaseMode, CalculatorState, WordSize};
