//! Keyboard input for the calculator.
//!
//! [`Dispatcher`] turns [`KeyEvent`]s into calculator operations for the
//! active [`CalculatorMode`](calc_core::CalculatorMode). Every press is
//! debounced, checked against the capability settings and either applied,
//! rejected with a [`Notice`], or ignored.

pub mod action;
pub mod bindings;
pub mod debounce;
pub mod dispatcher;
pub mod key;
pub mod notice;

pub use action::Action;
pub use bindings::{Binding, bindings};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use dispatcher::{Dispatch, Dispatcher, Effect, IgnoreReason, prevents_default};
pub use key::{FocusTarget, Key, KeyEvent, KeyParseError, Modifiers, NamedKey};
pub use notice::{Notice, NoticeKind};
