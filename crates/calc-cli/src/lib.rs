//! Terminal harness components for the classroom calculator.

pub mod logging;
pub mod script;
pub mod session;
