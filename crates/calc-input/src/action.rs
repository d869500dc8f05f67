//! Resolved key actions.

use std::fmt;

use calc_core::{Calculator, CalculatorState, CapabilitySettings, Input};

/// A calculator input together with the capabilities it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub input: Input,
    pub capabilities: Vec<&'static str>,
}

impl Action {
    /// Action that needs no capability.
    #[must_use]
    pub fn new(input: Input) -> Self {
        Self {
            input,
            capabilities: Vec::new(),
        }
    }

    /// Add a required capability.
    #[must_use]
    pub fn requires(mut self, capability: &'static str) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// First required capability that `settings` disables.
    #[must_use]
    pub fn blocked_by(&self, settings: &CapabilitySettings) -> Option<&'static str> {
        settings.first_disabled(&self.capabilities)
    }

    pub fn apply<'a>(&self, calc: &'a mut Calculator) -> &'a CalculatorState {
        calc.apply(self.input)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input)
    }
}
