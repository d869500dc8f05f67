//! Scripted key session.
//!
//! Feeds key events through a [`Dispatcher`] on a virtual clock, so a script
//! behaves like a user typing at a steady pace.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use calc_core::{Calculator, CalculatorMode, CalculatorState};
use calc_input::{Dispatch, Dispatcher, Effect, IgnoreReason, KeyEvent, Notice};
use calc_settings::SettingsSnapshot;
use tracing::debug;

/// Virtual time between scripted presses, beyond the debounce window.
pub const KEY_SPACING: Duration = Duration::from_millis(150);

/// One scripted key press and what it did.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Key as typed, e.g. `Ctrl+m`.
    pub key: String,
    pub dispatch: Dispatch,
    /// Display after the press.
    pub display: String,
}

impl Step {
    /// Short description of the outcome.
    #[must_use]
    pub fn outcome(&self) -> String {
        describe_effect(&self.dispatch.effect)
    }
}

/// Calculator plus dispatcher driven by scripted keys.
#[derive(Debug)]
pub struct Session {
    calc: Calculator,
    dispatcher: Dispatcher,
    clock: Instant,
    spacing: Duration,
}

impl Session {
    #[must_use]
    pub fn new(mode: CalculatorMode) -> Self {
        Self {
            calc: Calculator::new(),
            dispatcher: Dispatcher::new(mode),
            clock: Instant::now(),
            spacing: KEY_SPACING,
        }
    }

    /// Override the virtual time between presses.
    #[must_use]
    pub fn with_spacing(mut self, spacing: Duration) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn mode(&self) -> CalculatorMode {
        self.dispatcher.mode()
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        self.calc.state()
    }

    /// Final state, consuming the session.
    #[must_use]
    pub fn into_state(self) -> CalculatorState {
        self.calc.into_state()
    }

    /// Press one key under `settings`.
    ///
    /// With the calculator switched off the press never reaches the
    /// dispatcher.
    pub fn press(&mut self, event: KeyEvent, settings: &SettingsSnapshot) -> Step {
        let event = event.at(self.clock);
        self.clock += self.spacing;

        let dispatch = if settings.calculator_enabled {
            self.dispatcher
                .handle(&event, &mut self.calc, &settings.capabilities)
        } else {
            debug!(key = %event, "calculator disabled");
            Dispatch {
                effect: Effect::Rejected(Notice::calculator_disabled()),
                prevent_default: true,
            }
        };

        Step {
            key: event.to_string(),
            dispatch,
            display: self.calc.state().display.clone(),
        }
    }

    /// Press every key in order.
    pub fn run<I>(&mut self, events: I, settings: &SettingsSnapshot) -> Vec<Step>
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        events
            .into_iter()
            .map(|event| self.press(event, settings))
            .collect()
    }
}

/// Short description of a dispatch effect.
#[must_use]
pub fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Applied(action) => action.to_string(),
        Effect::Rejected(notice) => format!("rejected: {notice}"),
        Effect::Ignored(IgnoreReason::Debounced) => "ignored (debounced)".to_string(),
        Effect::Ignored(IgnoreReason::Unbound) => "ignored (unbound)".to_string(),
        Effect::PassThrough => "passed through".to_string(),
    }
}

/// Plain-text transcript: one line per step, then the final state.
#[must_use]
pub fn transcript(steps: &[Step], mode: CalculatorMode, state: &CalculatorState) -> String {
    let mut out = String::new();
    for step in steps {
        let _ = writeln!(out, "{:<8} {:>12}  {}", step.key, step.display, step.outcome());
    }
    if !steps.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "display: {}", state.display);
    if !state.history.is_empty() {
        let _ = writeln!(out, "history: {}", state.history);
    }
    let _ = writeln!(out, "memory:  {}", state.render(state.memory));
    let _ = write!(
        out,
        "mode:    {mode} {} {} {}",
        state.angle_mode, state.word_size, state.base_mode
    );
    out
}
