//! Keyboard dispatcher.
//!
//! Handles, in order:
//! - focus in editable elements (pass-through)
//! - same-key debouncing
//! - default-action suppression for calculator keys
//! - mode capability check
//! - binding resolution for the active mode
//! - capability check for the resolved action

use std::time::Duration;

use calc_core::{
    BaseMode, BinaryOp, BitwiseOp, BitwiseOperation, Calculator, CalculatorMode,
    CapabilitySettings, Constant, Input, LogFunction, Operator, TrigFunction, UnaryOp, WordSize,
    format, keys,
};
use tracing::debug;

use crate::action::Action;
use crate::debounce::Debouncer;
use crate::key::{Key, KeyEvent, Modifiers, NamedKey};
use crate::notice::Notice;

/// Why a key press did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Same key repeated inside the debounce window.
    Debounced,
    /// No binding in the active mode.
    Unbound,
}

/// What happened to a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The action ran against the calculator.
    Applied(Action),
    /// The press was refused; the calculator is unchanged.
    Rejected(Notice),
    Ignored(IgnoreReason),
    /// Focus was in an editable element; the press belongs to it.
    PassThrough,
}

/// Outcome of [`Dispatcher::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub effect: Effect,
    /// Whether the host should suppress the key's default behavior.
    pub prevent_default: bool,
}

impl Dispatch {
    fn new(effect: Effect, prevent_default: bool) -> Self {
        Self {
            effect,
            prevent_default,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self.effect, Effect::Applied(_))
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        match &self.effect {
            Effect::Rejected(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Result of binding resolution, before the capability check.
enum Resolution {
    Action(Action),
    Reject(Notice),
    Unbound,
}

/// Maps key presses onto calculator operations for one mode.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    mode: CalculatorMode,
    debouncer: Debouncer,
}

impl Dispatcher {
    #[must_use]
    pub fn new(mode: CalculatorMode) -> Self {
        Self {
            mode,
            debouncer: Debouncer::default(),
        }
    }

    /// Use a custom debounce window.
    #[must_use]
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debouncer = Debouncer::new(window);
        self
    }

    #[must_use]
    pub fn mode(&self) -> CalculatorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CalculatorMode) {
        self.mode = mode;
        self.debouncer.reset();
    }

    /// Process one key press against `calc` under `settings`.
    pub fn handle(
        &mut self,
        event: &KeyEvent,
        calc: &mut Calculator,
        settings: &CapabilitySettings,
    ) -> Dispatch {
        if event.focus.is_editable() {
            return Dispatch::new(Effect::PassThrough, false);
        }

        if !self.debouncer.accept(event.key, event.timestamp) {
            debug!(key = %event, "debounced");
            return Dispatch::new(Effect::Ignored(IgnoreReason::Debounced), false);
        }

        let prevent_default = prevents_default(event.key);

        if !settings.is_enabled(self.mode.capability_key()) {
            debug!(key = %event, mode = %self.mode, "mode disabled");
            return Dispatch::new(
                Effect::Rejected(Notice::mode_disabled(self.mode)),
                prevent_default,
            );
        }

        let effect = match resolve(self.mode, event, calc) {
            Resolution::Unbound => Effect::Ignored(IgnoreReason::Unbound),
            Resolution::Reject(notice) => Effect::Rejected(notice),
            Resolution::Action(action) => match action.blocked_by(settings) {
                Some(capability) => Effect::Rejected(Notice::function_disabled(capability)),
                None => {
                    action.apply(calc);
                    Effect::Applied(action)
                }
            },
        };
        debug!(key = %event, mode = %self.mode, ?effect, "dispatched");
        Dispatch::new(effect, prevent_default)
    }
}

/// Whether the host should suppress the default behavior of `key`.
#[must_use]
pub fn prevents_default(key: Key) -> bool {
    match key {
        Key::Character(c) => {
            let c = c.to_ascii_lowercase();
            c.is_ascii_digit()
                || ('a'..='f').contains(&c)
                || "+-*/%.=()!|&~<>^pectslnqrmhxy?".contains(c)
        }
        Key::Named(named) => matches!(
            named,
            NamedKey::Enter | NamedKey::Escape | NamedKey::Backspace | NamedKey::Delete
        ),
    }
}

fn resolve(mode: CalculatorMode, event: &KeyEvent, calc: &Calculator) -> Resolution {
    let modifiers = event.modifiers;
    match event.key {
        Key::Named(named) => {
            if modifiers.command() || modifiers.alt {
                return Resolution::Unbound;
            }
            resolve_named(named)
        }
        Key::Character(c) => {
            if modifiers.command() {
                resolve_command(mode, c)
            } else if modifiers.alt {
                resolve_alt(mode, c)
            } else {
                resolve_character(mode, c, modifiers, calc)
            }
        }
    }
}

fn resolve_named(named: NamedKey) -> Resolution {
    let input = match named {
        NamedKey::Enter => Input::Operation(Operator::Equals),
        NamedKey::Escape | NamedKey::Delete => Input::Clear,
        NamedKey::Backspace => Input::Backspace,
        _ => return Resolution::Unbound,
    };
    Resolution::Action(Action::new(input))
}

/// Ctrl/Cmd shortcuts. Unmatched combinations never fall through to bare
/// bindings, so browser shortcuts like Ctrl+- keep working.
fn resolve_command(mode: CalculatorMode, c: char) -> Resolution {
    let memory = |input| Resolution::Action(Action::new(input).requires(keys::MEMORY_FUNCTIONS));
    let convert =
        |base| Resolution::Action(Action::new(Input::ConvertBase(base)).requires(keys::CONVERSIONS_PROG));
    let word_size =
        |size| Resolution::Action(Action::new(Input::SetWordSize(size)).requires(keys::WORD_SIZE));
    let programmer = mode == CalculatorMode::Programmer;

    match c.to_ascii_lowercase() {
        'm' => memory(Input::MemoryStore),
        'r' => memory(Input::MemoryRecall),
        'p' => memory(Input::MemoryAdd),
        'q' => memory(Input::MemorySubtract),
        'l' => memory(Input::MemoryClear),
        'h' if programmer => convert(BaseMode::Hex),
        'd' if programmer => convert(BaseMode::Dec),
        'o' if programmer => convert(BaseMode::Oct),
        'b' if programmer => convert(BaseMode::Bin),
        '1' if programmer => word_size(WordSize::Byte),
        '2' if programmer => word_size(WordSize::Word),
        '3' if programmer => word_size(WordSize::DWord),
        '4' if programmer => word_size(WordSize::QWord),
        _ => Resolution::Unbound,
    }
}

fn resolve_alt(mode: CalculatorMode, c: char) -> Resolution {
    match c.to_ascii_lowercase() {
        'd' if mode == CalculatorMode::Scientific => {
            Resolution::Action(Action::new(Input::ToggleAngleMode).requires(keys::DEG_RAD))
        }
        _ => Resolution::Unbound,
    }
}

fn resolve_character(
    mode: CalculatorMode,
    c: char,
    modifiers: Modifiers,
    calc: &Calculator,
) -> Resolution {
    let base = calc.state().base_mode;

    if c.is_ascii_digit() {
        if !base.accepts_digit(c) {
            return Resolution::Reject(Notice::invalid_digit(c, base));
        }
        return Resolution::Action(Action::new(Input::Digit(c)));
    }

    let lower = c.to_ascii_lowercase();
    let shifted = modifiers.shift || c.is_ascii_uppercase();

    if mode == CalculatorMode::Programmer && ('a'..='f').contains(&lower) {
        if base != BaseMode::Hex {
            return Resolution::Reject(Notice::invalid_digit(c, base));
        }
        return Resolution::Action(Action::new(Input::HexDigit(lower)).requires(keys::CONVERSIONS_PROG));
    }

    if let Some(action) = resolve_common(lower) {
        return Resolution::Action(action);
    }

    let action = match mode {
        CalculatorMode::Standard => None,
        CalculatorMode::Scientific => resolve_scientific(lower, shifted),
        CalculatorMode::Programmer => resolve_programmer(lower, calc),
    };
    action.map_or(Resolution::Unbound, Resolution::Action)
}

/// Bindings shared by every mode.
fn resolve_common(c: char) -> Option<Action> {
    let operation = |op: BinaryOp| Action::new(Input::Operation(Operator::Binary(op)));
    let action = match c {
        '+' => operation(BinaryOp::Add),
        '-' => operation(BinaryOp::Subtract),
        '*' => operation(BinaryOp::Multiply),
        '/' => operation(BinaryOp::Divide),
        '=' => Action::new(Input::Operation(Operator::Equals)),
        '.' => Action::new(Input::Decimal),
        '%' => Action::new(Input::Percentage).requires(keys::PERCENTAGE),
        _ => return None,
    };
    Some(action)
}

fn resolve_scientific(c: char, shifted: bool) -> Option<Action> {
    let trig = |func: TrigFunction| {
        Action::new(Input::Trigonometric(func))
            .requires(func.capability_key())
            .requires(func.group_key())
    };
    let log = |func: LogFunction| {
        Action::new(Input::Logarithmic(func))
            .requires(func.capability_key())
            .requires(keys::LOGARITHMS)
    };
    let constant = |constant: Constant| {
        Action::new(Input::Constant(constant))
            .requires(constant.capability_key())
            .requires(keys::CONSTANTS)
    };
    let unary = |op: UnaryOp, key: &'static str| Action::new(Input::Unary(op)).requires(key);

    let action = match (c, shifted) {
        ('p', _) => constant(Constant::Pi),
        ('e', _) => constant(Constant::E),
        ('s', false) => trig(TrigFunction::Sin),
        ('s', true) => trig(TrigFunction::Asin),
        ('c', false) => trig(TrigFunction::Cos),
        ('c', true) => trig(TrigFunction::Acos),
        ('t', false) => trig(TrigFunction::Tan),
        ('t', true) => trig(TrigFunction::Atan),
        ('h', false) => trig(TrigFunction::Sinh),
        ('h', true) => trig(TrigFunction::Cosh),
        ('y', _) => trig(TrigFunction::Tanh),
        ('q', _) => unary(UnaryOp::Sqrt, keys::SQRT),
        ('r', false) => unary(UnaryOp::Square, keys::SQUARE_SCI),
        ('r', true) => unary(UnaryOp::Cube, keys::CUBE),
        ('!', _) => unary(UnaryOp::Factorial, keys::FACTORIAL),
        ('^', _) => Action::new(Input::Operation(Operator::Binary(BinaryOp::Power)))
            .requires(keys::POWER),
        ('m', _) => {
            Action::new(Input::Operation(Operator::Binary(BinaryOp::Mod))).requires(keys::MOD)
        }
        ('l', _) => log(LogFunction::Log),
        ('n', _) => log(LogFunction::Ln),
        _ => return None,
    };
    Some(action)
}

fn resolve_programmer(c: char, calc: &Calculator) -> Option<Action> {
    // binary bitwise keys take their right operand from the memory register
    let operand = format::wrap_word(calc.state().memory);
    let bitwise = |operation: BitwiseOperation| {
        Action::new(Input::Bitwise(operation))
            .requires(operation.capability_key())
            .requires(operation.group_key())
    };
    let action = match c {
        '&' => bitwise(BitwiseOperation::Binary(BitwiseOp::And, operand)),
        '|' => bitwise(BitwiseOperation::Binary(BitwiseOp::Or, operand)),
        'x' => bitwise(BitwiseOperation::Binary(BitwiseOp::Xor, operand)),
        '~' => bitwise(BitwiseOperation::Not),
        '<' => bitwise(BitwiseOperation::Binary(BitwiseOp::Lsh, 1)),
        '>' => bitwise(BitwiseOperation::Binary(BitwiseOp::Rsh, 1)),
        _ => return None,
    };
    Some(action)
}
