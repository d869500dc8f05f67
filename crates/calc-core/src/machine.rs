//! Calculator state machine.
//!
//! [`transition`] is a pure function from a state and an [`Input`] to the
//! next state. The only side channel is the factorial memo, which is passed
//! in explicitly. [`Calculator`] bundles a state with its memo and exposes
//! one method per operation.

use std::fmt;

use tracing::trace;

use crate::format::{format_integer, format_unsigned, format_value};
use crate::numeric::FactorialCache;
use crate::ops::{BitwiseOperation, Constant, LogFunction, Operator, TrigFunction, UnaryOp};
use crate::state::{BaseMode, CalculatorState, WordSize};

/// Every operation the state machine accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Digit(char),
    HexDigit(char),
    Decimal,
    Clear,
    ClearEntry,
    Backspace,
    ToggleSign,
    Percentage,
    Operation(Operator),
    Unary(UnaryOp),
    Trigonometric(TrigFunction),
    Logarithmic(LogFunction),
    Constant(Constant),
    Bitwise(BitwiseOperation),
    ConvertBase(BaseMode),
    SetWordSize(WordSize),
    ToggleAngleMode,
    MemoryStore,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    MemoryClear,
    EndAnimation,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) | Self::HexDigit(d) => write!(f, "digit {}", d.to_ascii_uppercase()),
            Self::Decimal => f.write_str("decimal point"),
            Self::Clear => f.write_str("clear"),
            Self::ClearEntry => f.write_str("clear entry"),
            Self::Backspace => f.write_str("backspace"),
            Self::ToggleSign => f.write_str("toggle sign"),
            Self::Percentage => f.write_str("percentage"),
            Self::Operation(op) => write!(f, "operator {op}"),
            Self::Unary(op) => write!(f, "{op}"),
            Self::Trigonometric(func) => write!(f, "{func}"),
            Self::Logarithmic(func) => write!(f, "{func}"),
            Self::Constant(constant) => write!(f, "constant {constant}"),
            Self::Bitwise(BitwiseOperation::Not) => f.write_str("not"),
            Self::Bitwise(BitwiseOperation::Binary(op, operand)) => write!(f, "{op} {operand}"),
            Self::ConvertBase(base) => write!(f, "convert to {base}"),
            Self::SetWordSize(size) => write!(f, "word size {size}"),
            Self::ToggleAngleMode => f.write_str("toggle DEG/RAD"),
            Self::MemoryStore => f.write_str("MS"),
            Self::MemoryRecall => f.write_str("MR"),
            Self::MemoryAdd => f.write_str("M+"),
            Self::MemorySubtract => f.write_str("M-"),
            Self::MemoryClear => f.write_str("MC"),
            Self::EndAnimation => f.write_str("end animation"),
        }
    }
}

/// Compute the state that follows `state` after `input`.
pub fn transition(
    state: &CalculatorState,
    input: &Input,
    cache: &mut FactorialCache,
) -> CalculatorState {
    let mut next = state.clone();
    match *input {
        Input::Digit(digit) => input_digit(&mut next, digit),
        Input::HexDigit(digit) => input_hex_digit(&mut next, digit),
        Input::Decimal => input_decimal(&mut next),
        Input::Clear => {
            next.display = "0".to_string();
            next.previous_value = None;
            next.operation = None;
            next.waiting_for_operand = false;
            next.history.clear();
        }
        Input::ClearEntry => next.display = "0".to_string(),
        Input::Backspace => {
            next.display.pop();
            if next.display.is_empty() || next.display == "-" {
                next.display = "0".to_string();
            }
        }
        Input::ToggleSign => {
            let value = state.display_value();
            next.display = state.render(-value);
            next.is_animating = true;
        }
        Input::Percentage => {
            let value = state.display_value();
            show_result(&mut next, value / 100.0);
        }
        Input::Operation(operator) => perform_operation(&mut next, operator),
        Input::Unary(op) => {
            let value = state.display_value();
            let result = op.apply(value, cache);
            record_function(&mut next, op.label(), value, result);
        }
        Input::Trigonometric(func) => {
            let value = state.display_value();
            let result = func.apply(value, state.angle_mode);
            record_function(&mut next, func.label(), value, result);
        }
        Input::Logarithmic(func) => {
            let value = state.display_value();
            let result = func.apply(value);
            record_function(&mut next, func.label(), value, result);
        }
        Input::Constant(constant) => show_result(&mut next, constant.value()),
        Input::Bitwise(operation) => perform_bitwise(&mut next, operation),
        Input::ConvertBase(to) => {
            let converted = match state.display_integer() {
                Some(value) => Some(format_integer(value, to)),
                None => state.display_whole().map(|value| format_value(value, to)),
            };
            if let Some(display) = converted {
                next.base_mode = to;
                next.display = display;
                next.is_animating = true;
            }
        }
        Input::SetWordSize(size) => {
            next.word_size = size;
            let value = state.display_word();
            next.display = format_unsigned(value & size.mask(), state.base_mode);
            next.is_animating = true;
        }
        Input::ToggleAngleMode => next.angle_mode = state.angle_mode.toggled(),
        Input::MemoryStore => next.memory = state.display_value(),
        Input::MemoryRecall => show_result(&mut next, state.memory),
        Input::MemoryAdd => next.memory = state.memory + state.display_value(),
        Input::MemorySubtract => next.memory = state.memory - state.display_value(),
        Input::MemoryClear => next.memory = 0.0,
        Input::EndAnimation => next.is_animating = false,
    }
    trace!(%input, display = %next.display, history = %next.history, "transition");
    next
}

fn input_digit(state: &mut CalculatorState, digit: char) {
    if state.waiting_for_operand {
        state.display = digit.to_string();
        state.waiting_for_operand = false;
    } else if state.display == "0" {
        state.display = digit.to_string();
    } else {
        state.display.push(digit);
    }
}

fn input_hex_digit(state: &mut CalculatorState, digit: char) {
    let Some(value) = digit.to_digit(16) else {
        return;
    };
    let digit = digit.to_ascii_uppercase();
    if state.waiting_for_operand {
        state.display = digit.to_string();
        state.waiting_for_operand = false;
        return;
    }
    let base = state.base_mode;
    let appended = state
        .display_integer()
        .and_then(|current| current.checked_mul(16))
        .and_then(|current| current.checked_add(i128::from(value)))
        .map(|next| format_integer(next, base))
        // past i128 the operand carries on in floating point
        .or_else(|| {
            state
                .display_whole()
                .map(|current| format_value(current * 16.0 + f64::from(value), base))
        });
    // a malformed display starts a fresh operand
    state.display = appended.unwrap_or_else(|| digit.to_string());
}

fn input_decimal(state: &mut CalculatorState) {
    if state.base_mode != BaseMode::Dec {
        return;
    }
    if state.waiting_for_operand {
        state.display = "0.".to_string();
        state.waiting_for_operand = false;
    } else if !state.display.contains('.') {
        state.display.push('.');
    }
}

fn perform_operation(state: &mut CalculatorState, operator: Operator) {
    let input = state.display_value();
    match (state.previous_value.zip(state.operation), operator) {
        (Some((previous, pending)), Operator::Equals) => {
            let result = pending.apply(previous, input);
            state.history = format!(
                "{} {} {} = {}",
                state.render(previous),
                pending,
                state.render(input),
                state.render(result)
            );
            state.display = state.render(result);
            state.previous_value = None;
            state.operation = None;
            state.is_animating = true;
        }
        (Some((previous, pending)), Operator::Binary(next)) => {
            let result = pending.apply(previous, input);
            state.display = state.render(result);
            state.history = format!("{} {}", state.display, next);
            state.previous_value = Some(result);
            state.operation = Some(next);
            state.is_animating = true;
        }
        (None, Operator::Binary(next)) => {
            state.history = format!("{} {}", state.render(input), next);
            state.previous_value = Some(input);
            state.operation = Some(next);
        }
        (None, Operator::Equals) => {}
    }
    state.waiting_for_operand = true;
}

fn perform_bitwise(state: &mut CalculatorState, operation: BitwiseOperation) {
    let base = state.base_mode;
    let size = state.word_size;
    let operand = match state.display_integer() {
        Some(value) => format_integer(value, base),
        None => state
            .display_whole()
            .map_or_else(|| "0".to_string(), |value| format_value(value, base)),
    };
    // two's complement into the 64-bit working register
    let result = operation.apply(state.display_word(), size);
    let rendered = format_unsigned(result, base);
    state.history = match operation {
        BitwiseOperation::Not => format!("not({operand}) = {rendered}"),
        BitwiseOperation::Binary(op, right) => format!(
            "{operand} {op} {} = {rendered}",
            format_unsigned(right, base)
        ),
    };
    state.display = rendered;
    state.waiting_for_operand = true;
    state.is_animating = true;
}

fn show_result(state: &mut CalculatorState, value: f64) {
    state.display = state.render(value);
    state.waiting_for_operand = true;
    state.is_animating = true;
}

fn record_function(state: &mut CalculatorState, label: &str, value: f64, result: f64) {
    state.history = format!("{label}({}) = {}", state.render(value), state.render(result));
    show_result(state, result);
}

/// A calculator session: state plus its factorial memo.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
    cache: FactorialCache,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an existing state with a fresh memo.
    #[must_use]
    pub fn with_state(state: CalculatorState) -> Self {
        Self {
            state,
            cache: FactorialCache::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> CalculatorState {
        self.state
    }

    /// Apply one input and return the new state.
    pub fn apply(&mut self, input: Input) -> &CalculatorState {
        self.state = transition(&self.state, &input, &mut self.cache);
        &self.state
    }

    pub fn input_digit(&mut self, digit: char) -> &CalculatorState {
        self.apply(Input::Digit(digit))
    }

    pub fn input_hex_digit(&mut self, digit: char) -> &CalculatorState {
        self.apply(Input::HexDigit(digit))
    }

    pub fn input_decimal(&mut self) -> &CalculatorState {
        self.apply(Input::Decimal)
    }

    pub fn clear(&mut self) -> &CalculatorState {
        self.apply(Input::Clear)
    }

    pub fn clear_entry(&mut self) -> &CalculatorState {
        self.apply(Input::ClearEntry)
    }

    pub fn backspace(&mut self) -> &CalculatorState {
        self.apply(Input::Backspace)
    }

    pub fn toggle_sign(&mut self) -> &CalculatorState {
        self.apply(Input::ToggleSign)
    }

    pub fn percentage(&mut self) -> &CalculatorState {
        self.apply(Input::Percentage)
    }

    pub fn perform_operation(&mut self, operator: impl Into<Operator>) -> &CalculatorState {
        self.apply(Input::Operation(operator.into()))
    }

    pub fn perform_unary_operation(&mut self, op: UnaryOp) -> &CalculatorState {
        self.apply(Input::Unary(op))
    }

    pub fn perform_trigonometric(&mut self, func: TrigFunction) -> &CalculatorState {
        self.apply(Input::Trigonometric(func))
    }

    pub fn perform_logarithmic(&mut self, func: LogFunction) -> &CalculatorState {
        self.apply(Input::Logarithmic(func))
    }

    pub fn insert_constant(&mut self, constant: Constant) -> &CalculatorState {
        self.apply(Input::Constant(constant))
    }

    pub fn perform_bitwise_operation(&mut self, operation: BitwiseOperation) -> &CalculatorState {
        self.apply(Input::Bitwise(operation))
    }

    pub fn convert_base(&mut self, to: BaseMode) -> &CalculatorState {
        self.apply(Input::ConvertBase(to))
    }

    pub fn set_word_size(&mut self, size: WordSize) -> &CalculatorState {
        self.apply(Input::SetWordSize(size))
    }

    pub fn toggle_angle_mode(&mut self) -> &CalculatorState {
        self.apply(Input::ToggleAngleMode)
    }

    pub fn memory_store(&mut self) -> &CalculatorState {
        self.apply(Input::MemoryStore)
    }

    pub fn memory_recall(&mut self) -> &CalculatorState {
        self.apply(Input::MemoryRecall)
    }

    pub fn memory_add(&mut self) -> &CalculatorState {
        self.apply(Input::MemoryAdd)
    }

    pub fn memory_subtract(&mut self) -> &CalculatorState {
        self.apply(Input::MemorySubtract)
    }

    pub fn memory_clear(&mut self) -> &CalculatorState {
        self.apply(Input::MemoryClear)
    }

    pub fn end_animation(&mut self) -> &CalculatorState {
        self.apply(Input::EndAnimation)
    }
}
