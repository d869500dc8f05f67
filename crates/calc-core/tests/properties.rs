//! Property tests for base conversion, masking and chained arithmetic.

use calc_core::{
    BaseMode, BinaryOp, Calculator, CalculatorState, Operator, WordSize, format, rotate_left,
    rotate_right,
};
use proptest::prelude::*;

fn base() -> impl Strategy<Value = BaseMode> {
    prop::sample::select(BaseMode::ALL.to_vec())
}

fn word_size() -> impl Strategy<Value = WordSize> {
    prop::sample::select(WordSize::ALL.to_vec())
}

fn calculator_showing(value: i64) -> Calculator {
    Calculator::with_state(CalculatorState {
        display: value.to_string(),
        ..CalculatorState::default()
    })
}

proptest! {
    #[test]
    fn base_round_trip_restores_display(value in any::<i64>(), from in base(), to in base()) {
        let mut calc = calculator_showing(value);
        calc.convert_base(from);
        let formatted = calc.state().display.clone();
        calc.convert_base(to);
        calc.convert_base(from);
        prop_assert_eq!(&calc.state().display, &formatted);
    }

    #[test]
    fn integers_render_and_parse_in_every_base(value in any::<i64>(), base in base()) {
        let text = format::format_integer(i128::from(value), base);
        prop_assert_eq!(format::parse_integer(&text, base), Some(i128::from(value)));
        prop_assert!(text.chars().all(|c| c == '-' || base.accepts_digit(c)));
    }

    #[test]
    fn word_size_masking_is_idempotent(value in any::<i64>(), size in word_size(), base in base()) {
        let mut calc = calculator_showing(value);
        calc.convert_base(base);
        calc.set_word_size(size);
        let once = calc.state().display.clone();
        calc.set_word_size(size);
        prop_assert_eq!(&calc.state().display, &once);

        let masked = format::parse_integer(&once, base).unwrap();
        prop_assert!(masked >= 0);
        prop_assert!(masked <= i128::from(size.mask()));
    }

    #[test]
    fn rotations_are_inverse(value in any::<u64>(), shift in 0u32..200, size in word_size()) {
        let bits = size.bits();
        let rotated = rotate_left(value, shift, bits);
        prop_assert!(rotated <= size.mask());
        prop_assert_eq!(rotate_right(rotated, shift, bits), value & size.mask());
    }

    #[test]
    fn chained_addition_and_multiplication_fold_left(a in 0u8..100, b in 0u8..100, c in 0u8..100) {
        let mut calc = calculator_showing(i64::from(a));
        calc.perform_operation(BinaryOp::Add);
        for digit in b.to_string().chars() {
            calc.input_digit(digit);
        }
        calc.perform_operation(BinaryOp::Multiply);
        for digit in c.to_string().chars() {
            calc.input_digit(digit);
        }
        calc.perform_operation(Operator::Equals);
        let expected = (u32::from(a) + u32::from(b)) * u32::from(c);
        prop_assert_eq!(&calc.state().display, &expected.to_string());
    }
}
