//! End-to-end sequences through the calculator state machine.

use calc_core::{
    AngleMode, BaseMode, BinaryOp, BitwiseOp, BitwiseOperation, Calculator, Operator,
    TrigFunction, UnaryOp, WordSize,
};

fn enter(calc: &mut Calculator, number: &str) {
    for ch in number.chars() {
        match ch {
            '.' => {
                calc.input_decimal();
            }
            'A'..='F' | 'a'..='f' => {
                calc.input_hex_digit(ch);
            }
            _ => {
                calc.input_digit(ch);
            }
        }
    }
}

#[test]
fn chained_operations_fold_left_to_right() {
    let mut calc = Calculator::new();
    enter(&mut calc, "1");
    calc.perform_operation(BinaryOp::Add);
    enter(&mut calc, "2");
    calc.perform_operation(BinaryOp::Multiply);
    assert_eq!(calc.state().display, "3");
    enter(&mut calc, "3");
    calc.perform_operation(Operator::Equals);
    assert_eq!(calc.state().display, "9");
    assert_eq!(calc.state().history, "3 × 3 = 9");
}

#[test]
fn division_by_zero_yields_zero() {
    let mut calc = Calculator::new();
    enter(&mut calc, "5");
    calc.perform_operation(BinaryOp::Divide);
    enter(&mut calc, "0");
    calc.perform_operation(Operator::Equals);
    assert_eq!(calc.state().display, "0");
    assert_eq!(calc.state().history, "5 ÷ 0 = 0");
}

#[test]
fn power_and_mod_operators() {
    let mut calc = Calculator::new();
    enter(&mut calc, "2");
    calc.perform_operation(BinaryOp::Power);
    enter(&mut calc, "10");
    calc.perform_operation(BinaryOp::Mod);
    assert_eq!(calc.state().display, "1024");
    enter(&mut calc, "1000");
    calc.perform_operation(Operator::Equals);
    assert_eq!(calc.state().display, "24");
}

#[test]
fn result_feeds_next_calculation() {
    let mut calc = Calculator::new();
    enter(&mut calc, "4");
    calc.perform_operation(BinaryOp::Add);
    enter(&mut calc, "4");
    calc.perform_operation(Operator::Equals);
    calc.perform_unary_operation(UnaryOp::Square);
    assert_eq!(calc.state().display, "64");
    assert_eq!(calc.state().history, "square(8) = 64");
}

#[test]
fn large_results_use_exponent_notation() {
    let mut calc = Calculator::new();
    enter(&mut calc, "1000000");
    calc.perform_unary_operation(UnaryOp::Cube);
    assert_eq!(calc.state().display, "1000000000000000000");
    calc.perform_unary_operation(UnaryOp::Square);
    assert_eq!(calc.state().display, "1e+36");
}

#[test]
fn factorial_boundaries_through_the_machine() {
    let mut calc = Calculator::new();
    enter(&mut calc, "171");
    calc.perform_unary_operation(UnaryOp::Factorial);
    assert_eq!(calc.state().display, "Infinity");

    calc.clear();
    enter(&mut calc, "0");
    calc.perform_unary_operation(UnaryOp::Factorial);
    assert_eq!(calc.state().display, "1");
}

#[test]
fn inverse_trig_round_trips_in_degrees() {
    let mut calc = Calculator::new();
    enter(&mut calc, "30");
    calc.perform_trigonometric(TrigFunction::Sin);
    calc.perform_trigonometric(TrigFunction::Asin);
    let value: f64 = calc.state().display.parse().unwrap();
    assert!((value - 30.0).abs() < 1e-9, "got {value}");
}

#[test]
fn radians_mode_skips_conversion() {
    let mut calc = Calculator::new();
    calc.toggle_angle_mode();
    assert_eq!(calc.state().angle_mode, AngleMode::Rad);
    enter(&mut calc, "0");
    calc.perform_trigonometric(TrigFunction::Cos);
    assert_eq!(calc.state().display, "1");
}

#[test]
fn memory_store_overwrites_after_add() {
    let mut calc = Calculator::new();
    enter(&mut calc, "7");
    calc.memory_add();
    calc.clear();
    enter(&mut calc, "3");
    calc.memory_store();
    assert_eq!(calc.state().memory, 3.0);
}

#[test]
fn hex_value_masked_from_dword_to_byte() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    enter(&mut calc, "1FF");
    assert_eq!(calc.state().display, "1FF");
    calc.set_word_size(WordSize::Byte);
    assert_eq!(calc.state().display, "FF");
    assert_eq!(calc.state().word_size, WordSize::Byte);
}

#[test]
fn qword_not_of_zero_is_all_ones() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    calc.set_word_size(WordSize::QWord);
    calc.perform_bitwise_operation(BitwiseOperation::Not);
    assert_eq!(calc.state().display, "FFFFFFFFFFFFFFFF");
}

#[test]
fn qword_rotate_wraps_top_bit() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    calc.set_word_size(WordSize::QWord);
    enter(&mut calc, "8000000000000000");
    calc.perform_bitwise_operation(BitwiseOperation::Binary(BitwiseOp::Rol, 1));
    assert_eq!(calc.state().display, "1");
    assert_eq!(calc.state().history, "8000000000000000 rol 1 = 1");
}

#[test]
fn shift_beyond_word_is_zero() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Bin);
    enter(&mut calc, "1");
    calc.perform_bitwise_operation(BitwiseOperation::Binary(BitwiseOp::Lsh, 32));
    assert_eq!(calc.state().display, "0");
}

#[test]
fn binary_conversions_preserve_value() {
    let mut calc = Calculator::new();
    enter(&mut calc, "255");
    calc.convert_base(BaseMode::Bin);
    assert_eq!(calc.state().display, "11111111");
    calc.convert_base(BaseMode::Oct);
    assert_eq!(calc.state().display, "377");
    calc.convert_base(BaseMode::Hex);
    assert_eq!(calc.state().display, "FF");
    calc.convert_base(BaseMode::Dec);
    assert_eq!(calc.state().display, "255");
}

#[test]
fn arithmetic_in_hex_renders_in_hex() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    enter(&mut calc, "A");
    calc.perform_operation(BinaryOp::Add);
    enter(&mut calc, "6");
    calc.perform_operation(Operator::Equals);
    assert_eq!(calc.state().display, "10");
    assert_eq!(calc.state().history, "A + 6 = 10");
}

#[test]
fn negative_value_survives_hex_round_trip() {
    let mut calc = Calculator::new();
    enter(&mut calc, "26");
    calc.toggle_sign();
    calc.convert_base(BaseMode::Hex);
    assert_eq!(calc.state().display, "-1A");
    calc.convert_base(BaseMode::Dec);
    assert_eq!(calc.state().display, "-26");
}

#[test]
fn hex_product_past_i128_keeps_magnitude() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    enter(&mut calc, "FFFFFFFFFFFFFFFF");
    calc.perform_operation(BinaryOp::Multiply);
    enter(&mut calc, "FFFFFFFFFFFFFFFF");
    calc.perform_operation(Operator::Equals);
    // both operands round to 2^64 as floats
    assert_eq!(calc.state().display, format!("1{}", "0".repeat(32)));
}

#[test]
fn long_hex_operand_adds_without_nan() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    enter(&mut calc, &"1".repeat(33));
    calc.perform_operation(BinaryOp::Add);
    enter(&mut calc, "1");
    calc.perform_operation(Operator::Equals);
    assert_eq!(calc.state().display, "111111111111110000000000000000000");
}

#[test]
fn hex_digit_past_i128_extends_the_operand() {
    let mut calc = Calculator::new();
    calc.convert_base(BaseMode::Hex);
    enter(&mut calc, &"1".repeat(32));
    calc.input_hex_digit('A');
    assert_eq!(calc.state().display, "111111111111110000000000000000000");
    calc.convert_base(BaseMode::Bin);
    assert!(calc.state().display.starts_with("1000100010001"));
}
