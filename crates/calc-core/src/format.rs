//! Display text parsing and rendering.
//!
//! The display is plain text interpreted under the current [`BaseMode`].
//! Parsing is lenient and prefix-based: `"3."` reads as 3 and `"12abc"`
//! reads as 12. Rendering produces the canonical text for a value.

use crate::state::BaseMode;

pub const NAN_TEXT: &str = "NaN";
pub const INFINITY_TEXT: &str = "Infinity";
pub const NEG_INFINITY_TEXT: &str = "-Infinity";

/// Values at or above this magnitude render in exponent notation.
const EXPONENT_UPPER: f64 = 1e21;
/// Non-zero values below this magnitude render in exponent notation.
const EXPONENT_LOWER: f64 = 1e-6;
/// 2^127: the first magnitude outside `i128`.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
/// 2^64
const WORD_MODULUS: f64 = 18_446_744_073_709_551_616.0;

/// Read the display as a number under `base`.
///
/// Unparsable text yields `NaN`.
#[must_use]
pub fn parse_value(text: &str, base: BaseMode) -> f64 {
    if base == BaseMode::Dec {
        return parse_decimal(text);
    }
    if let Some(sentinel) = parse_sentinel(text) {
        return sentinel;
    }
    parse_whole(text, base).unwrap_or(f64::NAN)
}

/// Leading-prefix decimal float parse.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and the words `Infinity` / `NaN`.
#[must_use]
pub fn parse_decimal(text: &str) -> f64 {
    let text = text.trim_start();
    if let Some(sentinel) = parse_sentinel(text) {
        return sentinel;
    }

    let bytes = text.as_bytes();
    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &text[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // An exponent marker without digits is not part of the number.
        if end > digits_start {
            exponent = &text[pos + 1..end];
        }
    }

    let normalized = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        if exponent.is_empty() { "0" } else { exponent },
    );
    normalized.parse().unwrap_or(f64::NAN)
}

/// Leading-prefix integer parse in `base`.
///
/// Returns `None` when no digit is found or the value overflows `i128`.
/// [`parse_whole`] keeps going past the `i128` range.
#[must_use]
pub fn parse_integer(text: &str, base: BaseMode) -> Option<i128> {
    let radix = base.radix();
    let (negative, digits) = split_sign(text);

    let mut value: i128 = 0;
    let mut seen = false;
    for digit in digits.chars().map_while(|ch| ch.to_digit(radix)) {
        value = value
            .checked_mul(i128::from(radix))?
            .checked_add(i128::from(digit))?;
        seen = true;
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Leading-prefix integer parse in `base` as a float.
///
/// Digits are accumulated exactly while they fit in `i128`, then in `f64`,
/// so huge values lose precision instead of failing. `None` when no digit
/// is found.
#[must_use]
pub fn parse_whole(text: &str, base: BaseMode) -> Option<f64> {
    let radix = base.radix();
    let (negative, digits) = split_sign(text);

    let mut exact: i128 = 0;
    let mut wide: Option<f64> = None;
    let mut seen = false;
    for digit in digits.chars().map_while(|ch| ch.to_digit(radix)) {
        seen = true;
        wide = match wide {
            Some(acc) => Some(acc * f64::from(radix) + f64::from(digit)),
            None => match exact
                .checked_mul(i128::from(radix))
                .and_then(|next| next.checked_add(i128::from(digit)))
            {
                Some(next) => {
                    exact = next;
                    None
                }
                None => Some(exact as f64 * f64::from(radix) + f64::from(digit)),
            },
        };
    }

    if !seen {
        return None;
    }
    let value = wide.unwrap_or(exact as f64);
    Some(if negative { -value } else { value })
}

/// Integer part of `value` as a two's-complement 64-bit word.
///
/// Agrees with `value as i128 as u64` inside the `i128` range and keeps
/// wrapping beyond it. Non-finite values give 0.
#[must_use]
pub fn wrap_word(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    // `%` is exact, so the remainder is an integer below 2^64 in magnitude
    let rem = value.trunc() % WORD_MODULUS;
    if rem >= 0.0 {
        rem as u64
    } else {
        ((-rem) as u64).wrapping_neg()
    }
}

/// Render `value` in `base`.
///
/// Non-decimal bases truncate toward zero. Magnitudes past `i128` keep
/// every bit of the float.
#[must_use]
pub fn format_value(value: f64, base: BaseMode) -> String {
    if let Some(text) = format_sentinel(value) {
        return text.to_string();
    }
    let whole = value.trunc();
    match base {
        BaseMode::Dec => format_decimal(value),
        _ if whole.abs() < I128_LIMIT => format_integer(whole as i128, base),
        _ => format_wide(whole, base),
    }
}

/// Shortest round-trip decimal rendering with exponent notation outside
/// `[1e-6, 1e21)`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if let Some(text) = format_sentinel(value) {
        return text.to_string();
    }
    if value == 0.0 {
        // covers -0
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        let raw = format!("{value:e}");
        return match raw.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => raw,
        };
    }
    value.to_string()
}

/// Render a signed integer in `base`, upper-case, `-` prefix for negatives.
#[must_use]
pub fn format_integer(value: i128, base: BaseMode) -> String {
    if base == BaseMode::Dec {
        return value.to_string();
    }
    let radix = base.radix();
    let mut magnitude = value.unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while magnitude > 0 {
        // remainder is always < radix <= 16
        let digit = (magnitude % u128::from(radix)) as u32;
        digits.push(
            std::char::from_digit(digit, radix)
                .unwrap_or('0')
                .to_ascii_uppercase(),
        );
        magnitude /= u128::from(radix);
    }
    if value < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Render an unsigned word in `base`.
#[must_use]
pub fn format_unsigned(value: u64, base: BaseMode) -> String {
    format_integer(i128::from(value), base)
}

/// Render a finite integral float at or past 2^127 in a power-of-two base.
///
/// Such a float is `mantissa * 2^shift` with `shift > 0`, so its digits are
/// the mantissa bits followed by zero bits.
fn format_wide(value: f64, base: BaseMode) -> String {
    let radix = base.radix();
    if !radix.is_power_of_two() {
        return format_decimal(value);
    }
    let bits_per_digit = radix.trailing_zeros() as usize;

    let raw = value.abs().to_bits();
    let exponent = ((raw >> 52) & 0x7ff) as usize;
    let mantissa = (raw & ((1 << 52) - 1)) | (1 << 52);
    // least significant bit first
    let mut bits = vec![0u32; exponent.saturating_sub(1075)];
    bits.extend((0..53).map(|i| ((mantissa >> i) & 1) as u32));

    let mut digits: Vec<char> = bits
        .chunks(bits_per_digit)
        .map(|chunk| {
            let digit = chunk
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &bit)| acc | (bit << i));
            std::char::from_digit(digit, radix)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();
    if value < 0.0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

fn split_sign(text: &str) -> (bool, &str) {
    let text = text.trim_start();
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn parse_sentinel(text: &str) -> Option<f64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if rest.starts_with(INFINITY_TEXT) {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if text.starts_with(NAN_TEXT) {
        return Some(f64::NAN);
    }
    None
}

fn format_sentinel(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_TEXT)
    } else if value == f64::INFINITY {
        Some(INFINITY_TEXT)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INFINITY_TEXT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_prefixes() {
        assert_eq!(parse_decimal("0"), 0.0);
        assert_eq!(parse_decimal("3."), 3.0);
        assert_eq!(parse_decimal("0.5"), 0.5);
        assert_eq!(parse_decimal(".25"), 0.25);
        assert_eq!(parse_decimal("-12.5"), -12.5);
        assert_eq!(parse_decimal("1e+21"), 1e21);
        assert_eq!(parse_decimal("1.5e-7"), 1.5e-7);
        assert_eq!(parse_decimal("12abc"), 12.0);
        assert_eq!(parse_decimal("7e"), 7.0);
    }

    #[test]
    fn test_parse_decimal_sentinels() {
        assert!(parse_decimal("NaN").is_nan());
        assert!(parse_decimal("abc").is_nan());
        assert!(parse_decimal("-").is_nan());
        assert_eq!(parse_decimal("Infinity"), f64::INFINITY);
        assert_eq!(parse_decimal("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("FF", BaseMode::Hex), Some(255));
        assert_eq!(parse_integer("ff", BaseMode::Hex), Some(255));
        assert_eq!(parse_integer("-1A", BaseMode::Hex), Some(-26));
        assert_eq!(parse_integer("1012", BaseMode::Bin), Some(5));
        assert_eq!(parse_integer("3.7", BaseMode::Dec), Some(3));
        assert_eq!(parse_integer("9", BaseMode::Oct), None);
        assert_eq!(parse_integer("NaN", BaseMode::Dec), None);
        assert_eq!(parse_integer("", BaseMode::Hex), None);
    }

    #[test]
    fn test_parse_integer_overflow_is_malformed() {
        let huge = "F".repeat(40);
        assert_eq!(parse_integer(&huge, BaseMode::Hex), None);
    }

    #[test]
    fn test_parse_whole_keeps_going_past_i128() {
        let huge = "1".repeat(33);
        let expected = parse_integer(&huge[..32], BaseMode::Hex).unwrap() as f64 * 16.0 + 1.0;
        assert_eq!(parse_whole(&huge, BaseMode::Hex), Some(expected));
        assert_eq!(parse_whole(&format!("-{huge}"), BaseMode::Hex), Some(-expected));
        assert_eq!(parse_whole("FF", BaseMode::Hex), Some(255.0));
        assert_eq!(parse_whole("zz", BaseMode::Hex), None);
        assert!(parse_value(&huge, BaseMode::Hex).is_finite());
    }

    #[test]
    fn test_format_value_past_i128() {
        assert_eq!(
            format_value(2f64.powi(128), BaseMode::Hex),
            format!("1{}", "0".repeat(32))
        );
        assert_eq!(
            format_value(-2f64.powi(129), BaseMode::Oct),
            format!("-1{}", "0".repeat(43))
        );
        assert_eq!(
            format_value(3.0 * 2f64.powi(130), BaseMode::Bin),
            format!("11{}", "0".repeat(130))
        );
        let value = 2f64.powi(127);
        assert_eq!(parse_value(&format_value(value, BaseMode::Hex), BaseMode::Hex), value);
    }

    #[test]
    fn test_wrap_word() {
        assert_eq!(wrap_word(5.9), 5);
        assert_eq!(wrap_word(-1.0), u64::MAX);
        assert_eq!(wrap_word(2f64.powi(64) + 2f64.powi(12)), 4096);
        assert_eq!(wrap_word(-(2f64.powi(80))), 0);
        assert_eq!(wrap_word(9.3e18), 9_300_000_000_000_000_000);
        assert_eq!(wrap_word(f64::NAN), 0);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(0.0), "0");
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(9.0), "9");
        assert_eq!(format_decimal(-2.5), "-2.5");
        assert_eq!(format_decimal(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_decimal(1e20), "100000000000000000000");
        assert_eq!(format_decimal(1e21), "1e+21");
        assert_eq!(format_decimal(1.5e-7), "1.5e-7");
        assert_eq!(format_decimal(0.000001), "0.000001");
        assert_eq!(format_decimal(f64::NAN), "NaN");
        assert_eq!(format_decimal(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(255, BaseMode::Hex), "FF");
        assert_eq!(format_integer(-255, BaseMode::Hex), "-FF");
        assert_eq!(format_integer(5, BaseMode::Bin), "101");
        assert_eq!(format_integer(8, BaseMode::Oct), "10");
        assert_eq!(format_integer(0, BaseMode::Bin), "0");
        assert_eq!(format_unsigned(u64::MAX, BaseMode::Hex), "FFFFFFFFFFFFFFFF");
        assert_eq!(format_unsigned(u64::MAX, BaseMode::Dec), "18446744073709551615");
    }

    #[test]
    fn test_format_value_truncates_in_programmer_bases() {
        assert_eq!(format_value(10.9, BaseMode::Hex), "A");
        assert_eq!(format_value(-10.9, BaseMode::Hex), "-A");
        assert_eq!(format_value(f64::INFINITY, BaseMode::Bin), "Infinity");
    }

    #[test]
    fn test_parse_value_by_base() {
        assert_eq!(parse_value("FF", BaseMode::Hex), 255.0);
        assert!(parse_value("FF", BaseMode::Dec).is_nan());
        assert_eq!(parse_value("Infinity", BaseMode::Hex), f64::INFINITY);
    }
}
