//! Keyboard dispatch against a live calculator.

use std::time::{Duration, Instant};

use calc_core::{AngleMode, BaseMode, Calculator, CalculatorMode, CapabilitySettings, WordSize, keys};
use calc_input::{Dispatch, Dispatcher, Effect, IgnoreReason, KeyEvent, NoticeKind, bindings};

/// Feeds shortcut text through a dispatcher, spacing presses past the
/// debounce window.
struct Harness {
    dispatcher: Dispatcher,
    calc: Calculator,
    settings: CapabilitySettings,
    clock: Instant,
}

impl Harness {
    fn new(mode: CalculatorMode) -> Self {
        Self::with_settings(mode, CapabilitySettings::new())
    }

    fn with_settings(mode: CalculatorMode, settings: CapabilitySettings) -> Self {
        Self {
            dispatcher: Dispatcher::new(mode),
            calc: Calculator::new(),
            settings,
            clock: Instant::now(),
        }
    }

    fn press(&mut self, shortcut: &str) -> Dispatch {
        self.clock += Duration::from_millis(150);
        let event = shortcut
            .parse::<KeyEvent>()
            .unwrap_or_else(|err| panic!("{shortcut}: {err}"))
            .at(self.clock);
        self.dispatcher.handle(&event, &mut self.calc, &self.settings)
    }

    fn type_all(&mut self, shortcuts: &[&str]) {
        for shortcut in shortcuts {
            self.press(shortcut);
        }
    }

    fn display(&self) -> &str {
        &self.calc.state().display
    }
}

#[test]
fn standard_mode_arithmetic() {
    let mut h = Harness::new(CalculatorMode::Standard);
    h.type_all(&["1", "2", "+", "3", "*", "2", "Enter"]);
    assert_eq!(h.display(), "30");
    assert_eq!(h.calc.state().history, "15 × 2 = 30");
}

#[test]
fn equals_key_and_clear() {
    let mut h = Harness::new(CalculatorMode::Standard);
    h.type_all(&["9", "/", "4", "="]);
    assert_eq!(h.display(), "2.25");
    h.press("Escape");
    assert_eq!(h.display(), "0");
    h.type_all(&["7", "Delete"]);
    assert_eq!(h.display(), "0");
}

#[test]
fn same_key_repeat_is_debounced_but_other_keys_are_not() {
    let mut h = Harness::new(CalculatorMode::Standard);
    let start = Instant::now();
    let settings = CapabilitySettings::new();
    for (key, offset) in [('1', 0), ('1', 40), ('2', 60), ('1', 80)] {
        let event = KeyEvent::character(key).at(start + Duration::from_millis(offset));
        h.dispatcher.handle(&event, &mut h.calc, &settings);
    }
    assert_eq!(h.display(), "121");
}

#[test]
fn disabled_capability_rejects_without_touching_state() {
    let settings = CapabilitySettings::new().with(keys::SIN, false);
    let mut h = Harness::with_settings(CalculatorMode::Scientific, settings);
    h.type_all(&["3", "0"]);
    let before = h.calc.state().clone();

    let dispatch = h.press("s");
    let notice = dispatch.notice().expect("rejected");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.description, "sin is disabled by the administrator");
    assert!(dispatch.prevent_default);
    assert_eq!(h.calc.state(), &before);
}

#[test]
fn disabled_group_rejects_member_function() {
    let settings = CapabilitySettings::new().with(keys::HYPERBOLIC, false);
    let mut h = Harness::with_settings(CalculatorMode::Scientific, settings);
    let dispatch = h.press("y");
    assert_eq!(
        dispatch.notice().map(|n| n.description.as_str()),
        Some("hyperbolic is disabled by the administrator")
    );
    // plain trig is unaffected
    assert!(h.press("s").is_applied());
}

#[test]
fn disabled_shift_variant_does_not_fall_back() {
    let settings = CapabilitySettings::new().with(keys::ASIN, false);
    let mut h = Harness::with_settings(CalculatorMode::Scientific, settings);
    h.press("1");
    let dispatch = h.press("Shift+s");
    assert!(matches!(dispatch.effect, Effect::Rejected(_)));
    assert_eq!(h.display(), "1");
}

#[test]
fn uppercase_letter_counts_as_shifted() {
    let mut h = Harness::new(CalculatorMode::Scientific);
    h.type_all(&["3", "R"]);
    assert_eq!(h.display(), "27");
}

#[test]
fn disabled_mode_rejects_every_key() {
    let settings = CapabilitySettings::new().with(keys::PROGRAMMER_MODE, false);
    let mut h = Harness::with_settings(CalculatorMode::Programmer, settings);
    let dispatch = h.press("5");
    assert_eq!(
        dispatch.notice().map(|n| n.title.as_str()),
        Some("Mode disabled")
    );
    assert_eq!(h.display(), "0");
}

#[test]
fn invalid_digit_for_base_is_rejected() {
    let mut h = Harness::new(CalculatorMode::Programmer);
    h.press("Ctrl+b");
    assert_eq!(h.calc.state().base_mode, BaseMode::Bin);
    h.press("1");
    let before = h.calc.state().clone();

    let dispatch = h.press("2");
    let notice = dispatch.notice().expect("rejected");
    assert_eq!(notice.title, "Invalid digit");
    assert!(notice.description.contains("binary"));
    assert_eq!(h.calc.state(), &before);
}

#[test]
fn hex_letters_only_in_hex_base() {
    let mut h = Harness::new(CalculatorMode::Programmer);
    assert!(h.press("a").notice().is_some());

    h.press("Ctrl+h");
    h.type_all(&["1", "f", "F"]);
    assert_eq!(h.display(), "1FF");
    h.press("Ctrl+1");
    assert_eq!(h.calc.state().word_size, WordSize::Byte);
    assert_eq!(h.display(), "FF");
}

#[test]
fn hex_entry_requires_conversions_capability() {
    let settings = CapabilitySettings::new().with(keys::CONVERSIONS_PROG, false);
    let mut h = Harness::with_settings(CalculatorMode::Programmer, settings);
    let dispatch = h.press("Ctrl+h");
    assert!(dispatch.notice().is_some());
    assert_eq!(h.calc.state().base_mode, BaseMode::Dec);
}

#[test]
fn bitwise_keys_use_memory_as_operand() {
    let mut h = Harness::new(CalculatorMode::Programmer);
    h.type_all(&["1", "2", "Ctrl+m", "Escape", "1", "0", "&"]);
    assert_eq!(h.display(), "8");
    assert_eq!(h.calc.state().history, "10 and 12 = 8");
    h.press("<");
    assert_eq!(h.display(), "16");
    h.press("~");
    assert_eq!(h.display(), "4294967279");
}

#[test]
fn bitwise_memory_operand_wraps_past_i64() {
    let mut h = Harness::new(CalculatorMode::Programmer);
    // 2^63 + 4096
    for digit in "9223372036854779904".chars() {
        h.press(&digit.to_string());
    }
    h.type_all(&["Ctrl+m", "Escape", "6", "1", "4", "4", "&"]);
    assert_eq!(h.display(), "4096");
    assert_eq!(h.calc.state().history, "6144 and 4096 = 4096");
}

#[test]
fn shift_keys_require_shift_group() {
    let settings = CapabilitySettings::new().with(keys::SHIFT_OPS, false);
    let mut h = Harness::with_settings(CalculatorMode::Programmer, settings);
    h.press("3");
    assert!(h.press(">").notice().is_some());
    assert!(h.press("~").is_applied());
}

#[test]
fn percent_key_respects_capability() {
    let mut h = Harness::new(CalculatorMode::Standard);
    h.type_all(&["5", "0"]);
    assert!(h.press("%").is_applied());
    assert_eq!(h.display(), "0.5");

    let settings = CapabilitySettings::new().with(keys::PERCENTAGE, false);
    let mut h = Harness::with_settings(CalculatorMode::Standard, settings);
    h.type_all(&["5", "0"]);
    let dispatch = h.press("%");
    let notice = dispatch.notice().expect("rejected");
    assert_eq!(notice.description, "percentage is disabled by the administrator");
    assert_eq!(h.display(), "50");
}

#[test]
fn memory_shortcuts_respect_capability() {
    let mut h = Harness::new(CalculatorMode::Standard);
    h.type_all(&["4", "Ctrl+m", "Ctrl+p", "Escape", "Ctrl+r"]);
    assert_eq!(h.display(), "8");

    let settings = CapabilitySettings::new().with(keys::MEMORY_FUNCTIONS, false);
    let mut h = Harness::with_settings(CalculatorMode::Standard, settings);
    h.type_all(&["4", "Ctrl+m"]);
    assert_eq!(h.calc.state().memory, 0.0);
}

#[test]
fn unmatched_ctrl_combination_never_reaches_bare_binding() {
    let mut h = Harness::new(CalculatorMode::Scientific);
    h.press("2");
    let dispatch = h.press("Ctrl+s");
    assert_eq!(dispatch.effect, Effect::Ignored(IgnoreReason::Unbound));
    assert_eq!(h.display(), "2");
}

#[test]
fn alt_d_toggles_angle_mode_in_scientific_only() {
    let mut h = Harness::new(CalculatorMode::Scientific);
    h.press("Alt+d");
    assert_eq!(h.calc.state().angle_mode, AngleMode::Rad);

    let mut h = Harness::new(CalculatorMode::Standard);
    let dispatch = h.press("Alt+d");
    assert_eq!(dispatch.effect, Effect::Ignored(IgnoreReason::Unbound));
    assert_eq!(h.calc.state().angle_mode, AngleMode::Deg);
}

#[test]
fn scientific_keys_are_unbound_in_standard() {
    let mut h = Harness::new(CalculatorMode::Standard);
    h.press("9");
    for key in ["q", "s", "!", "^", "l"] {
        let dispatch = h.press(key);
        assert_eq!(dispatch.effect, Effect::Ignored(IgnoreReason::Unbound), "{key}");
    }
    assert_eq!(h.display(), "9");
}

#[test]
fn documented_single_key_bindings_resolve() {
    for mode in CalculatorMode::ALL {
        for binding in bindings(mode) {
            // ranges like "0-9" do not parse as one key
            let Ok(event) = binding.shortcut.parse::<KeyEvent>() else {
                continue;
            };
            let mut h = Harness::new(mode);
            h.press("3");
            let dispatch = h
                .dispatcher
                .handle(&event.at(h.clock + Duration::from_secs(1)), &mut h.calc, &h.settings);
            assert!(
                dispatch.is_applied(),
                "{mode}: {} -> {:?}",
                binding.shortcut,
                dispatch.effect
            );
        }
    }
}
