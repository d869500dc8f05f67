//! Key events.
//!
//! A [`KeyEvent`] is a toolkit-neutral description of one key press: the
//! logical key, the modifier state, which element had focus, and when it
//! happened. Shortcut text such as `Ctrl+m` or `Shift+s` parses into a
//! [`KeyEvent`] through `FromStr`.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;

/// Named, non-printing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl NamedKey {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Escape => "Escape",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Tab => "Tab",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
        }
    }
}

/// Logical key of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Named(NamedKey),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(' ') => f.write_str("Space"),
            Self::Character(c) => write!(f, "{c}"),
            Self::Named(named) => f.write_str(named.name()),
        }
    }
}

/// Modifier state of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        alt: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    #[inline]
    #[must_use]
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.ctrl && !self.meta && !self.alt && !self.shift
    }
}

/// Element holding focus when the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// The calculator surface or anything that is not a text field.
    #[default]
    Calculator,
    TextInput,
    TextArea,
    ContentEditable,
}

impl FocusTarget {
    /// Whether typing here should reach the element instead of the calculator.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::ContentEditable)
    }
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub focus: FocusTarget,
    pub timestamp: Instant,
}

impl KeyEvent {
    /// Press of `key` with no modifiers, on the calculator, now.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            focus: FocusTarget::Calculator,
            timestamp: Instant::now(),
        }
    }

    #[must_use]
    pub fn character(c: char) -> Self {
        Self::new(Key::Character(c))
    }

    #[must_use]
    pub fn named(named: NamedKey) -> Self {
        Self::new(Key::Named(named))
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focus: FocusTarget) -> Self {
        self.focus = focus;
        self
    }

    /// Override the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        if m.ctrl {
            f.write_str("Ctrl+")?;
        }
        if m.meta {
            f.write_str("Cmd+")?;
        }
        if m.alt {
            f.write_str("Alt+")?;
        }
        if m.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Shortcut text that does not describe a key press.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,

    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),

    #[error("unknown key {0:?}")]
    UnknownKey(String),
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    /// Parse shortcut text: `+`-separated modifiers followed by a key.
    ///
    /// A key is a single character or a name (`Enter`, `Escape`, `Esc`,
    /// `Backspace`, `Delete`, `Del`, `Tab`, `Space`, `Plus`, `Minus`, arrow
    /// keys). `+` on its own, or after a modifier as in `Ctrl++`, is the
    /// plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        let (prefix, key_text) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            }
        };

        let mut modifiers = Modifiers::NONE;
        for part in prefix.split('+').filter(|part| !part.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "cmd" | "meta" | "super" => modifiers.meta = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            }
        }

        let key = parse_key(key_text)?;
        Ok(KeyEvent::new(key).with_modifiers(modifiers))
    }
}

fn parse_key(text: &str) -> Result<Key, KeyParseError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Err(KeyParseError::Empty),
        (Some(c), None) => return Ok(Key::Character(c)),
        _ => {}
    }
    let key = match text.to_ascii_lowercase().as_str() {
        "enter" | "return" => Key::Named(NamedKey::Enter),
        "escape" | "esc" => Key::Named(NamedKey::Escape),
        "backspace" => Key::Named(NamedKey::Backspace),
        "delete" | "del" => Key::Named(NamedKey::Delete),
        "tab" => Key::Named(NamedKey::Tab),
        "left" | "arrowleft" => Key::Named(NamedKey::ArrowLeft),
        "right" | "arrowright" => Key::Named(NamedKey::ArrowRight),
        "up" | "arrowup" => Key::Named(NamedKey::ArrowUp),
        "down" | "arrowdown" => Key::Named(NamedKey::ArrowDown),
        "space" => Key::Character(' '),
        "plus" => Key::Character('+'),
        "minus" => Key::Character('-'),
        _ => return Err(KeyParseError::UnknownKey(text.to_string())),
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> KeyEvent {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_keys() {
        assert_eq!(parse("7").key, Key::Character('7'));
        assert_eq!(parse("Enter").key, Key::Named(NamedKey::Enter));
        assert_eq!(parse("esc").key, Key::Named(NamedKey::Escape));
        assert_eq!(parse("Minus").key, Key::Character('-'));
        assert!(parse("7").modifiers.is_empty());
    }

    #[test]
    fn test_parse_modifiers() {
        let event = parse("Ctrl+m");
        assert_eq!(event.key, Key::Character('m'));
        assert!(event.modifiers.command());

        let event = parse("Cmd+Shift+s");
        assert!(event.modifiers.meta);
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.ctrl);
        assert_eq!(event.key, Key::Character('s'));
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse("+").key, Key::Character('+'));
        let event = parse("Ctrl++");
        assert_eq!(event.key, Key::Character('+'));
        assert!(event.modifiers.ctrl);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyEvent>(), Err(KeyParseError::Empty));
        assert_eq!(
            "Hyper+x".parse::<KeyEvent>(),
            Err(KeyParseError::UnknownModifier("Hyper".to_string()))
        );
        assert_eq!(
            "PageDown".parse::<KeyEvent>(),
            Err(KeyParseError::UnknownKey("PageDown".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_modifiers() {
        assert_eq!(parse("ctrl+alt+d").to_string(), "Ctrl+Alt+d");
        assert_eq!(parse("Space").to_string(), "Space");
    }

    #[test]
    fn test_editable_focus() {
        assert!(FocusTarget::TextArea.is_editable());
        assert!(!FocusTarget::Calculator.is_editable());
    }
}
