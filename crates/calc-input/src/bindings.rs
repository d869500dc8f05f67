//! Key binding reference for help screens.

use calc_core::{CalculatorMode, keys};

/// One documented shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Shortcut text; single keys parse as a [`KeyEvent`](crate::KeyEvent).
    pub shortcut: &'static str,
    pub description: &'static str,
    /// Capabilities that must be enabled for the shortcut to work.
    pub capabilities: Vec<&'static str>,
}

impl Binding {
    fn new(shortcut: &'static str, description: &'static str) -> Self {
        Self {
            shortcut,
            description,
            capabilities: Vec::new(),
        }
    }

    fn requires(mut self, capability: &'static str) -> Self {
        self.capabilities.push(capability);
        self
    }
}

/// Every shortcut available in `mode`, common bindings first.
#[must_use]
pub fn bindings(mode: CalculatorMode) -> Vec<Binding> {
    let mut list = vec![
        Binding::new("0-9", "Enter digit"),
        Binding::new("+", "Add"),
        Binding::new("-", "Subtract"),
        Binding::new("*", "Multiply"),
        Binding::new("/", "Divide"),
        Binding::new("Enter", "Equals"),
        Binding::new("=", "Equals"),
        Binding::new(".", "Decimal point"),
        Binding::new("Escape", "Clear"),
        Binding::new("Delete", "Clear"),
        Binding::new("Backspace", "Delete last character"),
        Binding::new("%", "Percentage").requires(keys::PERCENTAGE),
    ];

    let memory = [
        ("Ctrl+m", "Memory store"),
        ("Ctrl+r", "Memory recall"),
        ("Ctrl+p", "Memory add"),
        ("Ctrl+q", "Memory subtract"),
        ("Ctrl+l", "Memory clear"),
    ];
    list.extend(
        memory
            .into_iter()
            .map(|(shortcut, description)| {
                Binding::new(shortcut, description).requires(keys::MEMORY_FUNCTIONS)
            }),
    );

    match mode {
        CalculatorMode::Standard => {}
        CalculatorMode::Scientific => list.extend(scientific()),
        CalculatorMode::Programmer => list.extend(programmer()),
    }
    list
}

fn scientific() -> Vec<Binding> {
    let trig = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::TRIGONOMETRIC)
    };
    let hyperbolic = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::HYPERBOLIC)
    };
    let log = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::LOGARITHMS)
    };
    let constant = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::CONSTANTS)
    };

    vec![
        constant("p", "Insert π", keys::PI),
        constant("e", "Insert e", keys::E),
        trig("s", "Sine", keys::SIN),
        trig("Shift+s", "Arcsine", keys::ASIN),
        trig("c", "Cosine", keys::COS),
        trig("Shift+c", "Arccosine", keys::ACOS),
        trig("t", "Tangent", keys::TAN),
        trig("Shift+t", "Arctangent", keys::ATAN),
        hyperbolic("h", "Hyperbolic sine", keys::SINH),
        hyperbolic("Shift+h", "Hyperbolic cosine", keys::COSH),
        hyperbolic("y", "Hyperbolic tangent", keys::TANH),
        Binding::new("q", "Square root").requires(keys::SQRT),
        Binding::new("r", "Square").requires(keys::SQUARE_SCI),
        Binding::new("Shift+r", "Cube").requires(keys::CUBE),
        Binding::new("^", "Power").requires(keys::POWER),
        Binding::new("!", "Factorial").requires(keys::FACTORIAL),
        Binding::new("m", "Modulo").requires(keys::MOD),
        log("l", "Base-10 logarithm", keys::LOG),
        log("n", "Natural logarithm", keys::LN),
        Binding::new("Alt+d", "Toggle degrees/radians").requires(keys::DEG_RAD),
    ]
}

fn programmer() -> Vec<Binding> {
    let bitwise = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::BITWISE_OPS)
    };
    let shift = |shortcut, description, key| {
        Binding::new(shortcut, description)
            .requires(key)
            .requires(keys::SHIFT_OPS)
    };
    let convert = |shortcut, description| {
        Binding::new(shortcut, description).requires(keys::CONVERSIONS_PROG)
    };
    let word_size =
        |shortcut, description| Binding::new(shortcut, description).requires(keys::WORD_SIZE);

    vec![
        Binding::new("a-f", "Enter hex digit (HEX only)").requires(keys::CONVERSIONS_PROG),
        bitwise("&", "AND with memory", keys::AND),
        bitwise("|", "OR with memory", keys::OR),
        bitwise("x", "XOR with memory", keys::XOR),
        bitwise("~", "NOT", keys::NOT),
        shift("<", "Shift left by 1", keys::LSH),
        shift(">", "Shift right by 1", keys::RSH),
        convert("Ctrl+h", "Convert to hexadecimal"),
        convert("Ctrl+d", "Convert to decimal"),
        convert("Ctrl+o", "Convert to octal"),
        convert("Ctrl+b", "Convert to binary"),
        word_size("Ctrl+1", "Word size BYTE (8 bit)"),
        word_size("Ctrl+2", "Word size WORD (16 bit)"),
        word_size("Ctrl+3", "Word size DWORD (32 bit)"),
        word_size("Ctrl+4", "Word size QWORD (64 bit)"),
    ]
}
