//! Numeric helpers shared by the state machine.
//!
//! Everything here is pure except [`FactorialCache`], which memoizes
//! factorials for the lifetime of the calculator that owns it.

/// Largest `n` whose factorial is finite in an `f64`.
pub const MAX_FINITE_FACTORIAL: i64 = 170;

/// Factorial of `n`, computed iteratively.
///
/// - `n < 0` returns `0.0` (sentinel, not an error)
/// - `n` in `{0, 1}` returns `1.0`
/// - `n > 170` returns `f64::INFINITY`
#[must_use]
pub fn factorial(n: i64) -> f64 {
    if n < 0 {
        return 0.0;
    }
    if n > MAX_FINITE_FACTORIAL {
        return f64::INFINITY;
    }
    let mut result = 1.0_f64;
    for i in 2..=n {
        result *= i as f64;
    }
    result
}

/// Memoized factorials.
///
/// Stores the prefix products `0!, 1!, ..., k!` computed so far. The table
/// only grows, so a value once returned is always returned again for the
/// same `n`.
#[derive(Debug, Clone)]
pub struct FactorialCache {
    table: Vec<f64>,
}

impl Default for FactorialCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorialCache {
    /// Create a cache seeded with `0! = 1`.
    #[must_use]
    pub fn new() -> Self {
        Self { table: vec![1.0] }
    }

    /// Factorial of `n`, with the same boundary behavior as [`factorial`].
    pub fn get(&mut self, n: i64) -> f64 {
        if n < 0 {
            return 0.0;
        }
        if n > MAX_FINITE_FACTORIAL {
            return f64::INFINITY;
        }
        // n is within 0..=170 here
        let index = n as usize;
        while self.table.len() <= index {
            let next = self.table.len();
            let previous = self.table[next - 1];
            self.table.push(previous * next as f64);
        }
        self.table[index]
    }

    /// Number of memoized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: `0!` is seeded on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// All-ones mask for a word of `bits` width.
#[must_use]
pub const fn word_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Rotate `value` left by `shift` within a `bits`-wide word.
#[must_use]
pub fn rotate_left(value: u64, shift: u32, bits: u32) -> u64 {
    let bits = bits.clamp(1, 64);
    let mask = word_mask(bits);
    let value = value & mask;
    let shift = shift % bits;
    if shift == 0 {
        return value;
    }
    ((value << shift) | (value >> (bits - shift))) & mask
}

/// Rotate `value` right by `shift` within a `bits`-wide word.
#[must_use]
pub fn rotate_right(value: u64, shift: u32, bits: u32) -> u64 {
    let bits = bits.clamp(1, 64);
    let mask = word_mask(bits);
    let value = value & mask;
    let shift = shift % bits;
    if shift == 0 {
        return value;
    }
    ((value >> shift) | (value << (bits - shift))) & mask
}
