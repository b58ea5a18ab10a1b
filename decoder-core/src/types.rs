//! Core data types for the Morse decoder

use crate::hal::{Duration, Instant};
use heapless::String;

/// Columns on the character display
pub const DISPLAY_COLS: usize = 16;
/// Rows on the character display
pub const DISPLAY_ROWS: usize = 2;
/// Decoded characters shown beside the `Text: ` label in the live view
pub const LIVE_TEXT_LEN: usize = 10;
/// Longest pattern that is stored; longer input only sets the overflow flag
pub const MAX_SYMBOLS: usize = 8;
/// Decoded characters kept in memory
pub const TEXT_CAPACITY: usize = 128;
/// Character appended for patterns missing from the code table
pub const UNKNOWN_CHAR: char = '?';

/// Morse code symbols
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Short press
    Dot,
    /// Long press
    Dash,
}

impl Symbol {
    /// Glyph used on the display and in logs
    pub const fn glyph(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Symbol> {
        match glyph {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Bit-packed pattern of up to [`MAX_SYMBOLS`] symbols.
///
/// Bit `i` is set when symbol `i` is a dash. Symbols pushed past the capacity
/// are dropped and mark the pattern as overflowed; an overflowed pattern never
/// equals a code table entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SymbolSequence {
    bits: u8,
    len: u8,
    overflowed: bool,
}

impl SymbolSequence {
    pub const fn new() -> Self {
        Self {
            bits: 0,
            len: 0,
            overflowed: false,
        }
    }

    /// Build from a `.`/`-` string at compile time. Any byte other than `-`
    /// counts as a dot.
    pub const fn from_pattern(pattern: &str) -> Self {
        let bytes = pattern.as_bytes();
        let mut seq = Self::new();
        let mut i = 0;
        while i < bytes.len() {
            let symbol = if bytes[i] == b'-' { Symbol::Dash } else { Symbol::Dot };
            seq = seq.with(symbol);
            i += 1;
        }
        seq
    }

    /// Parse a `.`/`-` string, rejecting any other character
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut seq = Self::new();
        for glyph in pattern.chars() {
            seq.push(Symbol::from_glyph(glyph)?);
        }
        Some(seq)
    }

    const fn with(self, symbol: Symbol) -> Self {
        if self.len as usize >= MAX_SYMBOLS {
            return Self {
                overflowed: true,
                ..self
            };
        }
        let bits = match symbol {
            Symbol::Dash => self.bits | (1 << self.len),
            Symbol::Dot => self.bits,
        };
        Self {
            bits,
            len: self.len + 1,
            overflowed: self.overflowed,
        }
    }

    /// Append a symbol. Returns `false` if it did not fit.
    pub fn push(&mut self, symbol: Symbol) -> bool {
        *self = self.with(symbol);
        !self.overflowed
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Stored symbol count
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0 && !self.overflowed
    }

    pub const fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        if index >= self.len() {
            return None;
        }
        if self.bits & (1 << index) != 0 {
            Some(Symbol::Dash)
        } else {
            Some(Symbol::Dot)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Stored symbols rendered as `.`/`-`
    pub fn glyphs(&self) -> String<MAX_SYMBOLS> {
        let mut out = String::new();
        for symbol in self.iter() {
            // Capacity equals MAX_SYMBOLS, so this cannot fail
            let _ = out.push(symbol.glyph());
        }
        out
    }
}

/// Result of resolving a pending pattern
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// Pattern found in the code table
    Char(char),
    /// Pattern missing from the code table
    Unknown,
}

impl Decoded {
    /// Character appended to the decoded text
    pub const fn as_char(&self) -> char {
        match self {
            Decoded::Char(c) => *c,
            Decoded::Unknown => UNKNOWN_CHAR,
        }
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Decoded::Unknown)
    }
}

/// A debounced press/release pair from the Morse button
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    /// Time between accepted press and accepted release
    pub duration: Duration,
    /// Classification of the press
    pub symbol: Symbol,
    /// Press reached the dash threshold and was folded into a dash
    pub long: bool,
    /// Time of the accepted release
    pub released_at: Instant,
}

/// Decoder timing configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Presses shorter than this are dots
    pub dot_threshold: Duration,
    /// Presses at or above this are long dashes
    pub dash_threshold: Duration,
    /// Quiet time after the last release that completes a letter
    pub letter_gap: Duration,
    /// A raw level must hold longer than this to count as an edge
    pub debounce: Duration,
    /// Hold time for a full text that fits on one row
    pub static_dwell: Duration,
    /// Time per window position while scrolling
    pub scroll_step: Duration,
    /// Extra hold after the last scroll position
    pub scroll_hold: Duration,
    /// Hold time for the "no text" message
    pub empty_dwell: Duration,
    /// Hold time for the start-up banner
    pub banner_dwell: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dot_threshold: Duration::from_millis(200),
            dash_threshold: Duration::from_millis(600),
            letter_gap: Duration::from_millis(1000),
            debounce: Duration::from_millis(50),
            static_dwell: Duration::from_millis(3000),
            scroll_step: Duration::from_millis(500),
            scroll_hold: Duration::from_millis(1000),
            empty_dwell: Duration::from_millis(1000),
            banner_dwell: Duration::from_millis(2000),
        }
    }
}

impl DecoderConfig {
    /// Create a new configuration with validation. Display timings keep
    /// their defaults.
    pub fn new(
        dot_threshold_ms: u64,
        dash_threshold_ms: u64,
        letter_gap_ms: u64,
        debounce_ms: u64,
    ) -> Result<Self, &'static str> {
        if dot_threshold_ms == 0 || dot_threshold_ms >= dash_threshold_ms {
            return Err("Dot threshold must be non-zero and below dash threshold");
        }
        if debounce_ms > 100 {
            return Err("Debounce must be <= 100ms");
        }
        if letter_gap_ms == 0 {
            return Err("Letter gap must be non-zero");
        }

        Ok(Self {
            dot_threshold: Duration::from_millis(dot_threshold_ms),
            dash_threshold: Duration::from_millis(dash_threshold_ms),
            letter_gap: Duration::from_millis(letter_gap_ms),
            debounce: Duration::from_millis(debounce_ms),
            ..Self::default()
        })
    }
}
