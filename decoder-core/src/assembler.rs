//! Letter assembly: pending pattern, inactivity timeout and decoded text

use crate::code_table;
use crate::hal::Instant;
use crate::types::{Decoded, DecoderConfig, InputEvent, SymbolSequence, TEXT_CAPACITY, UNKNOWN_CHAR};
use heapless::Vec;

/// Append-only decoded text.
///
/// Holds the last [`TEXT_CAPACITY`] characters; once full, the oldest
/// character is dropped for each new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedText {
    bytes: Vec<u8, TEXT_CAPACITY>,
}

impl DecodedText {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a character. Non-ASCII input is stored as [`UNKNOWN_CHAR`].
    pub fn push(&mut self, c: char) {
        let byte = if c.is_ascii() { c as u8 } else { UNKNOWN_CHAR as u8 };
        if self.bytes.is_full() {
            self.bytes.remove(0);
        }
        // Room was made above
        let _ = self.bytes.push(byte);
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Last `n` characters (all of them if shorter)
    pub fn tail(&self, n: usize) -> &str {
        let text = self.as_str();
        &text[text.len().saturating_sub(n)..]
    }

    /// `width` characters starting at `offset`, clipped to the text
    pub fn window(&self, offset: usize, width: usize) -> &str {
        let text = self.as_str();
        let start = offset.min(text.len());
        let end = offset.saturating_add(width).min(text.len());
        &text[start..end]
    }
}

/// Assembler states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblerState {
    /// Nothing pending
    Idle,
    /// Collecting symbols; the letter completes `letter_gap` after `last_release`
    Accumulating { last_release: Instant },
}

/// Collects symbols into letters
#[derive(Debug)]
pub struct LetterAssembler {
    config: DecoderConfig,
    pending: SymbolSequence,
    text: DecodedText,
    last_release: Option<Instant>,
}

impl LetterAssembler {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            pending: SymbolSequence::new(),
            text: DecodedText::new(),
            last_release: None,
        }
    }

    pub fn state(&self) -> AssemblerState {
        match self.last_release {
            Some(last_release) if !self.pending.is_empty() => {
                AssemblerState::Accumulating { last_release }
            }
            _ => AssemblerState::Idle,
        }
    }

    /// Append the event's symbol to the pending pattern.
    /// Returns `false` if the pattern was already full.
    pub fn accept(&mut self, event: &InputEvent) -> bool {
        self.last_release = Some(event.released_at);
        let stored = self.pending.push(event.symbol);

        #[cfg(feature = "defmt")]
        defmt::info!("Pattern: {}", self.pending.glyphs().as_str());
        #[cfg(feature = "defmt")]
        {
            if !stored {
                defmt::warn!("Pattern full, symbol dropped");
            }
        }

        stored
    }

    /// Resolve the pending pattern once the letter gap has passed
    pub fn check_timeout(&mut self, now: Instant) -> Option<Decoded> {
        match self.state() {
            AssemblerState::Accumulating { last_release }
                if now.saturating_duration_since(last_release) > self.config.letter_gap =>
            {
                self.resolve()
            }
            _ => None,
        }
    }

    /// Resolve the pending pattern now. An empty pattern is left alone and
    /// nothing is appended.
    pub fn resolve(&mut self) -> Option<Decoded> {
        if self.pending.is_empty() {
            return None;
        }

        let decoded = code_table::decode(&self.pending);
        self.text.push(decoded.as_char());

        #[cfg(feature = "defmt")]
        {
            let pattern = self.pending.glyphs();
            match decoded {
                Decoded::Char(c) => {
                    defmt::info!("Decoded letter: {} from pattern: {}", c, pattern.as_str())
                }
                Decoded::Unknown => defmt::warn!("Unknown pattern: {}", pattern.as_str()),
            }
        }

        self.pending.clear();
        Some(decoded)
    }

    pub fn pending(&self) -> &SymbolSequence {
        &self.pending
    }

    pub fn text(&self) -> &DecodedText {
        &self.text
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
