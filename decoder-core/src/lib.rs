#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Decoder Core
//!
//! Single-button Morse decoder logic for embedded systems.
//! Classifies debounced presses into dots and dashes, assembles them into
//! letters after a quiet gap and shows the result on a 16x2 character display.

pub mod types;
pub mod code_table;
pub mod classifier;
pub mod assembler;
pub mod presenter;
pub mod session;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use classifier::{classify, Debouncer, Edge, InputClassifier};
pub use assembler::{AssemblerState, DecodedText, LetterAssembler};
pub use session::*;
pub use hal::{*, Instant, Duration};

/// Decoder library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timing: 200 ms dot limit, 600 ms long dash, 1 s letter gap
pub fn default_config() -> DecoderConfig {
    DecoderConfig::default()
}
