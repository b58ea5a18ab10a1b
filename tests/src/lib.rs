//! Host-based integration tests for the Morse decoder

#[cfg(test)]
mod decoding_tests;
#[cfg(test)]
mod display_tests;
#[cfg(test)]
mod async_display_tests;
#[cfg(test)]
mod pin_tests;

use decoder_core::test_utils::keying_simulator::KeyingSimulator;
use decoder_core::DecoderConfig;

/// Simulator on default timing, banner already shown
pub fn simulator() -> KeyingSimulator {
    KeyingSimulator::new(DecoderConfig::default())
}
