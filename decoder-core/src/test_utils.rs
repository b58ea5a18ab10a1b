//! Test utilities for decoder core functionality

#[cfg(feature = "test-utils")]
pub mod keying_simulator {
    //! Drives a [`DecoderSession`] on mock hardware one millisecond at a time

    use crate::code_table;
    use crate::hal::mock::MockDecoderHal;
    use crate::session::{DecoderSession, PollOutcome};
    use crate::types::{Decoded, DecoderConfig, InputEvent, Symbol};

    /// Operator timing used by the simulator, in milliseconds
    #[derive(Copy, Clone, Debug)]
    pub struct KeyingTiming {
        pub dot_ms: u64,
        pub dash_ms: u64,
        /// Released time between symbols of one letter
        pub element_gap_ms: u64,
        /// Released time after a letter
        pub letter_gap_ms: u64,
    }

    impl Default for KeyingTiming {
        fn default() -> Self {
            Self {
                dot_ms: 100,
                dash_ms: 350,
                element_gap_ms: 150,
                letter_gap_ms: 1200,
            }
        }
    }

    /// Simulated operator pressing the buttons
    pub struct KeyingSimulator {
        pub session: DecoderSession,
        pub hal: MockDecoderHal,
        pub timing: KeyingTiming,
        events: Vec<InputEvent>,
        decoded: Vec<Decoded>,
        text_views: Vec<usize>,
    }

    impl KeyingSimulator {
        /// Session with the start-up sequence already played
        pub fn new(config: DecoderConfig) -> Self {
            let mut sim = Self {
                session: DecoderSession::new(config),
                hal: MockDecoderHal::new(),
                timing: KeyingTiming::default(),
                events: Vec::new(),
                decoded: Vec::new(),
                text_views: Vec::new(),
            };
            sim.session.start(&mut sim.hal).unwrap();
            sim.hal.delay.clear();
            sim
        }

        fn tick(&mut self) -> PollOutcome {
            let outcome = self.session.step(&mut self.hal).unwrap();
            if let Some(event) = outcome.event {
                self.events.push(event);
            }
            if let Some(decoded) = outcome.decoded {
                self.decoded.push(decoded);
            }
            if let Some(frames) = outcome.text_frames {
                self.text_views.push(frames);
            }
            self.hal.advance(1);
            outcome
        }

        /// Poll with the buttons unchanged
        pub fn wait(&mut self, ms: u64) {
            for _ in 0..ms {
                self.tick();
            }
        }

        /// Hold the Morse button for `ms`, then release it
        pub fn press_for(&mut self, ms: u64) {
            self.hal.morse.set_pressed(true);
            self.wait(ms);
            self.hal.morse.set_pressed(false);
        }

        pub fn key_symbol(&mut self, symbol: Symbol) {
            let ms = match symbol {
                Symbol::Dot => self.timing.dot_ms,
                Symbol::Dash => self.timing.dash_ms,
            };
            self.press_for(ms);
            self.wait(self.timing.element_gap_ms);
        }

        /// Key a `.`/`-` pattern, then wait out the letter gap
        pub fn key_pattern(&mut self, pattern: &str) {
            for glyph in pattern.chars() {
                if let Some(symbol) = Symbol::from_glyph(glyph) {
                    self.key_symbol(symbol);
                }
            }
            self.wait(self.timing.letter_gap_ms);
        }

        /// Key text letter by letter; characters without a pattern are skipped
        pub fn key_text(&mut self, text: &str) {
            for c in text.chars() {
                if let Some(pattern) = code_table::encode(c) {
                    if pattern.is_empty() {
                        continue;
                    }
                    for symbol in pattern.iter() {
                        self.key_symbol(symbol);
                    }
                    self.wait(self.timing.letter_gap_ms);
                }
            }
        }

        /// Press and hold the show-text button long enough to register
        pub fn press_show(&mut self) {
            self.hal.show.set_pressed(true);
            self.wait(60);
            self.hal.show.set_pressed(false);
            self.wait(60);
        }

        pub fn text(&self) -> &str {
            self.session.text().as_str()
        }

        pub fn events(&self) -> &[InputEvent] {
            &self.events
        }

        pub fn decoded(&self) -> &[Decoded] {
            &self.decoded
        }

        /// Frame count of every full-text view shown so far
        pub fn text_views(&self) -> &[usize] {
            &self.text_views
        }
    }
}
