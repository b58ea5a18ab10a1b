//! Button debouncing and press-duration classification

use crate::hal::{Duration, Instant};
use crate::types::{DecoderConfig, InputEvent, Symbol};

/// Debounced level transition
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Stable-level filter for one input line.
///
/// A raw level change restarts the settle timer; the level is accepted once
/// it has held for longer than the debounce interval.
#[derive(Copy, Clone, Debug)]
pub struct Debouncer {
    debounce: Duration,
    last_raw: bool,
    last_raw_edge: Option<Instant>,
    stable: bool,
}

impl Debouncer {
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_raw: false,
            last_raw_edge: None,
            stable: false,
        }
    }

    /// Feed one raw sample (`true` = pressed)
    pub fn update(&mut self, raw: bool, now: Instant) -> Option<Edge> {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_raw_edge = Some(now);
        }

        let settled = match self.last_raw_edge {
            Some(edge) => now.saturating_duration_since(edge) > self.debounce,
            None => true,
        };

        if settled && raw != self.stable {
            self.stable = raw;
            return Some(if raw { Edge::Pressed } else { Edge::Released });
        }
        None
    }

    /// Last accepted level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Time of the most recent raw level change
    pub fn last_raw_edge(&self) -> Option<Instant> {
        self.last_raw_edge
    }
}

/// Classify a press duration. The flag is set when the press reached the
/// dash threshold; such presses still count as a dash.
pub fn classify(duration: Duration, config: &DecoderConfig) -> (Symbol, bool) {
    if duration < config.dot_threshold {
        (Symbol::Dot, false)
    } else if duration < config.dash_threshold {
        (Symbol::Dash, false)
    } else {
        (Symbol::Dash, true)
    }
}

/// Turns Morse button samples into [`InputEvent`]s
#[derive(Debug)]
pub struct InputClassifier {
    config: DecoderConfig,
    debouncer: Debouncer,
    press_start: Option<Instant>,
    last_release: Option<Instant>,
}

impl InputClassifier {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            debouncer: Debouncer::new(config.debounce),
            press_start: None,
            last_release: None,
        }
    }

    /// Feed one raw sample. Returns an event on each accepted release.
    pub fn poll(&mut self, raw: bool, now: Instant) -> Option<InputEvent> {
        match self.debouncer.update(raw, now)? {
            Edge::Pressed => {
                self.press_start = Some(now);
                #[cfg(feature = "defmt")]
                defmt::debug!("Button pressed");
                None
            }
            Edge::Released => {
                let start = self.press_start.take()?;
                let duration = now.saturating_duration_since(start);
                let (symbol, long) = classify(duration, &self.config);
                self.last_release = Some(now);

                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "{} added after {} ms{}",
                    symbol,
                    duration.as_millis(),
                    if long { " (long press)" } else { "" }
                );

                Some(InputEvent {
                    duration,
                    symbol,
                    long,
                    released_at: now,
                })
            }
        }
    }

    /// Press currently held (debounced)
    pub fn is_pressed(&self) -> bool {
        self.press_start.is_some()
    }

    pub fn last_release(&self) -> Option<Instant> {
        self.last_release
    }

    pub fn last_raw_edge(&self) -> Option<Instant> {
        self.debouncer.last_raw_edge()
    }
}
