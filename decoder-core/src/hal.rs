//! Hardware Abstraction Layer for the decoder loop

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Millisecond instant used when no embassy time driver is linked
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Instant(u64);

    impl Instant {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }

        pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(earlier.0))
        }
    }

    impl core::ops::Add<Duration> for Instant {
        type Output = Instant;

        fn add(self, rhs: Duration) -> Instant {
            Instant(self.0 + rhs.as_millis())
        }
    }

    /// Millisecond duration
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn from_secs(secs: u64) -> Self {
            Self(secs * 1000)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Add for Duration {
        type Output = Duration;

        fn add(self, rhs: Duration) -> Duration {
            Duration(self.0 + rhs.0)
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }
}

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Display write failed
    DisplayError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::DisplayError => write!(f, "Display write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// A single push-button input line
pub trait InputButton {
    type Error: From<HalError>;

    /// Raw (undebounced) level, `true` while the button is held
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Character display with a cursor, e.g. an HD44780 16x2 module
pub trait CharDisplay {
    type Error: From<HalError>;

    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to `col`, `row` (both 0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Write `text` at the start of `row`
    fn print_line(&mut self, row: u8, text: &str) -> Result<(), Self::Error> {
        self.set_cursor(0, row)?;
        self.print(text)
    }
}

/// Complete decoder HAL interface
pub trait DecoderHal {
    type MorseButton: InputButton<Error = Self::Error>;
    type ShowButton: InputButton<Error = Self::Error>;
    type Display: CharDisplay<Error = Self::Error>;
    type Delay: DelayNs;
    type Error: From<HalError>;

    /// Initialize hardware
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Current time
    fn now(&self) -> Instant;

    /// Access to the Morse key button
    fn morse_button(&mut self) -> &mut Self::MorseButton;

    /// Access to the "show text" button
    fn show_button(&mut self) -> &mut Self::ShowButton;

    /// Access to the display
    fn display(&mut self) -> &mut Self::Display;

    /// Display plus a blocking delay, for timed screens
    fn display_and_delay(&mut self) -> (&mut Self::Display, &mut Self::Delay);
}

/// Generic implementation for embedded-hal compatible pins
pub struct EmbeddedHalButton<P> {
    pin: P,
}

impl<P> EmbeddedHalButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> InputButton for EmbeddedHalButton<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        // Active low (pulled up, grounded when pressed)
        self.pin.is_low().map_err(|_| HalError::GpioError)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use crate::types::{DISPLAY_COLS, DISPLAY_ROWS};

    #[derive(Default, Debug)]
    pub struct MockButton {
        pressed: bool,
    }

    impl MockButton {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&mut self, pressed: bool) {
            self.pressed = pressed;
        }
    }

    impl InputButton for MockButton {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pressed)
        }
    }

    /// Recorded display operation
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum DisplayOp {
        Clear,
        SetCursor(u8, u8),
        Print(String),
    }

    /// 16x2 character grid that records every call
    #[derive(Debug)]
    pub struct MockDisplay {
        cells: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
        col: usize,
        row: usize,
        ops: Vec<DisplayOp>,
    }

    impl Default for MockDisplay {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self {
                cells: [[b' '; DISPLAY_COLS]; DISPLAY_ROWS],
                col: 0,
                row: 0,
                ops: Vec::new(),
            }
        }

        /// Row contents with trailing blanks removed
        pub fn line(&self, row: usize) -> String {
            let text: String = self.cells[row].iter().map(|&b| b as char).collect();
            text.trim_end().to_string()
        }

        pub fn ops(&self) -> &[DisplayOp] {
            &self.ops
        }

        pub fn clear_ops(&mut self) {
            self.ops.clear();
        }

        /// Texts printed on `row`, in order
        pub fn prints_on_row(&self, row: u8) -> Vec<String> {
            let mut current = 0;
            let mut out = Vec::new();
            for op in &self.ops {
                match op {
                    DisplayOp::Clear => current = 0,
                    DisplayOp::SetCursor(_, r) => current = *r,
                    DisplayOp::Print(text) if current == row => out.push(text.clone()),
                    DisplayOp::Print(_) => {}
                }
            }
            out
        }
    }

    impl CharDisplay for MockDisplay {
        type Error = HalError;

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.cells = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];
            self.col = 0;
            self.row = 0;
            self.ops.push(DisplayOp::Clear);
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
            if col as usize >= DISPLAY_COLS || row as usize >= DISPLAY_ROWS {
                return Err(HalError::DisplayError);
            }
            self.col = col as usize;
            self.row = row as usize;
            self.ops.push(DisplayOp::SetCursor(col, row));
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), Self::Error> {
            for b in text.bytes() {
                // Characters past the last column are not visible
                if self.col < DISPLAY_COLS {
                    self.cells[self.row][self.col] = b;
                }
                self.col += 1;
            }
            self.ops.push(DisplayOp::Print(text.to_string()));
            Ok(())
        }
    }

    /// Delay that only records how long it was asked to wait
    #[derive(Default, Debug)]
    pub struct MockDelay {
        total_ns: u64,
        waits_ms: Vec<u32>,
    }

    impl MockDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn total_ms(&self) -> u64 {
            self.total_ns / 1_000_000
        }

        /// Every `delay_ms` request, in order
        pub fn waits_ms(&self) -> &[u32] {
            &self.waits_ms
        }

        pub fn clear(&mut self) {
            self.waits_ms.clear();
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ns += ms as u64 * 1_000_000;
            self.waits_ms.push(ms);
        }
    }

    /// Mock hardware collection with a manually advanced clock.
    ///
    /// Time spent in `delay` is added to the clock, so blocking screens move
    /// time forward the same way they do on the device.
    #[derive(Default, Debug)]
    pub struct MockDecoderHal {
        pub morse: MockButton,
        pub show: MockButton,
        pub display: MockDisplay,
        pub delay: MockDelay,
        clock_ms: u64,
        initialized: bool,
    }

    impl MockDecoderHal {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn advance(&mut self, ms: u64) {
            self.clock_ms += ms;
        }

        pub fn is_initialized(&self) -> bool {
            self.initialized
        }
    }

    impl DecoderHal for MockDecoderHal {
        type MorseButton = MockButton;
        type ShowButton = MockButton;
        type Display = MockDisplay;
        type Delay = MockDelay;
        type Error = HalError;

        fn initialize(&mut self) -> Result<(), Self::Error> {
            self.initialized = true;
            Ok(())
        }

        fn now(&self) -> Instant {
            Instant::from_millis(self.clock_ms + self.delay.total_ms())
        }

        fn morse_button(&mut self) -> &mut Self::MorseButton {
            &mut self.morse
        }

        fn show_button(&mut self) -> &mut Self::ShowButton {
            &mut self.show
        }

        fn display(&mut self) -> &mut Self::Display {
            &mut self.display
        }

        fn display_and_delay(&mut self) -> (&mut Self::Display, &mut Self::Delay) {
            (&mut self.display, &mut self.delay)
        }
    }
}
