//! Screen layouts: start-up banner, live view and full-text view

use crate::assembler::DecodedText;
use crate::hal::{CharDisplay, Duration};
use crate::types::{DecoderConfig, SymbolSequence, DISPLAY_COLS, LIVE_TEXT_LEN};

pub const BANNER_TITLE: &str = "Morse Decoder";
pub const BANNER_STATUS: &str = "Ready...";
pub const PATTERN_LABEL: &str = "Pattern: ";
pub const TEXT_LABEL: &str = "Text: ";
pub const FULL_TEXT_HEADER: &str = "Complete text:";
pub const NO_TEXT_MESSAGE: &str = "No text yet!";

/// Milliseconds for a `DelayNs` wait, saturating at `u32::MAX`
pub fn dwell_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Start-up banner
pub fn show_banner<D: CharDisplay>(display: &mut D) -> Result<(), D::Error> {
    display.clear()?;
    display.print(BANNER_TITLE)?;
    display.print_line(1, BANNER_STATUS)
}

/// Live view: pending pattern on row 0, recent text on row 1
pub fn show_live<D: CharDisplay>(
    display: &mut D,
    pending: &SymbolSequence,
    text: &DecodedText,
) -> Result<(), D::Error> {
    let glyphs = pending.glyphs();
    let room = DISPLAY_COLS - PATTERN_LABEL.len();
    let shown = &glyphs.as_str()[..glyphs.len().min(room)];

    display.clear()?;
    display.print(PATTERN_LABEL)?;
    display.print(shown)?;
    display.print_line(1, TEXT_LABEL)?;
    display.print(text.tail(LIVE_TEXT_LEN))
}

/// How a full-text request is laid out
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullTextLayout {
    /// No text decoded yet
    Empty,
    /// Text fits on one row
    Static,
    /// Text is wider than the display and scrolls
    Scroll { positions: usize },
}

impl FullTextLayout {
    pub fn for_len(len: usize) -> Self {
        if len == 0 {
            FullTextLayout::Empty
        } else if len <= DISPLAY_COLS {
            FullTextLayout::Static
        } else {
            FullTextLayout::Scroll {
                positions: len - DISPLAY_COLS + 1,
            }
        }
    }

    /// Number of frames drawn
    pub fn frames(&self) -> usize {
        match self {
            FullTextLayout::Empty | FullTextLayout::Static => 1,
            FullTextLayout::Scroll { positions } => *positions,
        }
    }
}

/// One step of the full-text view: draw, then hold
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FullTextFrame<'a> {
    /// Clear and write `header` on row 0 first
    pub header: Option<&'static str>,
    /// Row 1 content
    pub body: &'a str,
    pub hold: Duration,
}

impl<'a> FullTextFrame<'a> {
    pub fn draw<D: CharDisplay>(&self, display: &mut D) -> Result<(), D::Error> {
        if let Some(header) = self.header {
            display.clear()?;
            display.print(header)?;
        }
        if !self.body.is_empty() {
            display.print_line(1, self.body)?;
        }
        Ok(())
    }

    pub fn hold_ms(&self) -> u32 {
        dwell_ms(self.hold)
    }
}

/// Frames of the full-text view, in display order
pub struct FullTextView<'a> {
    text: &'a DecodedText,
    config: DecoderConfig,
    layout: FullTextLayout,
    next: usize,
}

impl<'a> FullTextView<'a> {
    pub fn new(text: &'a DecodedText, config: &DecoderConfig) -> Self {
        Self {
            text,
            config: *config,
            layout: FullTextLayout::for_len(text.len()),
            next: 0,
        }
    }

    pub fn layout(&self) -> FullTextLayout {
        self.layout
    }
}

impl<'a> Iterator for FullTextView<'a> {
    type Item = FullTextFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.layout.frames();
        if self.next >= total {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let frame = match self.layout {
            FullTextLayout::Empty => FullTextFrame {
                header: Some(NO_TEXT_MESSAGE),
                body: "",
                hold: self.config.empty_dwell,
            },
            FullTextLayout::Static => FullTextFrame {
                header: Some(FULL_TEXT_HEADER),
                body: self.text.as_str(),
                hold: self.config.static_dwell,
            },
            FullTextLayout::Scroll { positions } => {
                let hold = if index + 1 == positions {
                    self.config.scroll_step + self.config.scroll_hold
                } else {
                    self.config.scroll_step
                };
                FullTextFrame {
                    // Header stays up while the window moves
                    header: if index == 0 { Some(FULL_TEXT_HEADER) } else { None },
                    body: self.text.window(index, DISPLAY_COLS),
                    hold,
                }
            }
        };
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.frames() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FullTextView<'_> {}

/// Play the full-text view with a blocking delay. Returns the frame count.
pub fn play_full_text<D, T>(
    display: &mut D,
    delay: &mut T,
    text: &DecodedText,
    config: &DecoderConfig,
) -> Result<usize, D::Error>
where
    D: CharDisplay,
    T: embedded_hal::delay::DelayNs,
{
    let mut shown = 0;
    for frame in FullTextView::new(text, config) {
        frame.draw(display)?;
        delay.delay_ms(frame.hold_ms());
        shown += 1;
    }
    Ok(shown)
}

/// Same as [`play_full_text`], awaiting between frames
pub async fn play_full_text_async<D, T>(
    display: &mut D,
    delay: &mut T,
    text: &DecodedText,
    config: &DecoderConfig,
) -> Result<usize, D::Error>
where
    D: CharDisplay,
    T: embedded_hal_async::delay::DelayNs,
{
    let mut shown = 0;
    for frame in FullTextView::new(text, config) {
        frame.draw(display)?;
        delay.delay_ms(frame.hold_ms()).await;
        shown += 1;
    }
    Ok(shown)
}
