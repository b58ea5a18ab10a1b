//! Full-text view played on an async delay

use decoder_core::hal::mock::MockDisplay;
use decoder_core::presenter::{play_full_text_async, FULL_TEXT_HEADER, NO_TEXT_MESSAGE};
use decoder_core::{DecodedText, DecoderConfig};
use embedded_hal_async::delay::DelayNs;
use tokio::time::{Duration, Instant};

/// Async delay on the tokio clock, recording each request
#[derive(Default)]
struct TokioDelay {
    waits_ms: Vec<u32>,
}

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(ns as u64)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
        tokio::time::sleep(Duration::from_millis(ms as u64)).await;
    }
}

fn text_of(s: &str) -> DecodedText {
    let mut text = DecodedText::new();
    s.chars().for_each(|c| text.push(c));
    text
}

#[tokio::test(start_paused = true)]
async fn test_async_scroll_timing() {
    let text = text_of("THE QUICK BROWN FOX");
    let config = DecoderConfig::default();
    let mut display = MockDisplay::new();
    let mut delay = TokioDelay::default();

    let start = Instant::now();
    let frames = play_full_text_async(&mut display, &mut delay, &text, &config)
        .await
        .unwrap();

    // 19 characters: 4 window positions
    assert_eq!(frames, 4);
    assert_eq!(delay.waits_ms, vec![500, 500, 500, 1500]);
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
    assert_eq!(display.line(0), FULL_TEXT_HEADER);
    assert_eq!(display.line(1), " QUICK BROWN FOX");
}

#[tokio::test(start_paused = true)]
async fn test_async_empty_message() {
    let text = DecodedText::new();
    let config = DecoderConfig::default();
    let mut display = MockDisplay::new();
    let mut delay = TokioDelay::default();

    let start = Instant::now();
    let frames = play_full_text_async(&mut display, &mut delay, &text, &config)
        .await
        .unwrap();

    assert_eq!(frames, 1);
    assert_eq!(start.elapsed(), Duration::from_millis(1000));
    assert_eq!(display.line(0), NO_TEXT_MESSAGE);
}

#[test]
fn test_async_static_with_tokio_test() {
    let text = text_of("CQ CQ");
    let config = DecoderConfig::default();
    let mut display = MockDisplay::new();
    let mut delay = RecordingDelay::default();

    let frames = tokio_test::block_on(play_full_text_async(
        &mut display,
        &mut delay,
        &text,
        &config,
    ))
    .unwrap();

    assert_eq!(frames, 1);
    assert_eq!(delay.waits_ms, vec![3000]);
    assert_eq!(display.line(1), "CQ CQ");
}

/// Completes immediately
#[derive(Default)]
struct RecordingDelay {
    waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
