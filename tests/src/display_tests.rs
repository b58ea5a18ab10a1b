//! Full-text view driven by the show-text button

use crate::simulator;
use decoder_core::hal::mock::{MockDelay, MockDisplay};
use decoder_core::presenter::{self, FullTextLayout, FullTextView, FULL_TEXT_HEADER, NO_TEXT_MESSAGE};
use decoder_core::{DecodedText, DecoderConfig, Decoded};

fn text_of(s: &str) -> DecodedText {
    let mut text = DecodedText::new();
    for c in s.chars() {
        text.push(c);
    }
    text
}

#[test]
fn test_show_with_no_text() {
    let mut sim = simulator();
    sim.press_show();

    assert_eq!(sim.text_views(), &[1]);
    assert_eq!(sim.hal.delay.waits_ms(), &[1000]);
    assert!(sim.hal.display.prints_on_row(0).contains(&NO_TEXT_MESSAGE.to_string()));
    // Live view is back afterwards
    assert_eq!(sim.hal.display.line(1), "Text:");
}

#[test]
fn test_show_static_text() {
    let mut sim = simulator();
    sim.key_text("HELLOWORLD");
    sim.hal.display.clear_ops();
    sim.press_show();

    assert_eq!(sim.text_views(), &[1]);
    assert_eq!(sim.hal.delay.waits_ms(), &[3000]);
    let row1 = sim.hal.display.prints_on_row(1);
    assert!(row1.contains(&"HELLOWORLD".to_string()));
    assert!(sim.hal.display.prints_on_row(0).contains(&FULL_TEXT_HEADER.to_string()));

    // Back to the live view, text untouched
    assert_eq!(sim.text(), "HELLOWORLD");
    assert_eq!(sim.hal.display.line(0), "Pattern:");
    assert_eq!(sim.hal.display.line(1), "Text: HELLOWORLD");
}

#[test]
fn test_show_scrolls_long_text() {
    let mut sim = simulator();
    sim.key_text("ABCDEFGHIJKLMNOPQRST");
    sim.hal.display.clear_ops();
    sim.press_show();

    assert_eq!(sim.text_views(), &[5]);
    assert_eq!(sim.hal.delay.waits_ms(), &[500, 500, 500, 500, 1500]);
    let row1 = sim.hal.display.prints_on_row(1);
    assert!(row1.contains(&"ABCDEFGHIJKLMNOP".to_string()));
    assert!(row1.contains(&"EFGHIJKLMNOPQRST".to_string()));

    assert_eq!(sim.text(), "ABCDEFGHIJKLMNOPQRST");
    assert_eq!(sim.hal.display.line(1), "Text: KLMNOPQRST");
}

#[test]
fn test_show_forces_pending_letter() {
    let mut sim = simulator();
    sim.key_pattern("..");
    sim.key_symbol(decoder_core::Symbol::Dash);
    sim.key_symbol(decoder_core::Symbol::Dot);
    sim.press_show();

    assert_eq!(sim.decoded(), &[Decoded::Char('I'), Decoded::Char('N')]);
    assert_eq!(sim.text(), "IN");
    assert!(sim.session.pending().is_empty());
}

#[test]
fn test_twenty_character_scroll() {
    let text = text_of("ABCDEFGHIJKLMNOPQRST");
    let config = DecoderConfig::default();
    let view = FullTextView::new(&text, &config);
    assert_eq!(view.layout(), FullTextLayout::Scroll { positions: 5 });

    let bodies: Vec<&str> = view.map(|frame| frame.body).collect();
    assert_eq!(
        bodies,
        vec![
            "ABCDEFGHIJKLMNOP",
            "BCDEFGHIJKLMNOPQ",
            "CDEFGHIJKLMNOPQR",
            "DEFGHIJKLMNOPQRS",
            "EFGHIJKLMNOPQRST",
        ]
    );

    let mut display = MockDisplay::new();
    let mut delay = MockDelay::new();
    let frames = presenter::play_full_text(&mut display, &mut delay, &text, &config).unwrap();
    assert_eq!(frames, 5);
    assert_eq!(delay.waits_ms(), &[500, 500, 500, 500, 1500]);
    assert_eq!(display.line(0), FULL_TEXT_HEADER);
    assert_eq!(display.line(1), "EFGHIJKLMNOPQRST");
}

#[test]
fn test_sixteen_characters_do_not_scroll() {
    let text = text_of("ABCDEFGHIJKLMNOP");
    let config = DecoderConfig::default();
    assert_eq!(FullTextView::new(&text, &config).layout(), FullTextLayout::Static);

    let text = text_of("ABCDEFGHIJKLMNOPQ");
    assert_eq!(
        FullTextView::new(&text, &config).layout(),
        FullTextLayout::Scroll { positions: 2 }
    );
}

#[test]
fn test_live_view_shows_last_ten() {
    let mut sim = simulator();
    sim.key_text("ABCDEFGHIJKL");

    assert_eq!(sim.hal.display.line(1), "Text: CDEFGHIJKL");
}
