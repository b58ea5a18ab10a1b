//! End-to-end decoding through the session on mock hardware

use crate::simulator;
use decoder_core::{Decoded, Symbol, TEXT_CAPACITY};

#[test]
fn test_single_dot_decodes_e() {
    let mut sim = simulator();
    sim.key_pattern(".");

    assert_eq!(sim.events().len(), 1);
    assert_eq!(sim.events()[0].symbol, Symbol::Dot);
    assert_eq!(sim.decoded(), &[Decoded::Char('E')]);
    assert_eq!(sim.text(), "E");
}

#[test]
fn test_hello() {
    let mut sim = simulator();
    sim.key_text("HELLO");

    assert_eq!(sim.text(), "HELLO");
    assert_eq!(sim.hal.display.line(0), "Pattern:");
    assert_eq!(sim.hal.display.line(1), "Text: HELLO");
}

#[test]
fn test_lowercase_and_digits_are_keyed_as_table_characters() {
    let mut sim = simulator();
    sim.key_text("sos 73");

    // The space has no keyed pattern
    assert_eq!(sim.text(), "SOS73");
}

#[test]
fn test_unassigned_pattern_appends_question_mark() {
    let mut sim = simulator();
    sim.key_pattern("..--..--");

    assert_eq!(sim.decoded(), &[Decoded::Unknown]);
    assert_eq!(sim.text(), "?");
}

#[test]
fn test_overlong_pattern_is_unknown() {
    let mut sim = simulator();
    sim.key_pattern("..........");

    assert_eq!(sim.events().len(), 10);
    assert_eq!(sim.text(), "?");
}

#[test]
fn test_long_dash_counts_as_dash() {
    let mut sim = simulator();
    sim.press_for(900);
    sim.wait(sim.timing.letter_gap_ms);

    assert!(sim.events()[0].long);
    assert_eq!(sim.events()[0].symbol, Symbol::Dash);
    assert_eq!(sim.text(), "T");
}

#[test]
fn test_pattern_shown_while_keying() {
    let mut sim = simulator();
    sim.key_symbol(Symbol::Dash);
    sim.key_symbol(Symbol::Dot);

    assert_eq!(sim.hal.display.line(0), "Pattern: -.");
    assert!(sim.decoded().is_empty());
}

#[test]
fn test_letter_waits_for_gap() {
    let mut sim = simulator();
    sim.press_for(sim.timing.dot_ms);

    // Debounce delays the release edge; stay well inside the gap
    sim.wait(900);
    assert!(sim.decoded().is_empty());

    sim.wait(300);
    assert_eq!(sim.decoded(), &[Decoded::Char('E')]);
}

#[test]
fn test_contact_bounce_is_ignored() {
    let mut sim = simulator();
    for _ in 0..5 {
        sim.hal.morse.set_pressed(true);
        sim.wait(10);
        sim.hal.morse.set_pressed(false);
        sim.wait(10);
    }
    sim.wait(sim.timing.letter_gap_ms);

    assert!(sim.events().is_empty());
    assert_eq!(sim.text(), "");
}

#[test]
fn test_text_keeps_most_recent_characters() {
    let mut sim = simulator();
    for _ in 0..(TEXT_CAPACITY + 2) {
        sim.key_pattern(".");
    }
    sim.key_pattern("-");

    assert_eq!(sim.session.text().len(), TEXT_CAPACITY);
    assert!(sim.text().ends_with("ET"));
}
