//! International Morse code table (letters and digits)

use crate::types::{Decoded, SymbolSequence};

/// One table row
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodeTableEntry {
    pub pattern: SymbolSequence,
    pub character: char,
}

const fn entry(pattern: &str, character: char) -> CodeTableEntry {
    CodeTableEntry {
        pattern: SymbolSequence::from_pattern(pattern),
        character,
    }
}

/// Number of table rows
pub const CODE_TABLE_LEN: usize = 37;

/// Patterns are unique, so lookup order does not matter.
pub static CODE_TABLE: [CodeTableEntry; CODE_TABLE_LEN] = [
    entry(".-", 'A'),
    entry("-...", 'B'),
    entry("-.-.", 'C'),
    entry("-..", 'D'),
    entry(".", 'E'),
    entry("..-.", 'F'),
    entry("--.", 'G'),
    entry("....", 'H'),
    entry("..", 'I'),
    entry(".---", 'J'),
    entry("-.-", 'K'),
    entry(".-..", 'L'),
    entry("--", 'M'),
    entry("-.", 'N'),
    entry("---", 'O'),
    entry(".--.", 'P'),
    entry("--.-", 'Q'),
    entry(".-.", 'R'),
    entry("...", 'S'),
    entry("-", 'T'),
    entry("..-", 'U'),
    entry("...-", 'V'),
    entry(".--", 'W'),
    entry("-..-", 'X'),
    entry("-.--", 'Y'),
    entry("--..", 'Z'),
    entry(".----", '1'),
    entry("..---", '2'),
    entry("...--", '3'),
    entry("....-", '4'),
    entry(".....", '5'),
    entry("-....", '6'),
    entry("--...", '7'),
    entry("---..", '8'),
    entry("----.", '9'),
    entry("-----", '0'),
    // Word space. The assembler never resolves an empty pattern, so this is
    // only reachable through a direct lookup.
    entry("", ' '),
];

/// Exact-match lookup
pub fn lookup(pattern: &SymbolSequence) -> Option<char> {
    CODE_TABLE
        .iter()
        .find(|entry| entry.pattern == *pattern)
        .map(|entry| entry.character)
}

/// Lookup with the unknown fallback applied
pub fn decode(pattern: &SymbolSequence) -> Decoded {
    match lookup(pattern) {
        Some(c) => Decoded::Char(c),
        None => Decoded::Unknown,
    }
}

/// Pattern for a character, case-insensitive
pub fn encode(character: char) -> Option<SymbolSequence> {
    let upper = character.to_ascii_uppercase();
    CODE_TABLE
        .iter()
        .find(|entry| entry.character == upper)
        .map(|entry| entry.pattern)
}
