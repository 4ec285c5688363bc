use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Number of letters a trie node can branch on ('A'..='Z').
pub const ALPHABET_SIZE: usize = 26;

/// Scrabble-style point values used to rate words.
///
/// J/Q/X/Z follow the 8/12/8/10 valuation, every other letter keeps its
/// standard Scrabble value.
pub static LETTER_VALUES: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // 1 point letters
    for ch in ['A', 'E', 'I', 'O', 'U', 'L', 'N', 'R', 'S', 'T'] {
        map.insert(ch, 1);
    }

    // 2 points
    for ch in ['D', 'G'] {
        map.insert(ch, 2);
    }

    // 3 points
    for ch in ['B', 'C', 'M', 'P'] {
        map.insert(ch, 3);
    }

    // 4 points
    for ch in ['F', 'H', 'V', 'W', 'Y'] {
        map.insert(ch, 4);
    }

    // 5 points
    map.insert('K', 5);

    // 8 points
    for ch in ['J', 'X'] {
        map.insert(ch, 8);
    }

    map.insert('Z', 10);
    map.insert('Q', 12);

    map
});

/// Map an uppercase ASCII letter to its child slot, `None` for anything else.
pub fn letter_index(letter: u8) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some((letter - b'A') as usize)
    } else {
        None
    }
}

/// Same as [`letter_index`] for a `char`.
pub fn char_index(letter: char) -> Option<usize> {
    u8::try_from(letter).ok().and_then(letter_index)
}

/// Inverse of [`letter_index`].
pub fn index_letter(index: usize) -> char {
    debug_assert!(index < ALPHABET_SIZE);
    (b'A' + index as u8) as char
}

/// True if every character is an uppercase ASCII letter.
pub fn is_letters_only(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_uppercase())
}

/// Sort the characters of a string, e.g. `GATOR` -> `AGORT`.
pub fn alphabetize(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Get the point value for a letter
pub fn get_letter_value(letter: char) -> u8 {
    let upper = letter.to_ascii_uppercase();
    *LETTER_VALUES.get(&upper).unwrap_or(&0)
}

/// Sum of the letter values of a word. Non-letters are worth nothing.
pub fn scrabble_worth(word: &str) -> u32 {
    word.chars().map(|c| u32::from(get_letter_value(c))).sum()
}
