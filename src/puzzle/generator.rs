use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::Serialize;

use super::{DrawBag, EvaluationMode, ExtensionGenerator};
use crate::dictionary::WordDictionary;

/// Draws of `random_word` allowed per bag slot while filling a bag.
const FILL_ATTEMPTS_PER_SLOT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub base_word: String,
    pub word_length: usize,
    pub extension_length: usize,
    pub extensions: Vec<String>,
}

/// Hands out puzzles whose base words rotate through a bag per word length,
/// so a base word only comes back once the rest of its bag has been used.
#[derive(Debug, Default)]
pub struct PuzzleGenerator {
    bag_size: usize,
    bags: HashMap<usize, DrawBag<String>>,
}

impl PuzzleGenerator {
    pub fn new(bag_size: usize) -> Self {
        Self {
            bag_size,
            bags: HashMap::new(),
        }
    }

    /// Next base word of `word_length` letters. The bag for that length is
    /// filled on first use with up to `bag_size` distinct random words.
    pub fn draw_base_word<R: Rng + ?Sized>(
        &mut self,
        dictionary: &WordDictionary,
        word_length: usize,
        rng: &mut R,
    ) -> Option<String> {
        let bag = match self.bags.entry(word_length) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let words = sample_words(dictionary, word_length, self.bag_size, rng);
                if words.is_empty() {
                    tracing::warn!("No {}-letter words to build puzzles from", word_length);
                    return None;
                }
                tracing::info!("Filled base word bag for length {} with {} words", word_length, words.len());
                entry.insert(DrawBag::new(words, rng))
            }
        };
        bag.draw(rng)
    }

    /// Draw a base word and search extensions for it.
    pub fn next_puzzle<R: Rng + ?Sized>(
        &mut self,
        dictionary: &WordDictionary,
        word_length: usize,
        extension_length: usize,
        rng: &mut R,
    ) -> Option<Puzzle> {
        let base_word = self.draw_base_word(dictionary, word_length, rng)?;
        Puzzle::build(dictionary, base_word, word_length, extension_length, rng)
    }
}

impl Puzzle {
    /// Search extensions for `base_word`. A puzzle is only returned when its
    /// extensions form a word after every append in at least one ordering.
    pub fn build<R: Rng + ?Sized>(
        dictionary: &WordDictionary,
        base_word: String,
        word_length: usize,
        extension_length: usize,
        rng: &mut R,
    ) -> Option<Self> {
        let trie = dictionary.trie(word_length)?;
        let extensions =
            dictionary.generate_word_extensions(&base_word, word_length, extension_length, rng);

        let evaluation = ExtensionGenerator::new(trie, word_length, extension_length).evaluate(
            &base_word,
            &extensions,
            EvaluationMode::Quiet,
        );
        if evaluation.complete_orderings == 0 {
            tracing::warn!(
                "Extensions {:?} of {} complete no ordering, dropping puzzle",
                extensions,
                base_word
            );
            return None;
        }

        Some(Puzzle {
            base_word,
            word_length,
            extension_length,
            extensions,
        })
    }
}

fn sample_words<R: Rng + ?Sized>(
    dictionary: &WordDictionary,
    word_length: usize,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let Some(trie) = dictionary.trie(word_length) else {
        return Vec::new();
    };
    let target = count.min(trie.len());

    let mut seen = HashSet::with_capacity(target);
    let mut words = Vec::with_capacity(target);
    for _ in 0..target * FILL_ATTEMPTS_PER_SLOT {
        if words.len() == target {
            break;
        }
        if let Some(word) = trie.random_word(rng) {
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryOptions, DictionarySources};
    use rand::{rngs::StdRng, SeedableRng};

    fn dictionary() -> WordDictionary {
        let sources = DictionarySources {
            valid_words: "abc\nbcd\ncda\ndab\nabd\nbdc\ndca\ncab\nbca\n".to_string(),
            ..Default::default()
        };
        WordDictionary::from_sources(&sources, DictionaryOptions::default())
    }

    #[test]
    fn test_base_words_rotate_through_bag() {
        let dict = dictionary();
        let mut generator = PuzzleGenerator::new(4);
        let mut rng = StdRng::seed_from_u64(31);

        let round: Vec<String> = (0..4)
            .filter_map(|_| generator.draw_base_word(&dict, 3, &mut rng))
            .collect();
        let unique: HashSet<&String> = round.iter().collect();

        assert_eq!(round.len(), 4);
        assert_eq!(unique.len(), 4, "a full bag never repeats a base word");
        assert!(round.iter().all(|word| dict.check_word(word)));
    }

    #[test]
    fn test_unsupported_length_has_no_base_word() {
        let dict = dictionary();
        let mut generator = PuzzleGenerator::new(4);
        let mut rng = StdRng::seed_from_u64(31);

        assert_eq!(generator.draw_base_word(&dict, 5, &mut rng), None);
        assert_eq!(generator.draw_base_word(&dict, 40, &mut rng), None);
        assert!(generator.next_puzzle(&dict, 5, 1, &mut rng).is_none());
    }

    #[test]
    fn test_dead_end_words_make_no_puzzle() {
        let sources = DictionarySources {
            valid_words: "xyz\n".to_string(),
            ..Default::default()
        };
        let dict = WordDictionary::from_sources(&sources, DictionaryOptions::default());
        let mut generator = PuzzleGenerator::new(4);
        let mut rng = StdRng::seed_from_u64(12);

        // extensions are still found, but no append ever forms a word
        assert_eq!(
            generator.draw_base_word(&dict, 3, &mut rng).as_deref(),
            Some("XYZ")
        );
        assert!(generator.next_puzzle(&dict, 3, 1, &mut rng).is_none());
        assert!(Puzzle::build(&dict, "XYZ".to_string(), 3, 1, &mut rng).is_none());
    }

    #[test]
    fn test_next_puzzle() {
        let dict = dictionary();
        let mut generator = PuzzleGenerator::new(8);
        let mut rng = StdRng::seed_from_u64(5);

        let puzzle = generator.next_puzzle(&dict, 3, 1, &mut rng).unwrap();
        assert!(dict.check_word(&puzzle.base_word));
        assert_eq!(puzzle.word_length, 3);
        assert_eq!(puzzle.extensions.len(), 3);

        let trie = dict.trie(3).unwrap();
        let evaluation = ExtensionGenerator::new(trie, 3, 1).evaluate(
            &puzzle.base_word,
            &puzzle.extensions,
            EvaluationMode::Quiet,
        );
        assert!(evaluation.complete_orderings > 0);
    }
}
