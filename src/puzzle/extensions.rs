use rand::seq::SliceRandom;
use rand::Rng;

use crate::trie::{Difficulty, PrefixTrie, ROOT};
use crate::utils::letters::{index_letter, ALPHABET_SIZE};

/// Search trials per call to [`ExtensionGenerator::generate`].
pub const EXTENSION_TRIALS: usize = 1000;
/// Random letter draws per step before a walk gives up.
pub const LETTER_RETRIES: usize = 100;
/// Walks tried by [`ExtensionGenerator::random_word_start`].
pub const WORD_START_TRIALS: usize = 1000;
/// A word start leading to more words than this is taken immediately.
pub const GOOD_ENOUGH_SUBTREE_WORDS: usize = 20;
/// Extensions making up one puzzle.
pub const EXTENSION_COUNT: usize = 3;

/// Trials from this one on may restart from a fresh word start.
const LATE_TRIALS_START: usize = EXTENSION_TRIALS * 4 / 5;
const LATE_RESTART_PROBABILITY: f64 = 0.6;
const FALLBACK_WORD_START: &str = "SPRAIN";

const ORDERINGS: [[usize; EXTENSION_COUNT]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Endings that make a completion feel like an inflection of another word.
const COMMON_SUFFIXES: [&str; 8] = ["ING", "ABLE", "IBLE", "ED", "EST", "ER", "LY", "NESS"];
const REPEAT_PENALTY: f64 = 0.25;
const MEDIUM_PENALTY: f64 = 0.5;
const SUFFIX_PENALTY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    Quiet,
    /// Log the score of every ordering.
    Log,
}

/// Outcome of scoring one set of extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    /// Orderings in which every append formed a word.
    pub complete_orderings: usize,
    /// Highest scoring ordering as indices into the extensions.
    pub best_ordering: Option<[usize; EXTENSION_COUNT]>,
}

/// Builds word-extension puzzles over one length bucket.
///
/// Appending an extension to a running string should leave a dictionary
/// word of `word_length` letters in the trailing window; a good puzzle lets
/// the three extensions be appended in as many orders as possible.
pub struct ExtensionGenerator<'a> {
    trie: &'a PrefixTrie,
    word_length: usize,
    extension_length: usize,
}

impl<'a> ExtensionGenerator<'a> {
    /// `trie` must hold the words of exactly `word_length` letters.
    pub fn new(trie: &'a PrefixTrie, word_length: usize, extension_length: usize) -> Self {
        Self {
            trie,
            word_length,
            extension_length,
        }
    }

    /// Letters kept from the running string before each extension.
    fn initial_length(&self) -> usize {
        self.word_length.saturating_sub(self.extension_length)
    }

    /// Search for the best three extensions of `base`.
    ///
    /// Returns exactly three extensions in random display order, or an empty
    /// list when no trial ever produced three.
    pub fn generate<R: Rng + ?Sized>(&self, base: &str, rng: &mut R) -> Vec<String> {
        if self.extension_length == 0 {
            tracing::warn!("Cannot extend {:?} by zero letters", base);
            return Vec::new();
        }

        let mut best: Vec<String> = Vec::new();
        let mut best_score = f64::NEG_INFINITY;

        for trial in 0..EXTENSION_TRIALS {
            let late = trial >= LATE_TRIALS_START;
            let mut running = base.to_string();
            let mut extensions = Vec::with_capacity(EXTENSION_COUNT);

            for _ in 0..EXTENSION_COUNT {
                let extension = if late && rng.random_bool(LATE_RESTART_PROBABILITY) {
                    self.random_word_start(self.extension_length, rng)
                } else {
                    self.random_word_extension(&running, rng)
                };
                if extension.is_empty() {
                    break;
                }
                running.push_str(&extension);
                extensions.push(extension);
            }

            if extensions.len() < EXTENSION_COUNT {
                continue;
            }

            let evaluation = self.evaluate(base, &extensions, EvaluationMode::Quiet);
            if evaluation.score > best_score {
                best_score = evaluation.score;
                best = extensions;
            }
        }

        if best.len() < EXTENSION_COUNT {
            tracing::warn!(
                "Found no {} extensions of {:?} for {}-letter words",
                EXTENSION_COUNT,
                base,
                self.word_length
            );
            return Vec::new();
        }

        self.evaluate(base, &best, EvaluationMode::Log);
        best.shuffle(rng);
        best
    }

    /// Score three extensions over all six orderings.
    ///
    /// Per ordering, each append is checked by its trailing window: 200 points
    /// when all three windows are words, 20 for two, 5 for one. Windows that
    /// repeat part of `base`, medium words and common suffixes scale the
    /// ordering down; hard words do not count. Four or five complete
    /// orderings multiply the total by 10, otherwise three or more by 2.
    pub fn evaluate(&self, base: &str, extensions: &[String], mode: EvaluationMode) -> Evaluation {
        let mut evaluation = Evaluation {
            score: 0.0,
            complete_orderings: 0,
            best_ordering: None,
        };
        if extensions.len() != EXTENSION_COUNT {
            return evaluation;
        }

        let mut best_ordering_score = 0.0;
        for ordering in ORDERINGS {
            let mut running = base.to_string();
            let mut hits = 0;
            let mut multiplier = 1.0;
            let mut windows = Vec::with_capacity(EXTENSION_COUNT);

            for &index in &ordering {
                running.push_str(&extensions[index]);
                let Some(window) = running
                    .len()
                    .checked_sub(self.word_length)
                    .and_then(|start| running.get(start..))
                else {
                    continue;
                };

                let difficulty = match self.trie.word_difficulty(window) {
                    Some(difficulty) if difficulty != Difficulty::Hard => difficulty,
                    _ => continue,
                };

                hits += 1;
                if base.contains(window) {
                    multiplier *= REPEAT_PENALTY;
                }
                if difficulty == Difficulty::Medium {
                    multiplier *= MEDIUM_PENALTY;
                }
                if COMMON_SUFFIXES.iter().any(|suffix| window.ends_with(suffix)) {
                    multiplier *= SUFFIX_PENALTY;
                }
                windows.push(window.to_string());
            }

            let points = match hits {
                3 => 200.0,
                2 => 20.0,
                1 => 5.0,
                _ => 0.0,
            };
            let ordering_score = points * multiplier;
            if hits == EXTENSION_COUNT {
                evaluation.complete_orderings += 1;
            }
            if ordering_score > best_ordering_score {
                best_ordering_score = ordering_score;
                evaluation.best_ordering = Some(ordering);
            }
            evaluation.score += ordering_score;

            if mode == EvaluationMode::Log {
                let order: Vec<&str> = ordering.iter().map(|&i| extensions[i].as_str()).collect();
                tracing::debug!(
                    "Ordering {:?} formed {:?}, score {:.2}",
                    order,
                    windows,
                    ordering_score
                );
            }
        }

        if (4..6).contains(&evaluation.complete_orderings) {
            evaluation.score *= 10.0;
        } else if evaluation.complete_orderings >= 3 {
            evaluation.score *= 2.0;
        }

        if mode == EvaluationMode::Log {
            tracing::info!(
                "Extensions {:?} of {:?}: score {:.2}, {} complete orderings, best {:?}",
                extensions,
                base,
                evaluation.score,
                evaluation.complete_orderings,
                evaluation
                    .best_ordering
                    .map(|ordering| ordering.map(|i| extensions[i].clone()))
            );
        }

        evaluation
    }

    /// Randomly continue the trailing letters of `letters` into a word.
    ///
    /// Walks `extension_length` letters down from the node of the trailing
    /// window, drawing each letter up to [`LETTER_RETRIES`] times. The walk is
    /// only kept if it ends on a word; otherwise the result is empty. When the
    /// window is not a prefix of any word, a fresh word start is returned.
    pub fn random_word_extension<R: Rng + ?Sized>(&self, letters: &str, rng: &mut R) -> String {
        let start = letters.len().saturating_sub(self.initial_length());
        let Some(mut current) = letters
            .get(start..)
            .and_then(|window| self.trie.find_node(window))
        else {
            return self.random_word_start(self.extension_length, rng);
        };

        let mut extension = String::with_capacity(self.extension_length);
        for _ in 0..self.extension_length {
            let next = (0..LETTER_RETRIES).find_map(|_| {
                let index = rng.random_range(0..ALPHABET_SIZE);
                self.trie
                    .node(current)
                    .and_then(|node| node.child(index))
                    .map(|child| (index, child))
            });
            let Some((index, child)) = next else {
                break;
            };
            extension.push(index_letter(index));
            current = child;
        }

        match self.trie.node(current) {
            Some(node) if node.is_word_end() => extension,
            _ => String::new(),
        }
    }

    /// A random prefix of `length` letters that leads to many words.
    ///
    /// Runs [`WORD_START_TRIALS`] walks from the root; a missing child is
    /// replaced by the next letter round the alphabet. The first walk whose
    /// node has more than [`GOOD_ENOUGH_SUBTREE_WORDS`] words below it wins,
    /// otherwise the best walk, otherwise the start of `SPRAIN`.
    pub fn random_word_start<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> String {
        match length {
            0 => return String::new(),
            1 => return index_letter(rng.random_range(0..ALPHABET_SIZE)).to_string(),
            _ => {}
        }

        let mut best = String::new();
        let mut best_count = 0;

        for _ in 0..WORD_START_TRIALS {
            let mut current = ROOT;
            let mut word = String::with_capacity(length);

            for _ in 0..length {
                let Some(node) = self.trie.node(current) else {
                    break;
                };
                let first = rng.random_range(0..ALPHABET_SIZE);
                let next = (0..ALPHABET_SIZE)
                    .map(|offset| (first + offset) % ALPHABET_SIZE)
                    .find_map(|index| node.child(index).map(|child| (index, child)));
                let Some((index, child)) = next else {
                    break;
                };
                word.push(index_letter(index));
                current = child;
            }

            if word.len() < length {
                continue;
            }

            let count = self
                .trie
                .node(current)
                .map_or(0, |node| node.subtree_word_count());
            if count > GOOD_ENOUGH_SUBTREE_WORDS {
                return word;
            }
            if count > best_count {
                best_count = count;
                best = word;
            }
        }

        if best_count == 0 {
            return FALLBACK_WORD_START[..length.min(FALLBACK_WORD_START.len())].to_string();
        }
        best
    }
}
