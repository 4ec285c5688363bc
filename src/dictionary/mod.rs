//! Word dictionary bucketed by word length.
//!
//! Every supported length gets its own [`PrefixTrie`], so a query only walks
//! words that could possibly match. Two optional tries sit beside the
//! buckets: a unified trie keyed by the literal words (prefix checks of any
//! length) and a canonical trie keyed by each word's alphabetized letters.

mod error;
mod loader;

pub use error::DictionaryError;
pub use loader::{DictionarySources, RejectReason, RejectedLine, WordList};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::DictionaryConfig;
use crate::puzzle::ExtensionGenerator;
use crate::trie::{Difficulty, PrefixTrie, WILDCARD};

pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 24;

/// Returned by lookups that produce a single word when nothing matched.
pub const NO_MATCH: &str = "!";

/// Difficulty weights of the word lists.
pub const EASY: u8 = 1;
pub const MEDIUM: u8 = 2;
pub const HARD: u8 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryOptions {
    /// Merge the easy/medium/hard lists over the general list.
    pub use_difficulty_dictionaries: bool,
    /// Build the unified prefix trie from the word source.
    pub singular_tree: bool,
}

pub struct WordDictionary {
    buckets: Vec<PrefixTrie>,
    singular_tree: Option<PrefixTrie>,
    canonical: Option<PrefixTrie>,
    rejected: Vec<RejectedLine>,
}

impl Default for WordDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl WordDictionary {
    /// Create an empty dictionary (for testing)
    pub fn empty() -> Self {
        Self {
            buckets: (MIN_WORD_LENGTH..=MAX_WORD_LENGTH)
                .map(|_| PrefixTrie::new())
                .collect(),
            singular_tree: None,
            canonical: None,
            rejected: Vec::new(),
        }
    }

    /// Build every trie from the raw word lists.
    ///
    /// The general list goes in first as easy words; when difficulty
    /// dictionaries are enabled the easy, medium and hard lists are merged on
    /// top, so a word present in several lists keeps the last weight.
    pub fn from_sources(sources: &DictionarySources, options: DictionaryOptions) -> Self {
        let mut dictionary = Self::empty();

        dictionary.add_word_list(&sources.valid_words, EASY);

        if options.use_difficulty_dictionaries {
            let tiers = [
                (sources.easy.as_deref(), EASY),
                (sources.medium.as_deref(), MEDIUM),
                (sources.hard.as_deref(), HARD),
            ];
            for (text, difficulty) in tiers {
                match text {
                    Some(text) => {
                        dictionary.add_word_list(text, difficulty);
                    }
                    None => tracing::warn!(
                        "Difficulty dictionaries enabled but no list for weight {}",
                        difficulty
                    ),
                }
            }
        }

        match sources.word_source.as_deref() {
            Some(text) => dictionary.add_word_source(text, options.singular_tree),
            None if options.singular_tree => tracing::warn!(
                "Singular tree enabled but no word source given; prefix checks will fail"
            ),
            None => {}
        }

        tracing::info!(
            "Loaded {} words into dictionary ({} lines rejected)",
            dictionary.len(),
            dictionary.rejected.len()
        );

        dictionary
    }

    /// Read the configured word lists and build the dictionary from them.
    pub async fn load(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let sources = DictionarySources::load(config).await?;
        let dictionary = Self::from_sources(&sources, config.options());
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(dictionary)
    }

    /// Insert every acceptable word of a list with the given weight and
    /// return how many were inserted.
    pub fn add_word_list(&mut self, text: &str, difficulty: u8) -> usize {
        let list = WordList::parse(text);
        for line in list.malformed() {
            tracing::warn!(
                "Rejected line {} ({:?}) of word list: {:?}",
                line.line_number,
                line.text,
                line.reason
            );
        }

        let mut inserted = 0;
        for word in &list.words {
            if self.insert(word, difficulty) {
                inserted += 1;
            }
        }
        self.rejected.extend(list.rejected);
        inserted
    }

    /// Feed the canonical trie and, when requested, the unified prefix trie.
    pub fn add_word_source(&mut self, text: &str, singular_tree: bool) {
        let list = WordList::parse(text);
        let canonical = self.canonical.get_or_insert_with(PrefixTrie::new);
        for word in &list.words {
            canonical.insert_canonical(word);
        }

        if singular_tree {
            let unified = self.singular_tree.get_or_insert_with(PrefixTrie::new);
            for word in &list.words {
                unified.insert(word);
            }
        }
        self.rejected.extend(list.rejected);
    }

    /// Insert one word into its length bucket. Returns false for lengths
    /// outside the supported range.
    pub fn insert(&mut self, word: &str, difficulty: u8) -> bool {
        let word = word.to_ascii_uppercase();
        match self.bucket_index(word.len()) {
            Some(index) => self.buckets[index]
                .insert_with_difficulty(&word, difficulty)
                .is_some(),
            None => false,
        }
    }

    fn bucket_index(&self, word_length: usize) -> Option<usize> {
        if (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word_length) {
            Some(word_length - MIN_WORD_LENGTH)
        } else {
            None
        }
    }

    /// The trie holding words of exactly `word_length` letters.
    pub fn trie(&self, word_length: usize) -> Option<&PrefixTrie> {
        self.bucket_index(word_length).map(|index| &self.buckets[index])
    }

    /// Like [`trie`](Self::trie), for callers that need to report the length.
    pub fn bucket(&self, word_length: usize) -> Result<&PrefixTrie, DictionaryError> {
        self.trie(word_length)
            .ok_or(DictionaryError::UnsupportedLength(word_length))
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.buckets.iter().map(PrefixTrie::len).sum()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(word length, word count)` for every non-empty bucket.
    pub fn bucket_sizes(&self) -> Vec<(usize, usize)> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, trie)| !trie.is_empty())
            .map(|(index, trie)| (index + MIN_WORD_LENGTH, trie.len()))
            .collect()
    }

    /// Lines turned away while loading.
    pub fn rejected_lines(&self) -> &[RejectedLine] {
        &self.rejected
    }

    /// Check if a word exists in the dictionary. Words shorter than three
    /// letters and templates are never words.
    pub fn check_word(&self, word: &str) -> bool {
        if word.len() < MIN_WORD_LENGTH || is_template(word) {
            return false;
        }
        let word = word.to_ascii_uppercase();
        self.trie(word.len()).is_some_and(|trie| trie.is_word(&word))
    }

    /// True unless the word is stored with a medium or hard weight.
    /// Templates and unknown words count as common.
    pub fn is_common_word(&self, word: &str) -> bool {
        if is_template(word) {
            return true;
        }
        let word = word.to_ascii_uppercase();
        self.trie(word.len())
            .map_or(true, |trie| trie.is_common_word(&word))
    }

    /// True if the word is stored with a hard weight. Medium words are
    /// neither common nor rare. Templates are never rare.
    pub fn is_rare_word(&self, word: &str) -> bool {
        if is_template(word) {
            return false;
        }
        self.word_difficulty(word) == Some(Difficulty::Hard)
    }

    pub fn word_difficulty(&self, word: &str) -> Option<Difficulty> {
        let word = word.to_ascii_uppercase();
        self.trie(word.len())?.word_difficulty(&word)
    }

    /// True if some word of the unified trie starts with `letters`.
    /// Always false when the unified trie was not built.
    pub fn is_start_to_word(&self, letters: &str) -> bool {
        match &self.singular_tree {
            Some(trie) => trie.is_start_of_word(&letters.to_ascii_uppercase()),
            None => {
                tracing::warn!("Prefix check requested but no unified prefix trie was built");
                false
            }
        }
    }

    /// All anagrams of `letters` among words of the same length.
    pub fn anagrams(&self, letters: &str) -> Vec<String> {
        let letters = letters.to_ascii_uppercase();
        self.trie(letters.len())
            .map(|trie| trie.anagrams(&letters))
            .unwrap_or_default()
    }

    /// Like [`anagrams`](Self::anagrams), leaving out `excluded` words in
    /// any letter case.
    pub fn anagrams_excluding<S: AsRef<str>>(&self, letters: &str, excluded: &[S]) -> Vec<String> {
        let letters = letters.to_ascii_uppercase();
        let excluded: Vec<String> = excluded
            .iter()
            .map(|word| word.as_ref().to_ascii_uppercase())
            .collect();
        self.trie(letters.len())
            .map(|trie| trie.anagrams_excluding(&letters, &excluded))
            .unwrap_or_default()
    }

    pub fn has_anagrams(&self, letters: &str) -> bool {
        let letters = letters.to_ascii_uppercase();
        self.trie(letters.len())
            .is_some_and(|trie| trie.has_anagrams(&letters))
    }

    /// One anagram picked at random, or [`NO_MATCH`] when there is none.
    pub fn random_anagram<R: Rng + ?Sized>(&self, letters: &str, rng: &mut R) -> String {
        self.anagrams(letters)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| NO_MATCH.to_string())
    }

    /// First original spelling of the alphabetized `letters`, or
    /// [`NO_MATCH`] when the canonical trie has none.
    pub fn alphabetic_to_actual_word(&self, letters: &str) -> &str {
        self.canonical
            .as_ref()
            .and_then(|trie| trie.spellings_of(&letters.to_ascii_uppercase()).first())
            .map(String::as_str)
            .unwrap_or(NO_MATCH)
    }

    /// Find the easiest word spelled by all of `provided_letters` that fits
    /// `template`, e.g. `AELPPS` into `?P??ES` gives `APPLES`.
    ///
    /// Before any anagram search, every fixed letter of the template must be
    /// matched to a distinct provided letter. On equal difficulty the first
    /// anagram found wins.
    pub fn best_word_for_template(&self, provided_letters: &str, template: &str) -> Option<String> {
        let letters = provided_letters.to_ascii_uppercase();
        let template = template.to_ascii_uppercase();
        if letters.len() != template.len() {
            return None;
        }

        let mut pool: Vec<u8> = letters.bytes().collect();
        for wanted in template.bytes().filter(|&b| b != WILDCARD) {
            let position = pool.iter().position(|&b| b == wanted)?;
            pool.swap_remove(position);
        }

        let trie = self.trie(template.len())?;
        let mut best: Option<(Difficulty, String)> = None;
        for word in trie.anagrams(&letters) {
            let fits = word
                .bytes()
                .zip(template.bytes())
                .all(|(letter, wanted)| wanted == WILDCARD || letter == wanted);
            if !fits {
                continue;
            }
            let difficulty = trie.word_difficulty(&word).unwrap_or_default();
            if best.as_ref().map_or(true, |(easiest, _)| difficulty < *easiest) {
                best = Some((difficulty, word));
            }
        }

        best.map(|(_, word)| word)
    }

    pub fn words_for_template(&self, template: &str) -> Vec<String> {
        let template = template.to_ascii_uppercase();
        self.trie(template.len())
            .map(|trie| trie.words_for_template(&template))
            .unwrap_or_default()
    }

    pub fn count_words_for_template(&self, template: &str) -> usize {
        let template = template.to_ascii_uppercase();
        self.trie(template.len())
            .map_or(0, |trie| trie.count_words_for_template(&template))
    }

    /// First word fitting the template, if any.
    pub fn first_word_for_template(&self, template: &str) -> Option<String> {
        let template = template.to_ascii_uppercase();
        self.trie(template.len())?.first_word_for_template(&template)
    }

    pub fn random_word<R: Rng + ?Sized>(&self, word_length: usize, rng: &mut R) -> Option<String> {
        self.trie(word_length)?.random_word(rng)
    }

    pub fn word_at(&self, word_length: usize, index: usize) -> Option<String> {
        self.trie(word_length)?.word_at(index)
    }

    /// Three extensions for `base` (see [`ExtensionGenerator::generate`]),
    /// or an empty list when the length is unsupported or the search failed.
    pub fn generate_word_extensions<R: Rng + ?Sized>(
        &self,
        base: &str,
        word_length: usize,
        extension_length: usize,
        rng: &mut R,
    ) -> Vec<String> {
        match self.trie(word_length) {
            Some(trie) => ExtensionGenerator::new(trie, word_length, extension_length)
                .generate(&base.to_ascii_uppercase(), rng),
            None => {
                tracing::warn!("No dictionary bucket for {}-letter words", word_length);
                Vec::new()
            }
        }
    }
}

/// Words holding `?` or a space are templates, not concrete words.
fn is_template(word: &str) -> bool {
    word.bytes().any(|b| b == WILDCARD || b == b' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_dictionary() -> WordDictionary {
        let sources = DictionarySources {
            valid_words: "cat\nbat\nrat\ncats\napples\nleap\npale\npeal\nplea\nzebra\ngo\n".to_string(),
            easy: Some("cat\n".to_string()),
            medium: Some("peal\nplea\n".to_string()),
            hard: Some("zebra\n".to_string()),
            word_source: Some("gator\nleast\nsteal\n".to_string()),
        };
        WordDictionary::from_sources(
            &sources,
            DictionaryOptions {
                use_difficulty_dictionaries: true,
                singular_tree: true,
            },
        )
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = WordDictionary::empty();
        assert!(dict.is_empty());
        assert!(!dict.check_word("TEST"));
        assert!(dict.bucket_sizes().is_empty());
    }

    #[test]
    fn test_check_word() {
        let dict = sample_dictionary();

        assert!(dict.check_word("CAT"));
        assert!(dict.check_word("cat"), "lookups are case-insensitive");
        assert!(dict.check_word("APPLES"));
        assert!(!dict.check_word("DOG"));
        assert!(!dict.check_word("C?T"));
    }

    #[test]
    fn test_short_words_are_never_valid() {
        let mut dict = sample_dictionary();
        // even if something managed to store it
        assert!(!dict.insert("GO", EASY));
        assert!(!dict.check_word("GO"));
        assert!(!dict.check_word("A"));
        assert!(!dict.check_word(""));
    }

    #[test]
    fn test_bucket_routing() {
        let dict = sample_dictionary();

        assert_eq!(dict.trie(3).unwrap().len(), 3);
        assert_eq!(dict.trie(4).unwrap().len(), 5);
        assert!(dict.trie(2).is_none());
        assert!(dict.trie(MAX_WORD_LENGTH + 1).is_none());
        assert!(matches!(dict.bucket(30), Err(DictionaryError::UnsupportedLength(30))));
        assert_eq!(dict.bucket_sizes(), vec![(3, 3), (4, 5), (5, 1), (6, 1)]);
        assert_eq!(dict.len(), 10);
    }

    #[test]
    fn test_rejected_lines_are_kept() {
        let dict = sample_dictionary();
        // "go" is too short for any bucket
        assert_eq!(dict.rejected_lines().len(), 1);
        assert_eq!(dict.rejected_lines()[0].text, "go");
    }

    #[test]
    fn test_common_and_rare_words() {
        let dict = sample_dictionary();

        assert!(dict.is_common_word("CAT"));
        assert!(!dict.is_rare_word("CAT"));

        // medium words are neither common nor rare
        assert!(!dict.is_common_word("PEAL"));
        assert!(!dict.is_rare_word("PEAL"));
        assert!(!dict.is_rare_word("plea"));
        assert!(dict.is_rare_word("ZEBRA"));

        // templates are permissive both ways
        assert!(dict.is_common_word("Z?BRA"));
        assert!(!dict.is_rare_word("Z?BRA"));
        assert!(dict.is_common_word("ZE RA"));

        // unknown words are common, never rare
        assert!(dict.is_common_word("QUOKKA"));
        assert!(!dict.is_rare_word("QUOKKA"));
        assert!(dict.is_common_word("XY"));
    }

    #[test]
    fn test_word_difficulty() {
        let dict = sample_dictionary();
        assert_eq!(dict.word_difficulty("CAT"), Some(Difficulty::Easy));
        assert_eq!(dict.word_difficulty("PLEA"), Some(Difficulty::Medium));
        assert_eq!(dict.word_difficulty("ZEBRA"), Some(Difficulty::Hard));
        assert_eq!(dict.word_difficulty("DOG"), None);
    }

    #[test]
    fn test_difficulty_lists_ignored_when_disabled() {
        let sources = DictionarySources {
            valid_words: "zebra\n".to_string(),
            hard: Some("zebra\n".to_string()),
            ..Default::default()
        };
        let dict = WordDictionary::from_sources(&sources, DictionaryOptions::default());
        assert_eq!(dict.word_difficulty("ZEBRA"), Some(Difficulty::Easy));
    }

    #[test]
    fn test_anagram_queries() {
        let dict = sample_dictionary();

        let mut anagrams = dict.anagrams("pale");
        anagrams.sort();
        assert_eq!(anagrams, ["LEAP", "PALE", "PEAL", "PLEA"]);

        let mut exclusive = dict.anagrams_excluding("PALE", &["LEAP", "PLEA"]);
        exclusive.sort();
        assert_eq!(exclusive, ["PALE", "PEAL"]);

        let mut lowercase = dict.anagrams_excluding("pale", &["leap", "Plea"]);
        lowercase.sort();
        assert_eq!(lowercase, ["PALE", "PEAL"], "exclusions ignore letter case");

        assert!(dict.has_anagrams("TAC"));
        assert!(!dict.has_anagrams("XYZ"));
        assert!(dict.anagrams("AB").is_empty());
    }

    #[test]
    fn test_random_anagram() {
        let dict = sample_dictionary();
        let mut rng = StdRng::seed_from_u64(3);

        let anagram = dict.random_anagram("ELPA", &mut rng);
        assert!(["LEAP", "PALE", "PEAL", "PLEA"].contains(&anagram.as_str()));
        assert_eq!(dict.random_anagram("QQQ", &mut rng), NO_MATCH);
    }

    #[test]
    fn test_alphabetic_to_actual_word() {
        let dict = sample_dictionary();
        assert_eq!(dict.alphabetic_to_actual_word("AGORT"), "GATOR");
        assert_eq!(dict.alphabetic_to_actual_word("aelst"), "LEAST");
        assert_eq!(dict.alphabetic_to_actual_word("XYZ"), NO_MATCH);
        assert_eq!(WordDictionary::empty().alphabetic_to_actual_word("AGORT"), NO_MATCH);
    }

    #[test]
    fn test_is_start_to_word() {
        let dict = sample_dictionary();
        assert!(dict.is_start_to_word("GA"));
        assert!(dict.is_start_to_word("ste"));
        assert!(!dict.is_start_to_word("CA"), "the unified trie only holds the word source");

        assert!(!WordDictionary::empty().is_start_to_word("GA"));
    }

    #[test]
    fn test_singular_tree_needs_word_source() {
        let sources = DictionarySources {
            valid_words: "gator
".to_string(),
            ..Default::default()
        };
        let options = DictionaryOptions {
            use_difficulty_dictionaries: false,
            singular_tree: true,
        };
        let dict = WordDictionary::from_sources(&sources, options);
        assert!(dict.check_word("GATOR"));
        assert!(!dict.is_start_to_word("GA"));
    }

    #[test]
    fn test_best_word_for_template() {
        let dict = sample_dictionary();

        assert_eq!(
            dict.best_word_for_template("AELPPS", "?P??ES"),
            Some("APPLES".to_string())
        );
        // the template needs a Z that the letters do not have
        assert_eq!(dict.best_word_for_template("AELPPS", "Z?????"), None);
        // each provided letter can only satisfy one fixed position
        assert_eq!(dict.best_word_for_template("ACT", "TT?"), None);
        assert_eq!(dict.best_word_for_template("ACT", "????"), None);
    }

    #[test]
    fn test_best_word_prefers_easiest() {
        let dict = sample_dictionary();
        // LEAP and PALE are easy, PEAL and PLEA are medium
        assert_eq!(dict.best_word_for_template("PALE", "P???"), Some("PALE".to_string()));
        assert_eq!(dict.best_word_for_template("PALE", "??E?"), Some("PLEA".to_string()));
    }

    #[test]
    fn test_template_queries() {
        let dict = sample_dictionary();

        let mut words = dict.words_for_template("?at");
        words.sort();
        assert_eq!(words, ["BAT", "CAT", "RAT"]);
        assert_eq!(dict.count_words_for_template("?AT"), 3);
        assert_eq!(dict.first_word_for_template("?AT"), Some("BAT".to_string()));
        assert!(dict.words_for_template("??").is_empty());
    }

    #[test]
    fn test_random_word_and_rank() {
        let dict = sample_dictionary();
        let mut rng = StdRng::seed_from_u64(11);

        let word = dict.random_word(3, &mut rng).unwrap();
        assert!(dict.check_word(&word));
        assert_eq!(dict.word_at(3, 0), Some("BAT".to_string()));
        assert_eq!(dict.word_at(3, 3), None);
        assert_eq!(dict.random_word(2, &mut rng), None);
    }

    #[tokio::test]
    async fn test_load_without_words_is_empty() {
        let path = std::env::temp_dir().join(format!("no-words-{}.txt", std::process::id()));
        std::fs::write(&path, "a\nbe\n\n").unwrap();

        let config = DictionaryConfig {
            valid_words_path: path.clone(),
            easy_path: None,
            medium_path: None,
            hard_path: None,
            use_difficulty_dictionaries: false,
            word_source_path: None,
            singular_tree: false,
        };
        let result = WordDictionary::load(&config).await;
        assert!(matches!(result, Err(DictionaryError::Empty)));

        std::fs::write(&path, "cat\n").unwrap();
        let dict = WordDictionary::load(&config).await.unwrap();
        assert!(dict.check_word("CAT"));

        std::fs::remove_file(&path).ok();
    }
}
