use serde::{Deserialize, Serialize};

use crate::trie::Difficulty;

/// Everything the dictionary knows about one word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub valid: bool,
    pub common: bool,
    pub rare: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub scrabble_worth: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixResponse {
    pub letters: String,
    pub is_prefix: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnagramQuery {
    pub letters: String,
    /// Comma separated words to leave out of the result
    #[serde(default)]
    pub exclude: Option<String>,
}

impl AnagramQuery {
    pub fn excluded_words(&self) -> Vec<String> {
        self.exclude
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|word| word.trim().to_ascii_uppercase())
            .filter(|word| !word.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnagramsResponse {
    pub letters: String,
    pub anagrams: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RandomAnagramQuery {
    pub letters: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomAnagramResponse {
    pub letters: String,
    /// `"!"` when the letters have no anagram
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphabeticResponse {
    pub letters: String,
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    /// Letters and `?` wildcards, e.g. `C?T`
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub pattern: String,
    pub words: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct TemplateFitQuery {
    pub letters: String,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFitResponse {
    pub letters: String,
    pub template: String,
    pub word: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomWordQuery {
    pub length: usize,
    /// Pick the word at this rank instead of a random one
    #[serde(default)]
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomWordResponse {
    pub length: usize,
    pub word: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_words() {
        let query = AnagramQuery {
            letters: "EAST".to_string(),
            exclude: Some("seat, Teas,,".to_string()),
        };
        assert_eq!(query.excluded_words(), ["SEAT", "TEAS"]);

        let query = AnagramQuery {
            letters: "EAST".to_string(),
            exclude: None,
        };
        assert!(query.excluded_words().is_empty());
    }

    #[test]
    fn test_word_info_skips_missing_difficulty() {
        let info = WordInfo {
            word: "QZX".to_string(),
            valid: false,
            common: true,
            rare: false,
            difficulty: None,
            scrabble_worth: 30,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("difficulty").is_none());
        assert_eq!(json["scrabble_worth"], 30);
    }
}
