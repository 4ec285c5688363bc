use std::path::Path;

use tokio::fs;

use super::{DictionaryError, MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::config::DictionaryConfig;

/// Why a line of a word list was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The line holds something other than `A-Z` after uppercasing.
    InvalidCharacter(char),
    /// The word is shorter or longer than any bucket.
    UnsupportedLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number within its list.
    pub line_number: usize,
    pub text: String,
    pub reason: RejectReason,
}

/// Words accepted from one list plus the lines that were turned away.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    pub words: Vec<String>,
    pub rejected: Vec<RejectedLine>,
}

impl WordList {
    /// Tokenize a newline-separated list: trim each line (dropping `\r`),
    /// uppercase it, skip blanks, and reject lines with non-letters or an
    /// unsupported length instead of inserting a mangled word.
    pub fn parse(text: &str) -> Self {
        let mut list = WordList::default();

        for (index, line) in text.split('\n').enumerate() {
            let word = line.trim().to_uppercase();
            if word.is_empty() {
                continue;
            }

            let reason = if let Some(bad) = word.chars().find(|c| !c.is_ascii_uppercase()) {
                Some(RejectReason::InvalidCharacter(bad))
            } else if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len()) {
                Some(RejectReason::UnsupportedLength(word.len()))
            } else {
                None
            };

            match reason {
                Some(reason) => list.rejected.push(RejectedLine {
                    line_number: index + 1,
                    text: line.trim().to_string(),
                    reason,
                }),
                None => list.words.push(word),
            }
        }

        list
    }

    /// Lines rejected for holding something other than letters.
    pub fn malformed(&self) -> impl Iterator<Item = &RejectedLine> {
        self.rejected
            .iter()
            .filter(|line| matches!(line.reason, RejectReason::InvalidCharacter(_)))
    }
}

/// Raw text of every configured word list.
#[derive(Debug, Clone, Default)]
pub struct DictionarySources {
    pub valid_words: String,
    pub easy: Option<String>,
    pub medium: Option<String>,
    pub hard: Option<String>,
    pub word_source: Option<String>,
}

impl DictionarySources {
    /// Read the lists named by the configuration. The general list is
    /// required; tier lists are only read when difficulty dictionaries are on.
    pub async fn load(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let valid_words = read_list(&config.valid_words_path).await?;

        let mut sources = DictionarySources {
            valid_words,
            ..Default::default()
        };

        if config.use_difficulty_dictionaries {
            sources.easy = read_optional(config.easy_path.as_deref()).await?;
            sources.medium = read_optional(config.medium_path.as_deref()).await?;
            sources.hard = read_optional(config.hard_path.as_deref()).await?;
        }
        sources.word_source = read_optional(config.word_source_path.as_deref()).await?;

        Ok(sources)
    }
}

async fn read_list(path: &Path) -> Result<String, DictionaryError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| DictionaryError::ReadingFile {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!("Read word list {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

async fn read_optional(path: Option<&Path>) -> Result<Option<String>, DictionaryError> {
    match path {
        Some(path) => read_list(path).await.map(Some),
        None => Ok(None),
    }
}
