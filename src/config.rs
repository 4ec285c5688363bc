use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::dictionary::DictionaryOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dictionary: DictionaryConfig,
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    /// General list of every acceptable word.
    pub valid_words_path: PathBuf,
    pub easy_path: Option<PathBuf>,
    pub medium_path: Option<PathBuf>,
    pub hard_path: Option<PathBuf>,
    pub use_difficulty_dictionaries: bool,
    /// Words feeding the alphabetized lookup trie and the unified prefix trie.
    pub word_source_path: Option<PathBuf>,
    pub singular_tree: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub rng_seed: Option<u64>,
    pub bag_size: usize,
    pub word_length: usize,
    pub extension_length: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let dictionary = DictionaryConfig {
            valid_words_path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./dictionary.txt".to_string())
                .into(),
            easy_path: optional_path("DICTIONARY_EASY_PATH"),
            medium_path: optional_path("DICTIONARY_MEDIUM_PATH"),
            hard_path: optional_path("DICTIONARY_HARD_PATH"),
            use_difficulty_dictionaries: flag("USE_DIFFICULTY_DICTIONARIES"),
            word_source_path: optional_path("WORD_SOURCE_PATH"),
            singular_tree: flag("SINGULAR_TREE"),
        };

        let puzzle = PuzzleConfig {
            rng_seed: env::var("PUZZLE_RNG_SEED")
                .ok()
                .map(|seed| seed.parse())
                .transpose()
                .context("PUZZLE_RNG_SEED must be an unsigned number")?,
            bag_size: env::var("PUZZLE_BAG_SIZE")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .unwrap_or(64),
            word_length: env::var("PUZZLE_WORD_LENGTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            extension_length: env::var("PUZZLE_EXTENSION_LENGTH")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),
        };

        Ok(Config {
            server,
            dictionary,
            puzzle,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DictionaryConfig {
    pub fn options(&self) -> DictionaryOptions {
        DictionaryOptions {
            use_difficulty_dictionaries: self.use_difficulty_dictionaries,
            singular_tree: self.singular_tree,
        }
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
