pub mod health;
pub mod puzzle;
pub mod words;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

/// Run CPU bound dictionary work on the blocking pool. A panicked task
/// becomes a 500.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/words/{word}", get(words::word_info))
        .route("/prefix/{letters}", get(words::prefix))
        .route("/anagrams", get(words::anagrams))
        .route("/anagrams/random", get(words::random_anagram))
        .route("/alphabetic/{letters}", get(words::alphabetic))
        .route("/template", get(words::template))
        .route("/template/fit", get(words::template_fit))
        .route("/random", get(words::random_word))
        .route("/puzzle", get(puzzle::next_puzzle))
}

#[cfg(test)]
pub(crate) fn test_state() -> Arc<AppState> {
    use crate::config::{Config, DictionaryConfig, PuzzleConfig, ServerConfig};
    use crate::dictionary::{DictionaryOptions, DictionarySources, WordDictionary};

    let sources = DictionarySources {
        valid_words: "cat\nbat\nrat\ncats\napples\nleap\npale\npeal\nplea\nzebra\n".to_string(),
        easy: Some("cat\n".to_string()),
        medium: Some("peal\nplea\n".to_string()),
        hard: Some("zebra\n".to_string()),
        word_source: Some("gator\nleast\nsteal\n".to_string()),
    };
    let options = DictionaryOptions {
        use_difficulty_dictionaries: true,
        singular_tree: true,
    };
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        dictionary: DictionaryConfig {
            valid_words_path: "words.txt".into(),
            easy_path: None,
            medium_path: None,
            hard_path: None,
            use_difficulty_dictionaries: true,
            word_source_path: None,
            singular_tree: true,
        },
        puzzle: PuzzleConfig {
            rng_seed: Some(7),
            bag_size: 8,
            word_length: 3,
            extension_length: 1,
        },
    };

    Arc::new(AppState::new(
        config,
        WordDictionary::from_sources(&sources, options),
    ))
}
