use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::models::{
    AlphabeticResponse, AnagramQuery, AnagramsResponse, PrefixResponse, RandomAnagramQuery,
    RandomAnagramResponse, RandomWordQuery, RandomWordResponse, TemplateFitQuery,
    TemplateFitResponse, TemplateQuery, TemplateResponse, WordInfo,
};
use crate::trie::WILDCARD;
use crate::utils::letters::{is_letters_only, scrabble_worth};
use super::run_blocking;
use crate::AppState;

/// Uppercase `letters` and reject anything but `A-Z`.
fn normalize_letters(letters: &str) -> Result<String, StatusCode> {
    let letters = letters.trim().to_ascii_uppercase();
    if letters.is_empty() || !is_letters_only(&letters) {
        tracing::warn!("Rejected letters {:?}", letters);
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(letters)
}

/// Like [`normalize_letters`] but also accepts `?` wildcards.
fn normalize_template(template: &str) -> Result<String, StatusCode> {
    let template = template.trim().to_ascii_uppercase();
    if template.is_empty()
        || !template
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b == WILDCARD)
    {
        tracing::warn!("Rejected template {:?}", template);
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(template)
}

pub async fn word_info(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Result<Json<WordInfo>, StatusCode> {
    let word = normalize_letters(&word)?;
    let dictionary = &state.dictionary;

    Ok(Json(WordInfo {
        valid: dictionary.check_word(&word),
        common: dictionary.is_common_word(&word),
        rare: dictionary.is_rare_word(&word),
        difficulty: dictionary.word_difficulty(&word),
        scrabble_worth: scrabble_worth(&word),
        word,
    }))
}

pub async fn prefix(
    State(state): State<Arc<AppState>>,
    Path(letters): Path<String>,
) -> Result<Json<PrefixResponse>, StatusCode> {
    let letters = normalize_letters(&letters)?;
    Ok(Json(PrefixResponse {
        is_prefix: state.dictionary.is_start_to_word(&letters),
        letters,
    }))
}

pub async fn anagrams(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnagramQuery>,
) -> Result<Json<AnagramsResponse>, StatusCode> {
    let letters = normalize_letters(&query.letters)?;
    let excluded = query.excluded_words();

    run_blocking(move || {
        let anagrams = if excluded.is_empty() {
            state.dictionary.anagrams(&letters)
        } else {
            state.dictionary.anagrams_excluding(&letters, &excluded)
        };
        tracing::debug!("{} anagrams of {}", anagrams.len(), letters);

        AnagramsResponse {
            count: anagrams.len(),
            letters,
            anagrams,
        }
    })
    .await
    .map(Json)
}

pub async fn random_anagram(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RandomAnagramQuery>,
) -> Result<Json<RandomAnagramResponse>, StatusCode> {
    let letters = normalize_letters(&query.letters)?;
    let mut rng = state.request_rng();

    run_blocking(move || RandomAnagramResponse {
        word: state.dictionary.random_anagram(&letters, &mut rng),
        letters,
    })
    .await
    .map(Json)
}

pub async fn alphabetic(
    State(state): State<Arc<AppState>>,
    Path(letters): Path<String>,
) -> Result<Json<AlphabeticResponse>, StatusCode> {
    let letters = normalize_letters(&letters)?;
    Ok(Json(AlphabeticResponse {
        word: state.dictionary.alphabetic_to_actual_word(&letters).to_string(),
        letters,
    }))
}

pub async fn template(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<TemplateResponse>, StatusCode> {
    let pattern = normalize_template(&query.pattern)?;

    run_blocking(move || TemplateResponse {
        words: state.dictionary.words_for_template(&pattern),
        count: state.dictionary.count_words_for_template(&pattern),
        pattern,
    })
    .await
    .map(Json)
}

pub async fn template_fit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TemplateFitQuery>,
) -> Result<Json<TemplateFitResponse>, StatusCode> {
    let letters = normalize_letters(&query.letters)?;
    let template = normalize_template(&query.template)?;
    if letters.len() != template.len() {
        tracing::warn!("Letters {} do not fit template {}", letters, template);
        return Err(StatusCode::BAD_REQUEST);
    }

    run_blocking(move || TemplateFitResponse {
        word: state.dictionary.best_word_for_template(&letters, &template),
        letters,
        template,
    })
    .await
    .map(Json)
}

pub async fn random_word(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RandomWordQuery>,
) -> Result<Json<RandomWordResponse>, StatusCode> {
    state.dictionary.bucket(query.length).map_err(|e| {
        tracing::warn!("Random word request rejected: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let word = match query.index {
        Some(index) => state.dictionary.word_at(query.length, index),
        None => state
            .dictionary
            .random_word(query.length, &mut state.request_rng()),
    };

    Ok(Json(RandomWordResponse {
        length: query.length,
        word,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;

    #[tokio::test]
    async fn test_word_info() {
        let state = test_state();

        let Json(info) = word_info(State(state.clone()), Path("zebra".to_string()))
            .await
            .unwrap();
        assert_eq!(info.word, "ZEBRA");
        assert!(info.valid);
        assert!(info.rare);
        assert!(!info.common);
        assert_eq!(info.scrabble_worth, 10 + 1 + 3 + 1 + 1);

        let Json(info) = word_info(State(state), Path("dog".to_string())).await.unwrap();
        assert!(!info.valid);
        assert!(info.difficulty.is_none());
    }

    #[tokio::test]
    async fn test_bad_letters_are_rejected() {
        let state = test_state();

        let err = word_info(State(state.clone()), Path("c4t".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);

        let err = template(
            State(state),
            Query(TemplateQuery {
                pattern: "C*T".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_prefix() {
        let state = test_state();
        let Json(response) = prefix(State(state.clone()), Path("gat".to_string()))
            .await
            .unwrap();
        assert!(response.is_prefix);

        let Json(response) = prefix(State(state), Path("xq".to_string())).await.unwrap();
        assert!(!response.is_prefix);
    }

    #[tokio::test]
    async fn test_anagrams_with_exclusions() {
        let state = test_state();

        let Json(all) = anagrams(
            State(state.clone()),
            Query(AnagramQuery {
                letters: "pale".to_string(),
                exclude: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(all.count, 4);

        let Json(rest) = anagrams(
            State(state),
            Query(AnagramQuery {
                letters: "pale".to_string(),
                exclude: Some("leap,plea".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(rest.count, 2);
        assert!(!rest.anagrams.contains(&"LEAP".to_string()));
    }

    #[tokio::test]
    async fn test_random_anagram_and_alphabetic() {
        let state = test_state();

        let Json(response) = random_anagram(
            State(state.clone()),
            Query(RandomAnagramQuery {
                letters: "tac".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.word, "CAT");

        let Json(response) = random_anagram(
            State(state.clone()),
            Query(RandomAnagramQuery {
                letters: "xyz".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.word, "!");

        let Json(response) = alphabetic(State(state.clone()), Path("agort".to_string()))
            .await
            .unwrap();
        assert_eq!(response.word, "GATOR");

        let Json(response) = alphabetic(State(state), Path("abc".to_string()))
            .await
            .unwrap();
        assert_eq!(response.word, "!");
    }

    #[tokio::test]
    async fn test_template_routes() {
        let state = test_state();

        let Json(response) = template(
            State(state.clone()),
            Query(TemplateQuery {
                pattern: "?at".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.words, ["BAT", "CAT", "RAT"]);
        assert_eq!(response.count, 3);

        let Json(response) = template_fit(
            State(state.clone()),
            Query(TemplateFitQuery {
                letters: "aelpps".to_string(),
                template: "?p??es".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.word.as_deref(), Some("APPLES"));

        let err = template_fit(
            State(state),
            Query(TemplateFitQuery {
                letters: "cat".to_string(),
                template: "????".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_random_word() {
        let state = test_state();

        let Json(response) = random_word(
            State(state.clone()),
            Query(RandomWordQuery {
                length: 3,
                index: None,
            }),
        )
        .await
        .unwrap();
        let word = response.word.unwrap();
        assert!(["BAT", "CAT", "RAT"].contains(&word.as_str()));

        let Json(response) = random_word(
            State(state.clone()),
            Query(RandomWordQuery {
                length: 3,
                index: Some(0),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.word.as_deref(), Some("BAT"));

        let err = random_word(
            State(state),
            Query(RandomWordQuery {
                length: 2,
                index: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }
}
