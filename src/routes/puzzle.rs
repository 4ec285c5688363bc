use std::sync::{Arc, PoisonError};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::run_blocking;
use crate::models::PuzzleQuery;
use crate::puzzle::Puzzle;
use crate::AppState;

/// Generate a puzzle: a base word plus three extensions.
///
/// The extension search is CPU bound, so it runs on the blocking pool.
pub async fn next_puzzle(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PuzzleQuery>,
) -> Result<Json<Puzzle>, StatusCode> {
    let word_length = query.word_length.unwrap_or(state.config.puzzle.word_length);
    let extension_length = query
        .extension_length
        .unwrap_or(state.config.puzzle.extension_length);

    if state.dictionary.trie(word_length).is_none()
        || extension_length == 0
        || extension_length > word_length
    {
        tracing::warn!(
            "Rejected puzzle shape: {}-letter words, {}-letter extensions",
            word_length,
            extension_length
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    let task_state = state.clone();
    let puzzle = run_blocking(move || {
        let mut rng = task_state.request_rng();
        // only the draw needs the generator; the search runs unlocked
        let base_word = task_state
            .puzzles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draw_base_word(&task_state.dictionary, word_length, &mut rng)?;
        Puzzle::build(
            &task_state.dictionary,
            base_word,
            word_length,
            extension_length,
            &mut rng,
        )
    })
    .await?;

    match puzzle {
        Some(puzzle) => {
            tracing::info!(
                "Puzzle for {}: {:?}",
                puzzle.base_word,
                puzzle.extensions
            );
            Ok(Json(puzzle))
        }
        None => {
            tracing::warn!("No puzzle found for {}-letter words", word_length);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}
