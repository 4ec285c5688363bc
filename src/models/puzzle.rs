use serde::Deserialize;

/// Overrides for the configured puzzle shape.
#[derive(Debug, Default, Deserialize)]
pub struct PuzzleQuery {
    pub word_length: Option<usize>,
    pub extension_length: Option<usize>,
}
