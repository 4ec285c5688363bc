use std::path::PathBuf;

use thiserror::Error;

use super::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("cannot read word list {}", path.display())]
    ReadingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no words were loaded from the configured word lists")]
    Empty,
    #[error(
        "unsupported word length {0}, expected {min} to {max}",
        min = MIN_WORD_LENGTH,
        max = MAX_WORD_LENGTH
    )]
    UnsupportedLength(usize),
}
