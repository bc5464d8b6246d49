// src/error.rs
// Configuration errors raised while preparing the phrase pool and building cards.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BingoError {
    #[error("Phrase pool has {found} phrases, at least {required} are required")]
    NotEnoughPhrases { required: usize, found: usize },

    #[error("Phrase pool contains a duplicate phrase: {phrase:?}")]
    DuplicatePhrase { phrase: String },

    #[error("Phrase at position {index} is reserved for the free space")]
    ReservedPhrase { index: usize },

    #[error("Phrase pool contains an empty phrase at position {index}")]
    EmptyPhrase { index: usize },

    #[error("Failed to read phrase file {path}: {source}")]
    PhraseFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid phrase list: {0}")]
    PhraseFormat(#[from] serde_json::Error),
}
