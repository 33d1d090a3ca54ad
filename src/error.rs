//! Error types shared by the game library

use thiserror::Error;

/// Raised when a word list normalizes to nothing playable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    #[error("Please enter some words to play!")]
    Empty,
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Word list '{0}' not found")]
    NotFound(String),

    #[error("Word list '{0}' is not valid UTF-8")]
    Encoding(String),

    #[error("Unable to parse word list '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
