use std::io;

use thiserror::Error;

/// Anything that stops the remote source from producing a word.
#[derive(Debug, Error)]
pub enum NetworkFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response contained no words")]
    EmptyResponse,

    #[error("response word was blank")]
    BlankWord,
}

#[derive(Debug, Error)]
pub enum WordListError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("word list has {found} usable words, at least {required} are needed")]
    TooFewWords { found: usize, required: usize },
}
