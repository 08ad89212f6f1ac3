use thiserror::Error;

/// Errors surfaced by the pure engine. Lookup misses are not represented
/// here — they come back as `None`, never as `Err`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MarkovError {
    /// A sentence in the skeleton received no subject during assignment.
    #[error("no subject could be assigned to every sentence")]
    NoAnchor,

    /// A full generator pass made no progress filling blanks.
    #[error("generator made no progress and is stuck")]
    Stuck,

    /// `one_hot(index, len)` called with `index` outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// `distance_one_hot(offset)` called with `|offset| > window`.
    #[error("offset {offset} out of window {window}")]
    OutOfWindow { offset: i32, window: u32 },

    /// A snapshot's structure does not match the trie schema.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
