//! Error types for dynamic bit vectors.

use thiserror::Error;

/// Error variants for fallible bit vector operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An index was provided that is out of the vector's bounds.
    #[error("index out of bounds: {index} (len {len})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Logical length of the vector at the time of the call.
        len: usize,
    },

    /// A character other than `0` or `1` was found while parsing.
    #[error("invalid bit character {ch:?} at position {position}")]
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Character position in the input.
        position: usize,
    },

    /// A byte encoding was malformed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// A specialized Result type for bit vector operations.
pub type Result<T> = std::result::Result<T, Error>;
