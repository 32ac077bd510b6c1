use thiserror::Error;

/// Errors that can occur during phrasetag core operations.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// The record has no `input` phrase.
    #[error("record is missing the required `input` field")]
    MissingInput,

    /// A numeric literal could not be normalized (e.g. a zero denominator).
    #[error("malformed numeric literal: {token:?}")]
    NumberFormat {
        /// The token that failed to parse.
        token: String,
    },

    /// Partition parameters were out of range.
    #[error("invalid partition parameters: {0}")]
    InvalidPartition(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for phrasetag operations.
pub type Result<T> = std::result::Result<T, TaggerError>;
