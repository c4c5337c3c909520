use thiserror::Error;

/// Errors raised when converting raw values into shared domain types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i16),

    #[error("Invalid vote direction: {0}")]
    InvalidVoteDirection(i16),

    #[error("Invalid target kind: {0}")]
    InvalidTargetKind(String),

    #[error("Invalid sort mode: {0}")]
    InvalidSortMode(String),

    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
}
