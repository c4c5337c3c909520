//! Error types for the votes repository.
//! Defines specific errors that can occur during database operations on the vote ledger.
use ranking_shared::types::TargetRef;
use thiserror::Error;

/// Represents errors that can occur within the votes repository.
///
/// Store failures are surfaced as-is; the repository does not retry.
#[derive(Debug, Error)]
pub enum VotesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Unknown vote target: {} {}", .0.kind, .0.id)]
    UnknownTarget(TargetRef),

    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i16),

    #[error("Invalid target kind: {0}")]
    InvalidTargetKind(i16),

    #[error("Invalid vote count: {0}")]
    InvalidCount(i64),
}
