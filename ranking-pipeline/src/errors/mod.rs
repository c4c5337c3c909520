//! Error types for the ranking pipeline.
//! The ranking functions themselves cannot fail; errors come from the
//! storage collaborators or from malformed vote submissions.
use ranking_repository::{ItemsRepositoryError, VotesRepositoryError};
use ranking_shared::types::TargetRef;
use thiserror::Error;

/// Represents errors that can occur within the pipeline services.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Votes repository error: {0}")]
    VotesRepository(#[from] VotesRepositoryError),

    #[error("Items repository error: {0}")]
    ItemsRepository(#[from] ItemsRepositoryError),

    #[error("Invalid vote direction: {0}")]
    InvalidVoteDirection(i16),

    #[error("No {} with id {}", .0.kind, .0.id)]
    TargetNotFound(TargetRef),
}

impl PipelineError {
    /// Lifts a votes repository error, reporting a missing target as [`PipelineError::TargetNotFound`].
    pub fn from_votes(err: VotesRepositoryError) -> Self {
        match err {
            VotesRepositoryError::UnknownTarget(target) => Self::TargetNotFound(target),
            other => Self::VotesRepository(other),
        }
    }
}
