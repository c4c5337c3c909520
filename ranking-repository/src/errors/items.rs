use thiserror::Error;

/// Represents errors that can occur within the items repository.
#[derive(Debug, Error)]
pub enum ItemsRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid target kind: {0}")]
    InvalidTargetKind(i16),
}
