//! Error types for the ranking repository.
//! Consolidates and re-exports error types related to vote and item storage.
mod items;
mod votes;

pub use items::ItemsRepositoryError;
pub use votes::VotesRepositoryError;
