//! This module defines the `VotesRepository` trait, which provides an interface
//! for reading and mutating the vote ledger.
use std::collections::HashMap;

use crate::errors::VotesRepositoryError;
use ranking_shared::types::{TargetRef, VoteChange, VoteValue, VotesCount};

/// A trait that defines the interface for interacting with the vote ledger.
///
/// Implementors must keep at most one record per `(voter, target)` pair.
#[async_trait::async_trait]
pub trait VotesRepository: Send + Sync {
    /// Aggregates the vote records of a set of targets into up/down counts.
    ///
    /// This is a set-at-a-time operation: implementations aggregate all targets
    /// in a single pass or query rather than one lookup per target.
    ///
    /// # Arguments
    ///
    /// * `targets` - Targets to tally (duplicates are allowed)
    ///
    /// # Returns
    ///
    /// * `Ok(HashMap)` - Counts for every requested target; targets without
    ///   records map to zero counts
    /// * `Err(VotesRepositoryError)` - The store could not be read
    async fn tally_votes(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashMap<TargetRef, VotesCount>, VotesRepositoryError>;

    /// Applies a single change and returns the value it replaced.
    ///
    /// Reading the voter's previous record and writing the new one happen
    /// atomically, so concurrent submissions by the same voter on the same
    /// target each observe the other's result.
    ///
    /// # Arguments
    ///
    /// * `change` - The upsert or clear to apply
    ///
    /// # Returns
    ///
    /// * `Ok(Some(VoteValue))` - The voter's vote before the change
    /// * `Ok(None)` - The voter had not voted on the target
    /// * `Err(VotesRepositoryError::UnknownTarget)` - The target is not a stored item
    /// * `Err(VotesRepositoryError)` - Database failure; nothing is applied
    async fn swap_vote(&self, change: &VoteChange)
        -> Result<Option<VoteValue>, VotesRepositoryError>;

    /// Applies a batch of ledger mutations atomically.
    ///
    /// # Arguments
    ///
    /// * `changes` - Upserts and clears to apply, in order (empty slices are no-ops)
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All changes applied
    /// * `Err(VotesRepositoryError::UnknownTarget)` - A change refers to a missing item
    /// * `Err(VotesRepositoryError)` - Failure; no change is applied
    async fn apply_changes(&self, changes: &[VoteChange]) -> Result<(), VotesRepositoryError>;
}
