use std::collections::HashSet;

use crate::errors::ItemsRepositoryError;
use ranking_shared::types::{Item, TargetKind, TargetRef};

/// Read access to the posts and comments that make up a listing.
#[async_trait::async_trait]
pub trait ItemsRepository: Send + Sync {
    /// Lists every item of `kind` in `scope`, in storage order.
    async fn list_items(
        &self,
        kind: TargetKind,
        scope: &str,
    ) -> Result<Vec<Item>, ItemsRepositoryError>;

    /// Returns the subset of `targets` that refer to a stored item of the same kind.
    ///
    /// Looked up in one query, like the vote tally.
    async fn existing_targets(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashSet<TargetRef>, ItemsRepositoryError>;

    /// Stores items, ignoring ids that already exist.
    async fn insert_items(&self, items: &[Item]) -> Result<(), ItemsRepositoryError>;
}
