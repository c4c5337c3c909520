//! In-memory implementation of the ranking repository.
//!
//! Backs local runs (`STORAGE_BACKEND=memory`) and tests. Both stores live
//! behind `tokio::sync::RwLock`, so concurrent readers never block each other.
//! Like the PostgreSQL foreign key, an upsert is rejected unless its target
//! is a stored item of the same kind. Locks are taken items first, then votes.
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use ranking_shared::types::{
    Item, TargetKind, TargetRef, VoteChange, VoteRecord, VoteValue, VoterId, VotesCount,
};
use tokio::sync::RwLock;

use crate::{ItemsRepository, ItemsRepositoryError, VotesRepository, VotesRepositoryError};

/// Vote ledger and item store held in process memory.
#[derive(Default)]
pub struct InMemoryRepository {
    votes: RwLock<Ledger>,
    items: RwLock<Vec<Item>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vote records currently held.
    pub async fn vote_count(&self) -> usize {
        self.votes.read().await.len()
    }
}

#[async_trait]
impl VotesRepository for InMemoryRepository {
    async fn tally_votes(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashMap<TargetRef, VotesCount>, VotesRepositoryError> {
        let mut tallies: HashMap<TargetRef, VotesCount> = targets
            .iter()
            .map(|target| (*target, VotesCount::default()))
            .collect();

        let votes = self.votes.read().await;
        for record in votes.values() {
            if let Some(count) = tallies.get_mut(&record.target) {
                count.record(record.value);
            }
        }

        Ok(tallies)
    }

    async fn swap_vote(
        &self,
        change: &VoteChange,
    ) -> Result<Option<VoteValue>, VotesRepositoryError> {
        let items = self.items.read().await;
        let mut votes = self.votes.write().await;
        apply_change(&items, &mut votes, change)
    }

    async fn apply_changes(&self, changes: &[VoteChange]) -> Result<(), VotesRepositoryError> {
        let items = self.items.read().await;
        let mut votes = self.votes.write().await;

        // Validate the whole batch first so a failure leaves the ledger untouched.
        if let Some(change) = changes
            .iter()
            .find(|change| is_upsert(change) && !contains_target(&items, &change.target()))
        {
            return Err(VotesRepositoryError::UnknownTarget(change.target()));
        }

        for change in changes {
            apply_change(&items, &mut votes, change)?;
        }
        Ok(())
    }
}

type Ledger = HashMap<(VoterId, TargetRef), VoteRecord>;

fn is_upsert(change: &VoteChange) -> bool {
    matches!(change, VoteChange::Upsert(_))
}

fn contains_target(items: &[Item], target: &TargetRef) -> bool {
    items
        .iter()
        .any(|item| item.id == target.id && item.kind == target.kind)
}

fn apply_change(
    items: &[Item],
    votes: &mut Ledger,
    change: &VoteChange,
) -> Result<Option<VoteValue>, VotesRepositoryError> {
    let key = (change.voter_id(), change.target());
    let previous = match change {
        VoteChange::Upsert(record) => {
            if !contains_target(items, &record.target) {
                return Err(VotesRepositoryError::UnknownTarget(record.target));
            }
            votes.insert(key, record.clone())
        }
        VoteChange::Clear { .. } => votes.remove(&key),
    };
    Ok(previous.map(|record| record.value))
}

#[async_trait]
impl ItemsRepository for InMemoryRepository {
    async fn list_items(
        &self,
        kind: TargetKind,
        scope: &str,
    ) -> Result<Vec<Item>, ItemsRepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.kind == kind && item.scope == scope)
            .cloned()
            .collect())
    }

    async fn existing_targets(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashSet<TargetRef>, ItemsRepositoryError> {
        let items = self.items.read().await;
        Ok(targets
            .iter()
            .filter(|target| contains_target(&items, target))
            .copied()
            .collect())
    }

    async fn insert_items(&self, new_items: &[Item]) -> Result<(), ItemsRepositoryError> {
        let mut items = self.items.write().await;
        for item in new_items {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item.clone());
            }
        }
        Ok(())
    }
}
