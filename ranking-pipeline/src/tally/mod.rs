//! Vote tally: aggregates vote records into `{upvotes, downvotes}` per target.
//!
//! [`tally_records`] is the pure, single-pass aggregation over records already
//! in memory. [`VoteTally`] asks a [`VotesRepository`] to do the same grouped
//! aggregation next to the data and enriches items with the result.
use std::collections::HashMap;
use std::sync::Arc;

use ranking_repository::VotesRepository;
use ranking_shared::types::{Item, TargetRef, VotableItem, VoteRecord, VotesCount};
use tracing::{debug, instrument};

use crate::errors::PipelineError;

/// Aggregates `records` into counts for each of `targets`.
///
/// Every requested target appears in the result, zeroed if it has no records.
/// Records for targets that were not requested are ignored. The result does
/// not depend on the order of `records`.
pub fn tally_records(
    records: &[VoteRecord],
    targets: &[TargetRef],
) -> HashMap<TargetRef, VotesCount> {
    let mut tallies: HashMap<TargetRef, VotesCount> = targets
        .iter()
        .map(|target| (*target, VotesCount::default()))
        .collect();

    for record in records {
        if let Some(count) = tallies.get_mut(&record.target) {
            count.record(record.value);
        }
    }

    tallies
}

/// Enriches stored items with vote totals read from the vote ledger.
pub struct VoteTally {
    votes_repository: Arc<dyn VotesRepository>,
}

impl VoteTally {
    pub fn new(votes_repository: Arc<dyn VotesRepository>) -> Self {
        Self { votes_repository }
    }

    /// Tallies a set of targets in one repository round trip.
    ///
    /// Store failures are returned unchanged; there is no retry here.
    #[instrument(skip(self, targets), fields(target_count = targets.len()))]
    pub async fn tally(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashMap<TargetRef, VotesCount>, PipelineError> {
        let tallies = self.votes_repository.tally_votes(targets).await?;
        debug!(tallied = tallies.len(), "Tallied votes");
        Ok(tallies)
    }

    /// Attaches fresh counts to each item, keeping the input order.
    pub async fn enrich(&self, items: Vec<Item>) -> Result<Vec<VotableItem>, PipelineError> {
        let targets: Vec<TargetRef> = items.iter().map(Item::target).collect();
        let tallies = self.tally(&targets).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let count = tallies.get(&item.target()).copied().unwrap_or_default();
                VotableItem::from_tally(item, count)
            })
            .collect())
    }
}
