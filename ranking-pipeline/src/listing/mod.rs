//! Listing: fetch the items of one scope, tally their votes, rank them.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ranking_repository::{ItemsRepository, VotesRepository};
use ranking_shared::types::{SortMode, TargetKind, TimeWindow, VotableItem};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::PipelineError;
use crate::sort;
use crate::tally::VoteTally;

/// Raw `?sort=&t=` query parameters of a listing request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub sort: Option<String>,
    pub t: Option<String>,
}

impl ListingQuery {
    /// Sort mode, falling back to `hot` when missing or unknown.
    pub fn mode(&self) -> SortMode {
        SortMode::parse_or_default(self.sort.as_deref())
    }

    /// Time window, falling back to `all` when missing or unknown.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::parse_or_default(self.t.as_deref())
    }
}

/// Produces ranked listings of posts or comments.
pub struct ListingService {
    items_repository: Arc<dyn ItemsRepository>,
    tally: VoteTally,
}

impl ListingService {
    pub fn new(
        items_repository: Arc<dyn ItemsRepository>,
        votes_repository: Arc<dyn VotesRepository>,
    ) -> Self {
        Self {
            items_repository,
            tally: VoteTally::new(votes_repository),
        }
    }

    /// Ranks the `kind` items of `scope`, evaluated at the current instant.
    pub async fn ranked(
        &self,
        kind: TargetKind,
        scope: &str,
        mode: SortMode,
        window: TimeWindow,
    ) -> Result<Vec<VotableItem>, PipelineError> {
        self.ranked_at(kind, scope, mode, window, Utc::now()).await
    }

    /// Same as [`ListingService::ranked`], with an explicit evaluation instant.
    #[instrument(skip(self, now), fields(mode = %mode))]
    pub async fn ranked_at(
        &self,
        kind: TargetKind,
        scope: &str,
        mode: SortMode,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<VotableItem>, PipelineError> {
        let items = self.items_repository.list_items(kind, scope).await?;
        let enriched = self.tally.enrich(items).await?;
        let ranked = sort::rank_at(&enriched, mode, Some(window), now);
        debug!(fetched = enriched.len(), returned = ranked.len(), "Listing ranked");
        Ok(ranked)
    }
}
