// HTTP request handlers
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ranking_pipeline::ballot::{VoteSubmission, VotesDelta};
use ranking_pipeline::listing::ListingQuery;
use ranking_shared::types::{
    SortMode, TargetKind, TargetRef, TimeWindow, Votable, VotableItem, VoteValue,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::server::state::AppState;

/// A ranked item as returned to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: VotableItem,
    pub score: i64,
}

impl From<VotableItem> for ItemView {
    fn from(item: VotableItem) -> Self {
        let score = item.score();
        Self { item, score }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponse {
    pub sort: SortMode,
    pub t: TimeWindow,
    pub items: Vec<ItemView>,
}

/// Body of `POST /votes`. `direction` is `1`, `-1` or `0` to clear.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteRequest {
    pub voter_id: Uuid,
    pub target_id: Uuid,
    pub target_kind: TargetKind,
    pub direction: i16,
}

impl VoteRequest {
    fn into_submission(self) -> Result<VoteSubmission, ApiError> {
        let target = TargetRef::new(self.target_id, self.target_kind);
        Ok(VoteSubmission::from_raw(self.voter_id, target, self.direction)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    /// The voter's vote before the request.
    pub previous: Option<VoteValue>,
    /// The voter's vote after the request, `null` when cleared.
    pub vote: Option<VoteValue>,
    /// How the target's counts moved because of this request.
    pub delta: VotesDelta,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchVoteResponse {
    /// Changes written after collapsing repeats of the same voter and target.
    pub applied: usize,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Ranking service is running")
}

/// Ranked posts of a subreddit
pub async fn list_posts(
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingResponse>, ApiError> {
    ranked_listing(&state, TargetKind::Post, &subreddit, &query).await
}

/// Ranked comments of a post
pub async fn list_comments(
    State(state): State<AppState>,
    post_id: Result<Path<Uuid>, PathRejection>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingResponse>, ApiError> {
    let Path(post_id) = post_id?;
    ranked_listing(&state, TargetKind::Comment, &post_id.to_string(), &query).await
}

async fn ranked_listing(
    state: &AppState,
    kind: TargetKind,
    scope: &str,
    query: &ListingQuery,
) -> Result<Json<ListingResponse>, ApiError> {
    let mode = query.mode();
    let window = query.window();

    let items = state.listing.ranked(kind, scope, mode, window).await?;
    info!(kind = %kind, scope, sort = %mode, count = items.len(), "Served listing");

    Ok(Json(ListingResponse {
        sort: mode,
        t: window,
        items: items.into_iter().map(ItemView::from).collect(),
    }))
}

/// Cast, change or clear a vote
pub async fn cast_vote(
    State(state): State<AppState>,
    request: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteResponse>, ApiError> {
    let Json(request) = request?;
    let outcome = state.ballot.cast(request.into_submission()?).await?;

    Ok(Json(VoteResponse {
        previous: outcome.previous,
        vote: outcome.vote,
        delta: outcome.delta,
        upvotes: outcome.count.upvotes,
        downvotes: outcome.count.downvotes,
        score: outcome.count.score(),
    }))
}

/// Apply a batch of votes atomically, e.g. ones queued by an offline client
pub async fn cast_votes(
    State(state): State<AppState>,
    requests: Result<Json<Vec<VoteRequest>>, JsonRejection>,
) -> Result<Json<BatchVoteResponse>, ApiError> {
    let Json(requests) = requests?;
    let submissions = requests
        .into_iter()
        .map(VoteRequest::into_submission)
        .collect::<Result<Vec<_>, _>>()?;

    let applied = state.ballot.cast_batch(&submissions).await?;

    Ok(Json(BatchVoteResponse {
        applied: applied.len(),
    }))
}
