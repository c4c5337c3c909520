//! Vote submission: turns a voter's `{+1, -1, 0}` choice into a ledger change.
//!
//! A voter holds at most one record per target. Submitting again replaces the
//! record's value and submitting `0` deletes it.
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ranking_repository::{ItemsRepository, VotesRepository};
use ranking_shared::types::{
    TargetRef, VoteChange, VoteDirection, VoteRecord, VoteValue, VoterId, VotesCount,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::PipelineError;

/// A voter's request to set their vote on one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSubmission {
    pub voter_id: VoterId,
    pub target: TargetRef,
    pub direction: VoteDirection,
}

impl VoteSubmission {
    /// Builds a submission from the raw API direction, rejecting anything
    /// other than `1`, `-1` or `0`.
    pub fn from_raw(
        voter_id: VoterId,
        target: TargetRef,
        direction: i16,
    ) -> Result<Self, PipelineError> {
        let direction = VoteDirection::try_from(direction)
            .map_err(|_| PipelineError::InvalidVoteDirection(direction))?;
        Ok(Self {
            voter_id,
            target,
            direction,
        })
    }

    /// The ledger change this submission produces.
    pub fn to_change(&self, voted_at: DateTime<Utc>) -> VoteChange {
        match self.direction.value() {
            Some(value) => VoteChange::Upsert(VoteRecord {
                voter_id: self.voter_id,
                target: self.target,
                value,
                voted_at,
            }),
            None => VoteChange::Clear {
                voter_id: self.voter_id,
                target: self.target,
            },
        }
    }
}

/// Keeps only the last submission per `(voter, target)`.
///
/// Assumes `submissions` are in arrival order. The surviving submissions are
/// returned in the order their pair was first seen.
pub fn latest_submissions(submissions: &[VoteSubmission]) -> Vec<VoteSubmission> {
    let mut positions: HashMap<(VoterId, TargetRef), usize> = HashMap::new();
    let mut latest: Vec<VoteSubmission> = Vec::new();

    for submission in submissions {
        let key = (submission.voter_id, submission.target);
        match positions.get(&key) {
            Some(&index) => latest[index] = *submission,
            None => {
                positions.insert(key, latest.len());
                latest.push(*submission);
            }
        }
    }

    latest
}

/// Signed change in a target's counts caused by one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesDelta {
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Computes how a target's counts move when a voter goes from `previous` to `next`.
pub fn compute_vote_delta(previous: Option<VoteValue>, next: VoteDirection) -> VotesDelta {
    let (upvotes, downvotes) = match (previous, next) {
        (Some(VoteValue::Up), VoteDirection::Down) => (-1, 1),
        (Some(VoteValue::Up), VoteDirection::Clear) => (-1, 0),
        (Some(VoteValue::Down), VoteDirection::Up) => (1, -1),
        (Some(VoteValue::Down), VoteDirection::Clear) => (0, -1),
        (None, VoteDirection::Up) => (1, 0),
        (None, VoteDirection::Down) => (0, 1),
        (_, _) => (0, 0),
    };

    VotesDelta { upvotes, downvotes }
}

/// Result of casting a single vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastOutcome {
    /// The voter's vote before this submission.
    pub previous: Option<VoteValue>,
    /// The voter's vote after this submission.
    pub vote: Option<VoteValue>,
    pub delta: VotesDelta,
    /// The target's tally read back after the change was applied.
    pub count: VotesCount,
}

/// Applies vote submissions to the vote ledger.
///
/// Only stored items can be voted on; submissions for anything else fail
/// with [`PipelineError::TargetNotFound`].
pub struct BallotBox {
    items_repository: Arc<dyn ItemsRepository>,
    votes_repository: Arc<dyn VotesRepository>,
}

impl BallotBox {
    pub fn new(
        items_repository: Arc<dyn ItemsRepository>,
        votes_repository: Arc<dyn VotesRepository>,
    ) -> Self {
        Self {
            items_repository,
            votes_repository,
        }
    }

    async fn ensure_targets_exist(&self, targets: &[TargetRef]) -> Result<(), PipelineError> {
        let existing = self.items_repository.existing_targets(targets).await?;
        match targets.iter().find(|target| !existing.contains(*target)) {
            Some(missing) => Err(PipelineError::TargetNotFound(*missing)),
            None => Ok(()),
        }
    }

    /// Casts one vote and returns the target's fresh tally.
    ///
    /// The previous vote is read and replaced in one repository operation, so
    /// `previous` and `delta` are exact even under concurrent submissions by
    /// the same voter. The tally is read after the write and may also include
    /// other voters' concurrent votes.
    #[instrument(skip(self), fields(voter_id = %submission.voter_id, target_id = %submission.target.id))]
    pub async fn cast(&self, submission: VoteSubmission) -> Result<CastOutcome, PipelineError> {
        let target = submission.target;
        self.ensure_targets_exist(&[target]).await?;

        let change = submission.to_change(Utc::now());
        let previous = self
            .votes_repository
            .swap_vote(&change)
            .await
            .map_err(PipelineError::from_votes)?;

        let count = self
            .votes_repository
            .tally_votes(&[target])
            .await?
            .get(&target)
            .copied()
            .unwrap_or_default();

        let delta = compute_vote_delta(previous, submission.direction);
        info!(
            kind = %target.kind,
            previous = ?previous,
            direction = ?submission.direction,
            upvotes = count.upvotes,
            downvotes = count.downvotes,
            "Vote cast"
        );

        Ok(CastOutcome {
            previous,
            vote: submission.direction.value(),
            delta,
            count,
        })
    }

    /// Applies a batch of submissions in one repository call.
    ///
    /// Repeated submissions by the same voter on the same target collapse to
    /// the last one. Nothing is applied if any target is missing. Returns the
    /// changes that were applied.
    #[instrument(skip(self, submissions), fields(submission_count = submissions.len()))]
    pub async fn cast_batch(
        &self,
        submissions: &[VoteSubmission],
    ) -> Result<Vec<VoteChange>, PipelineError> {
        let latest = latest_submissions(submissions);
        let targets: Vec<TargetRef> = latest.iter().map(|submission| submission.target).collect();
        self.ensure_targets_exist(&targets).await?;

        let voted_at = Utc::now();
        let changes: Vec<VoteChange> = latest
            .iter()
            .map(|submission| submission.to_change(voted_at))
            .collect();

        self.votes_repository
            .apply_changes(&changes)
            .await
            .map_err(PipelineError::from_votes)?;
        info!(applied = changes.len(), "Vote batch applied");
        Ok(changes)
    }
}
