use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, TargetKind, TargetRef, VotesCount};

/// Capability required by the ranking functions: vote totals and a creation instant.
///
/// Counts are unsigned, so a negative tally cannot reach the rankers.
pub trait Votable {
    fn upvotes(&self) -> u64;
    fn downvotes(&self) -> u64;
    fn created_at(&self) -> DateTime<Utc>;

    /// Net score: upvotes minus downvotes.
    fn score(&self) -> i64 {
        self.upvotes() as i64 - self.downvotes() as i64
    }
}

/// A post or comment as stored, before its votes are tallied.
///
/// `scope` is the listing the item belongs to: the subreddit name for posts,
/// the parent post id for comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub kind: TargetKind,
    pub scope: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn target(&self) -> TargetRef {
        TargetRef::new(self.id, self.kind)
    }
}

/// A post or comment carrying freshly tallied vote counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VotableItem {
    pub id: ItemId,
    pub kind: TargetKind,
    pub scope: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VotableItem {
    /// Combines a stored item with its tally.
    pub fn from_tally(item: Item, count: VotesCount) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            scope: item.scope,
            created_at: item.created_at,
            upvotes: count.upvotes,
            downvotes: count.downvotes,
        }
    }

    pub fn target(&self) -> TargetRef {
        TargetRef::new(self.id, self.kind)
    }
}

impl Votable for VotableItem {
    fn upvotes(&self) -> u64 {
        self.upvotes
    }

    fn downvotes(&self) -> u64 {
        self.downvotes
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
