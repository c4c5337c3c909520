use serde::{Deserialize, Serialize};

use super::VoteValue;

/// Aggregated up/down vote totals for a single target.
///
/// Counts are derived from the vote ledger at query time; they are never
/// stored on the item itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VotesCount {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VotesCount {
    pub fn new(upvotes: u64, downvotes: u64) -> Self {
        Self { upvotes, downvotes }
    }

    /// Net score: upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }

    /// Counts one more vote of the given value.
    pub fn record(&mut self, value: VoteValue) {
        match value {
            VoteValue::Up => self.upvotes += 1,
            VoteValue::Down => self.downvotes += 1,
        }
    }
}
