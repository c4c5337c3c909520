use serde::{Deserialize, Serialize};

use super::{TargetRef, VoteRecord, VoterId};

/// A single mutation of the vote ledger.
///
/// `Upsert` creates a record or flips the value of the voter's existing record
/// on the same target. `Clear` physically removes the voter's record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteChange {
    Upsert(VoteRecord),
    Clear { voter_id: VoterId, target: TargetRef },
}

impl VoteChange {
    pub fn voter_id(&self) -> VoterId {
        match self {
            VoteChange::Upsert(record) => record.voter_id,
            VoteChange::Clear { voter_id, .. } => *voter_id,
        }
    }

    pub fn target(&self) -> TargetRef {
        match self {
            VoteChange::Upsert(record) => record.target,
            VoteChange::Clear { target, .. } => *target,
        }
    }
}
