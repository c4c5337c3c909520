use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TargetRef, TypeError, VoterId};

/// Direction of a stored vote.
///
/// A cleared vote is the absence of a record, so there is no neutral variant here.
/// Serialized as `1` / `-1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "i16", try_from = "i16")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        value.as_i16()
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = TypeError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(TypeError::InvalidVoteValue(other)),
        }
    }
}

/// Direction submitted by a voter at the API boundary: `1`, `-1`, or `0` to clear.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "i16", try_from = "i16")]
pub enum VoteDirection {
    Up,
    Down,
    Clear,
}

impl VoteDirection {
    /// The stored value this direction produces, `None` when the vote is cleared.
    pub fn value(self) -> Option<VoteValue> {
        match self {
            VoteDirection::Up => Some(VoteValue::Up),
            VoteDirection::Down => Some(VoteValue::Down),
            VoteDirection::Clear => None,
        }
    }
}

impl From<VoteDirection> for i16 {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
            VoteDirection::Clear => 0,
        }
    }
}

impl TryFrom<i16> for VoteDirection {
    type Error = TypeError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            0 => Ok(VoteDirection::Clear),
            other => Err(TypeError::InvalidVoteDirection(other)),
        }
    }
}

/// A single voter's judgment on one target.
///
/// At most one record exists per `(voter_id, target)` pair; a later vote
/// from the same voter replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub voter_id: VoterId,
    pub target: TargetRef,
    pub value: VoteValue,
    pub voted_at: DateTime<Utc>,
}
