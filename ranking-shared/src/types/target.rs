use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::TypeError;

/// Opaque identifier of a post or comment.
pub type ItemId = Uuid;

/// Opaque identifier of the user casting a vote.
pub type VoterId = Uuid;

/// The kind of item a vote is cast on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Database representation of the kind.
    pub fn as_i16(self) -> i16 {
        match self {
            TargetKind::Post => 0,
            TargetKind::Comment => 1,
        }
    }
}

impl TryFrom<i16> for TargetKind {
    type Error = TypeError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TargetKind::Post),
            1 => Ok(TargetKind::Comment),
            other => Err(TypeError::InvalidTargetKind(other.to_string())),
        }
    }
}

impl FromStr for TargetKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "post" => Ok(TargetKind::Post),
            "comment" => Ok(TargetKind::Comment),
            _ => Err(TypeError::InvalidTargetKind(s.to_string())),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Post => write!(f, "post"),
            TargetKind::Comment => write!(f, "comment"),
        }
    }
}

/// Identifies a single votable target: a post or a comment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub id: ItemId,
    pub kind: TargetKind,
}

impl TargetRef {
    pub fn new(id: ItemId, kind: TargetKind) -> Self {
        Self { id, kind }
    }

    pub fn post(id: ItemId) -> Self {
        Self::new(id, TargetKind::Post)
    }

    pub fn comment(id: ItemId) -> Self {
        Self::new(id, TargetKind::Comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_round_trips_through_i16() {
        for kind in [TargetKind::Post, TargetKind::Comment] {
            assert_eq!(TargetKind::try_from(kind.as_i16()), Ok(kind));
        }
        assert!(TargetKind::try_from(7).is_err());
    }

    #[test]
    fn test_target_kind_parses_case_insensitively() {
        assert_eq!("Comment".parse::<TargetKind>(), Ok(TargetKind::Comment));
        assert_eq!("POST".parse::<TargetKind>(), Ok(TargetKind::Post));
        assert!("subreddit".parse::<TargetKind>().is_err());
    }
}
