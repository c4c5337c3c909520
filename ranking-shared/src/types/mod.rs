mod changeset;
mod errors;
mod item;
mod sort_mode;
mod target;
mod vote;
mod votes_count;

pub use changeset::VoteChange;
pub use errors::TypeError;
pub use item::{Item, Votable, VotableItem};
pub use sort_mode::{SortMode, TimeWindow};
pub use target::{ItemId, TargetKind, TargetRef, VoterId};
pub use vote::{VoteDirection, VoteRecord, VoteValue};
pub use votes_count::VotesCount;
