//! This module defines and re-exports the interfaces for the ranking repository.
//! It serves as a central point for accessing traits related to data interaction.
mod items;
mod votes;

pub use items::ItemsRepository;
pub use votes::VotesRepository;
