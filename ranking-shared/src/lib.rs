//! # Ranking Shared
//! This crate defines the shared data structures used across the ranking services.
//! It includes votable items and their capability trait, vote records and
//! submissions, aggregated vote counts, and the sort mode / time window
//! selectors understood by the ranking functions.
pub mod types;
