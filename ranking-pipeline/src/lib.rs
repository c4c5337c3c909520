//! # Ranking Pipeline
//! This crate contains the algorithmic core of the ranking services.
//!
//! Raw vote records flow through the [`tally`] into vote-enriched items,
//! which the [`sort`] functions order by the caller's chosen mode.
//!
//! ## Modules
//!
//! - [`tally`]: Aggregates vote records into per-target up/down counts
//! - [`sort`]: The `hot`, `new`, `top`, `rising` and `controversial` rankings
//! - [`ballot`]: Turns vote submissions into ledger changes
//! - [`listing`]: Fetch, tally and rank the items of one listing
//! - [`errors`]: Error types for the pipeline
pub mod ballot;
pub mod errors;
pub mod listing;
pub mod sort;
pub mod tally;

pub use errors::PipelineError;
