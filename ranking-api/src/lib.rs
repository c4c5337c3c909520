//! # Ranking API
//!
//! HTTP service for ranked listings of posts and comments and for casting votes.
//!
//! ## Architecture
//!
//! 1. **Repository**: Vote ledger and items, in PostgreSQL or in memory
//! 2. **Tally**: Aggregates vote records into up/down counts per item
//! 3. **Sort**: Orders tallied items by `hot`, `new`, `top`, `rising` or `controversial`
//! 4. **Server**: Axum routes that tie the above together
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`server`]: Router, handlers and shared state
//! - [`errors`]: Error types for the service
pub mod config;
pub mod errors;
pub mod server;

pub use config::{Dependencies, ServiceConfig};
pub use errors::ServiceError;
