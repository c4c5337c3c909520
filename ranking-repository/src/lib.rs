//! # Ranking Repository
//! This crate provides traits and implementations for reading and writing the
//! vote ledger and the votable items it refers to. It includes definitions for
//! errors, interfaces, a PostgreSQL backend and an in-memory backend.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::{ItemsRepositoryError, VotesRepositoryError};
pub use interfaces::{ItemsRepository, VotesRepository};
pub use memory::InMemoryRepository;
pub use postgres::{PostgresItemsRepository, PostgresVotesRepository};
