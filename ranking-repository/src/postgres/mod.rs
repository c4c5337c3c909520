//! PostgreSQL implementation of the ranking repository.
//!
//! ## Database Tables
//!
//! - `items`: Posts and comments, keyed by id and listed by `(kind, scope)`
//! - `votes`: The vote ledger, one row per `(voter_id, target_id, target_kind)`
mod items_repository;
mod votes_repository;

pub use items_repository::PostgresItemsRepository;
pub use votes_repository::PostgresVotesRepository;

/// Applies the bundled migrations to the database behind `pool`.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("src/postgres/migrations").run(pool).await
}
