//! Dependency initialization and wiring for the ranking API.
use std::path::Path;
use std::sync::Arc;

use ranking_pipeline::ballot::BallotBox;
use ranking_pipeline::listing::ListingService;
use ranking_repository::postgres::run_migrations;
use ranking_repository::{
    InMemoryRepository, ItemsRepository, PostgresItemsRepository, PostgresVotesRepository,
    VotesRepository,
};
use ranking_shared::types::Item;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::config::{ServiceConfig, StorageBackend};
use crate::errors::ServiceError;
use crate::server::state::AppState;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the HTTP handlers.
    pub state: AppState,
}

impl Dependencies {
    /// Builds the repositories and services selected by `config`.
    ///
    /// For PostgreSQL this connects the pool and applies pending migrations
    /// before returning.
    pub async fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        info!(
            storage = ?config.storage,
            addr = %config.addr,
            max_connections = config.max_connections,
            "Initializing dependencies"
        );

        let (items_repository, votes_repository): (
            Arc<dyn ItemsRepository>,
            Arc<dyn VotesRepository>,
        ) = match config.storage {
            StorageBackend::Postgres => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    ServiceError::config("DATABASE_URL must be set when STORAGE_BACKEND is postgres")
                })?;
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(url)
                    .await?;
                run_migrations(&pool).await?;
                info!("PostgreSQL connection established and migrations applied");

                let items: Arc<dyn ItemsRepository> =
                    Arc::new(PostgresItemsRepository::new(pool.clone()));
                let votes: Arc<dyn VotesRepository> = Arc::new(PostgresVotesRepository::new(pool));
                (items, votes)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; votes and items are lost on restart");
                let repository = Arc::new(InMemoryRepository::new());
                match &config.seed_items_path {
                    Some(path) => {
                        let items = load_seed_items(path).await?;
                        repository.insert_items(&items).await?;
                        info!(
                            count = items.len(),
                            path = %path.display(),
                            "Seeded in-memory items"
                        );
                    }
                    None => {
                        warn!("SEED_ITEMS_PATH not set; listings stay empty and votes are rejected")
                    }
                }
                let items: Arc<dyn ItemsRepository> = repository.clone();
                let votes: Arc<dyn VotesRepository> = repository;
                (items, votes)
            }
        };

        Ok(Self::from_repositories(items_repository, votes_repository))
    }

    /// Wires the services on top of already constructed repositories.
    pub fn from_repositories(
        items_repository: Arc<dyn ItemsRepository>,
        votes_repository: Arc<dyn VotesRepository>,
    ) -> Self {
        let listing = ListingService::new(items_repository.clone(), votes_repository.clone());
        let ballot = BallotBox::new(items_repository, votes_repository);

        Self {
            state: AppState {
                listing: Arc::new(listing),
                ballot: Arc::new(ballot),
            },
        }
    }
}

/// Reads a JSON array of items, for example
/// `[{"id": "...", "kind": "post", "scope": "rust", "created_at": "2025-08-14T12:00:00Z"}]`.
async fn load_seed_items(path: &Path) -> Result<Vec<Item>, ServiceError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        ServiceError::config(format!("Failed to read seed items from {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        ServiceError::config(format!("Invalid seed items in {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranking_shared::types::{SortMode, TargetKind, TimeWindow};

    fn memory_config(seed_items_path: Option<std::path::PathBuf>) -> ServiceConfig {
        ServiceConfig {
            storage: StorageBackend::Memory,
            database_url: None,
            max_connections: 1,
            seed_items_path,
            addr: "127.0.0.1:0".parse().unwrap(),
            cors_origins: Vec::new(),
        }
    }

    fn write_seed_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_memory_backend_initializes_without_database() {
        assert!(Dependencies::new(&memory_config(None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_backend_loads_seed_items() {
        let post_id = uuid::Uuid::new_v4();
        let path = write_seed_file(
            "ranking-seed",
            &format!(
                r#"[{{"id": "{}", "kind": "post", "scope": "rust", "created_at": "2025-08-14T12:00:00Z"}}]"#,
                post_id
            ),
        );

        let deps = Dependencies::new(&memory_config(Some(path.clone()))).await.unwrap();
        let listing = deps
            .state
            .listing
            .ranked(TargetKind::Post, "rust", SortMode::New, TimeWindow::All)
            .await
            .unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, post_id);
    }

    #[tokio::test]
    async fn test_unreadable_seed_items_are_config_errors() {
        let missing = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let result = Dependencies::new(&memory_config(Some(missing))).await;
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));

        let malformed = write_seed_file("ranking-seed-bad", r#"[{"id": "not-a-uuid"}]"#);
        let result = Dependencies::new(&memory_config(Some(malformed.clone()))).await;
        std::fs::remove_file(malformed).unwrap();
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_invalid_database_url_is_database_error() {
        let config = ServiceConfig {
            storage: StorageBackend::Postgres,
            database_url: Some("invalid-database-url".to_string()),
            ..memory_config(None)
        };
        let result = Dependencies::new(&config).await;
        assert!(matches!(result, Err(ServiceError::Database(_))));
    }
}
