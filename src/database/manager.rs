use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::Store;

/// Errors from the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("{0}")]
    NotFound(String),

    /// Constraint violation reported by the store itself
    #[error("{0}")]
    Constraint(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the store once at start-up; handlers receive it through `AppState`
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a Postgres pool sized from config
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Created database pool"
        );
        Ok(pool)
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Postgres when `DATABASE_URL` is configured, otherwise the in-memory store
    pub async fn build_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
        if config.url.is_none() {
            warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
            return Ok(Arc::new(MemoryStore::new()));
        }

        let pool = Self::connect(config).await?;
        if config.run_migrations {
            Self::migrate(&pool).await?;
        }
        Ok(Arc::new(PgStore::new(pool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_requires_url() {
        let config = crate::config::AppConfig::development().database;
        let err = DatabaseManager::connect(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConfigMissing("DATABASE_URL")));
    }

    #[tokio::test]
    async fn build_store_falls_back_to_memory() {
        let config = crate::config::AppConfig::development().database;
        let store = DatabaseManager::build_store(&config).await.unwrap();
        assert!(store.ping().await.is_ok());
        assert!(store.list_projects().await.unwrap().is_empty());
    }
}
