use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, Store};
use crate::storage::{MemoryStorage, ObjectStorage, StorageError, SupabaseStorage};

/// Shared handles every handler receives
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub storage: Arc<dyn ObjectStorage>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        storage: Arc<dyn ObjectStorage>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            storage,
            config: Arc::new(config),
        }
    }

    /// Everything in process memory; used by tests and local runs
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStorage::new()),
            config,
        )
    }

    /// Connect the configured backends
    pub async fn from_config(config: AppConfig) -> Result<Self, StateError> {
        let store = DatabaseManager::build_store(&config.database).await?;
        let storage = build_storage(&config)?;
        Ok(Self::new(store, storage, config))
    }
}

fn build_storage(config: &AppConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match (&config.storage.supabase_url, &config.storage.supabase_key) {
        (Some(url), Some(key)) => {
            tracing::info!(bucket = %config.storage.bucket, "Using Supabase object storage");
            Ok(Arc::new(SupabaseStorage::new(
                url,
                key.clone(),
                config.storage.bucket.clone(),
            )?))
        }
        _ => {
            tracing::warn!("SUPABASE_URL not set; documents are kept in memory");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}
