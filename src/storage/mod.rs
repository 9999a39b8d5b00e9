//! Key-value persistence
//!
//! `KeyValueStore` is the raw asynchronous get/set primitive. `StoreAdapter`
//! layers typed accessors for the five top-level records on top of it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{JumptoError, Result};

pub mod adapter;
pub mod backends;

pub use adapter::{StoreAdapter, keys};
pub use backends::{FileStore, MemoryStore};

/// External asynchronous key-value store
///
/// Implementations report an unreachable backend as
/// [`JumptoError::StoreUnavailable`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Every key currently stored
    async fn snapshot(&self) -> Result<Map<String, Value>>;
    /// Drop all keys and store `entries` in their place
    async fn replace_all(&self, entries: Map<String, Value>) -> Result<()>;
    async fn clear(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryStore::new()),
            "file" => Arc::new(FileStore::open(&config.path).await?),
            other => {
                return Err(JumptoError::config(format!(
                    "Unknown storage backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
