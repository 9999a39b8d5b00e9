use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::errors::{JumptoError, Result};
use crate::storage::KeyValueStore;

/// JSON file store
///
/// The whole key space lives in one JSON object on disk and is mirrored in
/// memory. Every write rewrites the file.
pub struct FileStore {
    file_path: PathBuf,
    cache: RwLock<Map<String, Value>>,
    /// 串行化落盘，避免旧快照覆盖新快照
    write_lock: Mutex<()>,
}

impl FileStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&file_path).await?;
        info!(
            "FileStore initialized from {} with {} keys",
            file_path.display(),
            data.len()
        );

        Ok(Self {
            file_path,
            cache: RwLock::new(data),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load_from_file(path: &Path) -> Result<Map<String, Value>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Err(JumptoError::serialization(format!(
                    "Store file {} does not contain a JSON object",
                    path.display()
                ))),
                Err(e) => {
                    error!("Failed to parse store file {}: {}", path.display(), e);
                    Err(JumptoError::serialization(format!(
                        "Failed to parse store file {}: {}",
                        path.display(),
                        e
                    )))
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Store file {} not found, starting empty", path.display());
                Ok(Map::new())
            }
            Err(e) => Err(JumptoError::store_unavailable(format!(
                "Failed to read store file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Apply `mutate` to a copy, persist it, then publish it in memory
    ///
    /// A failed write leaves both the file and the in-memory view untouched.
    async fn write_with<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.write_lock.lock().await;

        let mut next = self.cache.read().clone();
        mutate(&mut next);
        let json = serde_json::to_string_pretty(&next)?;

        tokio::fs::write(&self.file_path, json).await.map_err(|e| {
            error!("Failed to write store file {}: {}", self.file_path.display(), e);
            JumptoError::store_unavailable(format!(
                "Failed to write store file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        *self.cache.write() = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.cache.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let key = key.to_string();
        self.write_with(move |cache| {
            cache.insert(key, value);
        })
        .await
    }

    async fn snapshot(&self) -> Result<Map<String, Value>> {
        Ok(self.cache.read().clone())
    }

    async fn replace_all(&self, entries: Map<String, Value>) -> Result<()> {
        self.write_with(move |cache| *cache = entries).await
    }

    async fn clear(&self) -> Result<()> {
        self.write_with(|cache| cache.clear()).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
