use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::storage::KeyValueStore;

/// In-process store, contents are lost when the process exits
#[derive(Default)]
pub struct MemoryStore {
    data: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Map<String, Value>> {
        Ok(self
            .data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn replace_all(&self, entries: Map<String, Value>) -> Result<()> {
        self.data.clear();
        for (key, value) in entries {
            self.data.insert(key, value);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.data.clear();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_replace() {
        let store = MemoryStore::new();
        assert_eq!(store.get("shortcuts").await.unwrap(), None);

        store.set("shortcuts", json!({"gh": 1})).await.unwrap();
        assert_eq!(store.get("shortcuts").await.unwrap(), Some(json!({"gh": 1})));

        let mut replacement = Map::new();
        replacement.insert("settings".into(), json!({"darkMode": true}));
        store.replace_all(replacement).await.unwrap();

        assert_eq!(store.get("shortcuts").await.unwrap(), None);
        assert_eq!(store.snapshot().await.unwrap().len(), 1);
    }
}
