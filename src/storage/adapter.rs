//! Typed accessors over the raw key-value store
//!
//! Each record has a documented default used when its key is absent. The
//! `get_*` readers for settings, stats, recent list and analytics also fall
//! back to that default when the store is unreachable, so read-only callers
//! stay usable. The `load_*` readers propagate every failure and are what
//! read-modify-write paths use; a fallback there would overwrite real data
//! with a default.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{JumptoError, Result};
use crate::models::{AnalyticsBuffer, RecentItem, Settings, ShortcutMap, UsageStats};
use crate::storage::KeyValueStore;

/// Top-level keys in the store
pub mod keys {
    pub const SHORTCUTS: &str = "shortcuts";
    pub const SETTINGS: &str = "settings";
    pub const STATS: &str = "stats";
    pub const RECENTLY_USED: &str = "recentlyUsed";
    pub const ANALYTICS: &str = "analytics";
}

#[derive(Clone)]
pub struct StoreAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                JumptoError::serialization(format!("Stored record '{}' is malformed: {}", key, e))
            }),
            None => Ok(None),
        }
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read::<T>(key).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!("Falling back to default for '{}': {}", key, e);
                T::default()
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.store.set(key, value).await?;
        debug!("Stored record '{}'", key);
        Ok(())
    }

    // ============ Shortcuts ============

    /// Registry read; never falls back, an unreadable registry is an error
    pub async fn get_shortcuts(&self) -> Result<ShortcutMap> {
        Ok(self.read(keys::SHORTCUTS).await?.unwrap_or_default())
    }

    pub async fn set_shortcuts(&self, shortcuts: &ShortcutMap) -> Result<()> {
        self.write(keys::SHORTCUTS, shortcuts).await
    }

    // ============ Settings ============

    /// Settings, or the defaults when absent or unreadable
    ///
    /// Never writes. Persisting the defaults is a registry write and belongs
    /// to whoever holds the write gate.
    pub async fn get_settings(&self) -> Settings {
        match self.read::<Settings>(keys::SETTINGS).await {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                warn!("Falling back to default settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Raw settings record; `None` when the key has never been written
    pub async fn find_settings(&self) -> Result<Option<Settings>> {
        self.read(keys::SETTINGS).await
    }

    pub async fn load_settings(&self) -> Result<Settings> {
        Ok(self.read(keys::SETTINGS).await?.unwrap_or_default())
    }

    pub async fn set_settings(&self, settings: &Settings) -> Result<()> {
        self.write(keys::SETTINGS, settings).await
    }

    // ============ Stats ============

    pub async fn get_stats(&self) -> UsageStats {
        self.read_or_default(keys::STATS).await
    }

    pub async fn load_stats(&self) -> Result<UsageStats> {
        Ok(self.read(keys::STATS).await?.unwrap_or_default())
    }

    pub async fn set_stats(&self, stats: &UsageStats) -> Result<()> {
        self.write(keys::STATS, stats).await
    }

    // ============ Recently used ============

    pub async fn get_recently_used(&self) -> Vec<RecentItem> {
        self.read_or_default(keys::RECENTLY_USED).await
    }

    pub async fn load_recently_used(&self) -> Result<Vec<RecentItem>> {
        Ok(self.read(keys::RECENTLY_USED).await?.unwrap_or_default())
    }

    pub async fn set_recently_used(&self, items: &[RecentItem]) -> Result<()> {
        self.write(keys::RECENTLY_USED, &items).await
    }

    // ============ Analytics ============

    pub async fn get_analytics(&self) -> AnalyticsBuffer {
        self.read_or_default(keys::ANALYTICS).await
    }

    pub async fn load_analytics(&self) -> Result<AnalyticsBuffer> {
        Ok(self.read(keys::ANALYTICS).await?.unwrap_or_default())
    }

    pub async fn set_analytics(&self, analytics: &AnalyticsBuffer) -> Result<()> {
        self.write(keys::ANALYTICS, analytics).await
    }

    // ============ Whole store ============

    /// Serialize every key in the store as one pretty-printed JSON object
    pub async fn export_all(&self) -> Result<String> {
        let snapshot = self.store.snapshot().await?;
        Ok(serde_json::to_string_pretty(&Value::Object(snapshot))?)
    }

    /// Replace the ENTIRE store with the contents of `serialized`
    ///
    /// Destructive: every existing key is dropped, nothing is merged. Fails
    /// with `InvalidImportFormat` unless the input is a JSON object.
    pub async fn import_all(&self, serialized: &str) -> Result<()> {
        let parsed: Value = serde_json::from_str(serialized)
            .map_err(|e| JumptoError::invalid_import_format(format!("Invalid import data: {}", e)))?;

        let Value::Object(entries) = parsed else {
            return Err(JumptoError::invalid_import_format(
                "Invalid import data: expected a JSON object",
            ));
        };

        warn!("Replacing entire store with {} imported keys", entries.len());
        self.store.replace_all(entries).await
    }

    /// Remove every record
    pub async fn clear_all(&self) -> Result<()> {
        warn!("Clearing entire store");
        self.store.clear().await
    }
}
