//! Shortcut registry engine
//!
//! Owns every mutation of the shortcut registry, the recent-use list and the
//! usage stats. Each mutation is a read-modify-write of whole records in the
//! key-value store, so all of them pass through one async write gate: two
//! logically concurrent operations (a navigation-triggered usage update and
//! a popup delete, say) run one after the other and neither loses the
//! other's change.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::errors::{JumptoError, Result};
use crate::models::{
    MAX_RECENT_ITEMS, RecentItem, Settings, SettingsUpdate, Shortcut, ShortcutMap, UsageStats,
};
use crate::services::analytics::AnalyticsService;
use crate::services::stats;
use crate::storage::StoreAdapter;
use crate::utils::url_normalizer::{
    check_safety, is_valid_alias, normalize_url, validate_and_normalize,
};

/// Suggested file name for [`ShortcutService::export_snapshot`] output
pub const EXPORT_FILE_NAME: &str = "jumpto-shortcuts.json";

/// Fields to change on an existing shortcut; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ShortcutUpdate {
    pub url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<BTreeSet<String>>,
}

impl ShortcutUpdate {
    fn describe(&self) -> Value {
        let mut fields = serde_json::Map::new();
        if let Some(url) = &self.url {
            fields.insert("url".into(), json!(url));
        }
        if let Some(category) = &self.category {
            fields.insert("category".into(), json!(category));
        }
        if let Some(tags) = &self.tags {
            fields.insert("tags".into(), json!(tags));
        }
        Value::Object(fields)
    }
}

pub struct ShortcutService {
    store: StoreAdapter,
    analytics: Arc<AnalyticsService>,
    /// 所有写操作的串行化闸门
    write_gate: Mutex<()>,
    /// Detached side effects (usage recording, analytics) still running
    side_effects: parking_lot::Mutex<JoinSet<()>>,
    history_days: usize,
}

impl ShortcutService {
    pub fn new(store: StoreAdapter, analytics: Arc<AnalyticsService>) -> Self {
        Self {
            store,
            analytics,
            write_gate: Mutex::new(()),
            side_effects: parking_lot::Mutex::new(JoinSet::new()),
            history_days: 30,
        }
    }

    /// Days of per-day usage kept in the stats record
    pub fn with_history_days(mut self, days: usize) -> Self {
        self.history_days = days.max(1);
        self
    }

    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn registry_key(alias: &str) -> String {
        alias.trim().to_lowercase()
    }

    fn spawn_side_effect<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut side_effects = self.side_effects.lock();
        // 回收已完成的任务
        while side_effects.try_join_next().is_some() {}
        side_effects.spawn(task);
    }

    /// Wait until every detached side effect spawned so far has finished
    ///
    /// Callers never need this for correctness; short-lived processes use
    /// it so background writes are not cut off at exit.
    pub async fn settle(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.side_effects.lock());
            if pending.is_empty() {
                return;
            }
            while pending.join_next().await.is_some() {}
        }
    }

    /// Fire-and-forget analytics event
    fn emit(&self, event_name: &'static str, data: Value) {
        let analytics = Arc::clone(&self.analytics);
        self.spawn_side_effect(async move {
            analytics.track(event_name, data).await;
        });
    }

    /// Refresh stats totals after the registry changed shape
    async fn sync_stats(&self, shortcuts: &ShortcutMap) {
        let mut usage = match self.store.load_stats().await {
            Ok(usage) => usage,
            Err(e) => {
                warn!("ShortcutService: skipping stats refresh: {}", e);
                return;
            }
        };
        stats::sync_with_registry(&mut usage, shortcuts);
        if let Err(e) = self.store.set_stats(&usage).await {
            warn!("ShortcutService: failed to refresh stats: {}", e);
        }
    }

    // ============ CRUD Operations ============

    /// Create or silently overwrite a shortcut
    pub async fn add(&self, alias: &str, raw_url: &str, category: Option<&str>) -> Result<Shortcut> {
        let normalized = validate_and_normalize(alias, raw_url)?;

        let verdict = check_safety(&normalized.url);
        if !verdict.safe {
            return Err(JumptoError::unsafe_url(
                verdict
                    .reason
                    .unwrap_or_else(|| "URL failed safety check".to_string()),
            ));
        }

        let settings = self.store.get_settings().await;
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or(settings.default_category);

        let shortcut = Shortcut::new(normalized.url.clone(), category, Self::now_ms());

        let replaced = {
            let _gate = self.write_gate.lock().await;
            let mut shortcuts = self.store.get_shortcuts().await?;
            let replaced = shortcuts
                .insert(normalized.alias.clone(), shortcut.clone())
                .is_some();
            self.store.set_shortcuts(&shortcuts).await?;
            self.sync_stats(&shortcuts).await;
            replaced
        };

        let action = if replaced { "overwrote" } else { "created" };
        info!(
            "ShortcutService: {} '{}' -> '{}'",
            action, normalized.alias, normalized.url
        );

        self.emit(
            "shortcut_added",
            json!({ "shortcut": normalized.alias, "url": normalized.url }),
        );
        Ok(shortcut)
    }

    /// Merge `update` over an existing shortcut
    ///
    /// The alias is only looked up, never validated: anything not in the
    /// registry, malformed or not, fails with `NotFound`.
    pub async fn update(&self, alias: &str, mut update: ShortcutUpdate) -> Result<Shortcut> {
        let key = Self::registry_key(alias);

        if let Some(url) = update.url.take() {
            update.url = Some(normalize_url(&url)?);
        }

        let updated = {
            let _gate = self.write_gate.lock().await;
            let mut shortcuts = self.store.get_shortcuts().await?;
            let existing = shortcuts
                .get_mut(&key)
                .ok_or_else(|| JumptoError::not_found(format!("Shortcut '{}' not found", key)))?;

            if let Some(url) = &update.url {
                existing.url = url.clone();
            }
            if let Some(category) = &update.category {
                existing.category = category.clone();
            }
            if let Some(tags) = &update.tags {
                existing.tags = Some(tags.clone());
            }
            let updated = existing.clone();

            self.store.set_shortcuts(&shortcuts).await?;
            updated
        };

        info!("ShortcutService: updated '{}'", key);
        self.emit(
            "shortcut_updated",
            json!({ "shortcut": key, "updates": update.describe() }),
        );
        Ok(updated)
    }

    /// Remove a shortcut and every recent-use entry pointing at it
    ///
    /// Returns whether the alias existed. Unknown aliases are a no-op.
    pub async fn delete(&self, alias: &str) -> Result<bool> {
        let key = Self::registry_key(alias);

        let removed = {
            let _gate = self.write_gate.lock().await;
            let mut shortcuts = self.store.get_shortcuts().await?;
            let removed = shortcuts.remove(&key).is_some();

            let mut recent = self.store.load_recently_used().await?;
            let before = recent.len();
            recent.retain(|item| item.shortcut != key);

            if removed {
                self.store.set_shortcuts(&shortcuts).await?;
            }
            if recent.len() != before {
                self.store.set_recently_used(&recent).await?;
            }
            if removed {
                self.sync_stats(&shortcuts).await;
            }
            removed
        };

        if removed {
            info!("ShortcutService: deleted '{}'", key);
            self.emit("shortcut_deleted", json!({ "shortcut": key }));
        } else {
            debug!("ShortcutService: delete of unknown '{}' ignored", key);
        }
        Ok(removed)
    }

    /// Count one use of `alias`: usage counter, recent list and stats
    ///
    /// Returns `false` without touching anything when the alias is unknown.
    pub async fn record_usage(&self, alias: &str) -> Result<bool> {
        let key = Self::registry_key(alias);
        let now = Self::now_ms();

        {
            let _gate = self.write_gate.lock().await;
            let mut shortcuts = self.store.get_shortcuts().await?;
            let Some(shortcut) = shortcuts.get_mut(&key) else {
                debug!("ShortcutService: usage of unknown '{}' ignored", key);
                return Ok(false);
            };
            shortcut.usage_count += 1;
            shortcut.last_used = Some(now);

            let mut recent = self.store.load_recently_used().await?;
            recent.retain(|item| item.shortcut != key);
            recent.insert(
                0,
                RecentItem {
                    shortcut: key.clone(),
                    timestamp: now,
                },
            );
            recent.truncate(MAX_RECENT_ITEMS);

            self.store.set_shortcuts(&shortcuts).await?;
            self.store.set_recently_used(&recent).await?;

            // stats 只是派生数据，读写失败不影响本次使用记录
            match self.store.load_stats().await {
                Ok(mut usage) => {
                    stats::record_resolution(&mut usage, &key, now, self.history_days);
                    usage.total_shortcuts = shortcuts.len();
                    if let Err(e) = self.store.set_stats(&usage).await {
                        warn!("ShortcutService: failed to update stats for '{}': {}", key, e);
                    }
                }
                Err(e) => warn!("ShortcutService: skipping stats for '{}': {}", key, e),
            }
        }

        debug!("ShortcutService: recorded usage of '{}'", key);
        self.emit("shortcut_used", json!({ "shortcut": key }));
        Ok(true)
    }

    /// Detached [`record_usage`](Self::record_usage); failures are only logged
    pub fn record_usage_detached(self: &Arc<Self>, alias: &str) {
        let service = Arc::clone(self);
        let alias = alias.to_string();
        self.spawn_side_effect(async move {
            if let Err(e) = service.record_usage(&alias).await {
                error!("ShortcutService: failed to record usage of '{}': {}", alias, e);
            }
        });
    }

    // ============ Import / Export ============

    /// Merge a `{alias: Shortcut}` JSON object into the registry
    ///
    /// Every entry is checked before anything is written: alias syntax,
    /// record shape and URL. One bad entry rejects the whole batch.
    /// Imported entries overwrite existing ones with the same alias.
    pub async fn import_merge(&self, file_contents: &str) -> Result<usize> {
        let imported = parse_import(file_contents)?;
        let count = imported.len();

        {
            let _gate = self.write_gate.lock().await;
            let mut shortcuts = self.store.get_shortcuts().await?;
            shortcuts.extend(imported);
            self.store.set_shortcuts(&shortcuts).await?;
            self.sync_stats(&shortcuts).await;
        }

        info!("ShortcutService: imported {} shortcuts", count);
        self.emit("shortcuts_imported", json!({ "count": count }));
        Ok(count)
    }

    /// Pretty-printed JSON of the registry (not the whole store)
    pub async fn export_snapshot(&self) -> Result<String> {
        let shortcuts = self.store.get_shortcuts().await?;
        let serialized = serde_json::to_string_pretty(&shortcuts)?;

        self.emit("shortcuts_exported", json!({ "count": shortcuts.len() }));
        Ok(serialized)
    }

    // ============ Recent list ============

    pub async fn clear_recent(&self) -> Result<()> {
        {
            let _gate = self.write_gate.lock().await;
            self.store.set_recently_used(&[]).await?;
        }

        info!("ShortcutService: cleared recent list");
        self.emit("recent_cleared", json!({ "reason": "User action" }));
        Ok(())
    }

    /// Remove the entry at `index`; out of range is a no-op returning `false`
    pub async fn remove_recent_at(&self, index: usize) -> Result<bool> {
        let _gate = self.write_gate.lock().await;
        let mut recent = self.store.load_recently_used().await?;
        if index >= recent.len() {
            debug!(
                "ShortcutService: recent index {} out of range (len {})",
                index,
                recent.len()
            );
            return Ok(false);
        }

        let removed = recent.remove(index);
        self.store.set_recently_used(&recent).await?;
        debug!("ShortcutService: removed '{}' from recent list", removed.shortcut);
        Ok(true)
    }

    // ============ Queries ============

    pub async fn get(&self, alias: &str) -> Result<Option<Shortcut>> {
        let key = Self::registry_key(alias);
        Ok(self.store.get_shortcuts().await?.remove(&key))
    }

    pub async fn list(&self) -> Result<ShortcutMap> {
        self.store.get_shortcuts().await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<ShortcutMap> {
        let mut shortcuts = self.store.get_shortcuts().await?;
        shortcuts.retain(|_, shortcut| shortcut.category == category);
        Ok(shortcuts)
    }

    pub async fn categories(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .store
            .get_shortcuts()
            .await?
            .into_values()
            .map(|shortcut| shortcut.category)
            .collect())
    }

    pub async fn recent(&self) -> Vec<RecentItem> {
        self.store.get_recently_used().await
    }

    pub async fn stats(&self) -> UsageStats {
        self.store.get_stats().await
    }

    // ============ Settings ============

    /// Current settings; the first read on an empty store persists defaults
    ///
    /// Runs under the write gate so the default write can never land on top
    /// of a concurrent [`update_settings`](Self::update_settings).
    pub async fn settings(&self) -> Settings {
        let _gate = self.write_gate.lock().await;
        match self.store.find_settings().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = Settings::default();
                if let Err(e) = self.store.set_settings(&settings).await {
                    warn!("ShortcutService: failed to persist default settings: {}", e);
                }
                settings
            }
            Err(e) => {
                warn!("ShortcutService: falling back to default settings: {}", e);
                Settings::default()
            }
        }
    }

    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let _gate = self.write_gate.lock().await;
        let mut settings = self.store.load_settings().await?;
        update.apply(&mut settings);
        self.store.set_settings(&settings).await?;
        info!("ShortcutService: settings updated");
        Ok(settings)
    }
}

/// Validate an import file into registry entries
fn parse_import(file_contents: &str) -> Result<ShortcutMap> {
    let parsed: Value = serde_json::from_str(file_contents).map_err(|e| {
        JumptoError::invalid_import_format(format!("Invalid import file format: {}", e))
    })?;

    let Value::Object(entries) = parsed else {
        return Err(JumptoError::invalid_import_format(
            "Invalid import file format: expected a JSON object of shortcuts",
        ));
    };

    let mut imported = ShortcutMap::new();
    for (alias, value) in entries {
        if !is_valid_alias(&alias) {
            return Err(JumptoError::invalid_import_format(format!(
                "Invalid shortcut name '{}' in import file",
                alias
            )));
        }

        let mut shortcut: Shortcut = serde_json::from_value(value).map_err(|e| {
            JumptoError::invalid_import_format(format!("Malformed shortcut '{}': {}", alias, e))
        })?;

        shortcut.url = normalize_url(&shortcut.url).map_err(|e| {
            JumptoError::invalid_import_format(format!(
                "Shortcut '{}' has an invalid URL: {}",
                alias,
                e.message()
            ))
        })?;

        imported.insert(alias.to_lowercase(), shortcut);
    }

    Ok(imported)
}
