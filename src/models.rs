//! Persisted records
//!
//! All records serialize to the camelCase JSON layout the store keeps under
//! its five top-level keys. Timestamps are Unix epoch milliseconds.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Category assigned when neither the caller nor the settings provide one
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Recent-use list capacity
pub const MAX_RECENT_ITEMS: usize = 10;

/// Analytics buffer capacity
pub const MAX_STORED_EVENTS: usize = 1000;

/// Alias -> shortcut, ordered by alias
pub type ShortcutMap = BTreeMap<String, Shortcut>;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<i64>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
}

impl Shortcut {
    pub fn new(url: String, category: String, created: i64) -> Self {
        Self {
            url,
            category,
            created,
            last_used: None,
            usage_count: 0,
            tags: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub shortcut: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Start of the UTC day, epoch milliseconds
    pub date: i64,
    #[serde(default)]
    pub shortcuts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default)]
    pub total_shortcuts: usize,
    #[serde(default)]
    pub most_used: Option<String>,
    #[serde(default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub daily_usage: Vec<DailyUsage>,
    #[serde(default = "default_stats_version")]
    pub version: String,
    #[serde(default)]
    pub usage_counts: BTreeMap<String, u64>,
}

fn default_stats_version() -> String {
    "1.0.0".to_string()
}

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            total_shortcuts: 0,
            most_used: None,
            last_used: None,
            daily_usage: Vec::new(),
            version: default_stats_version(),
            usage_counts: BTreeMap::new(),
        }
    }
}

/// Missing fields in a stored record take their default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub analytics_enabled: bool,
    pub dark_mode: bool,
    pub keyboard_shortcuts_enabled: bool,
    pub auto_backup_enabled: bool,
    /// Milliseconds between automatic backups
    pub backup_frequency: u64,
    pub default_category: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analytics_enabled: true,
            dark_mode: false,
            keyboard_shortcuts_enabled: true,
            auto_backup_enabled: true,
            backup_frequency: 7 * 24 * 60 * 60 * 1000,
            default_category: default_category(),
        }
    }
}

/// Partial settings update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub analytics_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
    pub keyboard_shortcuts_enabled: Option<bool>,
    pub auto_backup_enabled: Option<bool>,
    pub backup_frequency: Option<u64>,
    pub default_category: Option<String>,
}

impl SettingsUpdate {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.analytics_enabled {
            settings.analytics_enabled = v;
        }
        if let Some(v) = self.dark_mode {
            settings.dark_mode = v;
        }
        if let Some(v) = self.keyboard_shortcuts_enabled {
            settings.keyboard_shortcuts_enabled = v;
        }
        if let Some(v) = self.auto_backup_enabled {
            settings.auto_backup_enabled = v;
        }
        if let Some(v) = self.backup_frequency {
            settings.backup_frequency = v;
        }
        if let Some(v) = self.default_category {
            settings.default_category = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event_name: String,
    pub timestamp: i64,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBuffer {
    #[serde(default)]
    pub events: Vec<AnalyticsEvent>,
}

impl AnalyticsBuffer {
    /// Append an event, dropping the oldest ones beyond `capacity`
    pub fn push_bounded(&mut self, event: AnalyticsEvent, capacity: usize) {
        self.events.push(event);
        if self.events.len() > capacity {
            let overflow = self.events.len() - capacity;
            self.events.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_json_layout() {
        let shortcut: Shortcut =
            serde_json::from_str(r#"{"url":"https://github.com","created":0}"#).unwrap();
        assert_eq!(shortcut.category, DEFAULT_CATEGORY);
        assert_eq!(shortcut.usage_count, 0);
        assert!(shortcut.last_used.is_none());

        let json = serde_json::to_value(Shortcut {
            last_used: Some(5),
            usage_count: 2,
            ..shortcut
        })
        .unwrap();
        assert_eq!(json["lastUsed"], 5);
        assert_eq!(json["usageCount"], 2);
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_push_bounded_drops_oldest() {
        let mut buffer = AnalyticsBuffer::default();
        for i in 0..5 {
            buffer.push_bounded(
                AnalyticsEvent {
                    event_name: format!("e{}", i),
                    timestamp: i,
                    data: serde_json::Value::Null,
                },
                3,
            );
        }
        let names: Vec<_> = buffer.events.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["e2", "e3", "e4"]);
    }

    #[test]
    fn test_settings_update_merges() {
        let mut settings = Settings::default();
        SettingsUpdate {
            analytics_enabled: Some(false),
            default_category: Some("work".into()),
            ..Default::default()
        }
        .apply(&mut settings);
        assert!(!settings.analytics_enabled);
        assert_eq!(settings.default_category, "work");
        assert!(settings.keyboard_shortcuts_enabled);
    }
}
