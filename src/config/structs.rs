use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 静态配置（从 TOML 加载，启动时使用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `file` or `memory`
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_storage_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Host whose paths are treated as aliases (`http://go/<alias>`)
    #[serde(default = "default_sentinel_host")]
    pub sentinel_host: String,
    /// Fallback search URL, the URL-encoded query is appended
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_suggestion_debounce_ms")]
    pub suggestion_debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_analytics_sync_interval")]
    pub sync_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_stats_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Days of per-day usage history kept in the stats record
    #[serde(default = "default_daily_history_days")]
    pub daily_history_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

// Default value functions
fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_storage_path() -> String {
    "jumpto-store.json".to_string()
}

fn default_sentinel_host() -> String {
    "go".to_string()
}

fn default_search_url() -> String {
    "https://www.google.com/search?q=".to_string()
}

fn default_suggestion_debounce_ms() -> u64 {
    300
}

fn default_analytics_sync_interval() -> u64 {
    60 * 60
}

fn default_stats_refresh_interval() -> u64 {
    60
}

fn default_daily_history_days() -> usize {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sentinel_host: default_sentinel_host(),
            search_url: default_search_url(),
            suggestion_debounce_ms: default_suggestion_debounce_ms(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sync_interval_secs: default_analytics_sync_interval(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_stats_refresh_interval(),
            daily_history_days: default_daily_history_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: false,
            max_backups: default_max_backups(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    /// Load configuration from TOML file
    fn load_from_file() -> Self {
        let config_paths = ["jumpto.toml", "config.toml", "config/jumpto.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match Self::from_toml(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override configuration with environment variables
    fn override_with_env(&mut self) {
        if let Ok(backend) = env::var("JUMPTO_STORE_BACKEND") {
            self.storage.backend = backend;
        }
        if let Ok(path) = env::var("JUMPTO_STORE_PATH") {
            self.storage.path = path;
        }

        if let Ok(search_url) = env::var("JUMPTO_SEARCH_URL") {
            self.navigation.search_url = search_url;
        }
        if let Ok(host) = env::var("JUMPTO_SENTINEL_HOST") {
            self.navigation.sentinel_host = host;
        }

        if let Ok(secs) = env::var("JUMPTO_ANALYTICS_SYNC_SECS") {
            match secs.parse() {
                Ok(secs) => self.analytics.sync_interval_secs = secs,
                Err(_) => warn!("Ignoring invalid JUMPTO_ANALYTICS_SYNC_SECS: {}", secs),
            }
        }
        if let Ok(secs) = env::var("JUMPTO_STATS_REFRESH_SECS") {
            match secs.parse() {
                Ok(secs) => self.stats.refresh_interval_secs = secs,
                Err(_) => warn!("Ignoring invalid JUMPTO_STATS_REFRESH_SECS: {}", secs),
            }
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
        if let Ok(format) = env::var("JUMPTO_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(file) = env::var("JUMPTO_LOG_FILE") {
            self.logging.file = Some(file);
        }
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&AppConfig::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}
