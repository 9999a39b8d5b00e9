use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::AppConfig;

static CONFIG: OnceLock<ArcSwap<AppConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Loads it on first use if `init_config()` was never called.
pub fn get_config() -> Arc<AppConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(AppConfig::load()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from the first config file found in the current
/// directory. If none exists, uses in-memory defaults.
///
/// # Examples
/// ```no_run
/// use jumpto::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(AppConfig::load()));
}

/// Swap in a new configuration (e.g. after overriding the store path)
pub fn update_config(config: AppConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(config)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(config));
        }
    }
}
