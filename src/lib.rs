//! jumpto - Personal shortcut engine for the browser address bar
//!
//! This library maps short aliases (`go/gh`) to URLs: it validates and
//! normalizes what the user stores, resolves typed text to a navigation
//! (alias hit or web-search fallback), keeps the recent list and usage
//! statistics, and buffers analytics events until they can be delivered.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `utils`: URL normalization, alias rules and the safety heuristic
//! - `models`: Persisted records
//! - `storage`: Key-value store backends and the typed adapter
//! - `services`: Registry engine, navigation resolver, intents, analytics, stats
//! - `config`: Configuration management
//! - `system`: Logging and background tasks

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
