//! Service layer for business logic
//!
//! This module provides the shortcut engine and everything built on it,
//! shared between the browser-facing intents and the CLI.

pub mod analytics;
pub mod intents;
pub mod resolver;
mod shortcut_service;
pub mod stats;

pub use analytics::{AnalyticsService, AnalyticsTransport, Connectivity, LogTransport, NetworkStatus};
pub use intents::{Intent, IntentOutcome, IntentRouter, SuggestionDebouncer};
pub use resolver::{NavigationAction, NavigationResolver, Suggestion, TabId, TabTarget};
pub use shortcut_service::*;
