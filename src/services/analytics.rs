//! 匿名使用事件收集
//!
//! Best-effort event buffer persisted under the `analytics` key:
//! - gated by `settings.analyticsEnabled`
//! - bounded to [`MAX_STORED_EVENTS`], oldest dropped first
//! - flushed immediately when online, and periodically
//!
//! Nothing here ever returns an error to the caller; failures are logged.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use crate::models::{AnalyticsEvent, MAX_STORED_EVENTS};
use crate::storage::StoreAdapter;
use crate::system::BackgroundTask;

/// Default period of [`AnalyticsService::start_periodic_sync`]
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Destination for flushed events
#[async_trait]
pub trait AnalyticsTransport: Send + Sync {
    async fn send(&self, events: &[AnalyticsEvent]) -> anyhow::Result<()>;
}

/// Connectivity probe consulted before flushing
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Transport that only logs what it would have sent
pub struct LogTransport;

#[async_trait]
impl AnalyticsTransport for LogTransport {
    async fn send(&self, events: &[AnalyticsEvent]) -> anyhow::Result<()> {
        info!("Syncing {} analytics events", events.len());
        for event in events {
            trace!("  - {} @ {}: {}", event.event_name, event.timestamp, event.data);
        }
        Ok(())
    }
}

/// Manually toggled connectivity flag
pub struct NetworkStatus {
    online: AtomicBool,
}

impl NetworkStatus {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for NetworkStatus {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

pub struct AnalyticsService {
    store: StoreAdapter,
    transport: Arc<dyn AnalyticsTransport>,
    network: Arc<dyn Connectivity>,
    /// 串行化缓冲区的读改写（包括 flush 期间的发送）
    buffer_lock: Mutex<()>,
}

impl AnalyticsService {
    pub fn new(
        store: StoreAdapter,
        transport: Arc<dyn AnalyticsTransport>,
        network: Arc<dyn Connectivity>,
    ) -> Self {
        Self {
            store,
            transport,
            network,
            buffer_lock: Mutex::new(()),
        }
    }

    /// Log-only transport, always online
    pub fn with_defaults(store: StoreAdapter) -> Self {
        Self::new(store, Arc::new(LogTransport), Arc::new(NetworkStatus::default()))
    }

    /// Record an event; flushes right away when the network is reachable
    pub async fn track(&self, event_name: &str, data: Value) {
        let settings = self.store.get_settings().await;
        if !settings.analytics_enabled {
            trace!("Analytics disabled, dropping event '{}'", event_name);
            return;
        }

        {
            let _guard = self.buffer_lock.lock().await;

            let mut analytics = match self.store.load_analytics().await {
                Ok(analytics) => analytics,
                Err(e) => {
                    warn!("Analytics: failed to load buffer, dropping '{}': {}", event_name, e);
                    return;
                }
            };

            analytics.push_bounded(
                AnalyticsEvent {
                    event_name: event_name.to_string(),
                    timestamp: Utc::now().timestamp_millis(),
                    data,
                },
                MAX_STORED_EVENTS,
            );

            if let Err(e) = self.store.set_analytics(&analytics).await {
                warn!("Analytics: failed to persist event '{}': {}", event_name, e);
                return;
            }
            debug!("Analytics: tracked '{}'", event_name);
        }

        if self.network.is_online() {
            self.flush().await;
        }
    }

    /// Transmit buffered events and clear the buffer
    ///
    /// A failed transmission leaves the buffer as it was.
    pub async fn flush(&self) {
        let _guard = self.buffer_lock.lock().await;

        let mut analytics = match self.store.load_analytics().await {
            Ok(analytics) => analytics,
            Err(e) => {
                warn!("Analytics: failed to load buffer for sync: {}", e);
                return;
            }
        };

        if analytics.events.is_empty() {
            trace!("Analytics: nothing to sync");
            return;
        }

        let count = analytics.events.len();
        if let Err(e) = self.transport.send(&analytics.events).await {
            warn!("Analytics: sync of {} events failed, keeping buffer: {}", count, e);
            return;
        }

        analytics.events.clear();
        match self.store.set_analytics(&analytics).await {
            Ok(()) => debug!("Analytics: synced {} events", count),
            Err(e) => warn!("Analytics: synced {} events but failed to clear buffer: {}", count, e),
        }
    }

    /// Flush every `interval` while online
    ///
    /// The returned task runs until stopped or the process exits.
    pub fn start_periodic_sync(self: &Arc<Self>, interval: Duration) -> BackgroundTask {
        let service = Arc::clone(self);
        BackgroundTask::spawn("analytics-sync", interval, move || {
            let service = Arc::clone(&service);
            async move {
                if service.network.is_online() {
                    service.flush().await;
                } else {
                    trace!("Analytics: offline, skipping scheduled sync");
                }
            }
        })
    }

    /// Number of buffered events per event name
    pub async fn event_counts(&self) -> BTreeMap<String, usize> {
        self.store
            .get_analytics()
            .await
            .events
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, event| {
                *acc.entry(event.event_name).or_insert(0) += 1;
                acc
            })
    }
}
