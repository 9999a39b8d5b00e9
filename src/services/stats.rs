//! Usage statistics maintenance
//!
//! Pure updates applied by the registry engine while it holds its write gate,
//! plus the periodic refresh that republishes the stored record.

use std::time::Duration;

use tokio::sync::watch;
use tracing::trace;

use crate::models::{DailyUsage, ShortcutMap, UsageStats};
use crate::storage::StoreAdapter;
use crate::system::BackgroundTask;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Start of the UTC day containing `timestamp_ms`
pub fn day_start(timestamp_ms: i64) -> i64 {
    timestamp_ms - timestamp_ms.rem_euclid(DAY_MS)
}

/// Count one resolution of `alias` at `now_ms`
pub fn record_resolution(stats: &mut UsageStats, alias: &str, now_ms: i64, history_days: usize) {
    stats.last_used = Some(alias.to_string());
    *stats.usage_counts.entry(alias.to_string()).or_insert(0) += 1;

    let today = day_start(now_ms);
    match stats.daily_usage.last_mut() {
        Some(bucket) if bucket.date == today => {
            *bucket.shortcuts.entry(alias.to_string()).or_insert(0) += 1;
        }
        _ => {
            let mut bucket = DailyUsage {
                date: today,
                shortcuts: Default::default(),
            };
            bucket.shortcuts.insert(alias.to_string(), 1);
            stats.daily_usage.push(bucket);
        }
    }

    if stats.daily_usage.len() > history_days {
        let overflow = stats.daily_usage.len() - history_days;
        stats.daily_usage.drain(..overflow);
    }

    stats.most_used = most_used(stats);
}

/// Drop counters of aliases no longer in the registry and refresh totals
pub fn sync_with_registry(stats: &mut UsageStats, shortcuts: &ShortcutMap) {
    stats.total_shortcuts = shortcuts.len();
    stats.usage_counts.retain(|alias, _| shortcuts.contains_key(alias));
    if stats
        .last_used
        .as_ref()
        .is_some_and(|alias| !shortcuts.contains_key(alias))
    {
        stats.last_used = None;
    }
    stats.most_used = most_used(stats);
}

/// Alias with the highest count; ties go to the alphabetically first alias
fn most_used(stats: &UsageStats) -> Option<String> {
    stats
        .usage_counts
        .iter()
        .max_by(|(a_alias, a_count), (b_alias, b_count)| {
            a_count.cmp(b_count).then_with(|| b_alias.cmp(a_alias))
        })
        .map(|(alias, _)| alias.clone())
}

/// Re-read the stats record every `interval` and publish it on a watch channel
///
/// The initial value is read before the task starts.
pub async fn spawn_stats_refresh(
    store: StoreAdapter,
    interval: Duration,
) -> (watch::Receiver<UsageStats>, BackgroundTask) {
    let (tx, rx) = watch::channel(store.get_stats().await);

    let task = BackgroundTask::spawn("stats-refresh", interval, move || {
        let store = store.clone();
        let tx = tx.clone();
        async move {
            let stats = store.get_stats().await;
            tx.send_if_modified(|current| {
                if *current == stats {
                    trace!("Stats unchanged");
                    false
                } else {
                    *current = stats;
                    true
                }
            });
        }
    });

    (rx, task)
}
