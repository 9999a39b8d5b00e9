//! Process-wide repeating tasks
//!
//! A [`BackgroundTask`] owns the interval it runs at and the handle that can
//! stop it. Dropping the handle does NOT stop the task: periodic work is
//! scoped to the lifetime of the process unless `stop()` is called.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace};

pub struct BackgroundTask {
    name: &'static str,
    interval: Duration,
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    /// Run `tick` every `interval`, first run after one full interval
    pub fn spawn<F, Fut>(name: &'static str, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!("Starting background task '{}' every {:?}", name, interval);
        let handle = tokio::spawn(async move {
            loop {
                sleep(interval).await;
                trace!("Background task '{}' tick", name);
                tick().await;
            }
        });

        Self {
            name,
            interval,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the task; a tick already in flight is dropped at its next await
    pub fn stop(self) {
        debug!("Stopping background task '{}'", self.name);
        self.handle.abort();
    }
}
