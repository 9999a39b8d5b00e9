//! Browser intent dispatch
//!
//! Entry points delivered by the browser: intercepted navigations, omnibox
//! input (live, debounced) and omnibox commits, and named commands.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::services::resolver::{NavigationAction, NavigationResolver, Suggestion, TabId};

/// Command that opens the main UI
pub const OPEN_POPUP_COMMAND: &str = "open-popup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A navigation is about to occur in `tab_id`
    Navigation {
        destination_url: String,
        tab_id: TabId,
    },
    /// Final omnibox entry
    OmniboxEntered(String),
    /// Named keyboard command
    Command(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Replace/perform the navigation
    Navigate(NavigationAction),
    /// Not ours, let the browser carry on
    PassThrough,
    /// Command received; the engine has nothing to do for it
    Acknowledged(String),
}

/// Delivers omnibox suggestions only for the latest input
///
/// Each request waits out the debounce window; if a newer request arrives
/// meanwhile (or while suggestions are being computed) the older one is
/// dropped without calling its callback.
pub struct SuggestionDebouncer {
    resolver: Arc<NavigationResolver>,
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl SuggestionDebouncer {
    pub fn new(resolver: Arc<NavigationResolver>, window: Duration) -> Self {
        Self {
            resolver,
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn request<F>(&self, text: String, deliver: F) -> JoinHandle<()>
    where
        F: FnOnce(Vec<Suggestion>) + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let resolver = Arc::clone(&self.resolver);
        let window = self.window;

        tokio::spawn(async move {
            sleep(window).await;
            if generation.load(Ordering::SeqCst) != ticket {
                trace!("Suggestion request for '{}' superseded", text);
                return;
            }

            match resolver.suggestions_for(&text).await {
                Ok(suggestions) if generation.load(Ordering::SeqCst) == ticket => {
                    deliver(suggestions);
                }
                Ok(_) => trace!("Suggestions for '{}' went stale", text),
                Err(e) => warn!("Failed to compute suggestions for '{}': {}", text, e),
            }
        })
    }
}

pub struct IntentRouter {
    resolver: Arc<NavigationResolver>,
    debouncer: SuggestionDebouncer,
}

impl IntentRouter {
    pub fn new(resolver: Arc<NavigationResolver>, debounce_window: Duration) -> Self {
        Self {
            debouncer: SuggestionDebouncer::new(Arc::clone(&resolver), debounce_window),
            resolver,
        }
    }

    pub fn resolver(&self) -> &Arc<NavigationResolver> {
        &self.resolver
    }

    pub async fn handle(&self, intent: Intent) -> Result<IntentOutcome> {
        match intent {
            Intent::Navigation {
                destination_url,
                tab_id,
            } => Ok(self
                .resolver
                .intercept(&destination_url, tab_id)
                .await?
                .map(IntentOutcome::Navigate)
                .unwrap_or(IntentOutcome::PassThrough)),
            Intent::OmniboxEntered(text) => self
                .resolver
                .resolve(&text, None)
                .await
                .map(IntentOutcome::Navigate),
            Intent::Command(name) => {
                debug!("Command '{}' acknowledged", name);
                Ok(IntentOutcome::Acknowledged(name))
            }
        }
    }

    /// Live omnibox input, see [`SuggestionDebouncer`]
    pub fn omnibox_input<F>(&self, text: String, deliver: F) -> JoinHandle<()>
    where
        F: FnOnce(Vec<Suggestion>) + Send + 'static,
    {
        self.debouncer.request(text, deliver)
    }
}
