//! Navigation resolver
//!
//! Turns an intent string into a tab navigation: a known alias navigates to
//! its URL (and records usage in the background), anything else becomes a
//! web search.

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use crate::config::NavigationConfig;
use crate::errors::Result;
use crate::models::DEFAULT_CATEGORY;
use crate::services::ShortcutService;
use crate::utils::url_normalizer::normalize_url;

/// Browser tab identifier
pub type TabId = u64;

/// Where the navigation happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabTarget {
    /// Reuse the tab the intent came from
    Update(TabId),
    OpenNew,
}

impl From<Option<TabId>> for TabTarget {
    fn from(tab: Option<TabId>) -> Self {
        match tab {
            Some(id) => TabTarget::Update(id),
            None => TabTarget::OpenNew,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Known alias
    Shortcut {
        alias: String,
        url: String,
        tab: TabTarget,
    },
    /// Unknown alias, fall back to a web search for the raw text
    Search { url: String, tab: TabTarget },
}

impl NavigationAction {
    pub fn url(&self) -> &str {
        match self {
            NavigationAction::Shortcut { url, .. } | NavigationAction::Search { url, .. } => url,
        }
    }

    pub fn tab(&self) -> TabTarget {
        match self {
            NavigationAction::Shortcut { tab, .. } | NavigationAction::Search { tab, .. } => *tab,
        }
    }
}

/// Omnibox suggestion row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub alias: String,
    /// `<match>alias</match> - url (category)`, XML-escaped
    pub description: String,
}

pub struct NavigationResolver {
    shortcuts: Arc<ShortcutService>,
    sentinel_host: String,
    search_url: String,
}

impl NavigationResolver {
    pub fn new(shortcuts: Arc<ShortcutService>, config: &NavigationConfig) -> Self {
        Self {
            shortcuts,
            sentinel_host: config.sentinel_host.to_lowercase(),
            search_url: config.search_url.clone(),
        }
    }

    fn search_url_for(&self, text: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(text))
    }

    /// Resolve `intent_text` against the registry
    ///
    /// Usage recording for a hit is spawned and never awaited.
    #[instrument(skip(self), fields(intent = %intent_text))]
    pub async fn resolve(&self, intent_text: &str, tab: Option<TabId>) -> Result<NavigationAction> {
        let text = intent_text.trim();
        let alias = text.to_lowercase();
        let tab = TabTarget::from(tab);

        if let Some(shortcut) = self.shortcuts.get(&alias).await? {
            let url = normalize_url(&shortcut.url)?;
            debug!("Resolved '{}' -> {}", alias, url);

            self.shortcuts.record_usage_detached(&alias);
            return Ok(NavigationAction::Shortcut { alias, url, tab });
        }

        debug!("No shortcut for '{}', falling back to search", text);
        Ok(NavigationAction::Search {
            url: self.search_url_for(text),
            tab,
        })
    }

    /// Handle a navigation about to happen in `tab`
    ///
    /// Returns `None` unless the destination host is the sentinel host with
    /// a non-empty path, in which case the navigation should be replaced
    /// with the returned action.
    pub async fn intercept(&self, destination_url: &str, tab: TabId) -> Result<Option<NavigationAction>> {
        let Some(alias) = self.intercepted_alias(destination_url) else {
            return Ok(None);
        };
        self.resolve(&alias, Some(tab)).await.map(Some)
    }

    /// Alias carried by a `http://<sentinel>/<alias>` URL
    pub fn intercepted_alias(&self, destination_url: &str) -> Option<String> {
        let parsed = Url::parse(destination_url).ok()?;
        if parsed.host_str()? != self.sentinel_host {
            return None;
        }

        let path = parsed.path().strip_prefix('/').unwrap_or(parsed.path());
        let alias = urlencoding::decode(path).ok()?.into_owned();
        if alias.is_empty() { None } else { Some(alias) }
    }

    /// Aliases containing `partial_text`, case-insensitive, in alias order
    pub async fn suggestions_for(&self, partial_text: &str) -> Result<Vec<Suggestion>> {
        let needle = partial_text.trim().to_lowercase();
        let shortcuts = self.shortcuts.list().await?;

        Ok(shortcuts
            .into_iter()
            .filter(|(alias, _)| alias.to_lowercase().contains(&needle))
            .map(|(alias, shortcut)| {
                let mut description = format!(
                    "<match>{}</match> - {}",
                    xml_escape(&alias),
                    xml_escape(&shortcut.url)
                );
                if shortcut.category != DEFAULT_CATEGORY {
                    description.push_str(&format!(" ({})", xml_escape(&shortcut.category)));
                }
                Suggestion { alias, description }
            })
            .collect())
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape("https://a.com/?x=1&y=<2>"),
            "https://a.com/?x=1&amp;y=&lt;2&gt;"
        );
    }

    #[test]
    fn test_tab_target_from_option() {
        assert_eq!(TabTarget::from(Some(7)), TabTarget::Update(7));
        assert_eq!(TabTarget::from(None), TabTarget::OpenNew);
    }
}
