//! Intent routing tests
//!
//! Navigation interception, omnibox commit, commands and the debounced
//! suggestion pipeline. Debounce tests run on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use jumpto::config::NavigationConfig;
use jumpto::services::intents::OPEN_POPUP_COMMAND;
use jumpto::services::{
    AnalyticsService, Intent, IntentOutcome, IntentRouter, NavigationAction, NavigationResolver,
    ShortcutService, Suggestion,
};
use jumpto::storage::{MemoryStore, StoreAdapter};
use tokio::sync::mpsc;

const WINDOW: Duration = Duration::from_millis(300);

async fn router() -> (Arc<ShortcutService>, IntentRouter) {
    let store = StoreAdapter::new(Arc::new(MemoryStore::new()));
    let analytics = Arc::new(AnalyticsService::with_defaults(store.clone()));
    let shortcuts = Arc::new(ShortcutService::new(store, analytics));
    shortcuts.add("gh", "github.com", None).await.unwrap();
    shortcuts.add("gist", "gist.github.com", None).await.unwrap();
    shortcuts.add("mail", "mail.google.com", None).await.unwrap();

    let resolver = Arc::new(NavigationResolver::new(
        Arc::clone(&shortcuts),
        &NavigationConfig::default(),
    ));
    (shortcuts, IntentRouter::new(resolver, WINDOW))
}

fn collector() -> (
    mpsc::UnboundedSender<(String, Vec<Suggestion>)>,
    mpsc::UnboundedReceiver<(String, Vec<Suggestion>)>,
) {
    mpsc::unbounded_channel()
}

#[tokio::test]
async fn test_navigation_intent_is_rewritten() {
    let (shortcuts, router) = router().await;

    let outcome = router
        .handle(Intent::Navigation {
            destination_url: "http://go/gh".into(),
            tab_id: 9,
        })
        .await
        .unwrap();
    match outcome {
        IntentOutcome::Navigate(NavigationAction::Shortcut { url, .. }) => {
            assert_eq!(url, "https://github.com/");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let outcome = router
        .handle(Intent::Navigation {
            destination_url: "https://docs.rs/tokio".into(),
            tab_id: 9,
        })
        .await
        .unwrap();
    assert_eq!(outcome, IntentOutcome::PassThrough);
    shortcuts.settle().await;
}

#[tokio::test]
async fn test_omnibox_entered_resolves() {
    let (shortcuts, router) = router().await;

    let outcome = router
        .handle(Intent::OmniboxEntered("mail".into()))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        IntentOutcome::Navigate(NavigationAction::Shortcut { ref alias, .. }) if alias == "mail"
    ));

    let outcome = router
        .handle(Intent::OmniboxEntered("what is go".into()))
        .await
        .unwrap();
    assert!(matches!(outcome, IntentOutcome::Navigate(NavigationAction::Search { .. })));

    shortcuts.settle().await;
    assert_eq!(shortcuts.get("mail").await.unwrap().unwrap().usage_count, 1);
}

#[tokio::test]
async fn test_command_is_acknowledged() {
    let (_shortcuts, router) = router().await;
    let outcome = router
        .handle(Intent::Command(OPEN_POPUP_COMMAND.into()))
        .await
        .unwrap();
    assert_eq!(outcome, IntentOutcome::Acknowledged("open-popup".into()));
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_input_is_delivered() {
    let (_shortcuts, router) = router().await;
    let (tx, mut rx) = collector();

    let mut handles = Vec::new();
    for text in ["g", "gi", "gis"] {
        let tx = tx.clone();
        let label = text.to_string();
        handles.push(router.omnibox_input(text.to_string(), move |suggestions| {
            let _ = tx.send((label, suggestions));
        }));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    drop(tx);

    for handle in handles {
        handle.await.unwrap();
    }

    let (text, suggestions) = rx.recv().await.unwrap();
    assert_eq!(text, "gis");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].alias, "gist");
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_inputs_outside_window_are_all_delivered() {
    let (_shortcuts, router) = router().await;
    let (tx, mut rx) = collector();

    let first_tx = tx.clone();
    router
        .omnibox_input("g".to_string(), move |suggestions| {
            let _ = first_tx.send(("g".to_string(), suggestions));
        })
        .await
        .unwrap();

    router
        .omnibox_input("ma".to_string(), move |suggestions| {
            let _ = tx.send(("ma".to_string(), suggestions));
        })
        .await
        .unwrap();

    let (text, suggestions) = rx.recv().await.unwrap();
    assert_eq!(text, "g");
    assert_eq!(suggestions.len(), 2);

    let (text, suggestions) = rx.recv().await.unwrap();
    assert_eq!(text, "ma");
    assert_eq!(suggestions[0].alias, "mail");
}

#[tokio::test(start_paused = true)]
async fn test_nothing_delivered_before_window_elapses() {
    let (_shortcuts, router) = router().await;
    let (tx, mut rx) = collector();

    let handle = router.omnibox_input("gh".to_string(), move |suggestions| {
        let _ = tx.send(("gh".to_string(), suggestions));
    });

    tokio::time::sleep(WINDOW / 2).await;
    assert!(rx.try_recv().is_err());

    handle.await.unwrap();
    assert!(rx.recv().await.is_some());
}
