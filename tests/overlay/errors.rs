//! Failures become state, never panics.

use std::time::Duration;

use super::common::{button_result, type_and_wait, Harness, Scripted};
use docsearch::overlay::view::ViewKind;
use docsearch::{ContentView, LoadStatus};

#[tokio::test]
async fn test_index_load_failure_then_retry() {
    let h = Harness::failing_loads(1);
    h.index.script("button", Scripted::results(vec![button_result()]));
    let overlay = h.mount();

    type_and_wait(&overlay, "button").await;
    let state = overlay.state();
    assert_eq!(state.error_message.as_deref(), Some("Failed to load search index."));
    assert!(!state.is_loading);
    assert!(matches!(h.ctx.index().status().await, LoadStatus::Failed(_)));

    let dialog = overlay.render().unwrap().dialog.unwrap();
    assert_eq!(
        dialog.content,
        ContentView::Error("Failed to load search index.".to_string())
    );

    // Retyping retries the load.
    type_and_wait(&overlay, "button ").await;
    type_and_wait(&overlay, "button").await;
    assert_eq!(h.loader.load_count(), 2);
    assert_eq!(overlay.state().error_message, None);
    assert_eq!(overlay.state().results.len(), 1);
    assert_eq!(h.ctx.index().status().await, LoadStatus::Loaded);
}

#[tokio::test]
async fn test_search_failure_message() {
    let h = Harness::new();
    h.index.script("tabs", Scripted::fail());
    let overlay = h.mount();

    type_and_wait(&overlay, "tabs").await;
    assert_eq!(overlay.state().error_message.as_deref(), Some("Search failed."));
    let kind = overlay.render().unwrap().dialog.unwrap().content.kind();
    assert_eq!(kind, ViewKind::Error);
}

#[tokio::test]
async fn test_failed_fragment_is_search_failure() {
    let h = Harness::new();
    h.index.script("tabs", Scripted::broken_fragment());
    let overlay = h.mount();

    type_and_wait(&overlay, "tabs").await;
    assert_eq!(overlay.state().error_message.as_deref(), Some("Search failed."));
}

#[tokio::test]
async fn test_null_response_is_no_results() {
    let h = Harness::new();
    h.index.script("card", Scripted::null());
    let overlay = h.mount();

    type_and_wait(&overlay, "card").await;
    let state = overlay.state();
    assert_eq!(state.error_message, None);
    assert!(state.results.is_empty());

    let dialog = overlay.render().unwrap().dialog.unwrap();
    assert_eq!(dialog.content, ContentView::Empty);
}

#[tokio::test(start_paused = true)]
async fn test_retry_clears_error_while_loading() {
    let h = Harness::new();
    h.index.script("tabs", Scripted::fail());
    h.index.script("table", Scripted::results(vec![button_result()]).after(Duration::from_millis(100)));
    let overlay = h.mount();

    type_and_wait(&overlay, "tabs").await;
    assert!(overlay.state().error_message.is_some());

    let pending = overlay.set_query("table").unwrap();
    let state = overlay.state();
    assert_eq!(state.error_message, None);
    assert!(state.is_loading);
    let kind = overlay.render().unwrap().dialog.unwrap().content.kind();
    assert_eq!(kind, ViewKind::Loading);

    pending.await.unwrap();
    assert_eq!(overlay.render().unwrap().dialog.unwrap().content.kind(), ViewKind::Results);
}

#[tokio::test(start_paused = true)]
async fn test_index_loads_once_across_searches() {
    let h = Harness::new();
    let a = h.mount();
    a.open();

    let first = a.set_query("a").unwrap();
    let second = a.set_query("ab").unwrap();
    first.await.unwrap();
    second.await.unwrap();

    assert_eq!(h.loader.load_count(), 1);
}
