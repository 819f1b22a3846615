//! Only the latest query's response may land.

use std::time::Duration;

use super::common::{button_result, type_and_wait, Harness, Scripted};
use docsearch::overlay::view::ViewKind;
use docsearch::{ResultData, SubResult};

fn bu_result() -> ResultData {
    ResultData::new("/docs/components/badge.html", "Badge")
        .with_sub_result(SubResult::new("Badge", "A small bu label.", "/docs/components/badge.html"))
}

// ============================================================================
// OUT-OF-ORDER RESOLUTION
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_first_query_never_overwrites_second() {
    let h = Harness::new();
    h.index.script("bu", Scripted::results(vec![bu_result()]).after(Duration::from_millis(500)));
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(10)));

    let overlay = h.mount();
    overlay.open();

    let first = overlay.set_query("bu").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(h.index.calls(), vec!["bu"], "first search should be in flight");

    let second = overlay.set_query("button").unwrap();
    second.await.unwrap();

    let state = overlay.state();
    assert_eq!(state.query, "button");
    assert_eq!(state.results, vec![button_result().normalized()]);
    assert!(!state.is_loading);

    // "bu" resolves long after "button" was committed.
    first.await.unwrap();
    let state = overlay.state();
    assert_eq!(state.query, "button");
    assert_eq!(state.results, vec![button_result().normalized()]);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_query_resolving_first_keeps_loading() {
    let h = Harness::new();
    h.index.script("bu", Scripted::results(vec![bu_result()]).after(Duration::from_millis(50)));
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(200)));

    let overlay = h.mount();
    overlay.open();

    let first = overlay.set_query("bu").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    let second = overlay.set_query("button").unwrap();

    first.await.unwrap();
    let state = overlay.state();
    assert!(state.results.is_empty(), "stale results must not land");
    assert!(state.is_loading);
    let kind = overlay.render().unwrap().dialog.unwrap().content.kind();
    assert_eq!(kind, ViewKind::Loading);

    second.await.unwrap();
    assert_eq!(overlay.state().results, vec![button_result().normalized()]);
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_commits_last() {
    let h = Harness::new();
    for (i, q) in ["b", "bu", "but", "butt", "butto"].iter().enumerate() {
        let delay = Duration::from_millis(400 - i as u64 * 50);
        h.index.script(q, Scripted::results(vec![bu_result()]).after(delay));
    }
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(5)));

    let overlay = h.mount();
    overlay.open();

    let mut tasks = Vec::new();
    for q in ["b", "bu", "but", "butt", "butto", "button"] {
        tasks.extend(overlay.set_query(q));
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    for task in tasks {
        task.await.unwrap();
    }

    let state = overlay.state();
    assert_eq!(state.query, "button");
    assert_eq!(state.results, vec![button_result().normalized()]);
}

#[tokio::test(start_paused = true)]
async fn test_query_superseded_during_index_load_never_searches() {
    let h = Harness::slow_load(Duration::from_millis(200));
    h.index.script("bu", Scripted::results(vec![bu_result()]));
    h.index.script("button", Scripted::results(vec![button_result()]));

    let overlay = h.mount();
    overlay.open();

    let first = overlay.set_query("bu").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(h.loader.load_count(), 1, "index load should be in flight");
    assert!(h.index.calls().is_empty());

    let second = overlay.set_query("button").unwrap();
    first.await.unwrap();
    second.await.unwrap();

    // "bu" was stale by the time the index arrived, so it never reached the client.
    assert_eq!(h.index.calls(), vec!["button"]);
    assert_eq!(h.loader.load_count(), 1);
    let state = overlay.state();
    assert_eq!(state.query, "button");
    assert_eq!(state.results, vec![button_result().normalized()]);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_query_superseded_during_result_resolution_never_lands() {
    let h = Harness::new();
    h.index.script("bu", Scripted::results(vec![bu_result()]).data_after(Duration::from_millis(300)));
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(20)));

    let overlay = h.mount();
    overlay.open();

    let first = overlay.set_query("bu").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(h.index.calls(), vec!["bu"], "search returned, data() still pending");

    let second = overlay.set_query("button").unwrap();
    second.await.unwrap();
    assert_eq!(overlay.state().results, vec![button_result().normalized()]);

    // "bu" data resolves long after "button" committed.
    first.await.unwrap();
    let state = overlay.state();
    assert_eq!(state.query, "button");
    assert_eq!(state.results, vec![button_result().normalized()]);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_stale_result_resolution_does_not_clear_loading() {
    let h = Harness::new();
    h.index.script("bu", Scripted::results(vec![bu_result()]).data_after(Duration::from_millis(50)));
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(200)));

    let overlay = h.mount();
    overlay.open();

    let first = overlay.set_query("bu").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    let second = overlay.set_query("button").unwrap();

    first.await.unwrap();
    let state = overlay.state();
    assert!(state.results.is_empty(), "stale results must not land");
    assert!(state.is_loading);

    second.await.unwrap();
    assert_eq!(overlay.state().results, vec![button_result().normalized()]);
}

// ============================================================================
// EMPTY QUERY
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_clearing_query_discards_in_flight_search() {
    let h = Harness::new();
    h.index.script("button", Scripted::results(vec![button_result()]).after(Duration::from_millis(100)));

    let overlay = h.mount();
    overlay.open();
    let pending = overlay.set_query("button").unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert!(overlay.set_query("").is_none(), "empty query makes no request");
    pending.await.unwrap();

    let state = overlay.state();
    assert!(state.results.is_empty());
    assert_eq!(state.error_message, None);
    assert!(!state.is_loading);
    let kind = overlay.render().unwrap().dialog.unwrap().content.kind();
    assert_eq!(kind, ViewKind::Welcome);
}

#[tokio::test]
async fn test_empty_query_clears_error() {
    let h = Harness::new();
    h.index.script("tabs", Scripted::fail());

    let overlay = h.mount();
    type_and_wait(&overlay, "tabs").await;
    assert_eq!(overlay.state().error_message.as_deref(), Some("Search failed."));

    type_and_wait(&overlay, "").await;
    let state = overlay.state();
    assert_eq!(state.error_message, None);
    assert!(state.results.is_empty());
    assert_eq!(h.index.calls(), vec!["tabs"]);
}

// ============================================================================
// CONTROLLER DEBOUNCE
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_query_debounce_skips_superseded_requests() {
    let config = docsearch::OverlayConfig {
        query_debounce_ms: 100,
        ..Default::default()
    };
    let h = Harness::with_config(config);
    h.index.script("button", Scripted::results(vec![button_result()]));

    let overlay = h.mount();
    overlay.open();
    let mut tasks = Vec::new();
    for q in ["b", "bu", "button"] {
        tasks.extend(overlay.set_query(q));
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(h.index.calls(), vec!["button"]);
    assert_eq!(h.loader.load_count(), 1);
    assert_eq!(overlay.state().results.len(), 1);
}
