//! Static index client end to end.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use super::common::{type_and_wait, write_site, NavigationLog};
use docsearch::{
    ContentView, IndexError, IndexLoader, OverlayConfig, ResultData, SearchContext,
    SearchIndexClient, SearchOverlay, StaticIndexLoader, SubResult,
};

// ============================================================================
// FIXTURES
// ============================================================================

fn docs_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_site(
        dir.path(),
        &[
            (
                "button",
                "Button Displays a button or a component that looks like a button",
                ResultData::new("/docs/components/button.html", "Button")
                    .with_sub_result(SubResult::new(
                        "Button",
                        "Displays a <mark>button</mark> or a component that looks like a button.",
                        "/docs/components/button.html",
                    ))
                    .with_sub_result(SubResult::new(
                        "Usage",
                        "Import the Button component.",
                        "/docs/components/button.html#usage",
                    )),
            ),
            (
                "dialog",
                "Dialog A window overlaid on the primary window",
                ResultData::new("/docs/components/dialog.html", "Dialog").with_sub_result(
                    SubResult::new("Dialog", "A window overlaid on the primary window.", "/docs/components/dialog.html"),
                ),
            ),
        ],
    );
    dir
}

fn mount(site: &TempDir, config: OverlayConfig) -> (SearchOverlay, NavigationLog) {
    let loader = StaticIndexLoader::from_config(site.path(), &config).with_debounce(Duration::ZERO);
    let ctx = SearchContext::new(config, Arc::new(loader));
    let nav = NavigationLog::new();
    let overlay = SearchOverlay::mount(ctx, Vec::new(), nav.callback());
    (overlay, nav)
}

// ============================================================================
// LOADING
// ============================================================================

#[tokio::test]
async fn test_missing_index_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let loader = StaticIndexLoader::from_config(dir.path(), &OverlayConfig::default());

    let err = loader.load().await.err().unwrap();
    assert!(matches!(err, IndexError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_wrong_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("search")).unwrap();
    fs::write(dir.path().join("search/index.json"), r#"{"version": 99, "entries": []}"#).unwrap();
    let loader = StaticIndexLoader::from_config(dir.path(), &OverlayConfig::default());

    let err = loader.load().await.err().unwrap();
    assert!(matches!(err, IndexError::Version { found: 99, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_index_surfaces_as_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let (overlay, _nav) = mount(&dir, OverlayConfig::default());

    type_and_wait(&overlay, "button").await;
    assert_eq!(
        overlay.state().error_message.as_deref(),
        Some("Failed to load search index.")
    );

    // The build finishes; the next keystroke retries and succeeds.
    let built = docs_site();
    for entry in ["search/index.json", "search/fragments/button.json", "search/fragments/dialog.json"] {
        let target = dir.path().join(entry);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::copy(built.path().join(entry), target).unwrap();
    }
    type_and_wait(&overlay, "butto").await;
    assert_eq!(overlay.state().error_message, None);
    assert_eq!(overlay.state().results.len(), 1);
}

// ============================================================================
// SEARCH
// ============================================================================

#[tokio::test]
async fn test_search_and_select_end_to_end() {
    let site = docs_site();
    let (overlay, nav) = mount(&site, OverlayConfig::default());

    type_and_wait(&overlay, "BUTTON").await;
    let dialog = overlay.render().unwrap().dialog.unwrap();
    let ContentView::Results(groups) = &dialog.content else {
        panic!("expected results, got {:?}", dialog.content);
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].heading, "Button");
    assert_eq!(
        dialog.content.selectable_urls(),
        vec!["/docs/components/button", "/docs/components/button#usage"]
    );

    overlay.move_selection(1);
    overlay.select_active();
    assert_eq!(nav.urls(), vec!["/docs/components/button#usage"]);
    assert!(!overlay.is_open());
}

#[tokio::test]
async fn test_every_word_must_match() {
    let site = docs_site();
    let (overlay, _nav) = mount(&site, OverlayConfig::default());

    type_and_wait(&overlay, "window primary").await;
    assert_eq!(overlay.state().results.len(), 1);

    type_and_wait(&overlay, "window button").await;
    assert!(overlay.state().results.is_empty());
    let dialog = overlay.render().unwrap().dialog.unwrap();
    assert_eq!(dialog.content, ContentView::Empty);
}

#[tokio::test]
async fn test_base_url_prefixes_fragment_urls() {
    let site = docs_site();
    let config = OverlayConfig {
        base_url: "/ui".to_string(),
        ..Default::default()
    };
    let (overlay, _nav) = mount(&site, config);

    type_and_wait(&overlay, "dialog").await;
    let state = overlay.state();
    assert_eq!(state.results[0].url, "/ui/docs/components/dialog");
    assert_eq!(state.results[0].sub_results[0].url, "/ui/docs/components/dialog");
}

#[tokio::test]
async fn test_missing_fragment_is_search_failure() {
    let site = docs_site();
    fs::remove_file(site.path().join("search/fragments/dialog.json")).unwrap();
    let (overlay, _nav) = mount(&site, OverlayConfig::default());

    type_and_wait(&overlay, "dialog").await;
    assert_eq!(overlay.state().error_message.as_deref(), Some("Search failed."));
}

#[tokio::test(start_paused = true)]
async fn test_client_debounce_drops_superseded_calls() {
    let site = docs_site();
    let config = OverlayConfig::default();
    let loader = StaticIndexLoader::from_config(site.path(), &config);
    let client = loader.load().await.unwrap();

    let (early, late) = tokio::join!(client.debounced_search("butt"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        client.debounced_search("button").await
    });

    assert!(early.unwrap().is_none(), "superseded call resolves to None");
    assert_eq!(late.unwrap().unwrap().results.len(), 1);
}
