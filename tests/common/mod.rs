//! Shared test utilities and fixtures.

#![allow(dead_code)]

use docsearch::index::static_index::IndexEntry;
use docsearch::{OverlayConfig, PageEntry, ResultData, SearchContext, SearchOverlay, StaticIndexFile};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// Re-export canonical test utilities from docsearch::testing
pub use docsearch::testing::{
    button_result, sample_pages, NavigationLog, Scripted, ScriptedIndex, ScriptedLoader,
};

// ============================================================================
// CONTROLLER HARNESS
// ============================================================================

/// A context wired to a scripted index, plus a navigation log.
pub struct Harness {
    pub ctx: Arc<SearchContext>,
    pub loader: Arc<ScriptedLoader>,
    pub index: Arc<ScriptedIndex>,
    pub nav: NavigationLog,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(OverlayConfig::default(), 0, Duration::ZERO)
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        Self::build(config, 0, Duration::ZERO)
    }

    /// The first `n` index loads fail.
    pub fn failing_loads(n: usize) -> Self {
        Self::build(OverlayConfig::default(), n, Duration::ZERO)
    }

    /// Every index load takes `delay`.
    pub fn slow_load(delay: Duration) -> Self {
        Self::build(OverlayConfig::default(), 0, delay)
    }

    fn build(config: OverlayConfig, failing_loads: usize, load_delay: Duration) -> Self {
        let index = Arc::new(ScriptedIndex::new());
        let loader = ScriptedLoader::new(Arc::clone(&index))
            .failing_first(failing_loads)
            .with_delay(load_delay);
        let loader = Arc::new(loader);
        let ctx = SearchContext::new(config, loader.clone());
        Self {
            ctx,
            loader,
            index,
            nav: NavigationLog::new(),
        }
    }

    /// Mount with the sample navigation tree.
    pub fn mount(&self) -> SearchOverlay {
        self.mount_with_pages(sample_pages())
    }

    pub fn mount_with_pages(&self, pages: Vec<PageEntry>) -> SearchOverlay {
        SearchOverlay::mount(Arc::clone(&self.ctx), pages, self.nav.callback())
    }
}

/// Open the dialog, type `query`, and wait for its search to commit.
pub async fn type_and_wait(overlay: &SearchOverlay, query: &str) {
    if !overlay.is_open() {
        overlay.open();
    }
    if let Some(task) = overlay.set_query(query) {
        task.await.expect("search task panicked");
    }
}

// ============================================================================
// STATIC SITE FIXTURES
// ============================================================================

/// Write `search/index.json` plus one fragment per entry under `site`.
pub fn write_site(site: &Path, pages: &[(&str, &str, ResultData)]) {
    let search_dir = site.join("search");
    fs::create_dir_all(search_dir.join("fragments")).unwrap();

    let mut entries = Vec::new();
    for (id, terms, data) in pages {
        let fragment = format!("fragments/{}.json", id);
        fs::write(search_dir.join(&fragment), serde_json::to_string(data).unwrap()).unwrap();
        entries.push(IndexEntry {
            id: id.to_string(),
            terms: terms.to_string(),
            fragment,
        });
    }

    let file = StaticIndexFile {
        version: docsearch::index::INDEX_VERSION,
        entries,
    };
    fs::write(search_dir.join("index.json"), serde_json::to_string_pretty(&file).unwrap()).unwrap();
}
