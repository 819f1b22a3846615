//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides a scripted index client with controllable latency and
//! failures, so controller behavior can be tested without a real index.

#![doc(hidden)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::IndexError;
use crate::index::{
    ClientOptions, IndexLoader, RankedResult, ResultSource, SearchIndexClient, SearchResponse,
};
use crate::overlay::Navigate;
use crate::types::{PageEntry, ResultData, SubResult};

#[derive(Debug, Clone)]
enum Reply {
    Results(Vec<ResultData>),
    Null,
    Fail,
    BrokenFragment,
}

/// Canned reply for one query.
#[derive(Debug, Clone)]
pub struct Scripted {
    delay: Duration,
    data_delay: Duration,
    reply: Reply,
}

impl Scripted {
    pub fn results(results: Vec<ResultData>) -> Self {
        Self {
            delay: Duration::ZERO,
            data_delay: Duration::ZERO,
            reply: Reply::Results(results),
        }
    }

    /// The client produces no response object.
    pub fn null() -> Self {
        Self {
            delay: Duration::ZERO,
            data_delay: Duration::ZERO,
            reply: Reply::Null,
        }
    }

    /// `debounced_search` itself errors.
    pub fn fail() -> Self {
        Self {
            delay: Duration::ZERO,
            data_delay: Duration::ZERO,
            reply: Reply::Fail,
        }
    }

    /// Search succeeds but one result's `data()` errors.
    pub fn broken_fragment() -> Self {
        Self {
            delay: Duration::ZERO,
            data_delay: Duration::ZERO,
            reply: Reply::BrokenFragment,
        }
    }

    /// Resolve after `delay` instead of immediately.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Each result's `data()` resolves after `delay`; the search itself is
    /// unaffected.
    pub fn data_after(mut self, delay: Duration) -> Self {
        self.data_delay = delay;
        self
    }
}

/// Index client answering from a per-query script.
///
/// Unscripted queries resolve immediately with zero results.
#[derive(Default)]
pub struct ScriptedIndex {
    scripts: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<String>>,
    base_url: Mutex<Option<String>>,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, query: &str, scripted: Scripted) {
        self.scripts.lock().insert(query.to_string(), scripted);
    }

    /// Queries that reached `debounced_search`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn configured_base_url(&self) -> Option<String> {
        self.base_url.lock().clone()
    }
}

struct Ready {
    data: ResultData,
    delay: Duration,
}

#[async_trait]
impl ResultSource for Ready {
    async fn data(&self) -> Result<ResultData, IndexError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.data.clone())
    }
}

struct Broken;

#[async_trait]
impl ResultSource for Broken {
    async fn data(&self) -> Result<ResultData, IndexError> {
        Err(IndexError::NotFound(PathBuf::from("search/fragments/missing.json")))
    }
}

#[async_trait]
impl SearchIndexClient for ScriptedIndex {
    async fn options(&self, options: ClientOptions) -> Result<(), IndexError> {
        *self.base_url.lock() = Some(options.base_url);
        Ok(())
    }

    async fn debounced_search(&self, query: &str) -> Result<Option<SearchResponse>, IndexError> {
        self.calls.lock().push(query.to_string());
        let scripted = self
            .scripts
            .lock()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Scripted::results(Vec::new()));

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        match scripted.reply {
            Reply::Results(results) => Ok(Some(SearchResponse {
                results: results
                    .into_iter()
                    .enumerate()
                    .map(|(i, data)| {
                        let source = Ready {
                            data,
                            delay: scripted.data_delay,
                        };
                        RankedResult::new(format!("r{}", i), Arc::new(source))
                    })
                    .collect(),
            })),
            Reply::Null => Ok(None),
            Reply::Fail => Err(IndexError::Request(format!("scripted failure for {:?}", query))),
            Reply::BrokenFragment => Ok(Some(SearchResponse {
                results: vec![
                    RankedResult::new(
                        "ok",
                        Arc::new(Ready {
                            data: ResultData::new("/ok", "Ok"),
                            delay: scripted.data_delay,
                        }),
                    ),
                    RankedResult::new("broken", Arc::new(Broken)),
                ],
            })),
        }
    }
}

/// Loader that hands out a shared [`ScriptedIndex`].
pub struct ScriptedLoader {
    index: Arc<ScriptedIndex>,
    failures_left: AtomicUsize,
    loads: AtomicUsize,
    delay: Duration,
}

impl ScriptedLoader {
    pub fn new(index: Arc<ScriptedIndex>) -> Self {
        Self {
            index,
            failures_left: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Fail the first `n` load attempts.
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn index(&self) -> &Arc<ScriptedIndex> {
        &self.index
    }
}

#[async_trait]
impl IndexLoader for ScriptedLoader {
    async fn load(&self) -> Result<Arc<dyn SearchIndexClient>, IndexError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(IndexError::NotFound(PathBuf::from("search/index.json")));
        }
        Ok(Arc::clone(&self.index) as Arc<dyn SearchIndexClient>)
    }
}

/// Records every URL passed to the navigation callback.
#[derive(Clone, Default)]
pub struct NavigationLog {
    urls: Arc<Mutex<Vec<String>>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> Navigate {
        let urls = Arc::clone(&self.urls);
        Arc::new(move |url: &str| urls.lock().push(url.to_string()))
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

/// A small docs navigation tree.
pub fn sample_pages() -> Vec<PageEntry> {
    vec![
        PageEntry::new("Introduction", "/docs"),
        PageEntry::new("Installation", "/docs/installation").with_parent("Getting Started"),
        PageEntry::new("Button", "/docs/components/button")
            .with_parent("Components")
            .with_description("Displays a button or a component that looks like a button."),
        PageEntry::new("Dialog", "/docs/components/dialog").with_parent("Components"),
    ]
}

/// A result page for the Button docs with two sections.
pub fn button_result() -> ResultData {
    ResultData::new("/docs/components/button.html", "Button")
        .with_sub_result(SubResult::new(
            "Button",
            "Displays a <mark>button</mark> or a component that looks like a button.",
            "/docs/components/button.html",
        ))
        .with_sub_result(SubResult::new(
            "Usage",
            "Import the <mark>Button</mark> component and render it.",
            "/docs/components/button.html#usage",
        ))
}
