// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A search index client backed by static files.
//!
//! The docs build writes two kinds of artifacts next to the site output:
//!
//! ```text
//! <site>/search/index.json          entry list: id, match terms, fragment path
//! <site>/search/fragments/*.json    one ResultData per page
//! ```
//!
//! Loading reads only `index.json`. Fragments are read lazily, one per
//! result, when the controller resolves `data()`. Ranking is whatever order
//! the build step wrote entries in; this client only filters.
//!
//! Debouncing follows the usual browser search-client contract: every call
//! takes a ticket, waits out the debounce window, and gives up with
//! `Ok(None)` if a newer call took a ticket in the meantime. Only the last
//! keystroke in a burst reaches the index.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{ClientOptions, IndexLoader, RankedResult, ResultSource, SearchIndexClient, SearchResponse};
use crate::config::OverlayConfig;
use crate::error::IndexError;
use crate::types::ResultData;
use crate::util::url::join_base_url;

/// Index file format version this client understands.
pub const INDEX_VERSION: u32 = 1;

/// On-disk shape of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticIndexFile {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    /// Searchable text for this page (title, headings, body).
    #[serde(default)]
    pub terms: String,
    /// Fragment path, relative to the directory holding `index.json`.
    pub fragment: String,
}

/// Loads a [`StaticIndexClient`] from a site directory.
#[derive(Debug, Clone)]
pub struct StaticIndexLoader {
    site_root: PathBuf,
    index_path: PathBuf,
    debounce: Duration,
}

impl StaticIndexLoader {
    pub fn new(site_root: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            index_path: index_path.into(),
            debounce: Duration::from_millis(crate::config::DEFAULT_CLIENT_DEBOUNCE_MS),
        }
    }

    pub fn from_config(site_root: impl Into<PathBuf>, config: &OverlayConfig) -> Self {
        Self::new(site_root, &config.index_path).with_debounce(config.client_debounce())
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn index_file(&self) -> PathBuf {
        self.site_root.join(&self.index_path)
    }
}

#[async_trait]
impl IndexLoader for StaticIndexLoader {
    async fn load(&self) -> Result<Arc<dyn SearchIndexClient>, IndexError> {
        let path = self.index_file();
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(IndexError::NotFound(path));
            }
            Err(source) => return Err(IndexError::Io { path, source }),
        };
        let file: StaticIndexFile = serde_json::from_str(&raw)
            .map_err(|source| IndexError::Parse {
                path: path.clone(),
                source,
            })?;
        if file.version != INDEX_VERSION {
            return Err(IndexError::Version {
                found: file.version,
                expected: INDEX_VERSION,
            });
        }

        let fragment_root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let client = StaticIndexClient::new(file, fragment_root, self.debounce);
        tracing::debug!(entries = client.len(), path = %path.display(), "static index parsed");
        Ok(Arc::new(client))
    }
}

struct PreparedEntry {
    id: String,
    terms: String,
    fragment: PathBuf,
}

/// In-memory entry list plus lazy fragment reads.
pub struct StaticIndexClient {
    entries: Vec<PreparedEntry>,
    base_url: Arc<RwLock<String>>,
    debounce: Duration,
    latest_ticket: AtomicU64,
}

impl StaticIndexClient {
    pub fn new(file: StaticIndexFile, fragment_root: PathBuf, debounce: Duration) -> Self {
        let entries = file
            .entries
            .into_iter()
            .filter_map(|entry| {
                if !is_contained(Path::new(&entry.fragment)) {
                    tracing::warn!(id = %entry.id, fragment = %entry.fragment, "skipping entry with unsafe fragment path");
                    return None;
                }
                Some(PreparedEntry {
                    fragment: fragment_root.join(&entry.fragment),
                    terms: entry.terms.to_lowercase(),
                    id: entry.id,
                })
            })
            .collect();

        Self {
            entries,
            base_url: Arc::new(RwLock::new("/".to_string())),
            debounce,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filter without debouncing. Every whitespace-separated query word must
    /// appear in the entry's terms, case-insensitively.
    pub fn search_now(&self, query: &str) -> SearchResponse {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return SearchResponse::default();
        }

        let results = self
            .entries
            .iter()
            .filter(|entry| words.iter().all(|w| entry.terms.contains(w.as_str())))
            .map(|entry| {
                let source = FragmentSource {
                    path: entry.fragment.clone(),
                    base_url: Arc::clone(&self.base_url),
                };
                RankedResult::new(entry.id.clone(), Arc::new(source))
            })
            .collect();

        SearchResponse { results }
    }
}

#[async_trait]
impl SearchIndexClient for StaticIndexClient {
    async fn options(&self, options: ClientOptions) -> Result<(), IndexError> {
        let base = options.base_url;
        if !base.is_empty() && !base.starts_with('/') {
            return Err(IndexError::Options(format!(
                "baseUrl must be root-relative, got {:?}",
                base
            )));
        }
        *self.base_url.write() = base;
        Ok(())
    }

    async fn debounced_search(&self, query: &str) -> Result<Option<SearchResponse>, IndexError> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return Ok(None);
            }
        }
        Ok(Some(self.search_now(query)))
    }
}

struct FragmentSource {
    path: PathBuf,
    base_url: Arc<RwLock<String>>,
}

#[async_trait]
impl ResultSource for FragmentSource {
    async fn data(&self) -> Result<ResultData, IndexError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IndexError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut data: ResultData = serde_json::from_str(&raw).map_err(|source| IndexError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let base = self.base_url.read().clone();
        data.url = join_base_url(&base, &data.url);
        for sub in &mut data.sub_results {
            sub.url = join_base_url(&base, &sub.url);
        }
        Ok(data)
    }
}

/// Relative path that stays inside its root.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
