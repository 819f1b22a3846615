// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search index client, and how it gets loaded.
//!
//! The index is a build artifact the overlay doesn't own. It might be large,
//! it might not exist yet (first request after a fresh deploy), and nobody
//! should pay for it until they actually type something. So the controller
//! never holds a client directly. It holds an [`IndexSlot`], which holds an
//! injected [`IndexLoader`], and the first search asks the slot to produce
//! a client.
//!
//! ```text
//! ┌──────────────┐  ensure_loaded  ┌──────────────┐  load + options  ┌────────────────────┐
//! │  controller  │ ──────────────▶ │  IndexSlot   │ ───────────────▶ │ dyn IndexLoader    │
//! └──────────────┘                 │ NotLoaded    │                  └────────────────────┘
//!                                  │ Loaded(c) ◀──┼──────────────────── Arc<dyn SearchIndexClient>
//!                                  │ Failed(msg)  │
//!                                  └──────────────┘
//! ```
//!
//! Results are two-stage as well. [`SearchIndexClient::debounced_search`]
//! returns cheap [`RankedResult`] handles; the full [`ResultData`] (title,
//! sub-results, excerpts) is fetched per handle through `data()`. The
//! controller resolves all handles concurrently.

#[cfg(not(target_arch = "wasm32"))]
pub mod static_index;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::IndexError;
use crate::types::ResultData;

#[cfg(not(target_arch = "wasm32"))]
pub use static_index::{StaticIndexClient, StaticIndexFile, StaticIndexLoader, INDEX_VERSION};

/// Options passed once to a freshly loaded client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: String,
}

/// Deferred payload of a single ranked result.
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn data(&self) -> Result<ResultData, IndexError>;
}

/// A ranked hit whose payload has not been fetched yet.
#[derive(Clone)]
pub struct RankedResult {
    pub id: String,
    source: Arc<dyn ResultSource>,
}

impl RankedResult {
    pub fn new(id: impl Into<String>, source: Arc<dyn ResultSource>) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    pub async fn data(&self) -> Result<ResultData, IndexError> {
        self.source.data().await
    }
}

impl fmt::Debug for RankedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedResult").field("id", &self.id).finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub results: Vec<RankedResult>,
}

/// A loaded search index.
#[async_trait]
pub trait SearchIndexClient: Send + Sync {
    /// One-time configuration, called by the slot right after loading.
    async fn options(&self, options: ClientOptions) -> Result<(), IndexError>;

    /// Search with the client's own debouncing.
    ///
    /// `Ok(None)` means no response could be produced (superseded by a newer
    /// call, or the index isn't ready). Callers treat it as zero results.
    async fn debounced_search(&self, query: &str) -> Result<Option<SearchResponse>, IndexError>;
}

/// Produces a search index client on demand.
#[async_trait]
pub trait IndexLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SearchIndexClient>, IndexError>;
}

/// Observable load state of an [`IndexSlot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded,
    /// Last attempt failed. The next `ensure_loaded` retries.
    Failed(String),
}

enum LoadState {
    NotLoaded,
    Loaded(Arc<dyn SearchIndexClient>),
    Failed(String),
}

/// Process-wide holder for the lazily loaded client.
///
/// Shared by every overlay instance through the
/// [`SearchContext`](crate::runtime::SearchContext). The async mutex is held
/// across the load, so concurrent first searches wait for one load instead
/// of racing several.
pub struct IndexSlot {
    loader: Arc<dyn IndexLoader>,
    base_url: String,
    state: Mutex<LoadState>,
}

impl IndexSlot {
    pub fn new(loader: Arc<dyn IndexLoader>, base_url: impl Into<String>) -> Self {
        Self {
            loader,
            base_url: base_url.into(),
            state: Mutex::new(LoadState::NotLoaded),
        }
    }

    /// Return the loaded client, loading and configuring it first if needed.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn SearchIndexClient>, IndexError> {
        let mut state = self.state.lock().await;
        if let LoadState::Loaded(client) = &*state {
            return Ok(Arc::clone(client));
        }

        match self.load_and_configure().await {
            Ok(client) => {
                tracing::info!(base_url = %self.base_url, "search index loaded");
                *state = LoadState::Loaded(Arc::clone(&client));
                Ok(client)
            }
            Err(err) => {
                tracing::warn!(error = %err, "search index failed to load");
                *state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn load_and_configure(&self) -> Result<Arc<dyn SearchIndexClient>, IndexError> {
        let client = self.loader.load().await?;
        client
            .options(ClientOptions {
                base_url: self.base_url.clone(),
            })
            .await?;
        Ok(client)
    }

    pub async fn status(&self) -> LoadStatus {
        match &*self.state.lock().await {
            LoadState::NotLoaded => LoadStatus::NotLoaded,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed(msg) => LoadStatus::Failed(msg.clone()),
        }
    }

    /// Drop any cached client. The next search loads from scratch.
    pub async fn reset(&self) {
        *self.state.lock().await = LoadState::NotLoaded;
    }
}
