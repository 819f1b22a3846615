// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query → results, one keystroke at a time.
//!
//! Every query change starts a new search routine. Routines are never
//! aborted; a slow search for `"bu"` keeps running after the user has typed
//! `"button"`. What stops it from clobbering the screen is the
//! [`SearchToken`]: each routine gets one from the [`SearchScheduler`], and
//! issuing a new token makes every older token stale. The routine checks its
//! token after each suspension point and bails quietly when stale. The
//! controller checks it one final time, under its state lock, before
//! committing.
//!
//! ```text
//!   set_query("bu")      ─ token 1 ─┐
//!   set_query("button")  ─ token 2 ─┼─┐
//!                                   │ │   token 1 resolves last
//!                                   ▼ ▼
//!                         stale, dropped   committed
//! ```
//!
//! # Suspension points
//!
//! 1. optional controller-side debounce
//! 2. lazy index load
//! 3. `debounced_search`
//! 4. concurrent `data()` resolution of every ranked result

use futures::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SearchFailure;
use crate::index::IndexSlot;
use crate::types::ResultData;

/// Issues search tokens. Issuing or invalidating supersedes every token
/// handed out before.
#[derive(Debug, Default, Clone)]
pub struct SearchScheduler {
    generation: Arc<AtomicU64>,
}

impl SearchScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its token.
    pub fn issue(&self) -> SearchToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchToken {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Make every outstanding token stale without issuing a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Cancellation token for one search routine.
#[derive(Debug, Clone)]
pub struct SearchToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl SearchToken {
    /// True until a newer token is issued or the scheduler is invalidated.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a non-stale search routine produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<ResultData>),
    Failed(SearchFailure),
}

/// Run one search routine to completion.
///
/// Returns `None` as soon as the token goes stale. Never returns an error:
/// failures become [`SearchOutcome::Failed`] with a user-facing message.
/// Result URLs are normalized before they leave this function.
pub async fn execute(
    slot: &IndexSlot,
    query: &str,
    token: &SearchToken,
    debounce: Duration,
) -> Option<SearchOutcome> {
    if !debounce.is_zero() {
        tokio::time::sleep(debounce).await;
        if !token.is_current() {
            return None;
        }
    }

    let client = match slot.ensure_loaded().await {
        Ok(client) => client,
        Err(err) => {
            if !token.is_current() {
                return None;
            }
            tracing::warn!(query, error = %err, "index load failed");
            return Some(SearchOutcome::Failed(SearchFailure::IndexLoad));
        }
    };
    if !token.is_current() {
        return None;
    }

    let response = match client.debounced_search(query).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            if !token.is_current() {
                return None;
            }
            tracing::debug!(query, "index returned no response");
            return Some(SearchOutcome::Results(Vec::new()));
        }
        Err(err) => {
            if !token.is_current() {
                return None;
            }
            tracing::warn!(query, error = %err, "search call failed");
            return Some(SearchOutcome::Failed(SearchFailure::Search));
        }
    };
    if !token.is_current() {
        return None;
    }

    let resolved = try_join_all(response.results.iter().map(|r| r.data())).await;
    if !token.is_current() {
        return None;
    }

    match resolved {
        Ok(results) => {
            let results = results.into_iter().map(ResultData::normalized).collect();
            Some(SearchOutcome::Results(results))
        }
        Err(err) => {
            tracing::warn!(query, error = %err, "result data failed to resolve");
            Some(SearchOutcome::Failed(SearchFailure::Search))
        }
    }
}
