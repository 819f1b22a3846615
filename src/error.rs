// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two audiences. [`IndexError`] and [`ConfigError`] are for developers: they
//! carry paths and causes and end up in logs. [`SearchFailure`] is for the
//! person typing into the dialog: two short sentences, no stack traces.
//! The controller converts the former into the latter at the boundary of the
//! search routine and nothing propagates further.

use std::path::PathBuf;
use thiserror::Error;

/// Failures from loading or querying a search index client.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("search index not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported index version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("index client rejected options: {0}")]
    Options(String),

    #[error("search request failed: {0}")]
    Request(String),
}

/// What the user sees when a search cannot complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchFailure {
    #[error("Failed to load search index.")]
    IndexLoad,

    #[error("Search failed.")]
    Search,
}

/// Problems reading an overlay configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
