// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Overlay configuration.
//!
//! One JSON file, camelCase keys, every field optional. An empty object is a
//! valid config and gives you the defaults a docs site would ship with.
//!
//! ```json
//! {
//!   "baseUrl": "/ui",
//!   "indexPath": "search/index.json",
//!   "excerptLimit": 100,
//!   "claimPolicy": "first-mount-wins"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::overlay::keyboard::Platform;
use crate::runtime::registry::ClaimPolicy;
use crate::util::highlight::DEFAULT_EXCERPT_LIMIT;

/// Default location of the index file, relative to the site root.
pub const DEFAULT_INDEX_PATH: &str = "search/index.json";

/// Default debounce applied inside the static index client.
pub const DEFAULT_CLIENT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Base path handed to the index client's one-time `options` call.
    pub base_url: String,
    /// Index file location, relative to the site root.
    pub index_path: String,
    /// Trigger placeholder text.
    pub placeholder: String,
    /// Excerpt length in characters before the ellipsis.
    pub excerpt_limit: usize,
    /// Extra debounce in the controller before touching the index.
    /// Zero disables it; the index client debounces on its own.
    pub query_debounce_ms: u64,
    /// Debounce used by the static index client.
    pub client_debounce_ms: u64,
    pub claim_policy: ClaimPolicy,
    pub platform: Platform,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            placeholder: "Search documentation...".to_string(),
            excerpt_limit: DEFAULT_EXCERPT_LIMIT,
            query_debounce_ms: 0,
            client_debounce_ms: DEFAULT_CLIENT_DEBOUNCE_MS,
            claim_policy: ClaimPolicy::default(),
            platform: Platform::current(),
        }
    }
}

impl OverlayConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: OverlayConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excerpt_limit == 0 {
            return Err(ConfigError::Invalid(
                "excerptLimit must be greater than zero".to_string(),
            ));
        }
        if self.index_path.trim().is_empty() {
            return Err(ConfigError::Invalid("indexPath must not be empty".to_string()));
        }
        // Index clients reject anything else in `options`, which would surface
        // only as a load failure on the first search.
        if !self.base_url.is_empty() && !self.base_url.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "baseUrl must be root-relative, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn query_debounce(&self) -> Duration {
        Duration::from_millis(self.query_debounce_ms)
    }

    pub fn client_debounce(&self) -> Duration {
        Duration::from_millis(self.client_debounce_ms)
    }
}
