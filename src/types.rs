// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows through the overlay.
//!
//! Two sources feed the controller. The host hands over a flat list of
//! [`PageEntry`] values (crawled from its navigation tree) which become the
//! welcome list. The search index client hands back [`ResultData`] values,
//! each a page with per-section [`SubResult`] excerpts.
//!
//! Everything optional on the wire is optional here too, but defaulted on
//! deserialize. An index built by an older toolchain that omits `excerpt`
//! or `sub_results` still loads; it just renders less.
//!
//! # Invariants
//!
//! - **SubResult URLs are routable**: the host router doesn't serve `.html`
//!   suffixes, so every URL that reaches the navigation callback has gone
//!   through [`normalize_result_url`](crate::util::url::normalize_result_url).
//!   [`ResultData::normalized`] is the one place that happens.

use serde::{Deserialize, Serialize};

use crate::util::url::normalize_result_url;

/// One navigable documentation page, supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub title: String,
    pub url: String,
    /// Breadcrumb shown next to the title (e.g. "Components").
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PageEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            parent: None,
            description: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Page-level metadata attached to a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    #[serde(default)]
    pub title: String,
}

/// A section-level hit inside a result page.
///
/// `excerpt` comes straight from the index and may carry `<mark>` or other
/// inline markup. The view strips it before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub url: String,
}

impl SubResult {
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            url: url.into(),
        }
    }
}

/// Fully resolved payload of one ranked result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultData {
    pub url: String,
    #[serde(default)]
    pub meta: ResultMeta,
    #[serde(default)]
    pub sub_results: Vec<SubResult>,
}

impl ResultData {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            meta: ResultMeta {
                title: title.into(),
            },
            sub_results: Vec::new(),
        }
    }

    pub fn with_sub_result(mut self, sub: SubResult) -> Self {
        self.sub_results.push(sub);
        self
    }

    /// Rewrite every URL into the router's extensionless form.
    pub fn normalized(mut self) -> Self {
        self.url = normalize_result_url(&self.url);
        for sub in &mut self.sub_results {
            sub.url = normalize_result_url(&sub.url);
        }
        self
    }
}
