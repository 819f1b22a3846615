// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly exports for browser hosts.
//!
//! The browser owns the dialog, the router and the index client; what it
//! borrows from Rust is the text handling, so highlighting in the browser
//! and in the terminal never drift apart.
//!
//! ```js
//! const url = normalizeResultUrl(sub.url);
//! const spans = highlightMatches(prepareExcerpt(sub.excerpt, 100), query);
//! // spans: [{kind: "text", text: "..."}, {kind: "mark", text: "..."}]
//! ```

use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::util::highlight::{self, Highlighter};
use crate::util::url;

/// Strip `.html` from a result URL's path.
#[wasm_bindgen(js_name = normalizeResultUrl)]
pub fn normalize_result_url(url: &str) -> String {
    url::normalize_result_url(url)
}

/// Strip tags, cut to `limit` characters and append an ellipsis.
#[wasm_bindgen(js_name = prepareExcerpt)]
pub fn prepare_excerpt(excerpt: &str, limit: usize) -> String {
    highlight::prepare_excerpt(excerpt, limit)
}

/// Split `text` into plain and marked spans for `query`.
#[wasm_bindgen(js_name = highlightMatches)]
pub fn highlight_matches(text: &str, query: &str) -> Result<JsValue, JsValue> {
    let spans = Highlighter::new(query).highlight(text);
    to_value(&spans).map_err(|e| JsValue::from_str(&e.to_string()))
}
