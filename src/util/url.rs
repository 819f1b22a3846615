// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! URL normalization for search results.
//!
//! Static site generators emit `button.html`; the docs router serves
//! `/docs/button`. The index carries the former, the navigation callback
//! needs the latter.

/// Strip the `.html` extension from the path part of a result URL.
///
/// Query and fragment are left alone, so an anchor that happens to end in
/// `.html` is not mangled:
///
/// - `/docs/button.html` → `/docs/button`
/// - `/docs/button.html#usage` → `/docs/button#usage`
/// - `/docs/button` → `/docs/button`
///
/// Idempotent: every trailing `.html` is removed at once, so the output
/// never ends its path in `.html` and a second pass is a no-op.
pub fn normalize_result_url(url: &str) -> String {
    let split = url.find(['#', '?']).unwrap_or(url.len());
    let (path, rest) = url.split_at(split);
    let path = path.trim_end_matches(".html");

    let mut out = String::with_capacity(path.len() + rest.len());
    out.push_str(path);
    out.push_str(rest);
    out
}

/// Prefix a root-relative URL with the configured base path.
///
/// Absolute URLs (`https://…`) and relative URLs pass through untouched.
/// A base of `/` or `""` is the identity.
pub fn join_base_url(base: &str, url: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || !url.starts_with('/') || url.starts_with("//") {
        return url.to_string();
    }
    if url == base || url.starts_with(&format!("{}/", base)) {
        return url.to_string();
    }
    format!("{}{}", base, url)
}
