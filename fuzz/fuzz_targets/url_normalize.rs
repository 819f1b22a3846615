// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for result URL normalization.

#![no_main]

use docsearch::normalize_result_url;
use docsearch::util::url::join_base_url;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|url: &str| {
    let once = normalize_result_url(url);

    // INVARIANT: idempotent
    assert_eq!(normalize_result_url(&once), once);

    // INVARIANT: only `.html` is ever removed, and only before '#' or '?'
    assert!(once.len() <= url.len());
    let split = url.find(['#', '?']).unwrap_or(url.len());
    assert!(once.ends_with(&url[split..]));

    // Base joining never panics and never double-prefixes
    let joined = join_base_url("/docs", &once);
    assert_eq!(join_base_url("/docs", &joined), joined);
});
