// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for excerpt highlighting.
//!
//! Both the excerpt and the query are untrusted: excerpts come from whatever
//! HTML the docs build emitted, queries from whatever the user typed. Regex
//! metacharacters, unbalanced tags, multi-byte characters at the truncation
//! boundary. None of it may panic, and the text must come out unaltered.

#![no_main]

use arbitrary::Arbitrary;
use docsearch::util::highlight::{prepare_excerpt, ELLIPSIS};
use docsearch::Highlighter;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    excerpt: &'a str,
    query: &'a str,
    limit: u8,
}

fuzz_target!(|input: Input<'_>| {
    let highlighter = Highlighter::new(input.query);

    // INVARIANT: highlighting is lossless
    let highlighted = highlighter.highlight(input.excerpt);
    assert_eq!(highlighted.text(), input.excerpt);

    // INVARIANT: a non-empty query never produces an empty mark
    if !input.query.is_empty() {
        for mark in highlighted.marks() {
            assert!(!mark.is_empty());
        }
    }

    // INVARIANT: excerpt spans agree with the plain excerpt
    let limit = usize::from(input.limit);
    let excerpt = highlighter.excerpt(input.excerpt, limit);
    let plain = prepare_excerpt(input.excerpt, limit);
    assert_eq!(excerpt.text(), plain);
    if !plain.is_empty() {
        assert!(plain.ends_with(ELLIPSIS));
        assert!(plain.chars().count() <= limit + ELLIPSIS.len());
    }
});
