// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Excerpt cleanup and match highlighting.
//!
//! Index excerpts arrive as HTML fragments. Before display they are stripped
//! of tags, cut to a fixed number of characters, and then every occurrence of
//! the query is marked. The marking is deliberately dumb: literal substring,
//! case-insensitive, leftmost-first, non-overlapping. No stemming, no
//! tokenizing, no fuzzy. Whatever ranking cleverness exists lives in the
//! index; this only shows the user where their exact keystrokes landed.
//!
//! The query is user input, so it gets `regex::escape`d before it becomes a
//! pattern. Typing `a.b` or `(` must match those characters, not explode.
//!
//! Output is a span list rather than a string with markers baked in, so each
//! host decides how a mark looks (`<mark>` in the browser, bold yellow in a
//! terminal).

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;

/// Appended to every non-empty excerpt after truncation.
pub const ELLIPSIS: &str = "...";

/// Default excerpt length, in characters.
pub const DEFAULT_EXCERPT_LIMIT: usize = 100;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// A run of text, either plain or matching the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Mark(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(s) | Span::Mark(s) => s,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Span::Mark(_))
    }
}

/// Text split into plain and marked spans.
///
/// Concatenating the spans always reproduces the input text exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Highlighted {
    spans: Vec<Span>,
}

impl Highlighted {
    pub fn plain(text: impl Into<String>) -> Self {
        let mut out = Self::default();
        out.push_text(&text.into());
        out
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The underlying text with all marks removed.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::as_str).collect()
    }

    /// The marked substrings, in order.
    pub fn marks(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().filter(|s| s.is_mark()).map(Span::as_str)
    }

    pub fn has_marks(&self) -> bool {
        self.spans.iter().any(Span::is_mark)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Render with `<mark>` tags around each match.
    ///
    /// The text itself is not escaped: excerpts have already been stripped
    /// of tags and any entities in them are left as the index wrote them.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text(s) => out.push_str(s),
                Span::Mark(s) => {
                    out.push_str("<mark>");
                    out.push_str(s);
                    out.push_str("</mark>");
                }
            }
        }
        out
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Span::Text(last)) = self.spans.last_mut() {
            last.push_str(text);
        } else {
            self.spans.push(Span::Text(text.to_string()));
        }
    }

    fn push_mark(&mut self, text: &str) {
        if !text.is_empty() {
            self.spans.push(Span::Mark(text.to_string()));
        }
    }
}

/// Compiled query pattern, built once per view and reused for every item.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a highlighter for `query`. An empty query marks nothing.
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self { pattern: None };
        }
        // A pathological query can blow the regex size limit; fall back to
        // plain text rather than failing the whole view.
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok();
        Self { pattern }
    }

    pub fn highlight(&self, text: &str) -> Highlighted {
        let Some(pattern) = &self.pattern else {
            return Highlighted::plain(text);
        };

        let mut out = Highlighted::default();
        let mut cursor = 0;
        for m in pattern.find_iter(text) {
            out.push_text(&text[cursor..m.start()]);
            out.push_mark(m.as_str());
            cursor = m.end();
        }
        out.push_text(&text[cursor..]);
        out
    }

    /// Strip, truncate, highlight, then append the ellipsis.
    ///
    /// The ellipsis is appended after highlighting so a query containing
    /// dots can never mark it.
    pub fn excerpt(&self, raw: &str, limit: usize) -> Highlighted {
        let stripped = strip_html(raw);
        let truncated = truncate_chars(&stripped, limit);
        if truncated.is_empty() {
            return Highlighted::default();
        }
        let mut out = self.highlight(truncated);
        out.push_text(ELLIPSIS);
        out
    }
}

/// Highlight every case-insensitive literal occurrence of `query` in `text`.
pub fn highlight(text: &str, query: &str) -> Highlighted {
    Highlighter::new(query).highlight(text)
}

/// Remove anything that looks like an HTML tag.
pub fn strip_html(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// The first `limit` characters of `text` (not bytes).
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Plain-text excerpt as shown before highlighting: stripped, truncated,
/// ellipsis appended. Empty excerpts stay empty.
pub fn prepare_excerpt(raw: &str, limit: usize) -> String {
    let stripped = strip_html(raw);
    let truncated = truncate_chars(&stripped, limit);
    if truncated.is_empty() {
        return String::new();
    }
    format!("{}{}", truncated, ELLIPSIS)
}
