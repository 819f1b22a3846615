// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What the overlay shows, as plain data.
//!
//! The controller never draws. It hands the host a [`Rendered`] value: a
//! trigger, and when open a dialog whose [`ContentView`] is picked by
//! [`view_kind`] in strict priority order:
//!
//! | # | Condition             | View      |
//! |---|-----------------------|-----------|
//! | 1 | query is empty        | Welcome   |
//! | 2 | error message present | Error     |
//! | 3 | loading               | Loading   |
//! | 4 | no results            | Empty     |
//! | 5 | otherwise             | Results   |
//!
//! Everything here serializes, so a browser host can take the JSON as-is.

use serde::Serialize;

use crate::types::{PageEntry, ResultData};
use crate::util::highlight::{Highlighted, Highlighter};

pub const WELCOME_HEADING: &str = "Pages";
pub const LOADING_LABEL: &str = "Searching...";
pub const EMPTY_LABEL: &str = "No results found.";

/// The always-visible button that opens the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub placeholder: String,
    pub shortcut_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageItem {
    pub title: String,
    pub parent: Option<String>,
    pub description: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageGroup {
    pub heading: String,
    pub items: Vec<PageItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: Highlighted,
    pub excerpt: Highlighted,
    /// Already normalized; this is what navigation receives.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    pub heading: String,
    pub items: Vec<ResultItem>,
}

/// Which branch of the content state machine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Welcome,
    Error,
    Loading,
    Empty,
    Results,
}

/// Pick the content branch. First matching row of the table wins.
pub fn view_kind(
    query: &str,
    error_message: Option<&str>,
    is_loading: bool,
    result_count: usize,
) -> ViewKind {
    if query.is_empty() {
        ViewKind::Welcome
    } else if error_message.is_some() {
        ViewKind::Error
    } else if is_loading {
        ViewKind::Loading
    } else if result_count == 0 {
        ViewKind::Empty
    } else {
        ViewKind::Results
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "content", rename_all = "lowercase")]
pub enum ContentView {
    /// `None` when the host supplied no pages: nothing is drawn, not even
    /// the heading.
    Welcome(Option<PageGroup>),
    Error(String),
    Loading,
    Empty,
    Results(Vec<ResultGroup>),
}

impl ContentView {
    pub fn kind(&self) -> ViewKind {
        match self {
            ContentView::Welcome(_) => ViewKind::Welcome,
            ContentView::Error(_) => ViewKind::Error,
            ContentView::Loading => ViewKind::Loading,
            ContentView::Empty => ViewKind::Empty,
            ContentView::Results(_) => ViewKind::Results,
        }
    }

    /// Destinations in display order. The keyboard cursor indexes this.
    pub fn selectable_urls(&self) -> Vec<&str> {
        match self {
            ContentView::Welcome(Some(group)) => {
                group.items.iter().map(|item| item.url.as_str()).collect()
            }
            ContentView::Results(groups) => groups
                .iter()
                .flat_map(|group| group.items.iter().map(|item| item.url.as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Inputs of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct ViewInput<'a> {
    pub query: &'a str,
    pub error_message: Option<&'a str>,
    pub is_loading: bool,
    pub results: &'a [ResultData],
    pub pages: &'a [PageEntry],
    pub excerpt_limit: usize,
}

pub fn select_view(input: &ViewInput<'_>) -> ContentView {
    match view_kind(
        input.query,
        input.error_message,
        input.is_loading,
        input.results.len(),
    ) {
        ViewKind::Welcome => ContentView::Welcome(welcome_group(input.pages)),
        ViewKind::Error => ContentView::Error(input.error_message.unwrap_or_default().to_string()),
        ViewKind::Loading => ContentView::Loading,
        ViewKind::Empty => ContentView::Empty,
        ViewKind::Results => ContentView::Results(result_groups(
            input.results,
            input.query,
            input.excerpt_limit,
        )),
    }
}

pub fn welcome_group(pages: &[PageEntry]) -> Option<PageGroup> {
    if pages.is_empty() {
        return None;
    }
    Some(PageGroup {
        heading: WELCOME_HEADING.to_string(),
        items: pages
            .iter()
            .map(|page| PageItem {
                title: page.title.clone(),
                parent: page.parent.clone(),
                description: page.description.clone(),
                url: page.url.clone(),
            })
            .collect(),
    })
}

/// One group per result, one item per sub-result.
///
/// Results sharing a title stay separate groups; each result is its own page.
pub fn result_groups(results: &[ResultData], query: &str, excerpt_limit: usize) -> Vec<ResultGroup> {
    let highlighter = Highlighter::new(query);
    results
        .iter()
        .map(|result| ResultGroup {
            heading: result.meta.title.clone(),
            items: result
                .sub_results
                .iter()
                .map(|sub| ResultItem {
                    title: highlighter.highlight(&sub.title),
                    excerpt: highlighter.excerpt(&sub.excerpt, excerpt_limit),
                    url: sub.url.clone(),
                })
                .collect(),
        })
        .collect()
}

/// The open dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    pub query: String,
    pub content: ContentView,
    /// Cursor position in [`ContentView::selectable_urls`]; `None` when
    /// nothing is selectable.
    pub active_index: Option<usize>,
}

/// Everything a rendering instance shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub trigger: Trigger,
    pub dialog: Option<Dialog>,
}
