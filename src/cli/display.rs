// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for the docsearch CLI.
//!
//! Draws the overlay's view model the way a browser host would draw the
//! dialog: a trigger line, then a box with one section per group and the
//! matched text in bold yellow. OneDark on dark terminals, One Light on
//! light ones. Respects `NO_COLOR` and goes plain when stdout isn't a TTY.
//!
//! Everything here returns strings instead of printing, so the layout is
//! testable with colors off.
//!
//! # Theme detection order
//!
//! 1. `DOCSEARCH_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

use docsearch::overlay::view::{
    ContentView, Dialog, PageGroup, Rendered, ResultGroup, Trigger, EMPTY_LABEL, LOADING_LABEL,
};
use docsearch::{Highlighted, Span};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    theme_override()
        .or_else(theme_from_colorfgbg)
        .or_else(macos_appearance)
        .unwrap_or(Theme::Dark)
}

fn parse_theme(raw: &str) -> Option<Theme> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "light" | "l" => Some(Theme::Light),
        "dark" | "d" => Some(Theme::Dark),
        _ => None,
    }
}

fn theme_override() -> Option<Theme> {
    std::env::var("DOCSEARCH_THEME").ok().as_deref().and_then(parse_theme)
}

/// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"). Backgrounds 0-6 and
/// 8 are dark.
fn theme_from_colorfgbg() -> Option<Theme> {
    let raw = std::env::var("COLORFGBG").ok()?;
    let bg: u8 = raw.rsplit(';').next()?.parse().ok()?;
    Some(if bg >= 7 && bg != 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(target_os = "macos")]
fn macos_appearance() -> Option<Theme> {
    // The key only exists in dark mode.
    let output = std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    let dark = output.status.success() && String::from_utf8_lossy(&output.stdout).contains("Dark");
    Some(if dark { Theme::Dark } else { Theme::Light })
}

#[cfg(not(target_os = "macos"))]
fn macos_appearance() -> Option<Theme> {
    None
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors on unless `NO_COLOR` is set or stdout is piped.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers around `text`, or `text` alone when plain.
fn themed(colors: bool, color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if colors {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, excluding ANSI codes.
pub fn visible_len(s: &str) -> usize {
    s.chars()
        .scan(false, |in_escape, c| {
            let visible = match (c, *in_escape) {
                ('\x1b', _) => {
                    *in_escape = true;
                    false
                }
                ('m', true) => {
                    *in_escape = false;
                    false
                }
                (_, escaped) => !escaped,
            };
            Some(visible)
        })
        .filter(|&visible| visible)
        .count()
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(colors: bool, s: &str) -> String {
    themed(colors, GRAY, &[], s)
}

/// │ content          │
fn row(colors: bool, content: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    format!(
        "{}{}{}{}",
        border(colors, "│"),
        content,
        " ".repeat(pad),
        border(colors, "│")
    )
}

/// ┌─ LABEL ──────────┐
fn section_top(colors: bool, label: &str) -> String {
    let label_part = format!("─ {} ", themed(colors, CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}{}{}",
        border(colors, "┌"),
        label_part,
        border(colors, &format!("{}┐", "─".repeat(remaining)))
    )
}

/// ├─ LABEL ──────────┤
fn section_mid(colors: bool, label: &str) -> String {
    let label_part = format!("─ {} ", themed(colors, CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}{}{}",
        border(colors, "├"),
        label_part,
        border(colors, &format!("{}┤", "─".repeat(remaining)))
    )
}

/// └──────────────────┘
fn section_bot(colors: bool) -> String {
    border(colors, &format!("└{}┘", "─".repeat(BOX_WIDTH)))
}

// ═══════════════════════════════════════════════════════════════════════════
// VIEW RENDERING
// ═══════════════════════════════════════════════════════════════════════════

/// Marked spans in bold yellow, cut to `max` visible characters.
pub fn paint_highlighted(colors: bool, text: &Highlighted, max: usize) -> String {
    let mut out = String::new();
    let mut budget = max;
    for span in text.spans() {
        if budget == 0 {
            break;
        }
        let piece: String = span.as_str().chars().take(budget).collect();
        budget -= piece.chars().count();
        match span {
            Span::Mark(_) => out.push_str(&themed(colors, YELLOW, &[BOLD], &piece)),
            Span::Text(_) => out.push_str(&piece),
        }
    }
    out
}

pub fn render_trigger(colors: bool, trigger: &Trigger) -> String {
    format!(
        "🔍 {}  {}",
        themed(colors, GRAY, &[], &trigger.placeholder),
        themed(colors, BLUE, &[BOLD], &format!("[{}]", trigger.shortcut_hint))
    )
}

fn cursor(colors: bool, selected: bool) -> String {
    if selected {
        themed(colors, BLUE, &[BOLD], " ▸ ")
    } else {
        "   ".to_string()
    }
}

fn page_rows(colors: bool, group: &PageGroup, active: Option<usize>, out: &mut Vec<String>) {
    out.push(section_top(colors, &group.heading));
    for (i, item) in group.items.iter().enumerate() {
        let mut line = format!("{}{}", cursor(colors, active == Some(i)), item.title);
        if let Some(parent) = &item.parent {
            line.push_str(&themed(colors, GRAY, &[DIM], &format!("  · {}", parent)));
        }
        out.push(row(colors, &line));
        if let Some(description) = &item.description {
            let cut: String = description.chars().take(BOX_WIDTH - 6).collect();
            out.push(row(colors, &themed(colors, GRAY, &[], &format!("     {}", cut))));
        }
    }
    out.push(section_bot(colors));
}

fn result_rows(colors: bool, groups: &[ResultGroup], active: Option<usize>, out: &mut Vec<String>) {
    let mut index = 0;
    for (g, group) in groups.iter().enumerate() {
        let heading: &str = if group.heading.is_empty() {
            "Untitled"
        } else {
            &group.heading
        };
        if g == 0 {
            out.push(section_top(colors, heading));
        } else {
            out.push(section_mid(colors, heading));
        }
        for item in &group.items {
            let title = paint_highlighted(colors, &item.title, BOX_WIDTH - 4);
            out.push(row(colors, &format!("{}{}", cursor(colors, active == Some(index)), title)));
            if !item.excerpt.is_empty() {
                let excerpt = paint_highlighted(colors, &item.excerpt, BOX_WIDTH - 6);
                out.push(row(colors, &format!("     {}", excerpt)));
            }
            out.push(row(colors, &themed(colors, GRAY, &[DIM], &format!("     {}", item.url))));
            index += 1;
        }
    }
    out.push(section_bot(colors));
}

pub fn render_dialog(colors: bool, dialog: &Dialog) -> Vec<String> {
    let mut out = vec![format!(
        "{} {}",
        themed(colors, BLUE, &[BOLD], "›"),
        dialog.query
    )];
    match &dialog.content {
        ContentView::Welcome(Some(group)) => page_rows(colors, group, dialog.active_index, &mut out),
        ContentView::Welcome(None) => {}
        ContentView::Error(message) => out.push(themed(colors, RED, &[BOLD], message)),
        ContentView::Loading => out.push(themed(colors, GRAY, &[], LOADING_LABEL)),
        ContentView::Empty => out.push(themed(colors, GRAY, &[], EMPTY_LABEL)),
        ContentView::Results(groups) => result_rows(colors, groups, dialog.active_index, &mut out),
    }
    out
}

/// Trigger line, then the dialog when open.
pub fn render(colors: bool, rendered: &Rendered) -> Vec<String> {
    let mut out = vec![render_trigger(colors, &rendered.trigger)];
    if let Some(dialog) = &rendered.dialog {
        out.extend(render_dialog(colors, dialog));
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
