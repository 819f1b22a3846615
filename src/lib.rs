// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-palette search for static documentation sites.
//!
//! The crate is the controller behind a docs site's search dialog: it
//! decides when the dialog is open, which of several mounted widgets is the
//! live one, when a search runs and which response is allowed to land, and
//! what the dialog should show. Drawing and routing stay with the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  keys   ┌───────────────┐ set_query ┌─────────────┐
//! │ KeyboardHub │───────▶│ SearchOverlay │──────────▶│   search    │
//! └─────────────┘         │  (controller) │◀──────────│  execute()  │
//!        ▲                └───────┬───────┘  commit   └──────┬──────┘
//!        │                        │ render()                 │ ensure_loaded
//!   host events                   ▼                          ▼
//!                         ┌───────────────┐          ┌──────────────┐
//!                         │ view::Rendered│          │  IndexSlot   │
//!                         └───────────────┘          │ dyn Loader   │
//!                                                    └──────────────┘
//! ```
//!
//! | Module     | Responsibility                                        |
//! |------------|-------------------------------------------------------|
//! | `overlay`  | Controller state, shortcuts, view model               |
//! | `search`   | Search routine and staleness tokens                   |
//! | `index`    | Index client traits, lazy slot, static index client   |
//! | `runtime`  | Shared context, instance registry, WASM exports       |
//! | `util`     | Highlighting, excerpt cleanup, URL normalization      |
//! | `config`   | JSON overlay configuration                            |
//!
//! # Usage
//!
//! ```ignore
//! use docsearch::{OverlayConfig, SearchContext, SearchOverlay, StaticIndexLoader};
//! use std::sync::Arc;
//!
//! let config = OverlayConfig::default();
//! let loader = Arc::new(StaticIndexLoader::from_config("public", &config));
//! let ctx = SearchContext::new(config, loader);
//!
//! let overlay = SearchOverlay::mount(ctx, pages, Arc::new(|url: &str| router.push(url)));
//! overlay.open();
//! if let Some(search) = overlay.set_query("button") {
//!     search.await?;
//! }
//! let view = overlay.render();
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod overlay;
pub mod runtime;
pub mod search;
pub mod testing;
pub mod types;
pub mod util;

pub use config::OverlayConfig;
pub use error::{ConfigError, IndexError, SearchFailure};
pub use index::{
    ClientOptions, IndexLoader, IndexSlot, LoadStatus, RankedResult, ResultSource,
    SearchIndexClient, SearchResponse,
};
#[cfg(not(target_arch = "wasm32"))]
pub use index::{StaticIndexClient, StaticIndexFile, StaticIndexLoader};
pub use overlay::keyboard::{Disposition, Key, KeyEvent, KeyboardHub, Platform};
pub use overlay::view::{ContentView, Rendered};
pub use overlay::{ControllerState, Navigate, SearchOverlay};
pub use runtime::{ClaimPolicy, InstanceId, InstanceRegistry, SearchContext};
pub use search::{SearchOutcome, SearchScheduler, SearchToken};
pub use types::{PageEntry, ResultData, ResultMeta, SubResult};
pub use util::highlight::{highlight, prepare_excerpt, Highlighted, Highlighter, Span};
pub use util::url::normalize_result_url;
