// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search overlay controller.
//!
//! A [`SearchOverlay`] is one mounted instance of the search widget. It owns
//! the dialog state, listens for shortcuts, dispatches searches, and turns
//! all of that into a [`Rendered`] view model on demand. It draws nothing
//! and routes nowhere: drawing is the host's job, and navigation goes through
//! the injected [`Navigate`] callback.
//!
//! # Lifecycle
//!
//! ```text
//!  mount ──▶ claim registry ──▶ listen for keys
//!    │            │
//!    │            └─ lost the claim: inert (renders nothing, ignores keys)
//!    ▼
//!  Closed ◀──── close / Escape / select ──── Open
//!    │                                        ▲
//!    └───────── open / Ctrl+K / trigger ──────┘
//!
//!  drop ──▶ release claim, stop listening, supersede in-flight searches
//! ```
//!
//! Going `Open → Closed` resets query, results, error, loading flag and
//! cursor, so a reopened dialog never flashes the previous session. It also
//! supersedes any search still in flight.
//!
//! # Concurrency
//!
//! State sits behind one lock that is never held across an `.await`. Search
//! routines run as spawned tasks and commit with check-then-set under that
//! lock; tokens are issued under the same lock, so a commit can't slip in
//! between a query change and its token.

pub mod keyboard;
pub mod view;

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

use crate::runtime::registry::{ClaimPolicy, InstanceId};
use crate::runtime::SearchContext;
use crate::search::{self, SearchOutcome, SearchScheduler, SearchToken};
use crate::types::{PageEntry, ResultData};
use keyboard::{classify, Disposition, KeyEvent, KeyListener, ShortcutAction};
use view::{select_view, ContentView, Dialog, Rendered, Trigger, ViewInput};

/// Host navigation callback. Receives the destination URL.
pub type Navigate = Arc<dyn Fn(&str) + Send + Sync>;

/// Snapshot of one instance's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub is_open: bool,
    pub query: String,
    pub results: Vec<ResultData>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// True once this instance holds the registry claim. Never reverts
    /// while mounted.
    pub can_render: bool,
    /// Keyboard cursor over the current view's selectable items.
    pub active_index: usize,
}

impl ControllerState {
    fn reset_session(&mut self) {
        self.query.clear();
        self.results.clear();
        self.is_loading = false;
        self.error_message = None;
        self.active_index = 0;
    }
}

struct Inner {
    id: InstanceId,
    ctx: Arc<SearchContext>,
    pages: Vec<PageEntry>,
    navigate: Navigate,
    state: Mutex<ControllerState>,
    scheduler: SearchScheduler,
}

/// One mounted search widget.
pub struct SearchOverlay {
    inner: Arc<Inner>,
    _listener: KeyListener,
}

impl SearchOverlay {
    /// Mount an instance: claim the registry and start listening for keys.
    pub fn mount(ctx: Arc<SearchContext>, pages: Vec<PageEntry>, navigate: Navigate) -> Self {
        let id = InstanceId::random();
        let can_render = ctx.registry().try_claim(id);
        tracing::debug!(instance = %id, active = can_render, "overlay mounted");

        let inner = Arc::new(Inner {
            id,
            ctx,
            pages,
            navigate,
            state: Mutex::new(ControllerState {
                can_render,
                ..ControllerState::default()
            }),
            scheduler: SearchScheduler::new(),
        });

        let weak: Weak<Inner> = Arc::downgrade(&inner);
        let listener = inner.ctx.keyboard().listen(move |event| match weak.upgrade() {
            Some(inner) => inner.handle_key(event),
            None => Disposition::Ignored,
        });

        Self {
            inner,
            _listener: listener,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn state(&self) -> ControllerState {
        self.inner.state.lock().clone()
    }

    /// Whether this instance is the interactive one. Under
    /// [`ClaimPolicy::Reclaimable`] this re-attempts the claim.
    pub fn can_render(&self) -> bool {
        self.inner.is_interactive()
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.lock().is_open
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        if self.inner.is_interactive() {
            let is_open = self.is_open();
            self.inner.set_open(!is_open);
        }
    }

    pub fn set_open(&self, open: bool) {
        if self.inner.is_interactive() {
            self.inner.set_open(open);
        }
    }

    /// Clicking the trigger opens the dialog.
    pub fn click_trigger(&self) {
        self.open();
    }

    /// Update the query and start a search for it.
    ///
    /// Returns the spawned search task, or `None` when no request was made
    /// (empty query, closed dialog, inert instance). Must be called inside a
    /// Tokio runtime. Awaiting the handle is optional; the task commits on
    /// its own.
    pub fn set_query(&self, query: &str) -> Option<JoinHandle<()>> {
        self.inner.set_query(query)
    }

    pub fn handle_key(&self, event: &KeyEvent) -> Disposition {
        self.inner.handle_key(event)
    }

    /// Close the dialog and hand `url` to the navigation callback.
    pub fn select_url(&self, url: &str) {
        if self.inner.is_interactive() {
            self.inner.select_url(url);
        }
    }

    /// Select the item under the cursor. Returns the URL navigated to.
    pub fn select_active(&self) -> Option<String> {
        self.inner.select_active()
    }

    /// Move the cursor by `delta` items, clamped to the current view.
    pub fn move_selection(&self, delta: isize) {
        self.inner.move_selection(delta)
    }

    /// The view model, or `None` for an inert instance.
    pub fn render(&self) -> Option<Rendered> {
        self.inner.render()
    }
}

impl fmt::Debug for SearchOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOverlay")
            .field("id", &self.inner.id)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl Drop for SearchOverlay {
    fn drop(&mut self) {
        self.inner.scheduler.invalidate();
        self.inner.ctx.registry().release(self.inner.id);
        tracing::debug!(instance = %self.inner.id, "overlay unmounted");
    }
}

impl Inner {
    fn is_interactive(&self) -> bool {
        let mut state = self.state.lock();
        if state.can_render {
            return true;
        }
        if self.ctx.config().claim_policy == ClaimPolicy::Reclaimable
            && self.ctx.registry().try_claim(self.id)
        {
            tracing::debug!(instance = %self.id, "overlay reclaimed registry");
            state.can_render = true;
            return true;
        }
        false
    }

    fn set_open(&self, open: bool) {
        let mut state = self.state.lock();
        if state.is_open == open {
            return;
        }
        state.is_open = open;
        if !open {
            state.reset_session();
            self.scheduler.invalidate();
        }
        tracing::debug!(instance = %self.id, open, "dialog toggled");
    }

    fn set_query(self: &Arc<Self>, query: &str) -> Option<JoinHandle<()>> {
        if !self.is_interactive() {
            return None;
        }

        let token = {
            let mut state = self.state.lock();
            if !state.is_open {
                return None;
            }
            let token = self.scheduler.issue();
            state.query = query.to_string();
            state.active_index = 0;
            if query.is_empty() {
                state.results.clear();
                state.error_message = None;
                state.is_loading = false;
                return None;
            }
            state.is_loading = true;
            state.error_message = None;
            token
        };

        tracing::debug!(
            instance = %self.id,
            query,
            generation = token.generation(),
            "search dispatched"
        );
        let inner = Arc::clone(self);
        let query = query.to_string();
        Some(tokio::spawn(async move { inner.run_search(query, token).await }))
    }

    async fn run_search(&self, query: String, token: SearchToken) {
        let debounce = self.ctx.config().query_debounce();
        let Some(outcome) = search::execute(self.ctx.index(), &query, &token, debounce).await else {
            tracing::debug!(query, generation = token.generation(), "stale search discarded");
            return;
        };

        let mut state = self.state.lock();
        if !token.is_current() {
            tracing::debug!(query, generation = token.generation(), "stale search discarded");
            return;
        }
        match outcome {
            SearchOutcome::Results(results) => {
                tracing::debug!(query, count = results.len(), "search committed");
                state.results = results;
                state.error_message = None;
            }
            SearchOutcome::Failed(failure) => {
                state.error_message = Some(failure.to_string());
            }
        }
        state.is_loading = false;
        state.active_index = 0;
    }

    fn handle_key(&self, event: &KeyEvent) -> Disposition {
        if !self.is_interactive() {
            return Disposition::Ignored;
        }
        let is_open = self.state.lock().is_open;
        let Some(action) = classify(event, is_open) else {
            return Disposition::Ignored;
        };

        match action {
            ShortcutAction::Toggle => self.set_open(!is_open),
            ShortcutAction::Close => self.set_open(false),
            ShortcutAction::MoveUp => self.move_selection(-1),
            ShortcutAction::MoveDown => self.move_selection(1),
            ShortcutAction::Select => {
                self.select_active();
            }
        }
        Disposition::DefaultPrevented
    }

    fn select_url(&self, url: &str) {
        self.set_open(false);
        tracing::debug!(instance = %self.id, url, "navigating");
        (self.navigate)(url);
    }

    fn select_active(&self) -> Option<String> {
        let url = {
            let state = self.state.lock();
            if !state.can_render || !state.is_open {
                return None;
            }
            let content = self.content(&state);
            content
                .selectable_urls()
                .get(state.active_index)
                .map(|url| url.to_string())
        }?;
        self.select_url(&url);
        Some(url)
    }

    fn move_selection(&self, delta: isize) {
        let mut state = self.state.lock();
        if !state.is_open {
            return;
        }
        let count = self.content(&state).selectable_urls().len();
        if count == 0 {
            state.active_index = 0;
            return;
        }
        let last = count - 1;
        state.active_index = state.active_index.saturating_add_signed(delta).min(last);
    }

    fn content(&self, state: &ControllerState) -> ContentView {
        select_view(&ViewInput {
            query: &state.query,
            error_message: state.error_message.as_deref(),
            is_loading: state.is_loading,
            results: &state.results,
            pages: &self.pages,
            excerpt_limit: self.ctx.config().excerpt_limit,
        })
    }

    fn render(&self) -> Option<Rendered> {
        if !self.is_interactive() {
            return None;
        }
        let config = self.ctx.config();
        let trigger = Trigger {
            placeholder: config.placeholder.clone(),
            shortcut_hint: config.platform.shortcut_hint().to_string(),
        };

        let state = self.state.lock();
        let dialog = state.is_open.then(|| {
            let content = self.content(&state);
            let selectable = content.selectable_urls().len();
            Dialog {
                query: state.query.clone(),
                active_index: (selectable > 0).then(|| state.active_index.min(selectable - 1)),
                content,
            }
        });
        Some(Rendered { trigger, dialog })
    }
}
