// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Global keyboard shortcuts.
//!
//! The host owns the real event source (a DOM `keydown` listener, a terminal
//! reader) and forwards every key-down into the [`KeyboardHub`]. Overlays
//! subscribe for the duration of their mount and get back a [`KeyListener`]
//! guard; dropping the guard unsubscribes. Pages remount the widget on every
//! navigation, so listeners must never outlive their overlay.
//!
//! | Keys                | While closed | While open        |
//! |---------------------|--------------|-------------------|
//! | Ctrl+K / Cmd+K      | open         | close             |
//! | Escape              | nothing      | close             |
//! | ArrowUp / ArrowDown | nothing      | move the cursor   |
//! | Enter               | nothing      | select the cursor |

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Platform, for the modifier shown in the shortcut hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn shortcut_hint(self) -> &'static str {
        match self {
            Platform::Mac => "⌘K",
            Platform::Other => "Ctrl K",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    Other(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn escape() -> Self {
        Self::new(Key::Escape)
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter)
    }

    pub fn arrow_up() -> Self {
        Self::new(Key::ArrowUp)
    }

    pub fn arrow_down() -> Self {
        Self::new(Key::ArrowDown)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Parse a chord like `ctrl+k`, `cmd+k`, `esc`, `down`.
    ///
    /// Letters name the physical key, so `Cmd+K` is `cmd+k`. The character
    /// is upper-cased only when `shift` is part of the chord, which is what
    /// a browser reports for the same keys.
    pub fn parse(chord: &str) -> Option<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;
        for part in chord.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "cmd" | "meta" | "super" => modifiers.meta = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "esc" | "escape" => key = Some(Key::Escape),
                "enter" | "return" => key = Some(Key::Enter),
                "up" | "arrowup" => key = Some(Key::ArrowUp),
                "down" | "arrowdown" => key = Some(Key::ArrowDown),
                _ => {
                    let mut chars = part.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c.to_ascii_lowercase())),
                        _ => return None,
                    }
                }
            }
        }
        let key = match key? {
            Key::Char(c) if modifiers.shift => Key::Char(c.to_ascii_uppercase()),
            key => key,
        };
        Some(Self { key, modifiers })
    }
}

/// What a key event asks the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Toggle,
    Close,
    MoveUp,
    MoveDown,
    Select,
}

/// Map a key-down to an action given the current open state.
pub fn classify(event: &KeyEvent, is_open: bool) -> Option<ShortcutAction> {
    let platform_modifier = event.modifiers.ctrl || event.modifiers.meta;
    match event.key {
        Key::Char('k') if platform_modifier => Some(ShortcutAction::Toggle),
        Key::Escape if is_open => Some(ShortcutAction::Close),
        Key::ArrowUp if is_open => Some(ShortcutAction::MoveUp),
        Key::ArrowDown if is_open => Some(ShortcutAction::MoveDown),
        Key::Enter if is_open => Some(ShortcutAction::Select),
        _ => None,
    }
}

/// Whether a listener consumed the event's default browser action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ignored,
    DefaultPrevented,
}

type Handler = Arc<dyn Fn(&KeyEvent) -> Disposition + Send + Sync>;

#[derive(Default)]
struct HubInner {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Handler)>>,
}

/// Fan-out point for global key-down events.
#[derive(Default)]
pub struct KeyboardHub {
    inner: Arc<HubInner>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe until the returned guard drops.
    #[must_use = "dropping the listener unsubscribes immediately"]
    pub fn listen<F>(&self, handler: F) -> KeyListener
    where
        F: Fn(&KeyEvent) -> Disposition + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(handler)));
        KeyListener {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener.
    ///
    /// Handlers run outside the listener lock, so a handler may mount or
    /// unmount overlays.
    pub fn dispatch(&self, event: &KeyEvent) -> Disposition {
        let handlers: Vec<Handler> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        let mut disposition = Disposition::Ignored;
        for handler in handlers {
            if handler(event) == Disposition::DefaultPrevented {
                disposition = Disposition::DefaultPrevented;
            }
        }
        disposition
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

/// Subscription guard returned by [`KeyboardHub::listen`].
pub struct KeyListener {
    id: u64,
    hub: Weak<HubInner>,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
