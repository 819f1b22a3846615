// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Process-wide overlay state, made explicit.
//!
//! Everything overlay instances share lives here: the instance registry, the
//! lazily loaded index client, the global key-down source, and the config.
//! The host builds one `SearchContext` at bootstrap and hands an `Arc` of it
//! to every mount. Tests build a fresh one per test, or call
//! [`SearchContext::reset`] between cases.

use std::sync::Arc;

use super::registry::InstanceRegistry;
use crate::config::OverlayConfig;
use crate::index::{IndexLoader, IndexSlot};
use crate::overlay::keyboard::KeyboardHub;

pub struct SearchContext {
    config: OverlayConfig,
    registry: InstanceRegistry,
    index: IndexSlot,
    keyboard: KeyboardHub,
}

impl SearchContext {
    pub fn new(config: OverlayConfig, loader: Arc<dyn IndexLoader>) -> Arc<Self> {
        let index = IndexSlot::new(loader, config.base_url.clone());
        Arc::new(Self {
            config,
            registry: InstanceRegistry::new(),
            index,
            keyboard: KeyboardHub::new(),
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    pub fn index(&self) -> &IndexSlot {
        &self.index
    }

    /// The global key-down source. Hosts feed key events in here.
    pub fn keyboard(&self) -> &KeyboardHub {
        &self.keyboard
    }

    /// Back to a fresh page load: no claims, no cached client.
    ///
    /// Key listeners are owned by their overlays and go away when those drop.
    pub async fn reset(&self) {
        self.registry.reset();
        self.index.reset().await;
    }
}
