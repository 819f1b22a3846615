// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Which overlay instance gets to be interactive.
//!
//! Responsive layouts mount the search widget more than once (desktop nav,
//! mobile drawer). Two live dialogs listening for the same shortcut would
//! both toggle, so only one instance may claim the registry. The rest render
//! nothing.
//!
//! The claim is check-then-set under one lock: the set must be empty for a
//! claim to succeed.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Random per-mount identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// What a non-active instance does after the active one unmounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimPolicy {
    /// First mounted instance wins; losers stay inert for their whole mount.
    #[default]
    FirstMountWins,
    /// Losers retry the claim on render and key handling, and take over once
    /// the registry is empty again.
    Reclaimable,
}

/// Set of active instance identifiers.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    active: Mutex<HashSet<InstanceId>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the registry for `id`. Succeeds only when nobody holds it.
    pub fn try_claim(&self, id: InstanceId) -> bool {
        let mut active = self.active.lock();
        if !active.is_empty() {
            return active.contains(&id);
        }
        active.insert(id);
        true
    }

    /// Remove `id`. Harmless if it never claimed.
    pub fn release(&self, id: InstanceId) -> bool {
        self.active.lock().remove(&id)
    }

    pub fn is_active(&self, id: InstanceId) -> bool {
        self.active.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }

    /// Forget every claim.
    pub fn reset(&self) {
        self.active.lock().clear();
    }
}
