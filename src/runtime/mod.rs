// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared runtime state and host bindings.
//!
//! `context` and `registry` hold the state every overlay instance on a page
//! shares. `wasm` exposes the pure text helpers to browser hosts, so the
//! JavaScript side renders excerpts exactly the way the native view does.

pub mod context;
pub mod registry;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use context::SearchContext;
pub use registry::{ClaimPolicy, InstanceId, InstanceRegistry};
