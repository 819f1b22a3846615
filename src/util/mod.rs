// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pure string transforms used by the result view.
//!
//! Nothing in here touches controller state, which is the point: URL
//! normalization and excerpt highlighting are the only pieces of the overlay
//! with real text-processing edge cases, so they get tested directly and
//! exhaustively instead of through the controller.

pub mod highlight;
pub mod url;
