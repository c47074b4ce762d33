// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner logic: ordering raw polygon extremes into named slots, and
// finding the handle nearest to a pointer.

pub mod classify;

pub use classify::{Classification, Classifier, Extremes, classify};
pub use hit_test::{Hit, nearest};
