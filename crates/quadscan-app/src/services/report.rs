// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON report describing a completed scan.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use quadscan_core::error::Result;
use quadscan_core::{BoundingRect, Orientation, PointSet};
use serde::Serialize;

/// What was detected, what the user confirmed, and what was written.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub orientation: Orientation,
    pub bounds: BoundingRect,
    /// Corners as classified, before editing.
    pub detected: PointSet,
    /// Corners after the editing session.
    pub corners: PointSet,
    pub edited: bool,
    pub output_width: u32,
    pub output_height: u32,
    /// Name of the session bridge that drove the editor.
    pub bridge: String,
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
