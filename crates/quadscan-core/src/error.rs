// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Quadscan.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all Quadscan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Load / segmentation --
    #[error("image loading failed: {0}")]
    ImageLoad(String),

    #[error("segmentation failed: {0}")]
    Segmentation(String),

    #[error("no document contour found in the segmented image")]
    NoContour,

    // -- Classification --
    #[error("polygon has {found} points, at least 4 are required")]
    InsufficientPoints { found: usize },

    #[error("degenerate polygon: {0}")]
    DegenerateInput(String),

    #[error("document is upright and the configured policy rejects upright documents")]
    DegenerateOrientation,

    #[error("corners must be classified before they can be edited")]
    NotClassified,

    // -- Editing --
    #[error("editing session ended without a confirm signal")]
    SessionAborted,

    // -- Rectification --
    #[error("perspective rectification failed: {0}")]
    Rectify(String),

    // -- Collaborators / configuration --
    #[error("session bridge error: {0}")]
    Bridge(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Load,
    Segmentation,
    Contour,
    Classification,
    Editing,
    Rectification,
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Segmentation => "segmentation",
            Stage::Contour => "contour extraction",
            Stage::Classification => "classification",
            Stage::Editing => "corner editing",
            Stage::Rectification => "rectification",
            Stage::Output => "output",
        };
        f.write_str(name)
    }
}

impl ScanError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            ScanError::ImageLoad(_) | ScanError::Config(_) => Stage::Load,
            ScanError::Segmentation(_) => Stage::Segmentation,
            ScanError::NoContour => Stage::Contour,
            ScanError::InsufficientPoints { .. }
            | ScanError::DegenerateInput(_)
            | ScanError::DegenerateOrientation => Stage::Classification,
            ScanError::NotClassified | ScanError::SessionAborted | ScanError::Bridge(_) => {
                Stage::Editing
            }
            ScanError::Rectify(_) => Stage::Rectification,
            ScanError::Io(_) | ScanError::Serialization(_) => Stage::Output,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_errors_map_to_classification_stage() {
        assert_eq!(
            ScanError::InsufficientPoints { found: 3 }.stage(),
            Stage::Classification
        );
        assert_eq!(ScanError::DegenerateOrientation.stage(), Stage::Classification);
        assert_eq!(
            ScanError::DegenerateInput("collinear".into()).stage(),
            Stage::Classification
        );
    }

    #[test]
    fn display_includes_point_count() {
        let err = ScanError::InsufficientPoints { found: 2 };
        assert_eq!(err.to_string(), "polygon has 2 points, at least 4 are required");
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Load.to_string(), "load");
        assert_eq!(Stage::Segmentation.to_string(), "segmentation");
        assert_eq!(Stage::Classification.to_string(), "classification");
    }
}
