// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable failure messages.
//
// Every scan error is mapped to the stage that failed, a plain English
// summary, and a suggestion for what to try next.

use std::fmt;

use crate::error::{ScanError, Stage};

/// A user-facing description of a failed scan.
#[derive(Debug, Clone)]
pub struct StageFailure {
    /// Stage that aborted the scan.
    pub stage: Stage,
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {} {}", self.stage, self.message, self.suggestion)
    }
}

/// Convert a `ScanError` into a `StageFailure`.
pub fn describe(err: &ScanError) -> StageFailure {
    let stage = err.stage();
    let (message, suggestion) = match err {
        ScanError::ImageLoad(detail) => (
            format!("The photo could not be opened ({detail})."),
            "Check the file path and that the file is a JPEG, PNG, or other common image.".to_string(),
        ),
        ScanError::Config(detail) => (
            format!("The configuration is invalid ({detail})."),
            "Fix the value in the configuration file or remove it to use the default.".to_string(),
        ),
        ScanError::Segmentation(detail) => (
            format!("The document could not be separated from the background ({detail})."),
            "Photograph the page on a darker, plain surface or try the Otsu threshold.".to_string(),
        ),
        ScanError::NoContour => (
            "No document outline was found.".to_string(),
            "Make sure the whole page is visible and not touching the photo edge.".to_string(),
        ),
        ScanError::InsufficientPoints { found } => (
            format!("The document outline has only {found} corner points."),
            "Retake the photo so that all four corners of the page are visible.".to_string(),
        ),
        ScanError::DegenerateInput(detail) => (
            format!("The document outline is flat ({detail})."),
            "Retake the photo so the page covers a larger area.".to_string(),
        ),
        ScanError::DegenerateOrientation => (
            "The document is perfectly upright and upright documents are rejected.".to_string(),
            "Set upright_policy to \"bounding_box\" to accept upright documents.".to_string(),
        ),
        ScanError::NotClassified => (
            "Corners were edited before they were detected.".to_string(),
            "Run corner detection first.".to_string(),
        ),
        ScanError::SessionAborted => (
            "The corner editing session ended without confirmation.".to_string(),
            "Finish the session with a confirm event.".to_string(),
        ),
        ScanError::Bridge(detail) => (
            format!("The editing session could not be driven ({detail})."),
            "Check the session script file.".to_string(),
        ),
        ScanError::Rectify(detail) => (
            format!("The page could not be straightened ({detail})."),
            "Drag the corners so they outline the page without crossing.".to_string(),
        ),
        ScanError::Io(e) => (
            format!("A file could not be read or written ({e})."),
            "Check that the output directory exists and is writable.".to_string(),
        ),
        ScanError::Serialization(e) => (
            format!("A JSON file could not be processed ({e})."),
            "Check the file for syntax errors.".to_string(),
        ),
    };
    StageFailure {
        stage,
        message,
        suggestion,
    }
}
