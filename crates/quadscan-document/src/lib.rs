// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// quadscan-document: document detection and correction for Quadscan.
//
// Provides corner classification and hit-testing, the interactive corner
// editor, image loading, and the scan pipeline (segmentation, contour
// extraction, perspective rectification).

pub mod corners;
pub mod editor;
pub mod image;
pub mod scan;

// Re-export the primary types so callers can use `quadscan_document::ScanPipeline` etc.
pub use corners::{Classification, Classifier};
pub use editor::{CornerEditor, EditorConfig, EditorEvent, EventSource, Overlay, OverlayRenderer};
pub use image::processor::ImageProcessor;
pub use scan::{ScanOutcome, ScanPipeline};
