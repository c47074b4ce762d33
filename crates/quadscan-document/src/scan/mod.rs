// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline: segmentation, contour extraction, perspective
// rectification, and the stage runner that ties them to the corner editor.

pub mod contours;
pub mod pipeline;
pub mod rectify;
pub mod segment;

pub use contours::{ContourExtractor, LargestContour};
pub use pipeline::{ScanOutcome, ScanPipeline};
pub use rectify::{PerspectiveRectifier, Rectifier};
pub use segment::{Segmenter, ThresholdSegmenter};
