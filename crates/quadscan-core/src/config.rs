// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// How the segmenter picks its binarization threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Pixels brighter than this value are foreground.
    Fixed(u8),
    /// Pick the threshold from the histogram (Otsu's method).
    Otsu,
}

/// What the classifier does when the leftmost and rightmost extremes sit
/// at the same height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UprightPolicy {
    /// Use the corners of the bounding rectangle.
    #[default]
    BoundingBox,
    /// Fail with `ScanError::DegenerateOrientation`.
    Reject,
}

/// Settings for a single scan, from loading to rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Photos wider than this are halved before processing.
    pub max_width: u32,
    /// Gaussian blur sigma applied before thresholding.
    pub blur_sigma: f32,
    /// Binarization threshold.
    pub threshold: ThresholdMode,
    /// Width of the image frame forced to background (pixels).
    pub border_size: u32,
    /// Douglas-Peucker tolerance for polygon approximation (pixels).
    pub approx_epsilon: f64,
    /// Handling of upright documents during classification.
    pub upright_policy: UprightPolicy,
    /// Radius of the corner handles drawn by the editor (pixels).
    pub handle_radius: u32,
    /// A press within `handle_radius * hit_radius_factor` grabs a handle.
    pub hit_radius_factor: u32,
    /// Reject drags that would make the quadrilateral non-convex.
    pub enforce_convexity: bool,
    /// Instruction lines drawn on the editor overlay.
    pub annotations: Vec<String>,
    /// Force the rectified output to `width / height == aspect_ratio`.
    pub aspect_ratio: Option<f32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_width: 2000,
            blur_sigma: 4.0,
            threshold: ThresholdMode::Fixed(165),
            border_size: 2,
            approx_epsilon: 1.0,
            upright_policy: UprightPolicy::BoundingBox,
            handle_radius: 20,
            hit_radius_factor: 5,
            enforce_convexity: false,
            annotations: vec![
                "Press 'q' to extract".to_string(),
                "Drag circles to correct".to_string(),
            ],
            aspect_ratio: None,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(ScanError::Config("max_width must be positive".into()));
        }
        if !(self.blur_sigma > 0.0) {
            return Err(ScanError::Config("blur_sigma must be positive".into()));
        }
        if !(self.approx_epsilon > 0.0) {
            return Err(ScanError::Config("approx_epsilon must be positive".into()));
        }
        if self.border_size >= self.max_width / 2 {
            return Err(ScanError::Config(format!(
                "border_size {} leaves no room inside max_width {}",
                self.border_size, self.max_width
            )));
        }
        if self.handle_radius == 0 {
            return Err(ScanError::Config("handle_radius must be positive".into()));
        }
        if let Some(ratio) = self.aspect_ratio {
            if !(ratio > 0.0) || !ratio.is_finite() {
                return Err(ScanError::Config(format!(
                    "aspect_ratio must be a positive number, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        config.validate().unwrap();
        assert_eq!(config.threshold, ThresholdMode::Fixed(165));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "threshold": "otsu", "upright_policy": "reject" }}"#).unwrap();

        let config = ScanConfig::load(file.path()).unwrap();
        assert_eq!(config.threshold, ThresholdMode::Otsu);
        assert_eq!(config.upright_policy, UprightPolicy::Reject);
        assert_eq!(config.handle_radius, 20);
    }

    #[test]
    fn fixed_threshold_round_trips_through_json() {
        let json = r#"{ "threshold": { "fixed": 120 } }"#;
        let config: ScanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.threshold, ThresholdMode::Fixed(120));
    }

    #[test]
    fn rejects_bad_aspect_ratio() {
        let config = ScanConfig {
            aspect_ratio: Some(-1.0),
            ..ScanConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScanError::Config(_))));
    }

    #[test]
    fn rejects_a_border_wider_than_the_image() {
        for border_size in [1000, u32::MAX] {
            let config = ScanConfig {
                border_size,
                ..ScanConfig::default()
            };
            assert!(matches!(config.validate(), Err(ScanError::Config(_))));
        }
        let config = ScanConfig {
            border_size: 999,
            ..ScanConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScanConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }
}
