// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use quadscan_core::ScanConfig;
use quadscan_core::config::{ThresholdMode, UprightPolicy};
use quadscan_core::error::{Result, ScanError};

#[derive(Debug, Parser)]
#[command(name = "quadscan")]
#[command(about = "Find a photographed document, let you correct its corners, and flatten it")]
#[command(version)]
pub struct Cli {
    /// Photo of the document.
    pub image: PathBuf,

    /// Where to write the flattened document. Defaults to
    /// `<image stem>-scanned.png` next to the photo.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON script of pointer events for the corner editor. Without one the
    /// detected corners are used unchanged.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// JSON scan configuration. Flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the last corner-editor frame to this image.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Write a JSON report of the scan to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Fixed binarization threshold (0-255).
    #[arg(long, conflicts_with = "otsu")]
    pub threshold: Option<u8>,

    /// Pick the binarization threshold automatically.
    #[arg(long)]
    pub otsu: bool,

    /// Width of the image frame treated as background (pixels).
    #[arg(long)]
    pub border: Option<u32>,

    /// Gaussian blur sigma applied before thresholding.
    #[arg(long)]
    pub blur: Option<f32>,

    /// Force output width / height, e.g. 0.773 for US Letter.
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Fail on perfectly upright documents instead of using their bounding box.
    #[arg(long)]
    pub reject_upright: bool,

    /// Refuse corner drags that would fold the outline.
    #[arg(long)]
    pub keep_convex: bool,
}

impl Cli {
    /// Configuration from `--config` (or defaults) with flag overrides applied.
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load(path).map_err(|err| {
                ScanError::Config(format!("{}: {err}", path.display()))
            })?,
            None => ScanConfig::default(),
        };

        if let Some(level) = self.threshold {
            config.threshold = ThresholdMode::Fixed(level);
        }
        if self.otsu {
            config.threshold = ThresholdMode::Otsu;
        }
        if let Some(border) = self.border {
            config.border_size = border;
        }
        if let Some(sigma) = self.blur {
            config.blur_sigma = sigma;
        }
        if self.aspect_ratio.is_some() {
            config.aspect_ratio = self.aspect_ratio;
        }
        if self.reject_upright {
            config.upright_policy = UprightPolicy::Reject;
        }
        if self.keep_convex {
            config.enforce_convexity = true;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.image))
    }
}

fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    image.with_file_name(format!("{stem}-scanned.png"))
}
