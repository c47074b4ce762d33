// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Foreground/background segmentation: turns a photo into a binary mask in
// which the document is white (255) and everything else black (0).

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use quadscan_core::ScanConfig;
use quadscan_core::config::ThresholdMode;
use quadscan_core::error::{Result, ScanError};
use tracing::{debug, info, instrument};

/// Separates the document from the background.
pub trait Segmenter: Send + Sync {
    /// Produce a binary mask the size of `image`; foreground pixels are 255.
    fn segment(&self, image: &DynamicImage) -> Result<GrayImage>;
}

/// Blur, global threshold, and border suppression.
///
/// Assumes a bright page on a darker surface. Pixels within `border_size`
/// of the image edge are always background, so a page touching the frame
/// still yields a closed outline.
#[derive(Debug, Clone)]
pub struct ThresholdSegmenter {
    blur_sigma: f32,
    threshold: ThresholdMode,
    border_size: u32,
}

impl ThresholdSegmenter {
    pub fn new(blur_sigma: f32, threshold: ThresholdMode, border_size: u32) -> Self {
        Self {
            blur_sigma,
            threshold,
            border_size,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.blur_sigma, config.threshold, config.border_size)
    }
}

impl Segmenter for ThresholdSegmenter {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn segment(&self, image: &DynamicImage) -> Result<GrayImage> {
        let (width, height) = (image.width(), image.height());
        let min_side = self
            .border_size
            .checked_mul(2)
            .and_then(|frame| frame.checked_add(1))
            .unwrap_or(u32::MAX);
        if width < min_side || height < min_side {
            return Err(ScanError::Segmentation(format!(
                "image {width}x{height} is smaller than the {}-pixel border",
                self.border_size
            )));
        }

        let gray = image.to_luma8();
        let blurred = gaussian_blur_f32(&gray, self.blur_sigma);
        debug!(sigma = self.blur_sigma, "Applied Gaussian blur");

        let level = match self.threshold {
            ThresholdMode::Fixed(level) => level,
            ThresholdMode::Otsu => otsu_level(&blurred),
        };
        let mut mask = threshold(&blurred, level, ThresholdType::Binary);
        clear_border(&mut mask, self.border_size);

        let foreground = mask.pixels().filter(|p| p.0[0] > 0).count();
        if foreground == 0 {
            return Err(ScanError::Segmentation(format!(
                "no foreground pixels above threshold {level}"
            )));
        }
        info!(level, foreground, "Foreground separated from background");
        Ok(mask)
    }
}

/// Force a frame of `border` pixels to background.
fn clear_border(mask: &mut GrayImage, border: u32) {
    let (w, h) = mask.dimensions();
    for y in 0..h {
        for x in 0..w {
            if x < border || y < border || x >= w - border || y >= h - border {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
    }
}
