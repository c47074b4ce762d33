// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification: maps the confirmed quadrilateral onto an
// upright rectangle.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use quadscan_core::error::{Result, ScanError};
use quadscan_core::{PointSet, Slot};
use tracing::{info, instrument};

/// Largest output we are willing to allocate.
const MAX_OUTPUT_PIXELS: u64 = 64_000_000;

/// Produces the flattened document from the photo and its corners.
pub trait Rectifier: Send + Sync {
    /// `corners` are in slot order UL, UR, LR, LL.
    fn rectify(&self, image: &DynamicImage, corners: &PointSet) -> Result<DynamicImage>;
}

/// Projective warp onto a rectangle sized from the quadrilateral's top and
/// left edges.
#[derive(Debug, Clone, Default)]
pub struct PerspectiveRectifier {
    aspect_ratio: Option<f32>,
}

impl PerspectiveRectifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `width / height == ratio` on the output.
    pub fn with_aspect_ratio(mut self, ratio: Option<f32>) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Output size in pixels for `corners`.
    ///
    /// Width is the length of the top edge and height the length of the left
    /// edge, both truncated to whole pixels.
    pub fn output_size(&self, corners: &PointSet) -> Result<(u32, u32)> {
        let width = corners[Slot::UpperLeft].distance(corners[Slot::UpperRight]);
        let height = match self.aspect_ratio {
            Some(ratio) => width / ratio as f64,
            None => corners[Slot::UpperLeft].distance(corners[Slot::LowerLeft]),
        };
        let (w, h) = (width.trunc(), height.trunc());

        if w < 2.0 || h < 2.0 {
            return Err(ScanError::Rectify(format!(
                "corners span only {w}x{h} pixels"
            )));
        }
        if w * h > MAX_OUTPUT_PIXELS as f64 {
            return Err(ScanError::Rectify(format!(
                "output of {w}x{h} pixels exceeds the {MAX_OUTPUT_PIXELS}-pixel limit"
            )));
        }
        Ok((w as u32, h as u32))
    }
}

impl Rectifier for PerspectiveRectifier {
    #[instrument(skip_all)]
    fn rectify(&self, image: &DynamicImage, corners: &PointSet) -> Result<DynamicImage> {
        let (out_w, out_h) = self.output_size(corners)?;

        let src = (*corners.as_array()).map(|p| (p.x as f32, p.y as f32));
        let (right, bottom) = ((out_w - 1) as f32, (out_h - 1) as f32);
        let dest: [(f32, f32); 4] = [(0.0, 0.0), (right, 0.0), (right, bottom), (0.0, bottom)];

        let projection = Projection::from_control_points(src, dest).ok_or_else(|| {
            ScanError::Rectify(format!("no projective transform maps {corners:?} to a rectangle"))
        })?;

        let input = image.to_rgb8();
        let mut output = RgbImage::new(out_w, out_h);
        warp_into(&input, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]), &mut output);

        info!(out_w, out_h, "Perspective correction applied");
        Ok(DynamicImage::ImageRgb8(output))
    }
}
