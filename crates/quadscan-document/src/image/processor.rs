// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decode photos, shrink oversized ones, and write results.
// Operates on in-memory images using the `image` crate.

use image::DynamicImage;
use image::imageops::FilterType;
use quadscan_core::error::ScanError;
use tracing::{debug, info, instrument};

/// Wrapper around the photo being scanned.
///
/// Transformations consume `self` and return a new `ImageProcessor`,
/// enabling method chaining.
///
/// ```ignore
/// let photo = ImageProcessor::open("page.jpg")?
///     .limit_width(2000)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, ScanError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            ScanError::ImageLoad(format!("failed to open {}: {}", path.as_ref().display(), err))
        })?;
        if img.width() == 0 || img.height() == 0 {
            return Err(ScanError::ImageLoad(format!(
                "{} has no pixels",
                path.as_ref().display()
            )));
        }
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Halve both dimensions when the image is wider than `max_width`.
    ///
    /// Phone photos are far larger than segmentation needs; a single halving
    /// keeps the corners accurate to a couple of pixels.
    #[instrument(skip(self))]
    pub fn limit_width(self, max_width: u32) -> Self {
        if self.image.width() <= max_width {
            return self;
        }
        let (w, h) = ((self.image.width() / 2).max(1), (self.image.height() / 2).max(1));
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            to_w = w,
            to_h = h,
            "Downscaling oversized image"
        );
        let resized = self.image.resize_exact(w, h, FilterType::Triangle);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), ScanError> {
        self.image.save(path.as_ref()).map_err(|err| {
            ScanError::Io(std::io::Error::other(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            )))
        })?;
        debug!(path = %path.as_ref().display(), "Image saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    #[test]
    fn wide_images_are_halved() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2400, 1000));
        let out = ImageProcessor::from_dynamic(img).limit_width(2000).into_dynamic();
        assert_eq!(out.dimensions(), (1200, 500));
    }

    #[test]
    fn narrow_images_are_untouched() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2000, 3000));
        let out = ImageProcessor::from_dynamic(img).limit_width(2000).into_dynamic();
        assert_eq!(out.dimensions(), (2000, 3000));
    }

    #[test]
    fn save_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, Rgb([10, 20, 30])));
        ImageProcessor::from_dynamic(img).save(&path).unwrap();

        let loaded = ImageProcessor::open(&path).unwrap().into_dynamic();
        assert_eq!(loaded.dimensions(), (8, 6));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = ImageProcessor::open("/no/such/photo.jpg").err().unwrap();
        assert!(matches!(err, ScanError::ImageLoad(_)));
    }
}
