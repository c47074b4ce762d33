// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction: finds the document outline in a binary mask and
// simplifies it to a polygon.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point as PixelPoint;
use quadscan_core::Point;
use quadscan_core::error::{Result, ScanError};
use tracing::{debug, instrument};

/// Turns a segmentation mask into the document polygon.
pub trait ContourExtractor: Send + Sync {
    /// Return the approximated outline of the document, in no particular
    /// winding order.
    fn extract(&self, mask: &GrayImage) -> Result<Vec<Point>>;
}

/// Takes the outer contour enclosing the largest area and simplifies it
/// with Douglas-Peucker.
#[derive(Debug, Clone)]
pub struct LargestContour {
    epsilon: f64,
}

impl LargestContour {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl ContourExtractor for LargestContour {
    #[instrument(skip_all, fields(epsilon = self.epsilon))]
    fn extract(&self, mask: &GrayImage) -> Result<Vec<Point>> {
        let contours = find_contours::<i32>(mask);
        debug!(count = contours.len(), "Contours found");

        // Equal areas keep the earlier contour.
        let mut largest: Option<(f64, &[PixelPoint<i32>])> = None;
        for contour in contours.iter().filter(|c| c.border_type == BorderType::Outer) {
            let area = shoelace_area(&contour.points);
            if largest.is_none_or(|(best, _)| area > best) {
                largest = Some((area, &contour.points));
            }
        }
        let (area, outline) = largest.ok_or(ScanError::NoContour)?;

        let mut polygon = approximate_polygon_dp(outline, self.epsilon, true);
        polygon.dedup();
        if polygon.len() > 1 && polygon.first() == polygon.last() {
            polygon.pop();
        }
        debug!(
            area,
            outline_points = outline.len(),
            polygon_points = polygon.len(),
            "Document outline simplified"
        );
        Ok(polygon.into_iter().map(|p| Point::new(p.x, p.y)).collect())
    }
}

/// Enclosed area of a closed pixel outline (shoelace formula).
fn shoelace_area(points: &[PixelPoint<i32>]) -> f64 {
    let n = points.len();
    let mut twice = 0i64;
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (twice as f64 / 2.0).abs()
}
