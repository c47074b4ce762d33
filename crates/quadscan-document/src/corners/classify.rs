// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner classifier: orders the axis extremes of an unordered polygon into
// the four canonical slots and reports how the document is rotated.

use quadscan_core::config::UprightPolicy;
use quadscan_core::error::{Result, ScanError};
use quadscan_core::{BoundingRect, Orientation, Point, PointSet};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Indices (into the raw polygon) of the four axis extremes.
///
/// Ties keep the first occurrence in scan order. Any other rule would be
/// just as valid geometrically; this one keeps results reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extremes {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl Extremes {
    /// Scan `points` once. `points` must not be empty.
    fn scan(points: &[Point]) -> Self {
        let mut ext = Self {
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
        };
        for (i, p) in points.iter().enumerate().skip(1) {
            if p.x > points[ext.max_x].x {
                ext.max_x = i;
            }
            if p.x < points[ext.min_x].x {
                ext.min_x = i;
            }
            if p.y > points[ext.max_y].y {
                ext.max_y = i;
            }
            if p.y < points[ext.min_y].y {
                ext.min_y = i;
            }
        }
        ext
    }
}

/// Result of classifying one polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Corners in slot order.
    pub points: PointSet,
    pub orientation: Orientation,
    /// Bounding rectangle of the raw polygon.
    pub bounds: BoundingRect,
    pub extremes: Extremes,
}

/// Orders raw polygon points into an oriented [`PointSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    upright_policy: UprightPolicy,
}

impl Classifier {
    pub fn new(upright_policy: UprightPolicy) -> Self {
        Self { upright_policy }
    }

    /// Classify the approximated outline of a document.
    ///
    /// The heights of the leftmost and rightmost points decide the
    /// orientation:
    ///
    /// - leftmost higher: [`Orientation::ToLeft`], the leftmost point is the
    ///   upper-left corner and the topmost point the upper-right one.
    /// - leftmost lower: [`Orientation::ToRight`], the topmost point is the
    ///   upper-left corner and the rightmost point the upper-right one.
    /// - same height: [`Orientation::Upright`], resolved by the configured
    ///   [`UprightPolicy`].
    ///
    /// Fails with `InsufficientPoints` below 4 points and `DegenerateInput`
    /// when every point lies on one line.
    #[instrument(skip_all, fields(points = raw.len()))]
    pub fn classify(&self, raw: &[Point]) -> Result<Classification> {
        if raw.len() < 4 {
            return Err(ScanError::InsufficientPoints { found: raw.len() });
        }
        check_not_collinear(raw)?;

        let bounds = BoundingRect::from_points(raw)
            .ok_or(ScanError::InsufficientPoints { found: 0 })?;
        let extremes = Extremes::scan(raw);
        debug!(?bounds, ?extremes, "Extreme points found");

        let min_x = raw[extremes.min_x];
        let max_x = raw[extremes.max_x];
        let min_y = raw[extremes.min_y];
        let max_y = raw[extremes.max_y];

        let (orientation, points) = if min_x.y < max_x.y {
            (
                Orientation::ToLeft,
                PointSet::new(min_x, min_y, max_x, max_y),
            )
        } else if min_x.y > max_x.y {
            (
                Orientation::ToRight,
                PointSet::new(min_y, max_x, max_y, min_x),
            )
        } else {
            match self.upright_policy {
                UprightPolicy::BoundingBox => (Orientation::Upright, bounds.corners()),
                UprightPolicy::Reject => return Err(ScanError::DegenerateOrientation),
            }
        };

        info!(%orientation, "Orientation of document");
        Ok(Classification {
            points,
            orientation,
            bounds,
            extremes,
        })
    }
}

/// Classify with the default upright policy.
pub fn classify(raw: &[Point]) -> Result<Classification> {
    Classifier::default().classify(raw)
}

fn check_not_collinear(raw: &[Point]) -> Result<()> {
    let origin = raw[0];
    let Some(&other) = raw.iter().find(|p| **p != origin) else {
        return Err(ScanError::DegenerateInput(format!(
            "all {} points coincide at {origin}",
            raw.len()
        )));
    };
    if raw.iter().all(|p| origin.cross(other, *p) == 0) {
        return Err(ScanError::DegenerateInput(
            "all points lie on one line".to_string(),
        ));
    }
    Ok(())
}
