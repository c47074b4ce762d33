// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Overlay model: everything the rendering collaborator needs to draw the
// corner editor: quadrilateral edges, corner handles, and instruction text.

use quadscan_core::{Orientation, Point, PointSet, Slot};

/// Edge colour (RGBA, blue).
pub const EDGE_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Handle fill colour (RGBA, blue).
pub const HANDLE_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Label and annotation colour (RGBA, green).
pub const TEXT_COLOR: [u8; 4] = [0, 255, 0, 255];
/// Edge stroke width in pixels.
pub const EDGE_THICKNESS: u32 = 3;
/// Where the first annotation line is drawn.
pub const ANNOTATION_ORIGIN: Point = Point::new(100, 100);
/// Vertical distance between annotation lines.
pub const ANNOTATION_SPACING: i32 = 60;

/// A draggable corner marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    pub slot: Slot,
    pub center: Point,
    pub radius: u32,
    /// Slot index drawn next to the handle.
    pub label: String,
}

/// A line of caller-supplied text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub text: String,
    pub origin: Point,
}

/// One complete frame of the editor overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Edges in cyclic order, starting at the upper-left corner.
    pub edges: [(Point, Point); 4],
    pub handles: [Handle; 4],
    pub annotations: Vec<Annotation>,
    pub orientation: Orientation,
}

impl Overlay {
    /// Build the overlay for `points`. Pure; the same inputs always produce
    /// the same overlay.
    pub fn build(
        points: &PointSet,
        handle_radius: u32,
        annotations: &[String],
        orientation: Orientation,
    ) -> Self {
        let handles = Slot::ALL.map(|slot| Handle {
            slot,
            center: points[slot],
            radius: handle_radius,
            label: slot.index().to_string(),
        });
        let annotations = annotations
            .iter()
            .zip(0..)
            .map(|(text, line)| Annotation {
                text: text.clone(),
                origin: Point::new(
                    ANNOTATION_ORIGIN.x,
                    ANNOTATION_ORIGIN.y + line * ANNOTATION_SPACING,
                ),
            })
            .collect();
        Self {
            edges: points.edges(),
            handles,
            annotations,
            orientation,
        }
    }

    /// The orientation line, drawn one line below the last annotation.
    pub fn caption(&self) -> Annotation {
        let line = self.annotations.len() as i32;
        Annotation {
            text: format!("Orientation: {}", self.orientation),
            origin: Point::new(
                ANNOTATION_ORIGIN.x,
                ANNOTATION_ORIGIN.y + line * ANNOTATION_SPACING,
            ),
        }
    }
}

/// Receives a fresh overlay on every redraw. Drawing is purely additive;
/// the renderer owns the pixels and the display refresh.
pub trait OverlayRenderer {
    fn render(&mut self, overlay: &Overlay);
}

impl<R: OverlayRenderer + ?Sized> OverlayRenderer for &mut R {
    fn render(&mut self, overlay: &Overlay) {
        (**self).render(overlay)
    }
}

impl<R: OverlayRenderer + ?Sized> OverlayRenderer for Box<R> {
    fn render(&mut self, overlay: &Overlay) {
        (**self).render(overlay)
    }
}
