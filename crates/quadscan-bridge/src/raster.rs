// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster overlay canvas: draws editor frames on top of the photo.

use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use quadscan_core::Point;
use quadscan_core::error::{Result, ScanError};
use quadscan_document::editor::overlay::{
    Annotation, EDGE_COLOR, EDGE_THICKNESS, HANDLE_COLOR, TEXT_COLOR,
};
use quadscan_document::{Overlay, OverlayRenderer};
use tracing::{debug, trace};

/// DejaVu Sans Mono; see `assets/DejaVuSansMono-LICENSE.txt`.
static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Pixel height of annotation and caption text.
const ANNOTATION_SCALE: f32 = 40.0;
/// Pixel height of the slot index drawn beside each handle.
const LABEL_SCALE: f32 = 28.0;

/// Keeps the untouched photo and the most recent frame drawn over it.
pub struct RasterCanvas {
    base: RgbImage,
    frame: RgbImage,
    frames: usize,
    font: FontRef<'static>,
}

impl RasterCanvas {
    pub fn new(photo: &DynamicImage) -> Result<Self> {
        let font = FontRef::try_from_slice(FONT_DATA)
            .map_err(|err| ScanError::Bridge(format!("overlay font is unreadable: {err}")))?;
        let base = photo.to_rgb8();
        Ok(Self {
            frame: base.clone(),
            base,
            frames: 0,
            font,
        })
    }

    /// The most recent frame (the bare photo before the first render).
    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }

    /// Number of frames rendered.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn draw_line_of_text(&self, frame: &mut RgbImage, line: &Annotation) {
        draw_text_mut(
            frame,
            rgb(TEXT_COLOR),
            line.origin.x,
            line.origin.y,
            PxScale::from(ANNOTATION_SCALE),
            &self.font,
            &line.text,
        );
        trace!(text = %line.text, origin = %line.origin, "Text drawn");
    }
}

impl OverlayRenderer for RasterCanvas {
    fn render(&mut self, overlay: &Overlay) {
        let mut frame = self.base.clone();
        let (w, h) = frame.dimensions();

        let edge = rgb(EDGE_COLOR);
        let half = (EDGE_THICKNESS / 2) as f32;
        for &(a, b) in &overlay.edges {
            let Some((start, end)) = clip_segment(a, b, w, h) else {
                continue;
            };
            // Offset copies of the segment give it thickness.
            let mut offset = -half;
            while offset <= half {
                draw_line_segment_mut(
                    &mut frame,
                    (start.0 + offset, start.1),
                    (end.0 + offset, end.1),
                    edge,
                );
                draw_line_segment_mut(
                    &mut frame,
                    (start.0, start.1 + offset),
                    (end.0, end.1 + offset),
                    edge,
                );
                offset += 1.0;
            }
        }

        let fill = rgb(HANDLE_COLOR);
        for handle in &overlay.handles {
            let r = handle.radius as i64;
            let (cx, cy) = (handle.center.x as i64, handle.center.y as i64);
            if cx + r < 0 || cy + r < 0 || cx - r >= w as i64 || cy - r >= h as i64 {
                trace!(slot = %handle.slot, "Handle off canvas");
                continue;
            }
            let (cx, cy, r) = (cx as i32, cy as i32, r as i32);
            draw_filled_circle_mut(&mut frame, (cx, cy), r, fill);
            // The index sits above and to the right of the handle.
            draw_text_mut(
                &mut frame,
                rgb(TEXT_COLOR),
                cx + r,
                cy - r - LABEL_SCALE as i32,
                PxScale::from(LABEL_SCALE),
                &self.font,
                &handle.label,
            );
        }

        for line in &overlay.annotations {
            self.draw_line_of_text(&mut frame, line);
        }
        self.draw_line_of_text(&mut frame, &overlay.caption());

        self.frame = frame;
        self.frames += 1;
        debug!(frame = self.frames, orientation = %overlay.orientation, "Overlay rendered");
    }
}

fn rgb(rgba: [u8; 4]) -> Rgb<u8> {
    Rgb([rgba[0], rgba[1], rgba[2]])
}

/// Clip the segment `a`-`b` to a `w` x `h` canvas (Liang-Barsky). `None`
/// when it misses the canvas entirely.
fn clip_segment(a: Point, b: Point, w: u32, h: u32) -> Option<((f32, f32), (f32, f32))> {
    let (x0, y0) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - x0, b.y as f64 - y0);
    let (max_x, max_y) = ((w as f64 - 1.0).max(0.0), (h as f64 - 1.0).max(0.0));

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| ((x0 + t * dx) as f32, (y0 + t * dy) as f32);
    Some((at(t0), at(t1)))
}
