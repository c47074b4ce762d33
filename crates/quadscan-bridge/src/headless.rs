// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless bridge for CLI and CI runs: scripted events in, raster frames out.

use image::DynamicImage;
use quadscan_document::{EventSource, OverlayRenderer};
use tracing::debug;

use crate::raster::RasterCanvas;
use crate::scripted::ScriptedSession;
use crate::traits::SessionBridge;

/// Pairs a [`ScriptedSession`] with a [`RasterCanvas`].
pub struct HeadlessSession {
    events: ScriptedSession,
    canvas: RasterCanvas,
}

impl HeadlessSession {
    pub fn new(events: ScriptedSession, canvas: RasterCanvas) -> Self {
        Self { events, canvas }
    }
}

impl SessionBridge for HeadlessSession {
    fn bridge_name(&self) -> &str {
        "headless"
    }

    fn channels(&mut self) -> (&mut dyn EventSource, &mut dyn OverlayRenderer) {
        (&mut self.events, &mut self.canvas)
    }

    fn preview(&self) -> Option<DynamicImage> {
        debug!(
            frames = self.canvas.frames(),
            events = self.events.delivered(),
            "Overlay preview taken"
        );
        Some(DynamicImage::ImageRgb8(self.canvas.frame().clone()))
    }
}
