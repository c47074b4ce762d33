// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge trait shared by every windowing backend.

use image::DynamicImage;
use quadscan_document::{EventSource, OverlayRenderer};

/// One editing session's connection to a window system.
///
/// The editor needs an event source and a renderer at the same time, so a
/// bridge hands both out together from [`SessionBridge::channels`].
pub trait SessionBridge: Send {
    /// Human-readable backend name (e.g. "headless").
    fn bridge_name(&self) -> &str;

    /// Borrow the event source and renderer for the editor.
    fn channels(&mut self) -> (&mut dyn EventSource, &mut dyn OverlayRenderer);

    /// The last overlay frame, for backends that draw into memory. Taken
    /// after the session so the caller decides when it is written.
    fn preview(&self) -> Option<DynamicImage>;
}
