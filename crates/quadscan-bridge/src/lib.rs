// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// quadscan-bridge: collaborators that feed the corner editor with pointer
// events and draw its overlay.
//
// The only bridge shipped today is headless: events come from a JSON
// script and frames are rasterised onto the photo, so scans can run in CI
// and from the command line.

pub mod headless;
pub mod raster;
pub mod scripted;
pub mod traits;

use std::path::Path;

use image::DynamicImage;
use quadscan_core::error::Result;

pub use headless::HeadlessSession;
pub use raster::RasterCanvas;
pub use scripted::ScriptedSession;
pub use traits::SessionBridge;

/// Build the session bridge for one scan.
///
/// `script` supplies the pointer events; without one the detected corners
/// are accepted as they are.
pub fn session_bridge(
    photo: &DynamicImage,
    script: Option<&Path>,
) -> Result<Box<dyn SessionBridge>> {
    let events = match script {
        Some(path) => ScriptedSession::from_file(path)?,
        None => ScriptedSession::confirm_only(),
    };
    let canvas = RasterCanvas::new(photo)?;
    Ok(Box::new(HeadlessSession::new(events, canvas)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use quadscan_core::ScanError;
    use quadscan_document::{EditorEvent, EventSource};

    #[test]
    fn default_bridge_confirms_immediately() {
        let photo = DynamicImage::ImageRgb8(RgbImage::new(16, 16));
        let mut bridge = session_bridge(&photo, None).unwrap();
        assert_eq!(bridge.bridge_name(), "headless");

        let (source, _) = bridge.channels();
        assert_eq!(source.next_event(), Some(EditorEvent::Confirm));
        assert_eq!(source.next_event(), None);
        assert_eq!(bridge.preview().unwrap().width(), 16);
    }

    #[test]
    fn bad_script_path_is_reported() {
        let photo = DynamicImage::ImageRgb8(RgbImage::new(16, 16));
        let err = session_bridge(&photo, Some(Path::new("/no/such/events.json")))
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::Bridge(_)));
    }
}
