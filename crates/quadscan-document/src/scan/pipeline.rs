// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline: load, segment, extract, classify, edit, rectify.
//
// Each stage is exposed on its own so callers can run the slow ones off the
// async runtime and report progress between them.

use std::path::Path;

use image::{DynamicImage, GrayImage};
use quadscan_core::error::{Result, ScanError};
use quadscan_core::{Orientation, Point, PointSet, ScanConfig};
use tracing::{info, instrument, warn};

use super::contours::{ContourExtractor, LargestContour};
use super::rectify::{PerspectiveRectifier, Rectifier};
use super::segment::{Segmenter, ThresholdSegmenter};
use crate::corners::{Classification, Classifier};
use crate::editor::{CornerEditor, EditorConfig, EventSource, OverlayRenderer, SessionStatus};
use crate::image::ImageProcessor;

/// Everything a completed scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// What the classifier found before any editing.
    pub classification: Classification,
    /// Corners as confirmed by the user.
    pub corners: PointSet,
    /// The flattened document.
    pub rectified: DynamicImage,
}

/// The configured chain of scan stages.
pub struct ScanPipeline {
    config: ScanConfig,
    segmenter: Box<dyn Segmenter>,
    extractor: Box<dyn ContourExtractor>,
    classifier: Classifier,
    rectifier: Box<dyn Rectifier>,
}

impl ScanPipeline {
    /// Build the default stages from `config`. Fails if the configuration
    /// does not validate.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            segmenter: Box::new(ThresholdSegmenter::from_config(&config)),
            extractor: Box::new(LargestContour::new(config.approx_epsilon)),
            classifier: Classifier::new(config.upright_policy),
            rectifier: Box::new(PerspectiveRectifier::new().with_aspect_ratio(config.aspect_ratio)),
            config,
        })
    }

    // -- Stages ---------------------------------------------------------------

    /// Decode the photo, halving it when wider than `max_width`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DynamicImage> {
        Ok(ImageProcessor::open(path)?
            .limit_width(self.config.max_width)
            .into_dynamic())
    }

    pub fn segment(&self, image: &DynamicImage) -> Result<GrayImage> {
        self.segmenter.segment(image)
    }

    pub fn extract_polygon(&self, mask: &GrayImage) -> Result<Vec<Point>> {
        self.extractor.extract(mask)
    }

    pub fn classify(&self, polygon: &[Point]) -> Result<Classification> {
        self.classifier.classify(polygon)
    }

    /// Run an editing session over the classified corners.
    ///
    /// Events are pulled from `source` until one confirms the corners. A
    /// source that runs dry first aborts the scan.
    #[instrument(skip_all, fields(orientation = %classification.orientation))]
    pub fn edit<S: EventSource, R: OverlayRenderer>(
        &self,
        classification: &Classification,
        mut source: S,
        renderer: R,
    ) -> Result<PointSet> {
        if classification.orientation == Orientation::NotSet {
            return Err(ScanError::NotClassified);
        }

        let mut editor = CornerEditor::new(
            classification.points,
            classification.orientation,
            EditorConfig::from(&self.config),
            renderer,
        );

        let mut events = 0usize;
        while let Some(event) = source.next_event() {
            events += 1;
            if editor.handle_event(event) == SessionStatus::Finished {
                info!(events, "Corners confirmed");
                return Ok(editor.into_points());
            }
        }
        warn!(events, "Event source closed before the corners were confirmed");
        Err(ScanError::SessionAborted)
    }

    pub fn rectify(&self, image: &DynamicImage, corners: &PointSet) -> Result<DynamicImage> {
        self.rectifier.rectify(image, corners)
    }

    /// Every stage in order, on the calling thread.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn run<S: EventSource, R: OverlayRenderer>(
        &self,
        path: impl AsRef<Path>,
        source: S,
        renderer: R,
    ) -> Result<ScanOutcome> {
        let photo = self.load(path.as_ref())?;
        let mask = self.segment(&photo)?;
        let polygon = self.extract_polygon(&mask)?;
        let classification = self.classify(&polygon)?;
        let corners = self.edit(&classification, source, renderer)?;
        let rectified = self.rectify(&photo, &corners)?;
        Ok(ScanOutcome {
            classification,
            corners,
            rectified,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::corners::classify;
    use crate::editor::{EditorEvent, Overlay};
    use image::{Luma, Rgb, RgbImage};
    use imageproc::drawing::draw_polygon_mut;
    use imageproc::point::Point as PixelPoint;
    use quadscan_core::Slot;

    /// Counts frames without keeping them.
    #[derive(Default)]
    struct FrameCounter(usize);

    impl OverlayRenderer for FrameCounter {
        fn render(&mut self, _overlay: &Overlay) {
            self.0 += 1;
        }
    }

    /// A document rotated clockwise, corners given in slot order.
    const DRAWN: [(i32, i32); 4] = [(150, 40), (360, 110), (300, 460), (60, 380)];

    fn tilted_page() -> DynamicImage {
        let mut img = RgbImage::from_pixel(420, 520, Rgb([30, 30, 30]));
        let poly: Vec<PixelPoint<i32>> = DRAWN.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect();
        draw_polygon_mut(&mut img, &poly, Rgb([240, 240, 240]));
        DynamicImage::ImageRgb8(img)
    }

    fn pipeline() -> ScanPipeline {
        ScanPipeline::new(ScanConfig {
            blur_sigma: 1.0,
            ..ScanConfig::default()
        })
        .unwrap()
    }

    fn assert_near(actual: Point, expected: (i32, i32)) {
        let d = actual.distance(Point::from(expected));
        assert!(d <= 6.0, "{actual} is {d:.1}px from {expected:?}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ScanConfig {
            blur_sigma: 0.0,
            ..ScanConfig::default()
        };
        assert!(matches!(ScanPipeline::new(config), Err(ScanError::Config(_))));
    }

    #[test]
    fn tilted_page_classifies_to_right() {
        let pipeline = pipeline();
        let mask = pipeline.segment(&tilted_page()).unwrap();
        let polygon = pipeline.extract_polygon(&mask).unwrap();
        let classification = pipeline.classify(&polygon).unwrap();

        assert_eq!(classification.orientation, Orientation::ToRight);
        for (slot, expected) in Slot::ALL.into_iter().zip(DRAWN) {
            assert_near(classification.points[slot], expected);
        }
    }

    #[test]
    fn edit_applies_drags_until_confirm() {
        let classification = classify(&[
            Point::new(50, 10),
            Point::new(300, 60),
            Point::new(280, 260),
            Point::new(30, 220),
        ])
        .unwrap();
        let events = VecDeque::from([
            EditorEvent::Press(Point::new(52, 12)),
            EditorEvent::Move(Point::new(40, 5)),
            EditorEvent::Release(Point::new(40, 5)),
            EditorEvent::Confirm,
            EditorEvent::Press(Point::new(300, 60)),
        ]);
        let mut frames = FrameCounter::default();

        let corners = pipeline()
            .edit(&classification, events, &mut frames)
            .unwrap();

        assert_eq!(corners[Slot::UpperLeft], Point::new(40, 5));
        assert_eq!(corners[Slot::UpperRight], Point::new(300, 60));
        assert_eq!(frames.0, 2);
    }

    #[test]
    fn exhausted_source_aborts() {
        let classification = classify(&[
            Point::new(50, 10),
            Point::new(300, 60),
            Point::new(280, 260),
            Point::new(30, 220),
        ])
        .unwrap();
        let events = VecDeque::from([EditorEvent::Press(Point::new(50, 10))]);
        let err = pipeline()
            .edit(&classification, events, FrameCounter::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::SessionAborted));
    }

    #[test]
    fn unclassified_corners_cannot_be_edited() {
        let mut classification = classify(&[
            Point::new(50, 10),
            Point::new(300, 60),
            Point::new(280, 260),
            Point::new(30, 220),
        ])
        .unwrap();
        classification.orientation = Orientation::NotSet;

        let err = pipeline()
            .edit(&classification, VecDeque::from([EditorEvent::Confirm]), FrameCounter::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::NotClassified));
    }

    #[test]
    fn run_produces_a_rectified_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        tilted_page().save(&path).unwrap();

        let outcome = pipeline()
            .run(&path, VecDeque::from([EditorEvent::Confirm]), FrameCounter::default())
            .unwrap();

        assert_eq!(outcome.corners, outcome.classification.points);
        let (w, h) = (outcome.rectified.width(), outcome.rectified.height());
        // Top edge ~221px, left edge ~352px.
        assert!((205..=235).contains(&w), "width {w}");
        assert!((335..=365).contains(&h), "height {h}");

        // The middle of the flattened page is paper, not desk.
        let centre = outcome.rectified.to_luma8().get_pixel(w / 2, h / 2).0[0];
        assert!(centre > 200, "centre luma {centre}");
    }

    #[test]
    fn blank_photo_fails_in_segmentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.png");
        image::GrayImage::from_pixel(64, 64, Luma([20u8])).save(&path).unwrap();

        let err = pipeline()
            .run(&path, VecDeque::<EditorEvent>::new(), FrameCounter::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::Segmentation(_)));
    }
}
