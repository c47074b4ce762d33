// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan orchestration: runs the pipeline stages for one photo, keeps the
// blocking image work off the async runtime, and writes the results.
//
// Outputs are staged beside their targets and renamed into place only once
// every file has been written, so a failed scan leaves no output behind.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use quadscan_core::ScanConfig;
use quadscan_core::error::{Result, ScanError};
use quadscan_document::ScanPipeline;
use tracing::{info, instrument};

use super::outputs::StagedOutputs;
use super::report::ScanReport;
use super::spinner::Spinner;

/// Inputs and outputs of one scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub image: PathBuf,
    pub output: PathBuf,
    pub events: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Shared scan service. Cheap to clone.
#[derive(Clone)]
pub struct ScanService {
    pipeline: Arc<ScanPipeline>,
}

impl ScanService {
    pub fn new(config: ScanConfig) -> Result<Self> {
        Ok(Self {
            pipeline: Arc::new(ScanPipeline::new(config)?),
        })
    }

    #[instrument(skip_all, fields(image = %request.image.display()))]
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport> {
        // Decoding and segmentation are the slow part.
        let spinner = Spinner::start("Finding the document");
        let pipeline = Arc::clone(&self.pipeline);
        let image = request.image.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let photo = pipeline.load(&image)?;
            let mask = pipeline.segment(&photo)?;
            Ok::<_, ScanError>((photo, mask))
        })
        .await;
        let detected = match joined {
            Ok(result) => result,
            Err(err) => Err(ScanError::Segmentation(format!("worker task failed: {err}"))),
        };
        spinner
            .stop(if detected.is_ok() { "done" } else { "failed" })
            .await;
        let (photo, mask) = detected?;

        let polygon = self.pipeline.extract_polygon(&mask)?;
        let classification = self.pipeline.classify(&polygon)?;

        let mut bridge = quadscan_bridge::session_bridge(&photo, request.events.as_deref())?;
        let corners = {
            let (source, renderer) = bridge.channels();
            self.pipeline.edit(&classification, source, renderer)?
        };
        let rectified = self.pipeline.rectify(&photo, &corners)?;

        let report = ScanReport {
            input: request.image.clone(),
            output: request.output.clone(),
            orientation: classification.orientation,
            bounds: classification.bounds,
            detected: classification.points,
            corners,
            edited: corners != classification.points,
            output_width: rectified.width(),
            output_height: rectified.height(),
            bridge: bridge.bridge_name().to_string(),
            scanned_at: Utc::now(),
        };

        let mut outputs = StagedOutputs::new();
        outputs.image(&request.output, rectified)?;
        if let Some(path) = &request.preview {
            if let Some(frame) = bridge.preview() {
                outputs.image(path, frame)?;
            }
        }
        if let Some(path) = &request.report {
            outputs.text(path, &report.to_json()?)?;
        }
        outputs.commit()?;

        info!(
            output = %request.output.display(),
            width = report.output_width,
            height = report.output_height,
            "Document scanned"
        );
        Ok(report)
    }
}
