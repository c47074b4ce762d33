// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Staged output files: everything a scan writes is first written to a
// temporary file beside its target, and only renamed into place once every
// file has been written.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use quadscan_core::error::{Result, ScanError};
use quadscan_document::ImageProcessor;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Output files waiting to be committed. Dropping the set without calling
/// [`StagedOutputs::commit`] deletes every staged file.
#[derive(Default)]
pub struct StagedOutputs {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an image; the format follows `target`'s extension.
    pub fn image(&mut self, target: &Path, image: DynamicImage) -> Result<()> {
        let temp = temp_beside(target)?;
        ImageProcessor::from_dynamic(image).save(temp.path())?;
        self.push(temp, target);
        Ok(())
    }

    /// Stage a text file.
    pub fn text(&mut self, target: &Path, contents: &str) -> Result<()> {
        let mut temp = temp_beside(target)?;
        temp.write_all(contents.as_bytes())?;
        temp.flush()?;
        self.push(temp, target);
        Ok(())
    }

    /// Move every staged file to its target.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (temp, target) in self.staged {
            temp.persist(&target).map_err(|err| ScanError::Io(err.error))?;
            debug!(path = %target.display(), "Output committed");
            written.push(target);
        }
        info!(files = written.len(), "Outputs written");
        Ok(written)
    }

    fn push(&mut self, temp: NamedTempFile, target: &Path) {
        debug!(path = %target.display(), staged = %temp.path().display(), "Output staged");
        self.staged.push((temp, target.to_path_buf()));
    }
}

/// A temporary file in `target`'s directory carrying the same extension, so
/// the final rename stays on one filesystem and the encoder picks the same
/// format.
fn temp_beside(target: &Path) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let suffix = target
        .extension()
        .map(|ext| {
            let mut suffix = OsString::from(".");
            suffix.push(ext);
            suffix
        })
        .unwrap_or_default();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".quadscan-").suffix(&suffix);
    // Temporary files default to 0600; outputs should read like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir).map_err(|err| {
            ScanError::Io(std::io::Error::new(
                err.kind(),
                format!("cannot write {}: {err}", target.display()),
            ))
        })
}
