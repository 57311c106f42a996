// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final gzip tarball of the collected tree.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::CollectError;

/// Archive `run_dir` as `<run_dir>.tar.gz` and remove the source tree.
///
/// The archive's top-level entry is the run directory name, so extraction
/// recreates the tree as collected. A failure to remove the source after
/// a successful archive is only warned about.
pub fn archive_run_directory(run_dir: &Path) -> Result<PathBuf, CollectError> {
    let archive_path = PathBuf::from(format!("{}.tar.gz", run_dir.display()));
    let dir_name = run_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collected".to_string());

    let file = File::create(&archive_path).map_err(|source| CollectError::Archive {
        path: archive_path.clone(),
        source,
    })?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(&dir_name, run_dir)
        .and_then(|()| builder.into_inner())
        .and_then(|encoder| encoder.finish())
        .map_err(|source| CollectError::Archive {
            path: archive_path.clone(),
            source,
        })?;

    tracing::info!(archive = %archive_path.display(), "archived collected files");

    if let Err(e) = std::fs::remove_dir_all(run_dir) {
        tracing::warn!(
            path = %run_dir.display(),
            error = %e,
            "failed to delete directory after archiving"
        );
    }

    Ok(archive_path)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
