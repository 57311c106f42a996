// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fatal collection errors.
//!
//! Only configuration problems surface here; transient CLI failures,
//! missing resources, and timeouts are absorbed where they happen and
//! show up as log lines instead.

use std::path::PathBuf;

/// Errors that abort a collection run.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Neither supported CLI answered a probe.
    #[error("no usable cluster CLI found (tried kubectl and oc)")]
    NoUsableCli,

    /// The run directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The collected tree could not be archived.
    #[error("failed to archive {path}: {source}")]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },
}
