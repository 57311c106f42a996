// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine-readable record of one collection run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::gates::CollectMode;
use crate::profile::CliProfile;

/// Written as `collector_report.json` at the run root, so an archive can
/// be audited later without guessing how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub collector_version: String,
    pub cli: String,
    pub cli_version: String,
    pub mode: CollectMode,
    pub namespaces: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: u64,
}

impl RunReport {
    pub fn new(
        profile: &CliProfile,
        mode: CollectMode,
        namespaces: Vec<String>,
        started_at: DateTime<Utc>,
        duration_secs: u64,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            collector_version: env!("CARGO_PKG_VERSION").to_string(),
            cli: profile.kind.binary().to_string(),
            cli_version: profile.version.to_string(),
            mode,
            namespaces,
            started_at,
            duration_secs,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
