// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalization of `<cli> version -o json` output.
//!
//! The two CLIs disagree on shape: kubectl nests a numeric major/minor
//! pair under `serverVersion`, while oc exposes a flat `openshiftVersion`
//! release string. Both reduce to [`CliVersion`]. Parsing is deliberately
//! isolated here with exhaustive tests per known output shape, so CLI
//! output drift is caught at the test boundary rather than at runtime.

use serde::Deserialize;

use crate::profile::{numeric_prefix, CliKind, CliVersion};

#[derive(Debug, Deserialize)]
struct KubectlVersionOutput {
    #[serde(rename = "serverVersion")]
    server_version: Option<ServerVersion>,
}

#[derive(Debug, Deserialize)]
struct ServerVersion {
    major: String,
    minor: String,
}

#[derive(Debug, Deserialize)]
struct OcVersionOutput {
    #[serde(rename = "openshiftVersion")]
    openshift_version: Option<String>,
}

/// Normalize raw `version -o json` output into a [`CliVersion`].
///
/// `None` on any shape mismatch; callers fall back to the CLI's
/// conservative default rather than guessing.
pub fn parse_version_output(kind: CliKind, raw: &str) -> Option<CliVersion> {
    match kind {
        CliKind::Kubectl => {
            let parsed: KubectlVersionOutput = serde_json::from_str(raw).ok()?;
            let server = parsed.server_version?;
            // kubectl minors carry provider suffixes, e.g. "23+".
            let major = numeric_prefix(&server.major)?;
            let minor = numeric_prefix(&server.minor)?;
            Some(CliVersion::new(major, minor))
        }
        CliKind::Oc => {
            let parsed: OcVersionOutput = serde_json::from_str(raw).ok()?;
            CliVersion::parse(&parsed.openshift_version?)
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
