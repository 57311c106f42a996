// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure feature gates over detected versions and operator image tags.
//!
//! Restricted-mode eligibility tracks externally released operator
//! versions, so the thresholds and the deny-list of legacy image digests
//! live in [`GateConfig`] as data with defaults, not as scattered
//! hard-coded comparisons.

use std::fmt;

use serde::Serialize;

use crate::profile::CliVersion;

/// How much of a namespace the collector may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    /// Only resources labeled as owned by the monitored application.
    /// Smaller archive, fewer required permissions.
    Restricted,
    /// Everything in the namespace.
    All,
}

impl CollectMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectMode::Restricted => "restricted",
            CollectMode::All => "all",
        }
    }
}

impl fmt::Display for CollectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator image reference reduced to its gating inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// The tag, or the `sha256:...` digest when pinned by digest.
    pub tag: String,
    pub is_digest: bool,
}

/// Split an image reference into tag/digest form.
///
/// `registry/repo@sha256:<hex>` pins by digest; otherwise the tag follows
/// the last `:` after the last `/` (a bare `:` earlier is a registry
/// port). No tag at all yields an empty string.
pub fn parse_image_ref(image: &str) -> ImageRef {
    if let Some((_, digest)) = image.split_once('@') {
        return ImageRef {
            tag: digest.to_string(),
            is_digest: true,
        };
    }
    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    let tag = match image[name_start..].split_once(':') {
        Some((_, tag)) => tag.to_string(),
        None => String::new(),
    };
    ImageRef {
        tag,
        is_digest: false,
    }
}

/// Thresholds and deny-list data for the restricted-mode gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// First operator release that supports restricted collection.
    pub min_restricted_tag: (u32, u32, u32),
    /// Image digests of builds published before the version scheme above
    /// carried meaning; all of them predate restricted collection.
    pub legacy_digests: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_restricted_tag: (6, 2, 18),
            legacy_digests: vec![
                "sha256:2b3c5f9e8d41a6c0f2d8a9b1e7c4d5f6a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3"
                    .to_string(),
                "sha256:7f1e2d3c4b5a6978869504132231405f6e7d8c9b0a1f2e3d4c5b6a7988970615"
                    .to_string(),
            ],
        }
    }
}

impl GateConfig {
    /// Whether the operator build identified by `tag` supports restricted
    /// collection.
    ///
    /// Digest-pinned images are assumed current unless deny-listed.
    /// Tags parse as `MAJOR.MINOR.PATCH[-build]`; anything unparseable is
    /// treated as pre-feature.
    pub fn supports_restricted_mode(&self, tag: &str, is_digest: bool) -> bool {
        if is_digest {
            return !self.legacy_digests.iter().any(|d| d == tag);
        }
        let Some((major, minor, patch)) = parse_operator_tag(tag) else {
            return false;
        };
        let (min_major, min_minor, min_patch) = self.min_restricted_tag;
        if major != min_major {
            return major > min_major;
        }
        if minor != min_minor {
            return minor > min_minor;
        }
        patch >= min_patch
    }

    /// Mode used when the caller did not force one: restricted whenever
    /// the operator build allows it, or when no tag is known at all.
    pub fn default_mode(&self, tag: &str, is_digest: bool) -> CollectMode {
        if tag.is_empty() || self.supports_restricted_mode(tag, is_digest) {
            CollectMode::Restricted
        } else {
            CollectMode::All
        }
    }
}

/// Parse an operator tag of the form `MAJOR.MINOR.PATCH[-build]`.
fn parse_operator_tag(tag: &str) -> Option<(u32, u32, u32)> {
    let base = tag.split('-').next()?;
    let mut parts = base.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((major, minor, patch))
}

/// Compare two `major.minor` version strings numerically.
///
/// False on any parse error: an unreadable version never unlocks a
/// feature.
pub fn version_at_least(current: &str, required: &str) -> bool {
    match (CliVersion::parse(current), CliVersion::parse(required)) {
        (Some(current), Some(required)) => current >= required,
        _ => false,
    }
}

#[cfg(test)]
#[path = "gates_tests.rs"]
mod tests;
