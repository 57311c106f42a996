// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot environment detection: which CLI to drive, at what version.
//!
//! Runs once at startup; the resulting [`CliProfile`] is read-only for the
//! rest of the run.

use rlec_core::{parse_version_output, CliKind, CliProfile, CliVersion};
use rlec_exec::{CommandRunner, CommandSpec};

use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::redis;

/// API group advertised only by OpenShift clusters; its presence decides
/// the tie when both CLIs are installed.
const OPENSHIFT_API_MARKER: &str = "route.openshift.io";

/// Determine the CLI variant and version for this run.
pub async fn detect_profile(
    runner: &dyn CommandRunner,
    config: &CollectorConfig,
) -> Result<CliProfile, CollectError> {
    let kind = detect_cli(runner, config.cli).await?;
    let version = detect_version(runner, kind).await;
    let profile = CliProfile::new(kind, version);
    tracing::info!(
        cli = %profile.kind,
        version = %profile.version,
        copy_retries = profile.supports_copy_retries,
        "detected cluster CLI"
    );
    Ok(profile)
}

/// Pick the CLI variant: explicit choice, else probe both and
/// disambiguate via the cluster's advertised API groups.
pub async fn detect_cli(
    runner: &dyn CommandRunner,
    explicit: Option<CliKind>,
) -> Result<CliKind, CollectError> {
    if let Some(kind) = explicit {
        return Ok(kind);
    }

    let kubectl = cli_present(runner, CliKind::Kubectl).await;
    let oc = cli_present(runner, CliKind::Oc).await;

    match (kubectl, oc) {
        (true, true) => {
            // Both installed: ask the cluster what it is.
            let spec = CommandSpec::new(format!("{} api-versions", CliKind::Kubectl.binary()));
            let result = runner.run(&spec).await;
            if result.success() && result.output.contains(OPENSHIFT_API_MARKER) {
                Ok(CliKind::Oc)
            } else {
                Ok(CliKind::Kubectl)
            }
        }
        (true, false) => Ok(CliKind::Kubectl),
        (false, true) => Ok(CliKind::Oc),
        (false, false) => Err(CollectError::NoUsableCli),
    }
}

/// Probe for a CLI with a trivial invocation that needs no cluster.
async fn cli_present(runner: &dyn CommandRunner, kind: CliKind) -> bool {
    let spec = CommandSpec::new(format!("{} version --client", kind.binary()));
    runner.run(&spec).await.success()
}

/// Ask the CLI for its version, falling back to the conservative default
/// when the answer does not parse: an unreadable version must not unlock
/// features.
pub async fn detect_version(runner: &dyn CommandRunner, kind: CliKind) -> CliVersion {
    let spec = CommandSpec::new(format!("{} version -o json", kind.binary()));
    let result = runner.run(&spec).await;
    if result.success() {
        if let Some(version) = parse_version_output(kind, &result.output) {
            return version;
        }
    }
    let fallback = kind.conservative_version();
    tracing::warn!(
        cli = %kind,
        assumed = %fallback,
        "could not determine CLI version, assuming conservative default"
    );
    fallback
}

/// Image reference of the operator deployment in `namespace`, if any.
/// Feeds the restricted-mode gate.
pub async fn operator_image(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
) -> Option<String> {
    let spec = CommandSpec::new(format!(
        "{} get deployment {} -n {} -o jsonpath={{.spec.template.spec.containers[0].image}}",
        profile.kind.binary(),
        redis::OPERATOR_DEPLOYMENT,
        namespace,
    ));
    let result = runner.run(&spec).await;
    let image = result.output.trim();
    if result.success() && !image.is_empty() {
        Some(image.to_string())
    } else {
        None
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
