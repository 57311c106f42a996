// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vendor debug bundle: create on a node pod, download, clean up.
//!
//! A two-phase remote procedure against candidate pods. The create phase
//! runs the vendor diagnostic command inside the node container; success
//! means a zero exit, the completion marker in the output, and a parseable
//! remote file path. The download phase copies that file into the
//! namespace output directory. Every phase retries a fixed number of
//! times, and a download that never succeeds removes its partial local
//! file; the archive either contains the full bundle or nothing.

use std::path::Path;
use std::time::Duration;

use regex::Regex;

use rlec_core::CliProfile;
use rlec_exec::{CommandRunner, CommandSpec};

use crate::pods;
use crate::redis;

/// Attempts per phase.
const ATTEMPTS: usize = 3;

/// Pause between attempts within a phase.
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Marker the diagnostic command prints once the bundle is fully written
/// on the node.
const DOWNLOAD_COMPLETE_MARKER: &str = "Downloading complete";

/// Location of a created debug bundle on a specific pod.
///
/// Valid only for the create→download sequence that produced it; on final
/// failure the partial local copy is removed and the handle discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugPackageHandle {
    /// Absolute path of the bundle on the pod.
    pub remote_path: String,
    /// File name component, reused for the local copy.
    pub file_name: String,
}

/// Extract the bundle location from diagnostic command output, which
/// reports it as `File <path>/<name>.gz`.
pub fn parse_debug_handle(output: &str) -> Option<DebugPackageHandle> {
    let pattern = Regex::new(r"File (\S+/(\S+\.gz))").ok()?;
    let captures = pattern.captures(output)?;
    Some(DebugPackageHandle {
        remote_path: captures.get(1)?.as_str().to_string(),
        file_name: captures.get(2)?.as_str().to_string(),
    })
}

/// Create and download the debug bundle from the first cooperative node
/// pod in `namespace`. True when a bundle landed in `out_dir`.
///
/// Exhausting every candidate is reported and non-fatal; the rest of the
/// namespace collection continues without the bundle.
pub async fn collect_debug_package(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    out_dir: &Path,
) -> bool {
    let Some(pod_list) =
        pods::list_pods(runner, profile, namespace, Some(redis::NODE_SELECTOR)).await
    else {
        tracing::info!(namespace = %namespace, "cannot find node pods, skipping debug bundle");
        return false;
    };
    if pod_list.is_empty() {
        tracing::info!(namespace = %namespace, "no node pods, skipping debug bundle");
        return false;
    }

    let candidates = pods::debug_candidates(&pod_list);
    if candidates.iter().all(|p| !p.ready) {
        tracing::warn!(
            namespace = %namespace,
            "no ready node pod, will try non-ready pods"
        );
    }

    for pod in &candidates {
        if try_pod(runner, profile, namespace, &pod.name, out_dir).await {
            tracing::info!(namespace = %namespace, pod = %pod.name, "collected debug bundle");
            return true;
        }
    }

    tracing::warn!(
        namespace = %namespace,
        tried = candidates.len(),
        "failed to collect debug bundle from any node pod"
    );
    false
}

/// Full create+download sequence against one pod.
async fn try_pod(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    pod: &str,
    out_dir: &Path,
) -> bool {
    let Some(handle) = create_package(runner, profile, namespace, pod).await else {
        return false;
    };
    download_package(runner, profile, namespace, pod, &handle, out_dir).await
}

/// Create phase: run the diagnostic command on the pod until it reports a
/// complete bundle and a parseable location.
async fn create_package(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    pod: &str,
) -> Option<DebugPackageHandle> {
    let spec = CommandSpec::new(format!(
        "{} -n {} exec {} -c {} -- {} cluster debug_info path /tmp",
        profile.kind.binary(),
        namespace,
        pod,
        redis::NODE_CONTAINER,
        redis::RLADMIN,
    ));

    for attempt in 1..=ATTEMPTS {
        if attempt > 1 {
            tokio::time::sleep(RETRY_PAUSE).await;
        }
        let result = runner.run(&spec).await;
        if !result.success() || !result.output.contains(DOWNLOAD_COMPLETE_MARKER) {
            tracing::warn!(
                namespace = %namespace,
                pod = %pod,
                attempt,
                output = %result.output.trim_end(),
                "diagnostic command did not produce a bundle"
            );
            continue;
        }
        // A zero exit without a parseable location is still a failed
        // attempt: nothing to download.
        match parse_debug_handle(&result.output) {
            Some(handle) => {
                tracing::info!(
                    namespace = %namespace,
                    pod = %pod,
                    path = %handle.remote_path,
                    "debug bundle created on pod"
                );
                return Some(handle);
            }
            None => {
                tracing::warn!(
                    namespace = %namespace,
                    pod = %pod,
                    attempt,
                    "could not extract bundle location from diagnostic output"
                );
            }
        }
    }
    None
}

/// Download phase: copy the bundle into `out_dir`. When the CLI supports
/// `cp --retries`, the remaining attempt budget is delegated to the copy
/// itself. A phase that never succeeds removes the partial local file.
async fn download_package(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    pod: &str,
    handle: &DebugPackageHandle,
    out_dir: &Path,
) -> bool {
    for attempt in 1..=ATTEMPTS {
        if attempt > 1 {
            tokio::time::sleep(RETRY_PAUSE).await;
        }
        let retries_flag = if profile.supports_copy_retries {
            format!(" --retries={}", ATTEMPTS - attempt)
        } else {
            String::new()
        };
        let spec = CommandSpec::new(format!(
            "{} -n {} cp {}:{} ./{} -c {}{}",
            profile.kind.binary(),
            namespace,
            pod,
            handle.remote_path,
            handle.file_name,
            redis::NODE_CONTAINER,
            retries_flag,
        ))
        .cwd(out_dir);

        let result = runner.run(&spec).await;
        if result.success() {
            return true;
        }
        tracing::warn!(
            namespace = %namespace,
            pod = %pod,
            attempt,
            output = %result.output.trim_end(),
            "failed to copy debug bundle from pod"
        );
    }

    // No partial artifacts: a bundle the download gave up on must not
    // reach the archive.
    let partial = out_dir.join(&handle.file_name);
    match std::fs::remove_file(&partial) {
        Ok(()) => {
            tracing::info!(
                namespace = %namespace,
                file = %handle.file_name,
                "removed partial debug bundle"
            );
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                namespace = %namespace,
                file = %handle.file_name,
                error = %e,
                "failed to remove partial debug bundle"
            );
        }
    }
    false
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
