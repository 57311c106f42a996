// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod listing and readiness parsing.
//!
//! One `get pod -o json` per listing; names, readiness, and container
//! sets all come out of that single payload.

use serde::Deserialize;

use rlec_core::CliProfile;
use rlec_exec::{run_with_retries, CommandRunner, CommandSpec, RetryPolicy};

/// What collection needs to know about one pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodInfo {
    pub name: String,
    /// True when every container status reports ready.
    pub ready: bool,
    pub containers: Vec<String>,
    pub init_containers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PodList {
    items: Vec<Pod>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    metadata: Metadata,
    #[serde(default)]
    spec: PodSpec,
    #[serde(default)]
    status: PodStatus,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct PodSpec {
    #[serde(default)]
    containers: Vec<NamedRef>,
    #[serde(default, rename = "initContainers")]
    init_containers: Vec<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct PodStatus {
    #[serde(default, rename = "containerStatuses")]
    container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Deserialize)]
struct ContainerStatus {
    ready: bool,
}

/// Parse `get pod -o json` output. `None` when the payload is not a pod
/// list.
pub fn parse_pod_list(raw: &str) -> Option<Vec<PodInfo>> {
    let list: PodList = serde_json::from_str(raw).ok()?;
    Some(
        list.items
            .into_iter()
            .map(|pod| PodInfo {
                name: pod.metadata.name,
                // A pod with no statuses yet has not passed readiness.
                ready: !pod.status.container_statuses.is_empty()
                    && pod.status.container_statuses.iter().all(|c| c.ready),
                containers: pod.spec.containers.into_iter().map(|c| c.name).collect(),
                init_containers: pod
                    .spec
                    .init_containers
                    .into_iter()
                    .map(|c| c.name)
                    .collect(),
            })
            .collect(),
    )
}

/// Candidate order for operations that need one cooperative pod: fully
/// ready pods first; when none are ready, the whole set in listing order.
pub fn debug_candidates(pods: &[PodInfo]) -> Vec<&PodInfo> {
    let ready: Vec<&PodInfo> = pods.iter().filter(|p| p.ready).collect();
    if ready.is_empty() {
        pods.iter().collect()
    } else {
        ready
    }
}

/// List pods in `namespace`, optionally filtered by a label selector.
/// `None` when the listing failed or did not parse.
pub async fn list_pods(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    selector: Option<&str>,
) -> Option<Vec<PodInfo>> {
    let selector_arg = selector
        .map(|s| format!(" --selector={}", s))
        .unwrap_or_default();
    let spec = CommandSpec::new(format!(
        "{} get pod -n {}{} -o json",
        profile.kind.binary(),
        namespace,
        selector_arg,
    ));
    let policy = RetryPolicy::new(3, "failed to list pods", "no pods found");
    let output = run_with_retries(runner, &spec, &policy).await?;
    parse_pod_list(&output)
}

#[cfg(test)]
#[path = "pods_tests.rs"]
mod tests;
