// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource manifests, descriptions, and one-shot text captures.

use std::path::Path;

use indexmap::IndexMap;

use rlec_core::{CliProfile, CollectMode};
use rlec_exec::{run_with_retries, CommandRunner, CommandSpec, RetryPolicy};

use crate::redis;

/// Attempts per collection command.
const ATTEMPTS: usize = 3;

/// Resource kinds captured per namespace, in output order. Kinds that do
/// not exist on a given cluster (e.g. `Routes` off OpenShift) are simply
/// absent from the archive.
pub const API_RESOURCES: &[&str] = &[
    "RedisEnterpriseCluster",
    "RedisEnterpriseDatabase",
    "StatefulSet",
    "Deployment",
    "Service",
    "ConfigMap",
    "Routes",
    "Ingress",
    "Role",
    "RoleBinding",
    "PersistentVolume",
    "PersistentVolumeClaim",
    "Node",
    "PodDisruptionBudget",
    "ResourceQuota",
    "Endpoints",
    "Pod",
    "NetworkPolicy",
    "CustomResourceDefinition",
    "CertificateSigningRequest",
    "ValidatingWebhookConfiguration",
    "ClusterRole",
    "ClusterRoleBinding",
    "ReplicaSet",
];

/// Cluster-scoped kinds, skipped in restricted mode where the collector
/// may lack the permissions (and the mandate) to read them.
const CLUSTER_SCOPED: &[&str] = &[
    "PersistentVolume",
    "Node",
    "CustomResourceDefinition",
    "CertificateSigningRequest",
    "ValidatingWebhookConfiguration",
    "ClusterRole",
    "ClusterRoleBinding",
];

/// The kinds collected under `mode`.
pub fn resource_kinds(mode: CollectMode) -> Vec<&'static str> {
    match mode {
        CollectMode::All => API_RESOURCES.to_vec(),
        CollectMode::Restricted => API_RESOURCES
            .iter()
            .filter(|kind| !CLUSTER_SCOPED.contains(kind))
            .copied()
            .collect(),
    }
}

/// Selector argument for namespaced fetches under `mode`.
fn selector_arg(mode: CollectMode) -> String {
    match mode {
        CollectMode::All => String::new(),
        CollectMode::Restricted => format!(" --selector={}", redis::RESTRICTED_SELECTOR),
    }
}

/// Run one command and write its output to `out_dir/file_name`.
/// False when the command failed or the file could not be written.
pub async fn collect_to_file(
    runner: &dyn CommandRunner,
    spec: &CommandSpec,
    policy: &RetryPolicy,
    out_dir: &Path,
    file_name: &str,
) -> bool {
    let Some(output) = run_with_retries(runner, spec, policy).await else {
        return false;
    };
    let path = out_dir.join(file_name);
    if let Err(e) = std::fs::write(&path, output) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write collected output");
        return false;
    }
    true
}

/// `get all -o wide` for the namespace.
pub async fn collect_resources_list(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    out_dir: &Path,
) {
    let spec = CommandSpec::new(format!(
        "{} get all -o wide -n {}",
        profile.kind.binary(),
        namespace
    ));
    let policy = RetryPolicy::new(ATTEMPTS, "failed to get resources list", "no resources");
    if collect_to_file(runner, &spec, &policy, out_dir, "resources_list").await {
        tracing::info!(namespace = %namespace, "collected resources list");
    }
}

/// `cluster-info`, captured once at the run root.
pub async fn collect_cluster_info(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    out_dir: &Path,
) {
    let spec = CommandSpec::new(format!("{} cluster-info", profile.kind.binary()));
    let policy = RetryPolicy::new(ATTEMPTS, "failed to get cluster-info", "no cluster-info");
    if collect_to_file(runner, &spec, &policy, out_dir, "cluster_info").await {
        tracing::info!("collected cluster-info");
    }
}

/// Namespace events, `-o wide`.
pub async fn collect_events(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    out_dir: &Path,
) {
    let spec = CommandSpec::new(format!(
        "{} get events -n {} -o wide",
        profile.kind.binary(),
        namespace
    ));
    let policy = RetryPolicy::new(ATTEMPTS, "failed to get events", "no events");
    if collect_to_file(runner, &spec, &policy, out_dir, "events").await {
        tracing::info!(namespace = %namespace, "collected events");
    }
}

/// Verbose API round-trip, kept as a connectivity record for support.
pub async fn collect_connectivity_check(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    out_dir: &Path,
) {
    let spec = CommandSpec::new(format!(
        "{} get all -v=6 -n {}",
        profile.kind.binary(),
        namespace
    ));
    let policy = RetryPolicy::new(1, "connectivity check failed", "connectivity check empty");
    collect_to_file(runner, &spec, &policy, out_dir, "connectivity_check").await;
}

/// One `<kind>.yaml` per resource kind that yielded output.
pub async fn collect_api_resources(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    mode: CollectMode,
    out_dir: &Path,
) {
    tracing::info!(namespace = %namespace, "collecting API resources");
    let mut collected: IndexMap<&str, String> = IndexMap::new();
    for kind in resource_kinds(mode) {
        let spec = CommandSpec::new(format!(
            "{} get {} -n {}{} -o yaml",
            profile.kind.binary(),
            kind,
            namespace,
            selector_arg(mode),
        ));
        let policy = RetryPolicy::new(
            ATTEMPTS,
            format!("failed to get {}", kind),
            format!("no {} on this cluster", kind),
        );
        // A kind that produced nothing gets no file.
        if let Some(output) = run_with_retries(runner, &spec, &policy).await {
            if !output.is_empty() {
                collected.insert(kind, output);
                tracing::info!(namespace = %namespace, kind = %kind, "collected resource");
            }
        }
    }
    write_kind_files(&collected, out_dir, "yaml");
}

/// One `<kind>.txt` per resource kind, from `describe`.
pub async fn collect_api_resource_descriptions(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    mode: CollectMode,
    out_dir: &Path,
) {
    tracing::info!(namespace = %namespace, "collecting API resource descriptions");
    let mut collected: IndexMap<&str, String> = IndexMap::new();
    for kind in resource_kinds(mode) {
        let spec = CommandSpec::new(format!(
            "{} describe {} -n {}{}",
            profile.kind.binary(),
            kind,
            namespace,
            selector_arg(mode),
        ));
        let policy = RetryPolicy::new(
            ATTEMPTS,
            format!("failed to describe {}", kind),
            format!("no {} to describe", kind),
        );
        if let Some(output) = run_with_retries(runner, &spec, &policy).await {
            if !output.is_empty() {
                collected.insert(kind, output);
            }
        }
    }
    write_kind_files(&collected, out_dir, "txt");
}

fn write_kind_files(collected: &IndexMap<&str, String>, out_dir: &Path, extension: &str) {
    for (kind, output) in collected {
        let path = out_dir.join(format!("{}.{}", kind, extension));
        if let Err(e) = std::fs::write(&path, output) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write resource file");
        }
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
