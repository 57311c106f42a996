// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod log collection and node-pod artifact copies.

use std::path::Path;

use rlec_core::{CliProfile, CollectMode};
use rlec_exec::{CommandRunner, CommandSpec};

use crate::pods;
use crate::redis;

/// Collect logs for every container and init container of every pod in
/// the namespace, into `out_dir/pods/`.
///
/// Operator containers restart after configuration changes, so the
/// previous instance's logs (`-p`) are captured too when one exists.
pub async fn collect_pod_logs(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    mode: CollectMode,
    out_dir: &Path,
) {
    tracing::info!(namespace = %namespace, "collecting pod logs");

    let selector = match mode {
        CollectMode::All => None,
        CollectMode::Restricted => Some(redis::RESTRICTED_SELECTOR),
    };
    let Some(pod_list) = pods::list_pods(runner, profile, namespace, selector).await else {
        tracing::warn!(namespace = %namespace, "could not list pods, skipping pod logs");
        return;
    };
    if pod_list.is_empty() {
        tracing::info!(namespace = %namespace, "no pods to collect logs from");
        return;
    }

    let logs_dir = out_dir.join("pods");
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        tracing::warn!(
            namespace = %namespace,
            error = %e,
            "failed to create pod logs directory, skipping pod logs"
        );
        return;
    }

    for pod in &pod_list {
        let containers = pod.containers.iter().chain(&pod.init_containers);
        for container in containers {
            collect_container_log(runner, profile, namespace, &pod.name, container, &logs_dir)
                .await;
            tracing::info!(namespace = %namespace, pod = %pod.name, container = %container, "collected logs");
        }
    }
}

async fn collect_container_log(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    pod: &str,
    container: &str,
    logs_dir: &Path,
) {
    let spec = CommandSpec::new(format!(
        "{} logs -n {} {} -c {}",
        profile.kind.binary(),
        namespace,
        pod,
        container,
    ));
    // Even a failed fetch is written: the CLI's error text explains the
    // gap to whoever reads the archive.
    let result = runner.run(&spec).await;
    let path = logs_dir.join(format!("{}-{}.log", pod, container));
    if let Err(e) = std::fs::write(&path, &result.output) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write pod log");
    }

    // Previous instance, only when the container actually restarted.
    let previous_spec = CommandSpec::new(format!(
        "{} logs -n {} {} -c {} -p",
        profile.kind.binary(),
        namespace,
        pod,
        container,
    ));
    let previous = runner.run(&previous_spec).await;
    if previous.success() {
        let path = logs_dir.join(format!("{}-{}-instance-before-restart.log", pod, container));
        if let Err(e) = std::fs::write(&path, &previous.output) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write previous pod log");
        }
    }
}

/// Copy the vendor log and config folders off every node pod, into
/// `out_dir/rs_pod_logs/<pod>/` and `.../<pod>/config/`.
pub async fn collect_node_pod_artifacts(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    out_dir: &Path,
) {
    let Some(pod_list) =
        pods::list_pods(runner, profile, namespace, Some(redis::NODE_SELECTOR)).await
    else {
        tracing::warn!(namespace = %namespace, "could not list node pods, skipping node artifacts");
        return;
    };
    if pod_list.is_empty() {
        return;
    }

    let root = out_dir.join("rs_pod_logs");
    for pod in &pod_list {
        let pod_dir = root.join(&pod.name);
        let config_dir = pod_dir.join("config");
        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!(pod = %pod.name, error = %e, "failed to create node artifact directory");
            continue;
        }

        copy_folder(runner, profile, namespace, &pod.name, redis::NODE_LOG_PATH, &pod_dir).await;
        copy_folder(
            runner,
            profile,
            namespace,
            &pod.name,
            redis::NODE_CONFIG_PATH,
            &config_dir,
        )
        .await;
        tracing::info!(namespace = %namespace, pod = %pod.name, "collected node pod artifacts");
    }
}

async fn copy_folder(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    namespace: &str,
    pod: &str,
    remote_path: &str,
    local_dir: &Path,
) {
    let spec = CommandSpec::new(format!(
        "{} -n {} cp {}:{} ./ -c {}",
        profile.kind.binary(),
        namespace,
        pod,
        remote_path,
        redis::NODE_CONTAINER,
    ))
    .cwd(local_dir);
    let result = runner.run(&spec).await;
    if !result.success() {
        tracing::warn!(
            namespace = %namespace,
            pod = %pod,
            remote = %remote_path,
            output = %result.output.trim_end(),
            "failed to copy folder from node pod"
        );
    }
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
