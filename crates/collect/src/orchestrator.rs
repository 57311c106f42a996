// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-namespace fan-out and the end-of-run barrier.
//!
//! Each target namespace is collected by its own task over an exclusive
//! output subdirectory. Jobs share nothing mutable (the CLI profile and
//! mode are cloned in), so the only coordination is the join barrier
//! before archiving. A stuck CLI call is bounded by its own command
//! deadline and never stalls sibling namespaces.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinSet;

use rlec_core::{parse_image_ref, CliProfile, CollectMode, GateConfig, RunReport};
use rlec_exec::{CommandRunner, ShellRunner};

use crate::archive;
use crate::config::CollectorConfig;
use crate::debug;
use crate::detect;
use crate::error::CollectError;
use crate::logs;
use crate::namespace;
use crate::resources;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Path of the gzip tarball.
    pub archive: PathBuf,
    /// Namespaces that were collected.
    pub namespaces: Vec<String>,
}

/// The unit of parallel work: one namespace, one output subdirectory.
pub struct NamespaceJob {
    pub namespace: String,
    pub profile: CliProfile,
    pub mode: CollectMode,
    pub out_dir: PathBuf,
}

impl NamespaceJob {
    /// Run the full collection pipeline for this namespace. Internal
    /// failures are logged and absorbed; siblings and the parent are
    /// never affected.
    pub async fn run(self, runner: Arc<dyn CommandRunner>) {
        tracing::info!(namespace = %self.namespace, "started collecting from namespace");
        if let Err(e) = std::fs::create_dir_all(&self.out_dir) {
            tracing::warn!(
                namespace = %self.namespace,
                error = %e,
                "failed to create namespace directory, skipping namespace"
            );
            return;
        }

        let runner = &*runner;
        let ns = self.namespace.as_str();
        resources::collect_connectivity_check(runner, &self.profile, ns, &self.out_dir).await;
        debug::collect_debug_package(runner, &self.profile, ns, &self.out_dir).await;
        logs::collect_node_pod_artifacts(runner, &self.profile, ns, &self.out_dir).await;
        resources::collect_resources_list(runner, &self.profile, ns, &self.out_dir).await;
        resources::collect_events(runner, &self.profile, ns, &self.out_dir).await;
        resources::collect_api_resources(runner, &self.profile, ns, self.mode, &self.out_dir)
            .await;
        resources::collect_api_resource_descriptions(
            runner,
            &self.profile,
            ns,
            self.mode,
            &self.out_dir,
        )
        .await;
        logs::collect_pod_logs(runner, &self.profile, ns, self.mode, &self.out_dir).await;
        tracing::info!(namespace = %self.namespace, "finished collecting from namespace");
    }
}

/// Run a full collection with the production runner.
pub async fn run(config: &CollectorConfig) -> Result<RunSummary, CollectError> {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new(config.command_deadline));
    run_with_runner(config, runner).await
}

/// Run a full collection against an injected runner.
pub async fn run_with_runner(
    config: &CollectorConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<RunSummary, CollectError> {
    let started_at = Utc::now();
    let start = Instant::now();

    let profile = detect::detect_profile(&*runner, config).await?;
    let namespaces =
        namespace::resolve_namespaces(&*runner, &profile, config.namespaces.as_deref()).await;
    let mode = resolve_mode(&*runner, &profile, config, &namespaces).await;
    tracing::info!(mode = %mode, namespaces = ?namespaces, "starting collection");

    let run_name = format!("rlec_debug_info_{}", started_at.format("%Y%m%d-%H%M%S"));
    let parent = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let run_dir = parent.join(&run_name);
    std::fs::create_dir_all(&run_dir).map_err(|source| CollectError::CreateDir {
        path: run_dir.clone(),
        source,
    })?;

    resources::collect_cluster_info(&*runner, &profile, &run_dir).await;

    let mut jobs = JoinSet::new();
    for ns in &namespaces {
        let job = NamespaceJob {
            namespace: ns.clone(),
            profile: profile.clone(),
            mode,
            out_dir: run_dir.join(ns),
        };
        jobs.spawn(job.run(Arc::clone(&runner)));
    }
    // Strict barrier: the archive must observe every job's termination,
    // successful or not.
    while let Some(joined) = jobs.join_next().await {
        if let Err(e) = joined {
            tracing::warn!(error = %e, "namespace job did not run to completion");
        }
    }

    let report = RunReport::new(
        &profile,
        mode,
        namespaces.clone(),
        started_at,
        start.elapsed().as_secs(),
    );
    write_report(&run_dir, &report);

    let archive = archive::archive_run_directory(&run_dir)?;
    tracing::info!(
        archive = %archive.display(),
        elapsed_secs = start.elapsed().as_secs(),
        "finished log collection"
    );
    Ok(RunSummary {
        archive,
        namespaces,
    })
}

/// Collection mode: explicit override, else gated on the operator image
/// found in the first namespace that has one.
async fn resolve_mode(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    config: &CollectorConfig,
    namespaces: &[String],
) -> CollectMode {
    if let Some(mode) = config.mode {
        return mode;
    }
    let gates = GateConfig::default();
    for ns in namespaces {
        if let Some(image) = detect::operator_image(runner, profile, ns).await {
            let image_ref = parse_image_ref(&image);
            let mode = gates.default_mode(&image_ref.tag, image_ref.is_digest);
            tracing::info!(
                namespace = %ns,
                image = %image,
                mode = %mode,
                "resolved collection mode from operator image"
            );
            return mode;
        }
    }
    gates.default_mode("", false)
}

fn write_report(run_dir: &Path, report: &RunReport) {
    let path = run_dir.join("collector_report.json");
    match report.to_json() {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                tracing::warn!(path = %path.display(), error = %e, "failed to write run report");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize run report");
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
