// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rlec_core::{CliKind, CliVersion};
use rlec_exec::FakeRunner;

fn profile() -> CliProfile {
    CliProfile::new(CliKind::Kubectl, CliVersion::new(1, 23))
}

#[test]
fn restricted_kinds_drop_cluster_scope() {
    let all = resource_kinds(CollectMode::All);
    assert!(all.contains(&"Node"));
    assert!(all.contains(&"ClusterRole"));

    let restricted = resource_kinds(CollectMode::Restricted);
    assert!(!restricted.contains(&"Node"));
    assert!(!restricted.contains(&"ClusterRole"));
    assert!(restricted.contains(&"RedisEnterpriseCluster"));
    assert!(restricted.contains(&"StatefulSet"));
}

#[tokio::test]
async fn collect_to_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("cluster-info", 0, "Kubernetes control plane is running\n");

    let spec = rlec_exec::CommandSpec::new("kubectl cluster-info");
    let policy = RetryPolicy::new(3, "failed", "missing");
    let ok = collect_to_file(&runner, &spec, &policy, dir.path(), "cluster_info").await;
    assert!(ok);

    let content = std::fs::read_to_string(dir.path().join("cluster_info")).unwrap();
    assert!(content.contains("control plane"));
}

#[tokio::test]
async fn collect_to_file_skips_file_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("get events", 1, "Error from server");

    let spec = rlec_exec::CommandSpec::new("kubectl get events -n prod -o wide");
    let policy = RetryPolicy::new(3, "failed", "missing");
    let ok = collect_to_file(&runner, &spec, &policy, dir.path(), "events").await;
    assert!(!ok);
    assert!(!dir.path().join("events").exists());
}

#[tokio::test]
async fn api_resources_write_one_yaml_per_kind_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("get RedisEnterpriseCluster", 0, "apiVersion: v1\nitems: [rec]\n");
    runner.respond("get StatefulSet", 0, "apiVersion: v1\nitems: [sts]\n");
    runner.respond(
        "get Routes",
        1,
        r#"error: the server doesn't have a resource type "Routes""#,
    );

    collect_api_resources(&runner, &profile(), "prod", CollectMode::All, dir.path()).await;

    assert!(dir.path().join("RedisEnterpriseCluster.yaml").exists());
    assert!(dir.path().join("StatefulSet.yaml").exists());
    // Absent kinds and empty outputs leave no file behind.
    assert!(!dir.path().join("Routes.yaml").exists());
    assert!(!dir.path().join("Pod.yaml").exists());
}

#[tokio::test]
async fn restricted_mode_applies_owner_selector() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();

    collect_api_resources(&runner, &profile(), "prod", CollectMode::Restricted, dir.path()).await;

    let calls = runner.calls();
    assert!(!calls.is_empty());
    assert!(calls
        .iter()
        .all(|c| c.contains("--selector=app=redis-enterprise")));
}

#[tokio::test]
async fn all_mode_fetches_without_selector() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();

    collect_api_resources(&runner, &profile(), "prod", CollectMode::All, dir.path()).await;

    assert!(runner.calls().iter().all(|c| !c.contains("--selector")));
}

#[tokio::test]
async fn descriptions_land_in_txt_files() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("describe Deployment", 0, "Name: operator\nReplicas: 1\n");

    collect_api_resource_descriptions(&runner, &profile(), "prod", CollectMode::All, dir.path())
        .await;

    let content = std::fs::read_to_string(dir.path().join("Deployment.txt")).unwrap();
    assert!(content.contains("Replicas"));
}

#[tokio::test]
async fn resources_list_and_events_use_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("get all -o wide", 0, "NAME READY\npod/rec-0 1/1\n");
    runner.respond("get events", 0, "LAST SEEN  TYPE\n");

    collect_resources_list(&runner, &profile(), "prod", dir.path()).await;
    collect_events(&runner, &profile(), "prod", dir.path()).await;

    assert!(dir.path().join("resources_list").exists());
    assert!(dir.path().join("events").exists());
    assert!(runner.calls().iter().all(|c| c.contains("-n prod")));
}
