// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use flate2::read::GzDecoder;
use rlec_core::CliKind;
use rlec_exec::FakeRunner;

const KUBECTL_VERSION_JSON: &str = r#"{"serverVersion": {"major": "1", "minor": "23"}}"#;

fn config_for(dir: &Path, namespaces: &str) -> CollectorConfig {
    CollectorConfig {
        namespaces: Some(namespaces.to_string()),
        output_dir: Some(dir.to_path_buf()),
        cli: Some(CliKind::Kubectl),
        mode: Some(CollectMode::All),
        ..CollectorConfig::default()
    }
}

fn archive_entries(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn three_namespaces_produce_three_subdirectories_after_join() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("version -o json", 0, KUBECTL_VERSION_JSON);
    runner.respond("get ns", 0, "ns1\nns2\nns3\n");
    runner.respond("get pod", 0, r#"{"items": []}"#);

    let config = config_for(dir.path(), "ns1,ns2,ns3");
    let summary = run_with_runner(&config, Arc::new(runner)).await.unwrap();

    assert_eq!(summary.namespaces, vec!["ns1", "ns2", "ns3"]);
    assert!(summary.archive.exists());
    // The run directory itself is gone; only the archive remains.
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        1,
        "only the archive should remain"
    );

    let entries = archive_entries(&summary.archive);
    for ns in ["ns1", "ns2", "ns3"] {
        assert!(
            entries.iter().any(|e| e.contains(&format!("/{}/", ns))),
            "missing subdirectory for {}",
            ns
        );
    }
    assert!(entries.iter().any(|e| e.ends_with("collector_report.json")));
    assert!(entries.iter().any(|e| e.ends_with("cluster_info")));
}

#[tokio::test]
async fn namespace_job_failures_do_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("version -o json", 0, KUBECTL_VERSION_JSON);
    runner.respond("get ns", 0, "ns1\nns2\n");
    // Every pod listing fails: no logs, no debug bundle, anywhere.
    runner.respond("get pod", 1, "Error from server (Forbidden)");

    let config = config_for(dir.path(), "ns1,ns2");
    let summary = run_with_runner(&config, Arc::new(runner)).await.unwrap();

    // Degraded but archived.
    assert!(summary.archive.exists());
    let entries = archive_entries(&summary.archive);
    assert!(entries.iter().any(|e| e.contains("/ns1/")));
    assert!(entries.iter().any(|e| e.contains("/ns2/")));
}

#[tokio::test]
async fn no_usable_cli_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    runner.respond("kubectl version --client", 127, "sh: kubectl: command not found");
    runner.respond("oc version --client", 127, "sh: oc: command not found");

    let config = CollectorConfig {
        namespaces: Some("ns1".to_string()),
        output_dir: Some(dir.path().to_path_buf()),
        ..CollectorConfig::default()
    };
    let err = run_with_runner(&config, Arc::new(runner)).await.unwrap_err();
    assert!(matches!(err, CollectError::NoUsableCli));
    // Fatal before any directory was created.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn mode_override_wins_over_operator_gate() {
    let runner = FakeRunner::new();
    let profile = CliProfile::new(CliKind::Kubectl, rlec_core::CliVersion::new(1, 23));
    let config = CollectorConfig {
        mode: Some(CollectMode::All),
        ..CollectorConfig::default()
    };
    let mode = resolve_mode(&runner, &profile, &config, &["prod".to_string()]).await;
    assert_eq!(mode, CollectMode::All);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn mode_follows_operator_image_tag() {
    let profile = CliProfile::new(CliKind::Kubectl, rlec_core::CliVersion::new(1, 23));
    let config = CollectorConfig::default();
    let namespaces = vec!["prod".to_string()];

    let runner = FakeRunner::new();
    runner.respond("get deployment", 0, "registry.example.com/operator:6.2.17-9");
    let mode = resolve_mode(&runner, &profile, &config, &namespaces).await;
    assert_eq!(mode, CollectMode::All);

    let runner = FakeRunner::new();
    runner.respond("get deployment", 0, "registry.example.com/operator:6.2.18-3");
    let mode = resolve_mode(&runner, &profile, &config, &namespaces).await;
    assert_eq!(mode, CollectMode::Restricted);
}

#[tokio::test]
async fn missing_operator_defaults_to_restricted() {
    let profile = CliProfile::new(CliKind::Kubectl, rlec_core::CliVersion::new(1, 23));
    let config = CollectorConfig::default();

    let runner = FakeRunner::new();
    runner.respond("get deployment", 1, "Error from server (NotFound)");
    let mode = resolve_mode(&runner, &profile, &config, &["prod".to_string()]).await;
    assert_eq!(mode, CollectMode::Restricted);
}
