//! End-to-end collection against a stub `kubectl`.
//!
//! A shell script standing in for `kubectl` answers the handful of
//! queries a run makes; the spec asserts the run degrades gracefully
//! around the stub's gaps and still produces the archive and run report.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use flate2::read::GzDecoder;
use serial_test::serial;

use crate::prelude::*;

const STUB_KUBECTL: &str = r#"#!/bin/sh
case "$*" in
  *"version --client"*)
    echo "Client Version: v1.23.5"
    ;;
  *"version -o json"*)
    cat <<'EOF'
{"clientVersion": {"major": "1", "minor": "23"}, "serverVersion": {"major": "1", "minor": "23"}}
EOF
    ;;
  *"api-versions"*)
    printf "apps/v1\nbatch/v1\nv1\n"
    ;;
  *"get ns"*)
    printf "default\nns1\nns2\n"
    ;;
  *"config view"*)
    echo "{}"
    ;;
  *"get deployment redis-enterprise-operator"*)
    echo "registry.example.com/redis/operator:6.2.18-3"
    ;;
  *"get pod"*)
    echo '{"items": []}'
    ;;
  *"cluster-info"*)
    echo "Kubernetes control plane is running at https://stub:6443"
    ;;
  *"get all"*)
    echo "NAME  READY  STATUS"
    ;;
  *"get events"*)
    echo "LAST SEEN  TYPE  REASON"
    ;;
  *"describe "*)
    echo "No resources found in namespace."
    exit 1
    ;;
  *"get "*)
    echo "No resources found in namespace."
    exit 1
    ;;
  *)
    echo "stub kubectl: unhandled: $*" >&2
    exit 1
    ;;
esac
"#;

#[test]
#[serial]
fn full_run_produces_archive_and_report() {
    let temp = tempfile::tempdir().unwrap();
    let bin_dir = temp.path().join("bin");
    let out_dir = temp.path().join("out");
    fs::create_dir_all(&bin_dir).unwrap();
    fs::create_dir_all(&out_dir).unwrap();

    let stub = bin_dir.join("kubectl");
    fs::write(&stub, STUB_KUBECTL).unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let assert = rlec()
        .env("PATH", &path)
        .args(["--cli", "kubectl", "-n", "ns1,ns2", "-t", "30"])
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Collected 2 namespace(s)"), "stdout: {stdout}");

    // Exactly one artifact: the tarball. The scratch tree is gone.
    let entries: Vec<_> = fs::read_dir(&out_dir).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
    let archive = entries[0].path();
    assert!(archive.to_string_lossy().ends_with(".tar.gz"));

    let names = archive_entries(&archive);
    assert!(names.iter().any(|n| n.ends_with("collector_report.json")));
    assert!(names.iter().any(|n| n.ends_with("cluster_info")));
    assert!(names.iter().any(|n| n.contains("/ns1/")));
    assert!(names.iter().any(|n| n.contains("/ns2/")));

    let report = read_entry(&archive, "collector_report.json");
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["cli"], "kubectl");
    assert_eq!(report["cli_version"], "1.23");
    assert_eq!(report["mode"], "restricted");
    assert_eq!(report["namespaces"], serde_json::json!(["ns1", "ns2"]));
}

#[test]
#[serial]
fn missing_cli_fails_with_config_error_exit_code() {
    let temp = tempfile::tempdir().unwrap();
    let bin_dir = temp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();

    // Only the shell on PATH: neither kubectl nor oc resolves, even when
    // the host happens to have them installed elsewhere.
    std::os::unix::fs::symlink("/bin/sh", bin_dir.join("sh")).unwrap();
    rlec()
        .env("PATH", bin_dir.as_os_str())
        .args(["-n", "ns1"])
        .arg("-o")
        .arg(temp.path())
        .assert()
        .failure()
        .code(2);
}

fn archive_entries(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn read_entry(archive: &Path, suffix: &str) -> String {
    use std::io::Read;

    let file = fs::File::open(archive).unwrap();
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    for entry in tar.entries().unwrap() {
        let mut entry = entry.unwrap();
        if entry.path().unwrap().to_string_lossy().ends_with(suffix) {
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            return content;
        }
    }
    panic!("entry {suffix} not found in archive");
}
