// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const KUBECTL_OUTPUT: &str = r#"{
  "clientVersion": {
    "major": "1",
    "minor": "26",
    "gitVersion": "v1.26.1"
  },
  "serverVersion": {
    "major": "1",
    "minor": "23+",
    "gitVersion": "v1.23.17-eks-8ccc7ba",
    "platform": "linux/amd64"
  }
}"#;

const OC_OUTPUT: &str = r#"{
  "releaseClientVersion": "4.12.0",
  "openshiftVersion": "4.10.67",
  "serverVersion": {
    "major": "1",
    "minor": "23"
  }
}"#;

#[test]
fn kubectl_nested_server_version_normalizes() {
    let version = parse_version_output(CliKind::Kubectl, KUBECTL_OUTPUT);
    assert_eq!(version, Some(CliVersion::new(1, 23)));
}

#[test]
fn oc_flat_release_string_normalizes() {
    let version = parse_version_output(CliKind::Oc, OC_OUTPUT);
    assert_eq!(version, Some(CliVersion::new(4, 10)));
}

#[test]
fn kubectl_output_without_server_section_fails_parse() {
    // Happens when the apiserver is unreachable: only clientVersion is
    // printed.
    let raw = r#"{"clientVersion": {"major": "1", "minor": "26"}}"#;
    assert_eq!(parse_version_output(CliKind::Kubectl, raw), None);
}

#[yare::parameterized(
    garbage       = { "error: You must be logged in to the server" },
    empty         = { "" },
    wrong_shape   = { r#"{"serverVersion": "1.23"}"# },
)]
fn unparseable_output_yields_none(raw: &str) {
    assert_eq!(parse_version_output(CliKind::Kubectl, raw), None);
    assert_eq!(parse_version_output(CliKind::Oc, raw), None);
}

#[test]
fn oc_output_missing_openshift_version_fails_parse() {
    // oc against a plain Kubernetes cluster omits openshiftVersion.
    let raw = r#"{"releaseClientVersion": "4.12.0"}"#;
    assert_eq!(parse_version_output(CliKind::Oc, raw), None);
}
