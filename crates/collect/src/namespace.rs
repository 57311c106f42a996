// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolving which namespaces a run collects from.
//!
//! The `-n` argument accepts one namespace, a comma-separated list
//! (unknown names are dropped with a warning), or `all`. With no argument
//! the kubeconfig current-context namespace is used, falling back to
//! `default`.

use serde::Deserialize;

use rlec_core::CliProfile;
use rlec_exec::{CommandRunner, CommandSpec};

#[derive(Debug, Deserialize)]
struct Kubeconfig {
    #[serde(rename = "current-context")]
    current_context: Option<String>,
    #[serde(default)]
    contexts: Vec<ContextEntry>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    name: String,
    context: Context,
}

#[derive(Debug, Deserialize)]
struct Context {
    namespace: Option<String>,
}

/// Namespace of the kubeconfig current context, if the config parses and
/// the context names one.
pub fn namespace_from_kubeconfig(raw: &str) -> Option<String> {
    let config: Kubeconfig = serde_json::from_str(raw).ok()?;
    let current = config.current_context?;
    config
        .contexts
        .into_iter()
        .find(|c| c.name == current)
        .and_then(|c| c.context.namespace)
}

/// Parse `get ns -o=custom-columns=... --no-headers` output into names.
pub fn parse_namespace_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Resolve the `-n` argument into the namespaces this run collects from.
pub async fn resolve_namespaces(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
    arg: Option<&str>,
) -> Vec<String> {
    match arg {
        None => vec![config_namespace(runner, profile).await],
        Some("all") => {
            let Some(all) = existing_namespaces(runner, profile).await else {
                tracing::warn!("failed to list namespaces, using kubeconfig namespace");
                return vec![config_namespace(runner, profile).await];
            };
            all
        }
        Some(list) => {
            let requested: Vec<&str> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let existing = existing_namespaces(runner, profile).await.unwrap_or_default();
            let mut resolved = Vec::new();
            for name in requested {
                if existing.iter().any(|ns| ns == name) {
                    resolved.push(name.to_string());
                } else {
                    tracing::warn!(namespace = %name, "namespace doesn't exist, skipping");
                }
            }
            if resolved.is_empty() {
                tracing::warn!("no requested namespace exists, using kubeconfig namespace");
                return vec![config_namespace(runner, profile).await];
            }
            resolved
        }
    }
}

async fn existing_namespaces(
    runner: &dyn CommandRunner,
    profile: &CliProfile,
) -> Option<Vec<String>> {
    let spec = CommandSpec::new(format!(
        "{} get ns -o=custom-columns=DATA:metadata.name --no-headers=true",
        profile.kind.binary()
    ));
    let result = runner.run(&spec).await;
    if !result.success() {
        return None;
    }
    Some(parse_namespace_names(&result.output))
}

async fn config_namespace(runner: &dyn CommandRunner, profile: &CliProfile) -> String {
    let spec = CommandSpec::new(format!("{} config view -o json", profile.kind.binary()));
    let result = runner.run(&spec).await;
    if result.success() {
        if let Some(namespace) = namespace_from_kubeconfig(&result.output) {
            return namespace;
        }
    }
    "default".to_string()
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
