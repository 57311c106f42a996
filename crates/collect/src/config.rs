// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable run configuration.

use std::path::PathBuf;
use std::time::Duration;

use rlec_core::{CliKind, CollectMode};

/// Deadline applied to every external command unless overridden.
pub const DEFAULT_COMMAND_DEADLINE: Duration = Duration::from_secs(180);

/// Everything a run needs to know, fixed before collection starts.
///
/// Passed explicitly into the components that need it. There is no
/// process-global state, so namespace jobs can run as tasks in one
/// process without racing on shared configuration.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Raw `-n` argument: one namespace, a comma-separated list, `all`,
    /// or `None` for the kubeconfig current-context namespace.
    pub namespaces: Option<String>,
    /// Parent directory for the run directory; current directory when
    /// unset.
    pub output_dir: Option<PathBuf>,
    /// Per-command deadline; `Duration::ZERO` disables it.
    pub command_deadline: Duration,
    /// Explicit CLI choice, skipping detection.
    pub cli: Option<CliKind>,
    /// Explicit collection mode, skipping the operator-image gate.
    pub mode: Option<CollectMode>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            namespaces: None,
            output_dir: None,
            command_deadline: DEFAULT_COMMAND_DEADLINE,
            cli: None,
            mode: None,
        }
    }
}
