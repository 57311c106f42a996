// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry loop with output classification.
//!
//! Cluster API calls are flaky under load, so every collection command runs
//! through a fixed-size retry loop. Failures split into two kinds: a
//! resource kind that simply does not exist on this cluster (an expected,
//! informational outcome; optional kinds like `Routes` are absent on plain
//! Kubernetes) and everything else. Identical consecutive failure output is
//! logged once, not once per attempt.

use crate::command::CommandSpec;
use crate::runner::CommandRunner;

/// Output markers meaning "the resource kind / object is absent", as the
/// supported CLIs print them. Matched case-insensitively.
const MISSING_RESOURCE_MARKERS: &[&str] = &["no resources found", "doesn't have a resource type"];

/// Why a command attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The cluster answered, and the answer is "no such resource". Logged
    /// informationally and never escalated.
    MissingResource,
    /// Anything else: transient API error, timeout, CLI misuse.
    Error,
}

/// Classify failure output by the markers the CLIs print for absent
/// resource kinds and empty result sets.
pub fn classify_failure(output: &str) -> FailureKind {
    let lower = output.to_lowercase();
    if MISSING_RESOURCE_MARKERS.iter().any(|m| lower.contains(m)) {
        FailureKind::MissingResource
    } else {
        FailureKind::Error
    }
}

/// Retry bound plus the log notes used when attempts fail.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts (not retries after the first).
    pub max_attempts: usize,
    /// Log note for generic failures, e.g. `"failed to get Pod"`.
    pub failure_note: String,
    /// Log note for absent resource kinds, e.g. `"no Pod resources"`.
    pub missing_note: String,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: usize,
        failure_note: impl Into<String>,
        missing_note: impl Into<String>,
    ) -> Self {
        Self {
            max_attempts,
            failure_note: failure_note.into(),
            missing_note: missing_note.into(),
        }
    }
}

/// Admits each distinct failure output once; repeats stay quiet.
#[derive(Debug, Default)]
pub(crate) struct LogGate {
    last: Option<String>,
}

impl LogGate {
    /// True when `output` differs from the previously admitted output.
    pub(crate) fn admits(&mut self, output: &str) -> bool {
        if self.last.as_deref() == Some(output) {
            return false;
        }
        self.last = Some(output.to_string());
        true
    }
}

/// Run `spec` up to `policy.max_attempts` times, returning the first
/// successful output.
///
/// `None` means every attempt failed; the caller decides materiality (most
/// collection call sites simply omit that artifact from the archive).
/// Timeouts count as failed attempts like any other non-zero exit.
pub async fn run_with_retries(
    runner: &dyn CommandRunner,
    spec: &CommandSpec,
    policy: &RetryPolicy,
) -> Option<String> {
    let mut gate = LogGate::default();

    for attempt in 1..=policy.max_attempts {
        let result = runner.run(spec).await;
        if result.success() {
            return Some(result.output);
        }

        if gate.admits(&result.output) {
            let output = result.output.trim_end();
            match classify_failure(&result.output) {
                FailureKind::MissingResource => {
                    tracing::info!(attempt, output = %output, "{}", policy.missing_note);
                }
                FailureKind::Error => {
                    tracing::warn!(
                        attempt,
                        code = result.code,
                        output = %output,
                        "{}",
                        policy.failure_note
                    );
                }
            }
        }
    }

    None
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
