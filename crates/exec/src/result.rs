// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of one external command invocation.

use std::time::Duration;

/// Exit-code sentinel for a command killed on deadline expiry.
///
/// Mirrors the code a SIGKILLed process would report, so callers that only
/// look at "non-zero means failed" need no special case.
pub const TIMEOUT_EXIT_CODE: i32 = -9;

/// Exit code reported when the command could not be spawned at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Exit status and captured text of one invocation.
///
/// Owned exclusively by the caller; a fresh value is produced per run and
/// never shared across invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecResult {
    /// Process exit code, [`TIMEOUT_EXIT_CODE`] for deadline kills, or
    /// [`SPAWN_FAILURE_EXIT_CODE`] when the process never started.
    pub code: i32,
    /// Captured stdout, with stderr appended when the spec merges it.
    pub output: String,
    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    pub fn timed_out(&self) -> bool {
        self.code == TIMEOUT_EXIT_CODE
    }
}
