// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bounded external command execution.
//!
//! Everything the collector learns about a cluster comes from spawning the
//! cluster CLI and reading its output. This crate owns that boundary:
//!
//! - [`CommandSpec`] describes one invocation (shell line, working
//!   directory, environment, stderr handling).
//! - [`ShellRunner`] executes a spec under an optional deadline and
//!   guarantees the command and anything it spawned are gone when the
//!   deadline expires.
//! - [`run_with_retries`] wraps a runner with a bounded retry loop that
//!   distinguishes "the resource kind does not exist" from real failures
//!   and keeps the log quiet across identical consecutive attempts.
//!
//! Failures never escape as panics or hard errors here: a command that
//! cannot be spawned, times out, or exits non-zero is an [`ExecResult`]
//! the caller inspects.

pub mod command;
pub mod result;
pub mod retry;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use command::CommandSpec;
pub use result::{ExecResult, TIMEOUT_EXIT_CODE};
pub use retry::{classify_failure, run_with_retries, FailureKind, RetryPolicy};
pub use runner::{CommandRunner, ShellRunner};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRunner;
