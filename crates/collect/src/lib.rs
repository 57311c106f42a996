// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rlec-collect: cluster diagnostics collection pipeline.
//!
//! Drives the detected cluster CLI to pull manifests, descriptions, pod
//! logs, and the vendor debug bundle out of each target namespace, then
//! archives the lot as one gzip tarball. Namespaces are collected by
//! independent parallel jobs that never share mutable state; each job owns
//! its own output subdirectory and the run's detected CLI profile is
//! cloned in read-only.
//!
//! Individual collection failures degrade gracefully: a kind that does not
//! exist, a pod that will not answer, a debug bundle that cannot be built
//! all end up as log lines and gaps in the archive, never as an aborted
//! run. Only configuration problems (no usable CLI, unwritable output
//! directory) are fatal.

pub mod archive;
pub mod config;
pub mod debug;
pub mod detect;
pub mod error;
pub mod logs;
pub mod namespace;
pub mod orchestrator;
pub mod pods;
pub mod redis;
pub mod resources;

pub use config::CollectorConfig;
pub use error::CollectError;
pub use orchestrator::{run, run_with_runner, NamespaceJob, RunSummary};
