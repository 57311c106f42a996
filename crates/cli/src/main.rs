// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rlec: collect cluster diagnostics for a Redis Enterprise deployment.
//!
//! Fans out over the target namespaces, pulls manifests, descriptions,
//! pod logs, and the vendor debug bundle through the detected cluster
//! CLI, and archives everything as one gzip tarball for offline
//! troubleshooting.

mod exit_error;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_error::ExitError;
use rlec_collect::{CollectError, CollectorConfig};
use rlec_core::{CliKind, CollectMode};

#[derive(Parser)]
#[command(
    name = "rlec",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "Collect diagnostics from a Redis Enterprise cluster deployment"
)]
struct Cli {
    /// Namespace to collect from: a name, a comma-separated list, or
    /// "all". Defaults to the kubeconfig current-context namespace.
    #[arg(short, long)]
    namespace: Option<String>,

    /// Directory the archive is written to (default: current directory).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seconds to wait for each external command; 0 disables the
    /// deadline.
    #[arg(short = 't', long, default_value_t = 180)]
    timeout: u64,

    /// Drive a specific CLI instead of auto-detecting.
    #[arg(long, value_enum)]
    cli: Option<CliArg>,

    /// Force a collection mode instead of gating on the operator
    /// version.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliArg {
    Kubectl,
    Oc,
}

impl From<CliArg> for CliKind {
    fn from(arg: CliArg) -> Self {
        match arg {
            CliArg::Kubectl => CliKind::Kubectl,
            CliArg::Oc => CliKind::Oc,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Restricted,
    All,
}

impl From<ModeArg> for CollectMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Restricted => CollectMode::Restricted,
            ModeArg::All => CollectMode::All,
        }
    }
}

impl Cli {
    fn into_config(self) -> CollectorConfig {
        CollectorConfig {
            namespaces: self.namespace,
            output_dir: self.output_dir,
            command_deadline: Duration::from_secs(self.timeout),
            cli: self.cli.map(CliKind::from),
            mode: self.mode.map(CollectMode::from),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    tracing::info!("started cluster log collector");
    let config = cli.into_config();
    match rlec_collect::run(&config).await {
        Ok(summary) => {
            println!(
                "Collected {} namespace(s) into {}",
                summary.namespaces.len(),
                summary.archive.display()
            );
        }
        Err(error) => {
            let exit = ExitError::from(error);
            eprintln!("error: {}", exit);
            std::process::exit(exit.code);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl From<CollectError> for ExitError {
    fn from(error: CollectError) -> Self {
        let code = match &error {
            // Configuration problems, distinguishable in scripts.
            CollectError::NoUsableCli | CollectError::CreateDir { .. } => 2,
            CollectError::Archive { .. } => 1,
        };
        ExitError::new(code, error.to_string())
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
