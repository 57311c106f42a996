// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable description of one external command invocation.

use std::path::{Path, PathBuf};

/// One external command invocation, built once and never mutated.
///
/// The line is run through `sh -c`, matching how the cluster CLI is driven
/// everywhere in this tool (pipelines and redirections appear in a few
/// collection commands). Stderr is merged into the captured output by
/// default: CLI error text is diagnostic payload here, not noise.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    line: String,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    merge_stderr: bool,
}

impl CommandSpec {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            cwd: None,
            env: Vec::new(),
            merge_stderr: true,
        }
    }

    /// Run the command from `dir` instead of the inherited working directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add one environment variable on top of the inherited environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Control whether stderr is appended to the captured output.
    pub fn merge_stderr(mut self, merge: bool) -> Self {
        self.merge_stderr = merge;
        self
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn merges_stderr(&self) -> bool {
        self.merge_stderr
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
