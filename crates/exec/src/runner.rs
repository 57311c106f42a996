// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline-enforcing command execution.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::command::CommandSpec;
use crate::result::{ExecResult, SPAWN_FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE};

/// Executes one [`CommandSpec`] and reports an [`ExecResult`].
///
/// This is the cancellable-execution seam: production code uses
/// [`ShellRunner`], tests script a `FakeRunner`. Implementations must never
/// panic on behalf of the command; spawn failures, timeouts, and non-zero
/// exits are all ordinary results.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> ExecResult;
}

/// Runs commands through `sh -c` with an optional per-command deadline.
///
/// On Unix the child is placed in its own process group; when the deadline
/// expires the whole group is SIGKILLed, so subprocesses the shell spawned
/// die with it. On other platforms there is no reliable group-kill
/// primitive and execution degrades to unbounded: the deadline is ignored
/// rather than half-enforced.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    deadline: Duration,
}

impl ShellRunner {
    /// A runner whose commands are killed after `deadline`.
    /// `Duration::ZERO` means unbounded execution.
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn unbounded() -> Self {
        Self::new(Duration::ZERO)
    }

    fn bounded(&self) -> bool {
        cfg!(unix) && !self.deadline.is_zero()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, spec: &CommandSpec) -> ExecResult {
        let start = Instant::now();

        let cmd_span = tracing::debug_span!(
            "exec.cmd",
            cmd = %spec.line(),
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let mut command = tokio::process::Command::new("sh");
        command.arg("-c").arg(spec.line());
        if let Some(dir) = spec.working_dir() {
            command.current_dir(dir);
        }
        for (key, value) in spec.env_vars() {
            command.env(key, value);
        }
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        #[cfg(unix)]
        command.process_group(0);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                // Spawn failure is a result, not a crash: report it the way
                // a failed command would be reported.
                tracing::warn!(cmd = %spec.line(), error = %source, "failed to spawn command");
                return ExecResult {
                    code: SPAWN_FAILURE_EXIT_CODE,
                    output: format!("failed to spawn `{}`: {}", spec.line(), source),
                    duration: start.elapsed(),
                };
            }
        };

        #[cfg(unix)]
        let group = child.id();

        let output = if self.bounded() {
            match tokio::time::timeout(self.deadline, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    #[cfg(unix)]
                    kill_process_group(group);
                    let duration = start.elapsed();
                    cmd_span.record("exit_code", TIMEOUT_EXIT_CODE);
                    cmd_span.record("duration_ms", duration.as_millis() as u64);
                    tracing::warn!(
                        cmd = %spec.line(),
                        deadline_secs = self.deadline.as_secs(),
                        "command timed out, process group killed"
                    );
                    return ExecResult {
                        code: TIMEOUT_EXIT_CODE,
                        output: format!(
                            "command `{}` timed out after {}s",
                            spec.line(),
                            self.deadline.as_secs()
                        ),
                        duration,
                    };
                }
            }
        } else {
            child.wait_with_output().await
        };

        let duration = start.elapsed();
        match output {
            Ok(output) => {
                let code = output.status.code().unwrap_or(-1);
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                if spec.merges_stderr() {
                    text.push_str(&String::from_utf8_lossy(&output.stderr));
                }
                cmd_span.record("exit_code", code);
                cmd_span.record("duration_ms", duration.as_millis() as u64);
                ExecResult {
                    code,
                    output: text,
                    duration,
                }
            }
            Err(source) => ExecResult {
                code: -1,
                output: format!("failed to collect output of `{}`: {}", spec.line(), source),
                duration,
            },
        }
    }
}

/// SIGKILL every process in the child's group. The group may already be
/// gone by the time the deadline fires, so errors are ignored.
#[cfg(unix)]
fn kill_process_group(group: Option<u32>) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Some(pgid) = group {
        let _ = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
