// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted command runner for tests.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::command::CommandSpec;
use crate::result::ExecResult;
use crate::runner::CommandRunner;

/// One scripted response: returned for command lines containing `pattern`.
struct Script {
    pattern: String,
    responses: VecDeque<ExecResult>,
}

/// A [`CommandRunner`] that answers from a script and records every
/// invocation.
///
/// Responses are registered per substring pattern and consumed in order;
/// the final response for a pattern is sticky, so a single registration
/// covers any number of attempts. Command lines matching no pattern
/// succeed with empty output, which keeps orchestration tests focused on
/// the commands they actually script.
#[derive(Default)]
pub struct FakeRunner {
    scripts: Mutex<Vec<Script>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for command lines containing `pattern`.
    pub fn respond(&self, pattern: &str, code: i32, output: &str) {
        let result = ExecResult {
            code,
            output: output.to_string(),
            duration: Duration::ZERO,
        };
        let mut scripts = self.scripts.lock();
        if let Some(script) = scripts.iter_mut().find(|s| s.pattern == pattern) {
            script.responses.push_back(result);
        } else {
            scripts.push(Script {
                pattern: pattern.to_string(),
                responses: VecDeque::from([result]),
            });
        }
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of executed command lines containing `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.contains(pattern)).count()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> ExecResult {
        self.calls.lock().push(spec.line().to_string());

        let mut scripts = self.scripts.lock();
        for script in scripts.iter_mut() {
            if spec.line().contains(&script.pattern) {
                // Consume queued responses, keeping the last one sticky.
                let result = if script.responses.len() > 1 {
                    script.responses.pop_front()
                } else {
                    script.responses.front().cloned()
                };
                if let Some(result) = result {
                    return result;
                }
            }
        }

        ExecResult {
            code: 0,
            output: String::new(),
            duration: Duration::ZERO,
        }
    }
}
