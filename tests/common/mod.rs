// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/common/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Shared fixtures for the integration tests: an in-memory gateway that
// records every invocation and answers like the profiler control tool and a
// timed workload would, and a fake sampling device directory.
//
// Tree Location:
// - tests/common/mod.rs (integration test fixtures)
// - Depends on: ime-sweep, tempfile

#![allow(dead_code)]

use ime_sweep::gateway::{CommandOutput, GatewayError, Invocation, ToolGateway};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

pub const TOOL: &str = "profiler";

type Predicate = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;

/// Records calls and answers from a fixed script
pub struct ScriptedGateway {
    calls: Mutex<Vec<Invocation>>,
    failing: Option<Predicate>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: None,
        }
    }

    /// Invocations matching `predicate` exit with status 1
    pub fn failing_when<F>(predicate: F) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: Some(Box::new(predicate)),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Every call rendered as a command line
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }

    pub fn workload_calls(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|c| c.program == "sh")
            .map(|c| c.to_string())
            .collect()
    }

    pub fn count_tool(&self, args: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.program == TOOL && c.args == args)
            .count()
    }

    fn respond(invocation: &Invocation) -> CommandOutput {
        if invocation.program != TOOL {
            return CommandOutput {
                stdout: vec!["done".into()],
                stderr: vec!["1.00, 0.50, 0.10".into()],
                status: 0,
                elapsed: Duration::from_millis(5),
            };
        }
        let stdout: Vec<String> = match invocation.args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["-t", _] => vec!["0 3 4".into()],
            ["-p"] => vec!["7 8".into()],
            ["-x", "0"] => vec!["0x4002 r".into(), "0x7fff10 w".into(), "0x4001 r".into()],
            ["-x", _] => vec!["0x4003 w".into()],
            _ => Vec::new(),
        };
        CommandOutput {
            stdout,
            ..Default::default()
        }
    }
}

impl ToolGateway for ScriptedGateway {
    async fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, GatewayError> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.failing.as_ref().is_some_and(|fail| fail(invocation)) {
            return Ok(CommandOutput {
                stderr: vec!["boom".into()],
                status: 1,
                ..Default::default()
            });
        }
        Ok(Self::respond(invocation))
    }
}

/// Device directory with the given devices plus the `ctl` control entry
pub fn device_dir(devices: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in devices.iter().chain(["ctl"].iter()) {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    dir
}

// Changelog:
// - v1.0.0 (2026-10-10): Scripted gateway and device directory fixtures.
