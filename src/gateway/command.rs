// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/gateway/command.rs
// Version: 1.0.3
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file wraps every external process the harness starts: the profiler
// control tool, the timed workload, module load scripts and build commands.
// Each call is a single attempt bounded by a timeout and returns the captured
// stdout/stderr lines and the exit status.
//
// Tree Location:
// - src/gateway/command.rs (external command execution)
// - Depends on: tokio, log, thiserror

use log::{debug, warn};
use std::fmt;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;

const LOG_TARGET: &str = "ime::sweep::gateway";

/// Status reported when the process ended without an exit code
pub const STATUS_UNKNOWN: i32 = -1;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Failed to start '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO failure while waiting for '{command}'")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

/// One external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command line run through `sh -c`, needed for the timing wrapper and
    /// workload commands given as free text
    pub fn shell(line: impl Into<String>) -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), line.into()],
        }
    }

    /// The shell line if this is a `sh -c` invocation
    pub fn shell_line(&self) -> Option<&str> {
        match self.args.as_slice() {
            [flag, line] if self.program == "sh" && flag == "-c" => Some(line.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.shell_line() {
            return f.write_str(line);
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of one external call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub status: i32,
    pub elapsed: Duration,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Last non-blank stderr line
    pub fn last_diagnostic(&self) -> Option<&str> {
        self.stderr
            .iter()
            .rev()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
    }
}

/// Synchronous-from-the-caller's-view execution of external commands.
/// The sweep awaits every call before issuing the next one.
#[allow(async_fn_in_trait)]
pub trait ToolGateway {
    async fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, GatewayError>;
}

/// Gateway backed by real child processes
#[derive(Debug, Clone)]
pub struct ProcessGateway {
    timeout: Duration,
}

impl ProcessGateway {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ToolGateway for ProcessGateway {
    async fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, GatewayError> {
        debug!(target: LOG_TARGET, "Executing: {}", invocation);
        let start = Instant::now();

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| GatewayError::Spawn {
                command: invocation.to_string(),
                source: e,
            })?;

        // Dropping the child on timeout kills it (kill_on_drop)
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| GatewayError::Io {
                command: invocation.to_string(),
                source: e,
            })?,
            Err(_) => {
                warn!(target: LOG_TARGET, "⏰ '{}' exceeded {:?}, killed", invocation, self.timeout);
                return Err(GatewayError::TimedOut {
                    command: invocation.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        let result = CommandOutput {
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
            status: exit_code(&output.status),
            elapsed: start.elapsed(),
        };
        debug!(target: LOG_TARGET,
            "'{}' exited with {} after {:?}",
            invocation, result.status, result.elapsed
        );
        Ok(result)
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

#[cfg(unix)]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(STATUS_UNKNOWN)
}

#[cfg(not(unix))]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(STATUS_UNKNOWN)
}


// Changelog:
// - v1.0.3 (2026-10-16): Removed the unused first_line accessor.
// - v1.0.2 (2026-10-10): Every call is bounded by a timeout.
//   - Expired calls kill the child and return GatewayError::TimedOut.
// - v1.0.1 (2026-10-07): Signal terminations map to 128 + signal.
// - v1.0.0 (2026-10-05): Initial process gateway.
