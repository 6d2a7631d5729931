// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/profiler.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides typed access to the profiler control tool. Every call
// goes through the gateway and any nonzero exit status is reported as a
// fault; the caller decides how far the fault propagates.
//
// Control tool contract:
// - `-c`            reset accumulated counters
// - `-f`            disable sampling
// - `-n -s <freq>`  enable sampling at <freq>
// - `-t <device>`   one line of whitespace separated per-thread counters
// - `-p`            one line of cpu-wide counters
// - `-x <device>`   raw sample lines, each starting with an address tag
//
// Tree Location:
// - src/benchmark/profiler.rs (profiler control tool wrapper)
// - Depends on: log, thiserror

use crate::config::plan::is_off_frequency;
use crate::gateway::{CommandOutput, GatewayError, Invocation, ToolGateway};
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_TARGET: &str = "ime::sweep::profiler";

#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("'{command}' failed with status {status}: {diagnostic}")]
    Fault {
        command: String,
        status: i32,
        diagnostic: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("'{command}' printed unparsable counters '{line}'")]
    Parse { command: String, line: String },

    #[error("Cannot list sampling devices in {path:?}")]
    Devices {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the profiler was told for a frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyAction {
    Disabled,
    Enabled,
}

/// Typed front of the profiler control tool
#[derive(Debug)]
pub struct ProfilerControl<'g, G: ToolGateway> {
    gateway: &'g G,
    tool: String,
    device_dir: PathBuf,
    control_entry: String,
}

impl<'g, G: ToolGateway> ProfilerControl<'g, G> {
    pub fn new(
        gateway: &'g G,
        tool: impl Into<String>,
        device_dir: impl Into<PathBuf>,
        control_entry: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            tool: tool.into(),
            device_dir: device_dir.into(),
            control_entry: control_entry.into(),
        }
    }

    pub fn gateway(&self) -> &'g G {
        self.gateway
    }

    pub fn device_dir(&self) -> &Path {
        &self.device_dir
    }

    pub fn invocation(&self, args: &[&str]) -> Invocation {
        Invocation::new(self.tool.clone(), args.iter().copied())
    }

    /// Run one control call; nonzero status is a fault
    pub async fn call(&self, args: &[&str]) -> Result<CommandOutput, ProfilerError> {
        let invocation = self.invocation(args);
        let output = self.gateway.execute(&invocation).await?;
        if !output.success() {
            return Err(ProfilerError::Fault {
                command: invocation.to_string(),
                status: output.status,
                diagnostic: output.last_diagnostic().unwrap_or("no diagnostic").to_string(),
            });
        }
        Ok(output)
    }

    pub async fn clear(&self) -> Result<CommandOutput, ProfilerError> {
        self.call(&["-c"]).await
    }

    pub async fn disable(&self) -> Result<CommandOutput, ProfilerError> {
        self.call(&["-f"]).await
    }

    pub async fn enable(&self, frequency: &str) -> Result<CommandOutput, ProfilerError> {
        self.call(&["-n", "-s", frequency]).await
    }

    /// Disable sampling for the off sentinel, enable it at `frequency` otherwise
    pub async fn apply_frequency(&self, frequency: &str) -> Result<FrequencyAction, ProfilerError> {
        if is_off_frequency(frequency) {
            self.disable().await?;
            Ok(FrequencyAction::Disabled)
        } else {
            self.enable(frequency).await?;
            Ok(FrequencyAction::Enabled)
        }
    }

    pub async fn read_device(&self, device: &str) -> Result<Vec<u64>, ProfilerError> {
        let output = self.call(&["-t", device]).await?;
        parse_counters(&self.invocation(&["-t", device]).to_string(), &output)
    }

    pub async fn read_cpu(&self) -> Result<Vec<u64>, ProfilerError> {
        let output = self.call(&["-p"]).await?;
        parse_counters(&self.invocation(&["-p"]).to_string(), &output)
    }

    pub async fn dump_device(&self, device: &str) -> Result<Vec<String>, ProfilerError> {
        Ok(self.call(&["-x", device]).await?.stdout)
    }

    /// Active sampling devices: every entry of the device directory except
    /// the control entry, numerically ordered where names are numbers
    pub fn devices(&self) -> Result<Vec<String>, ProfilerError> {
        let io_error = |e| ProfilerError::Devices {
            path: self.device_dir.clone(),
            source: e,
        };
        let mut devices = Vec::new();
        for entry in std::fs::read_dir(&self.device_dir).map_err(io_error)? {
            let name = entry.map_err(io_error)?.file_name().to_string_lossy().into_owned();
            if name != self.control_entry {
                devices.push(name);
            }
        }
        devices.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        });
        debug!(target: LOG_TARGET, "Found {} sampling devices in {:?}", devices.len(), self.device_dir);
        Ok(devices)
    }
}

fn parse_counters(command: &str, output: &CommandOutput) -> Result<Vec<u64>, ProfilerError> {
    let line = output
        .stdout
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("");
    line.split_whitespace()
        .map(|token| token.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ProfilerError::Parse {
            command: command.to_string(),
            line: line.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counters() {
        let output = CommandOutput {
            stdout: vec!["".into(), "12 3 4".into()],
            ..Default::default()
        };
        assert_eq!(parse_counters("profiler -p", &output).unwrap(), vec![12, 3, 4]);
    }

    #[test]
    fn test_parse_counters_rejects_text() {
        let output = CommandOutput {
            stdout: vec!["tid: 12".into()],
            ..Default::default()
        };
        assert!(matches!(
            parse_counters("profiler -t 0", &output),
            Err(ProfilerError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_output_is_empty_vector() {
        let output = CommandOutput::default();
        assert!(parse_counters("profiler -p", &output).unwrap().is_empty());
    }
}

// Changelog:
// - v1.1.0 (2026-10-12): Added -x sample dumps for the oracle collector.
// - v1.0.1 (2026-10-08): All control calls are status-checked, reads included.
// - v1.0.0 (2026-10-05): Replaced the in-process metrics profiler with the
//   control tool wrapper.
