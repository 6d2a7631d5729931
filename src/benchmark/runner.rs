// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/runner.rs
// Version: 1.1.3
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the sweep execution engine. A sweep walks
// Benchmark -> Frequency -> ThreadCount -> Run strictly in order and blocks on
// every external call:
// - entering a benchmark resets the profiler counters and opens its files,
// - entering a frequency disables or enables sampling,
// - every run times the workload, reads per-device and cpu counters and
//   resets the counters only after they were read.
// Sampling is disabled once the last benchmark is done.
// Any profiler fault or failed workload aborts the whole sweep.
//
// Tree Location:
// - src/benchmark/runner.rs (sweep executor)
// - Depends on: log, serde, serde_json, thiserror

use crate::benchmark::aggregator::{AggregationError, CellResult, ReductionPolicy, RunStat, SampleAggregator};
use crate::benchmark::output::{BenchmarkOutput, OutputError};
use crate::benchmark::profiler::{FrequencyAction, ProfilerControl, ProfilerError};
use crate::benchmark::timing::{Timing, TimingError, as_secs};
use crate::config::plan::{Benchmark, SweepPlan};
use crate::core::types::SamplingType;
use crate::gateway::{GatewayError, Invocation, ToolGateway};
use crate::utils::format::FormatUtils;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

const LOG_TARGET: &str = "ime::sweep::runner";

pub const DIR_LOG: &str = "log";
pub const DIR_RESULT: &str = "result";
pub const DIR_PARTIAL: &str = "partial";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Profiler control failed while {stage}")]
    Profiler {
        stage: &'static str,
        #[source]
        source: ProfilerError,
    },

    #[error("Workload '{command}' exited with status {status}: {diagnostic}")]
    WorkloadFault {
        command: String,
        status: i32,
        diagnostic: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Cannot read timings of '{command}'")]
    Timing {
        command: String,
        #[source]
        source: TimingError,
    },

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Cannot write sweep summary {path:?}")]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode sweep summary")]
    Encode(#[from] serde_json::Error),

    #[error("Module script '{command}' exited with status {status}: {diagnostic}")]
    ModuleLoad {
        command: String,
        status: i32,
        diagnostic: String,
    },
}

/// Configuration for sweep execution
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Directory holding log/ and result/
    pub output_dir: PathBuf,
    /// Timing wrapper prepended to every workload command
    pub time_cmd: String,
    /// Workload flag that precedes the thread count
    pub thread_flag: String,
    pub policy: ReductionPolicy,
}

impl SweepConfig {
    pub fn result_dir(&self) -> PathBuf {
        self.output_dir.join(DIR_RESULT)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.output_dir.join(DIR_LOG)
    }
}

/// Everything one benchmark produced
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub index: usize,
    pub command: String,
    pub workload_runs: usize,
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub cells: Vec<CellResult>,
}

/// Everything a sweep produced
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub sampling: SamplingType,
    pub run_count: u32,
    pub policy: ReductionPolicy,
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub benchmarks: Vec<BenchmarkReport>,
}

impl SweepReport {
    pub fn workload_runs(&self) -> usize {
        self.benchmarks.iter().map(|b| b.workload_runs).sum()
    }

    /// Pretty JSON summary next to the result files
    pub fn write_summary(&self, result_dir: &Path) -> Result<PathBuf, SweepError> {
        let path = result_dir.join(SUMMARY_FILE);
        let contents = serde_json::to_vec_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SweepError::Summary {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

/// Main sweep runner
pub struct SweepRunner<'g, G: ToolGateway> {
    config: SweepConfig,
    profiler: ProfilerControl<'g, G>,
    aggregator: SampleAggregator,
}

impl<'g, G: ToolGateway> SweepRunner<'g, G> {
    pub fn new(config: SweepConfig, profiler: ProfilerControl<'g, G>) -> Self {
        let aggregator = SampleAggregator::new(config.policy);
        Self {
            config,
            profiler,
            aggregator,
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub async fn run(&self, plan: &SweepPlan) -> Result<SweepReport, SweepError> {
        info!(target: LOG_TARGET,
            "🧪 Starting sweep: {} benchmarks, {} runs per cell, type {}, policy {}",
            plan.benchmarks.len(), plan.run_count, plan.sampling, self.config.policy
        );
        info!(target: LOG_TARGET, "📋 Planned workload runs: {}", plan.total_invocations());

        let start = Instant::now();
        let mut benchmarks = Vec::with_capacity(plan.benchmarks.len());
        for (index, benchmark) in plan.benchmarks.iter().enumerate() {
            let report = self.run_benchmark(index, benchmark, plan.run_count).await?;
            benchmarks.push(report);
        }
        self.profiler.disable().await.map_err(|e| SweepError::Profiler {
            stage: "disabling sampling after the sweep",
            source: e,
        })?;
        let elapsed = start.elapsed();

        info!(target: LOG_TARGET,
            "✅ The entire sweep took about {}",
            FormatUtils::format_elapsed(elapsed)
        );

        Ok(SweepReport {
            sampling: plan.sampling,
            run_count: plan.run_count,
            policy: self.config.policy,
            elapsed,
            benchmarks,
        })
    }

    async fn run_benchmark(
        &self,
        index: usize,
        benchmark: &Benchmark,
        runs: u32,
    ) -> Result<BenchmarkReport, SweepError> {
        info!(target: LOG_TARGET, "🚀 Executing {}", benchmark.command);
        let mut out = BenchmarkOutput::open(&self.config.result_dir(), &self.config.log_dir(), index)?;
        debug!(target: LOG_TARGET, "Writing {:?} and {:?}", out.result_path(), out.log_path());

        out.result(&format!("## CMD {}\n\n", benchmark.command))?;

        out.log(&format!("Running: {}\n", self.profiler.invocation(&["-c"])))?;
        let cleared = self.profiler.clear().await;
        checked(&mut out, "resetting counters before a benchmark", cleared)?;
        out.log("Done\n")?;

        let start = Instant::now();
        let mut cells = Vec::with_capacity(benchmark.frequencies.len() * benchmark.thread_counts.len());
        let mut workload_runs = 0;

        for frequency in &benchmark.frequencies {
            out.result(&format!("#FREQUENCY {}\n", frequency))?;
            self.enter_frequency(&mut out, frequency).await?;
            info!(target: LOG_TARGET, "📡 FREQ: {}", frequency);
            out.log(&format!("freq: {}\n---------\n\n", frequency))?;

            for thread_count in &benchmark.thread_counts {
                out.result(&format!(" {}", thread_count))?;
                out.log(&format!("thds: {}\n", thread_count))?;
                info!(target: LOG_TARGET, "🧵 THDS: {}", thread_count);

                let mut stats = Vec::with_capacity(runs as usize);
                for run in 0..runs {
                    debug!(target: LOG_TARGET, "Run {}/{} of {} @ {}", run + 1, runs, thread_count, frequency);
                    stats.push(self.run_once(&mut out, benchmark, thread_count).await?);
                    workload_runs += 1;
                }

                let cell = self.aggregator.reduce(frequency, thread_count, &stats)?;
                out.result(&format!("{}\n", cell.row()))?;
                cells.push(cell);
            }
        }

        let elapsed = start.elapsed();
        info!(target: LOG_TARGET, "⏱️ Execution time {}", FormatUtils::format_elapsed(elapsed));
        out.result(&format!("\n## ELAPSED {}\n", FormatUtils::format_seconds(elapsed)))?;
        out.finish()?;

        Ok(BenchmarkReport {
            index,
            command: benchmark.command.clone(),
            workload_runs,
            elapsed,
            cells,
        })
    }

    async fn enter_frequency(&self, out: &mut BenchmarkOutput, frequency: &str) -> Result<(), SweepError> {
        let applied = self.profiler.apply_frequency(frequency).await;
        let action = checked(out, "switching the sampling frequency", applied)?;
        let invocation = match action {
            FrequencyAction::Disabled => self.profiler.invocation(&["-f"]),
            FrequencyAction::Enabled => self.profiler.invocation(&["-n", "-s", frequency]),
        };
        out.log(&format!("{} [RET 0]\n", invocation))?;
        Ok(())
    }

    async fn run_once(
        &self,
        out: &mut BenchmarkOutput,
        benchmark: &Benchmark,
        thread_count: &str,
    ) -> Result<RunStat, SweepError> {
        let line = format!(
            "{} {} {} {}",
            self.config.time_cmd, benchmark.command, self.config.thread_flag, thread_count
        );
        let invocation = Invocation::shell(line.trim());
        out.log(&format!("Executing: {}\n", invocation))?;

        let output = self.profiler.gateway().execute(&invocation).await?;
        out.log(&format!("[RET]: {}\n", output.status))?;
        out.log(&format!("[ERR]: {:?}\n", output.stderr))?;
        out.log(&format!("[OUT]: {:?}\n", output.stdout))?;

        if !output.success() {
            let diagnostic = output.last_diagnostic().unwrap_or("no diagnostic").to_string();
            error!(target: LOG_TARGET,
                "❌ Workload failed with status {}: {}",
                output.status, diagnostic
            );
            return Err(SweepError::WorkloadFault {
                command: invocation.to_string(),
                status: output.status,
                diagnostic,
            });
        }

        let timing = Timing::from_diagnostics(&output.stderr).map_err(|e| SweepError::Timing {
            command: invocation.to_string(),
            source: e,
        })?;

        let devices = checked(out, "listing sampling devices", self.profiler.devices())?;
        let mut per_device_counts = Vec::with_capacity(devices.len());
        for device in &devices {
            out.log(&format!("Running: {}\n", self.profiler.invocation(&["-t", device])))?;
            let counts = self.profiler.read_device(device).await;
            let counts = checked(out, "reading device counters", counts)?;
            out.log(&format!("{:?}\nDone\n", counts))?;
            per_device_counts.push(counts);
        }

        out.log(&format!("Running: {}\n", self.profiler.invocation(&["-p"])))?;
        let cpu = self.profiler.read_cpu().await;
        let cpu_counts = checked(out, "reading cpu counters", cpu)?;
        out.log(&format!("{:?}\nDone\n", cpu_counts))?;

        // Reset only after this run's counters were read
        out.log(&format!("Running: {}\n", self.profiler.invocation(&["-c"])))?;
        let reset = self.profiler.clear().await;
        checked(out, "resetting counters after a run", reset)?;
        out.log("Done\n")?;

        Ok(RunStat {
            timing,
            per_device_counts,
            cpu_counts,
        })
    }
}

/// Unload any previous profiler module and load the one matching `sampling`.
/// A failed cleanup only warns; a failed load is fatal.
pub async fn reload_module<G: ToolGateway>(
    gateway: &G,
    module_dir: &Path,
    sampling: SamplingType,
) -> Result<(), SweepError> {
    let dir = module_dir.to_string_lossy();

    let clean = in_module_dir("./xclean.sh", &dir);
    info!(target: LOG_TARGET, "🧹 Unloading profiler module in {}", dir);
    let output = gateway.execute(&clean).await?;
    if !output.success() {
        warn!(target: LOG_TARGET,
            "⚠️ Module cleanup exited with status {}: {}",
            output.status, output.last_diagnostic().unwrap_or("no diagnostic")
        );
    }

    let load = in_module_dir(&format!("./{}", sampling.load_script()), &dir);
    info!(target: LOG_TARGET, "📦 Loading {} profiler module", sampling);
    let output = gateway.execute(&load).await?;
    if !output.success() {
        return Err(SweepError::ModuleLoad {
            command: load.to_string(),
            status: output.status,
            diagnostic: output.last_diagnostic().unwrap_or("no diagnostic").to_string(),
        });
    }
    Ok(())
}

/// `sh -c 'cd "$1" && <script>' sh <dir>`: the directory is never spliced
/// into the shell line
fn in_module_dir(script: &str, dir: &str) -> Invocation {
    let line = format!("cd \"$1\" && {}", script);
    Invocation::new("sh", ["-c", line.as_str(), "sh", dir])
}

/// Logs a profiler fault into the transcript before turning it into a sweep abort
fn checked<T>(
    out: &mut BenchmarkOutput,
    stage: &'static str,
    result: Result<T, ProfilerError>,
) -> Result<T, SweepError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            error!(target: LOG_TARGET, "❌ Unable to perform profiler call while {}: {}", stage, e);
            out.log(&format!("[FAIL] {}\n", e))?;
            Err(SweepError::Profiler { stage, source: e })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_directories() {
        let config = SweepConfig {
            output_dir: PathBuf::from("/tmp/sweep"),
            time_cmd: String::new(),
            thread_flag: "-n".into(),
            policy: ReductionPolicy::Median,
        };
        assert_eq!(config.result_dir(), PathBuf::from("/tmp/sweep/result"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/sweep/log"));
    }

    #[test]
    fn test_summary_is_json() {
        let temp = tempdir().unwrap();
        let report = SweepReport {
            sampling: SamplingType::Nmi,
            run_count: 3,
            policy: ReductionPolicy::Mean,
            elapsed: Duration::from_millis(1500),
            benchmarks: vec![BenchmarkReport {
                index: 0,
                command: "./hot_page".into(),
                workload_runs: 3,
                elapsed: Duration::from_secs(1),
                cells: Vec::new(),
            }],
        };
        assert_eq!(report.workload_runs(), 3);

        let path = report.write_summary(temp.path()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["sampling"], "nmi");
        assert_eq!(value["policy"], "mean");
        assert_eq!(value["elapsed"], 1.5);
        assert_eq!(value["benchmarks"][0]["command"], "./hot_page");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reload_module_in_quoted_directory() {
        use crate::gateway::ProcessGateway;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let module_dir = temp.path().join("it's \"ime\"");
        std::fs::create_dir(&module_dir).unwrap();
        for (script, marker) in [("xclean.sh", "cleaned"), ("irq_load.sh", "loaded")] {
            let path = module_dir.join(script);
            std::fs::write(&path, format!("#!/bin/sh\ntouch {}\n", marker)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let gateway = ProcessGateway::new(Duration::from_secs(10));
        reload_module(&gateway, &module_dir, SamplingType::Irq).await.unwrap();
        assert!(module_dir.join("cleaned").exists());
        assert!(module_dir.join("loaded").exists());
    }
}

// Changelog:
// - v1.1.3 (2026-10-16): Sampling is disabled at the end of a sweep.
//   - reload_module passes the module directory as a positional argument.
// - v1.1.2 (2026-10-11): Cell rows use the configured reduction policy.
//   - Each run's RunStat goes to SampleAggregator instead of a run-indexed map.
// - v1.1.1 (2026-10-09): Default lists resolved by the parser.
//   - The runner no longer reassigns sweep-wide defaults per benchmark.
// - v1.1.0 (2026-10-08): Every profiler call is status-checked and fatal.
//   - Counter reads are logged once instead of twice.
// - v1.0.0 (2026-10-05): Sweep executor replacing the hashing benchmark runner.
//   - Purpose: Runs the nested benchmark/frequency/thread/run loops against the
//     profiler control tool and records per-cell rows.
