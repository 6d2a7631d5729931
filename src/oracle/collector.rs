// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/collector.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file drives the two oracle passes.
//
// Collection (`OracleCollector`), per injection level:
// 1. render the injection template and rebuild the workload (optional),
//    then reset the counters,
// 2. per frequency: switch sampling, run the workload once, dump every
//    device, keep the filtered samples, record count and elapsed time,
//    reset the counters,
// 3. write the aggregate row file and the level's total elapsed time.
// Level 0 is the oracle baseline. Sampling is disabled once every level is
// collected.
//
// Overhead (`OverheadNormalizer`): reads the baseline and every level back
// from the info files and writes one ratio file per level. A failing level
// is reported and does not stop the others.
//
// Tree Location:
// - src/oracle/collector.rs (oracle collection and overhead passes)
// - Depends on: log

use crate::benchmark::profiler::ProfilerControl;
use crate::gateway::{CommandOutput, Invocation, ToolGateway};
use crate::oracle::files::ResultsLayout;
use crate::oracle::inject::render_file;
use crate::oracle::normalizer::{
    BASELINE_LEVEL, FrequencySeries, OracleBaseline, OracleError, SeriesPoint, overhead_ratios,
};
use crate::oracle::samples::{filter_samples, from_lines};
use log::{debug, error, info};
use std::path::PathBuf;

const LOG_TARGET: &str = "ime::sweep::oracle";

/// Settings of the collection pass
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Workload command line, run once per frequency
    pub workload: String,
    pub frequencies: Vec<String>,
    pub levels: Vec<u32>,
    /// Source with `#INJECT` markers and the file it is rendered into
    pub template: Option<(PathBuf, PathBuf)>,
    /// Rebuilds the workload after rendering
    pub build_cmd: Option<String>,
    pub sample_prefix: String,
}

pub struct OracleCollector<'g, G: ToolGateway> {
    config: OracleConfig,
    profiler: ProfilerControl<'g, G>,
    layout: ResultsLayout,
}

impl<'g, G: ToolGateway> OracleCollector<'g, G> {
    pub fn new(config: OracleConfig, profiler: ProfilerControl<'g, G>, layout: ResultsLayout) -> Self {
        Self {
            config,
            profiler,
            layout,
        }
    }

    /// Collect every configured level; the first error aborts the pass
    pub async fn collect(&self) -> Result<Vec<FrequencySeries>, OracleError> {
        info!(target: LOG_TARGET,
            "🔬 Collecting {} injection levels over {} frequencies",
            self.config.levels.len(), self.config.frequencies.len()
        );
        self.layout.prepare()?;
        self.layout.reset_oracle_info()?;

        let mut collected = Vec::with_capacity(self.config.levels.len());
        for &level in &self.config.levels {
            collected.push(self.collect_level(level).await?);
        }
        self.profiler.disable().await?;
        Ok(collected)
    }

    pub async fn collect_level(&self, level: u32) -> Result<FrequencySeries, OracleError> {
        info!(target: LOG_TARGET, "💉 Injection level {}", level);
        if let Some((template, target)) = &self.config.template {
            render_file(template, target, level)?;
        }
        if let Some(build) = &self.config.build_cmd {
            self.shell(build).await?;
        }

        // Nothing accumulated before this level may reach its first dump
        self.profiler.clear().await?;

        self.layout.reset_series(level)?;
        let mut series = FrequencySeries::new(level);

        for frequency in &self.config.frequencies {
            self.profiler.apply_frequency(frequency).await?;
            let output = self.shell(&self.config.workload).await?;
            let elapsed_ms = output.elapsed.as_millis() as u64;

            let mut raw = Vec::new();
            for device in self.profiler.devices()? {
                raw.extend(self.profiler.dump_device(&device).await?);
            }
            let samples = filter_samples(from_lines(raw), &self.config.sample_prefix);
            self.layout.write_samples(level, frequency, &samples)?;

            let point = SeriesPoint {
                frequency: frequency.clone(),
                count: samples.len() as u64,
                elapsed_ms,
            };
            debug!(target: LOG_TARGET,
                "Level {} @ {}: {} samples in {} ms", level, frequency, point.count, elapsed_ms
            );
            self.layout.append_point(level, &point)?;
            series.points.push(point);

            self.profiler.clear().await?;
        }

        self.layout.write_aggregate(&series)?;
        self.layout.append_oracle_info(level, series.total_elapsed_ms())?;
        info!(target: LOG_TARGET,
            "✅ Level {} collected in {} ms", level, series.total_elapsed_ms()
        );
        Ok(series)
    }

    async fn shell(&self, line: &str) -> Result<CommandOutput, OracleError> {
        let invocation = Invocation::shell(line);
        let output = self.profiler.gateway().execute(&invocation).await?;
        if !output.success() {
            return Err(OracleError::CommandFault {
                command: invocation.to_string(),
                status: output.status,
                diagnostic: output.last_diagnostic().unwrap_or("no diagnostic").to_string(),
            });
        }
        Ok(output)
    }
}

/// Outcome of the overhead pass
#[derive(Debug, Default)]
pub struct OverheadOutcome {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(u32, OracleError)>,
}

impl OverheadOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// File-driven overhead pass over previously collected levels
pub struct OverheadNormalizer {
    layout: ResultsLayout,
}

impl OverheadNormalizer {
    pub fn new(layout: ResultsLayout) -> Self {
        Self { layout }
    }

    /// A missing or unreadable baseline fails the whole pass
    pub fn run(&self, levels: &[u32]) -> Result<OverheadOutcome, OracleError> {
        let baseline = OracleBaseline::from_series(&self.layout.read_series(BASELINE_LEVEL)?);
        info!(target: LOG_TARGET,
            "📐 Normalizing {} levels against a baseline of {} frequencies",
            levels.len(), baseline.frequencies().len()
        );

        let mut outcome = OverheadOutcome::default();
        for &level in levels {
            match self.normalize_level(&baseline, level) {
                Ok(path) => outcome.written.push(path),
                Err(e) => {
                    error!(target: LOG_TARGET, "❌ Level {} skipped: {}", level, e);
                    outcome.failures.push((level, e));
                }
            }
        }
        Ok(outcome)
    }

    fn normalize_level(&self, baseline: &OracleBaseline, level: u32) -> Result<PathBuf, OracleError> {
        let series = self.layout.read_series(level)?;
        let ratios = overhead_ratios(baseline, &series)?;
        let path = self.layout.write_overhead(level, &ratios)?;
        debug!(target: LOG_TARGET, "Wrote {} ratios to {:?}", ratios.len(), path);
        Ok(path)
    }
}

// Changelog:
// - v1.1.1 (2026-10-16): Counters are reset before each level's first
//   frequency and sampling is disabled at the end of the pass.
// - v1.1.0 (2026-10-14): Overhead failures are collected per level.
// - v1.0.0 (2026-10-12): Oracle collection and overhead passes.
