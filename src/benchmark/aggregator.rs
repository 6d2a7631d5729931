// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/aggregator.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file merges per-device counter vectors into one tagged vector and
// reduces the repeated runs of one sweep cell to the row that gets reported.
// The reduction is an explicit policy chosen on the command line.
//
// Tree Location:
// - src/benchmark/aggregator.rs (run aggregation)
// - Depends on: serde, thiserror

use crate::benchmark::timing::Timing;
use crate::utils::format::FormatUtils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Prefix of the label that replaces the first merged counter
pub const THREAD_TAG_PREFIX: &str = "#THDS";

#[derive(Error, Debug, PartialEq)]
pub enum AggregationError {
    #[error("device {device} reported {found} counters, expected {expected}")]
    LengthMismatch {
        device: usize,
        expected: usize,
        found: usize,
    },

    #[error("run {run} reported {found} cpu counters, expected {expected}")]
    CpuLengthMismatch {
        run: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot reduce a cell without runs")]
    NoRuns,
}

/// How the repeated runs of one cell become the reported statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionPolicy {
    /// The first run, as recorded
    First,
    /// Element-wise mean of timings and counters
    Mean,
    /// The run with the median wall time (lower median for even counts)
    #[default]
    Median,
}

impl FromStr for ReductionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ReductionPolicy::First),
            "mean" => Ok(ReductionPolicy::Mean),
            "median" => Ok(ReductionPolicy::Median),
            other => Err(format!("unknown reduction policy '{}' (first, mean, median)", other)),
        }
    }
}

impl fmt::Display for ReductionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReductionPolicy::First => "first",
            ReductionPolicy::Mean => "mean",
            ReductionPolicy::Median => "median",
        };
        f.write_str(name)
    }
}

/// Outcome of one workload run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStat {
    pub timing: Timing,
    /// One counter vector per sampling device, in device order
    pub per_device_counts: Vec<Vec<u64>>,
    pub cpu_counts: Vec<u64>,
}

/// Device counters summed per position, first position replaced by a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedCounters {
    pub tag: String,
    pub values: Vec<u64>,
}

impl fmt::Display for TaggedCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// Reported statistic of one (benchmark, frequency, thread count) cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellResult {
    pub frequency: String,
    pub thread_count: String,
    pub runs: usize,
    pub policy: ReductionPolicy,
    pub timing: Timing,
    pub devices: Option<TaggedCounters>,
    pub cpu_counts: Vec<u64>,
}

impl CellResult {
    /// ` | wall user sys | #THDSn c1 c2 .. | cpu1 cpu2 ..`
    pub fn row(&self) -> String {
        let devices = self
            .devices
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        format!(
            " | {} | {} | {}",
            self.timing.tokens(),
            devices,
            FormatUtils::join_tokens(&self.cpu_counts)
        )
    }
}

/// Per-position sum of the device vectors. Returns `None` when no device
/// reported anything.
pub fn merge_devices(
    devices: &[Vec<u64>],
    thread_count: &str,
) -> Result<Option<TaggedCounters>, AggregationError> {
    let Some(first) = devices.first() else {
        return Ok(None);
    };
    let expected = first.len();
    let mut sums = vec![0u64; expected];
    for (device, counts) in devices.iter().enumerate() {
        if counts.len() != expected {
            return Err(AggregationError::LengthMismatch {
                device,
                expected,
                found: counts.len(),
            });
        }
        for (sum, count) in sums.iter_mut().zip(counts) {
            *sum = sum.saturating_add(*count);
        }
    }
    Ok(Some(TaggedCounters {
        tag: format!("{}{}", THREAD_TAG_PREFIX, thread_count),
        values: sums.into_iter().skip(1).collect(),
    }))
}

/// Reduces repeated runs according to a policy
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAggregator {
    policy: ReductionPolicy,
}

impl SampleAggregator {
    pub fn new(policy: ReductionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReductionPolicy {
        self.policy
    }

    pub fn reduce(
        &self,
        frequency: &str,
        thread_count: &str,
        runs: &[RunStat],
    ) -> Result<CellResult, AggregationError> {
        if runs.is_empty() {
            return Err(AggregationError::NoRuns);
        }

        let (timing, devices, cpu_counts) = match self.policy {
            ReductionPolicy::First => single_run(&runs[0], thread_count)?,
            ReductionPolicy::Median => single_run(median_run(runs), thread_count)?,
            ReductionPolicy::Mean => mean_run(runs, thread_count)?,
        };

        Ok(CellResult {
            frequency: frequency.to_string(),
            thread_count: thread_count.to_string(),
            runs: runs.len(),
            policy: self.policy,
            timing,
            devices,
            cpu_counts,
        })
    }
}

type Reduced = (Timing, Option<TaggedCounters>, Vec<u64>);

fn single_run(run: &RunStat, thread_count: &str) -> Result<Reduced, AggregationError> {
    let devices = merge_devices(&run.per_device_counts, thread_count)?;
    Ok((run.timing, devices, run.cpu_counts.clone()))
}

fn median_run(runs: &[RunStat]) -> &RunStat {
    let mut order: Vec<usize> = (0..runs.len()).collect();
    order.sort_by_key(|&i| runs[i].timing.wall);
    &runs[order[(runs.len() - 1) / 2]]
}

fn mean_run(runs: &[RunStat], thread_count: &str) -> Result<Reduced, AggregationError> {
    let n = runs.len() as u32;
    let mean_duration = |pick: fn(&Timing) -> Duration| -> Duration {
        runs.iter().map(|r| pick(&r.timing)).sum::<Duration>() / n
    };
    let timing = Timing::new(
        mean_duration(|t| t.wall),
        mean_duration(|t| t.user),
        mean_duration(|t| t.sys),
    );

    let merged = runs
        .iter()
        .map(|run| merge_devices(&run.per_device_counts, thread_count))
        .collect::<Result<Vec<_>, _>>()?;
    let devices = match merged.iter().flatten().next() {
        None => None,
        Some(first) => {
            let vectors: Vec<&[u64]> = merged
                .iter()
                .flatten()
                .map(|tagged| tagged.values.as_slice())
                .collect();
            let values = mean_vectors(&vectors).map_err(|(index, found)| {
                AggregationError::LengthMismatch {
                    device: index,
                    expected: first.values.len(),
                    found,
                }
            })?;
            Some(TaggedCounters {
                tag: first.tag.clone(),
                values,
            })
        }
    };

    let cpu_vectors: Vec<&[u64]> = runs.iter().map(|r| r.cpu_counts.as_slice()).collect();
    let cpu_counts = mean_vectors(&cpu_vectors).map_err(|(run, found)| {
        AggregationError::CpuLengthMismatch {
            run,
            expected: runs[0].cpu_counts.len(),
            found,
        }
    })?;

    Ok((timing, devices, cpu_counts))
}

/// Rounded element-wise mean; on length mismatch returns (index, length)
fn mean_vectors(vectors: &[&[u64]]) -> Result<Vec<u64>, (usize, usize)> {
    let Some(first) = vectors.first() else {
        return Ok(Vec::new());
    };
    let len = first.len();
    let mut sums = vec![0u128; len];
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != len {
            return Err((index, vector.len()));
        }
        for (sum, value) in sums.iter_mut().zip(vector.iter()) {
            *sum += *value as u128;
        }
    }
    let n = vectors.len() as u128;
    Ok(sums
        .into_iter()
        .map(|sum| ((sum + n / 2) / n) as u64)
        .collect())
}


// Changelog:
// - v1.1.0 (2026-10-11): Explicit reduction policies.
//   - Replaced the "whichever run comes first" pick with First, Mean and
//     Median policies; Median is the default.
// - v1.0.0 (2026-10-05): Device merge with #THDS tagging.
