// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/normalizer.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements overhead normalization on in-memory series. A series
// is the per-frequency sample count of one injection level; the series of
// level 0 is the oracle baseline. Each instrumented bucket is matched to the
// baseline bucket with the same frequency token and divided by it.
//
// Rules:
// - the instrumented frequency sequence must equal the baseline's,
// - buckets where sampling is off carry no samples and are skipped,
// - a zero baseline count is an error, never a NaN or infinity.
//
// Tree Location:
// - src/oracle/normalizer.rs (baseline/instrumented ratio computation)
// - Depends on: thiserror

use crate::benchmark::profiler::ProfilerError;
use crate::config::plan::is_off_frequency;
use crate::gateway::GatewayError;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Injection level whose series is the baseline
pub const BASELINE_LEVEL: u32 = 0;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Baseline count for frequency {frequency} is zero")]
    InvalidBaseline { frequency: String },

    #[error("Level {level} frequencies {found:?} differ from the baseline {expected:?}")]
    FrequencyMismatch {
        level: u32,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Level {level} frequency {frequency} has no baseline bucket")]
    MissingFrequency { level: u32, frequency: String },

    #[error("Malformed series {path:?} line {line}: {reason}")]
    MalformedSeries {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Oracle file IO failed on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {status}: {diagnostic}")]
    CommandFault {
        command: String,
        status: i32,
        diagnostic: String,
    },

    #[error(transparent)]
    Profiler(#[from] ProfilerError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// One frequency bucket of a collected level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub frequency: String,
    pub count: u64,
    pub elapsed_ms: u64,
}

/// Per-frequency sample counts of one injection level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencySeries {
    pub level: u32,
    pub points: Vec<SeriesPoint>,
}

impl FrequencySeries {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, frequency: impl Into<String>, count: u64, elapsed_ms: u64) {
        self.points.push(SeriesPoint {
            frequency: frequency.into(),
            count,
            elapsed_ms,
        });
    }

    pub fn frequencies(&self) -> Vec<String> {
        self.points.iter().map(|p| p.frequency.clone()).collect()
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.points.iter().map(|p| p.elapsed_ms).sum()
    }
}

/// Baseline counts keyed by frequency token; read-only once built
#[derive(Debug, Clone)]
pub struct OracleBaseline {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl OracleBaseline {
    pub fn from_series(series: &FrequencySeries) -> Self {
        Self {
            order: series.frequencies(),
            counts: series
                .points
                .iter()
                .map(|p| (p.frequency.clone(), p.count))
                .collect(),
        }
    }

    pub fn frequencies(&self) -> &[String] {
        &self.order
    }

    pub fn count(&self, frequency: &str) -> Option<u64> {
        self.counts.get(frequency).copied()
    }
}

/// Ratio of one frequency bucket
#[derive(Debug, Clone, PartialEq)]
pub struct OverheadPoint {
    pub frequency: String,
    pub ratio: f64,
}

/// Divide each instrumented bucket by its baseline bucket, in frequency order
pub fn overhead_ratios(
    baseline: &OracleBaseline,
    series: &FrequencySeries,
) -> Result<Vec<OverheadPoint>, OracleError> {
    if let Some(point) = series
        .points
        .iter()
        .find(|p| baseline.count(&p.frequency).is_none())
    {
        return Err(OracleError::MissingFrequency {
            level: series.level,
            frequency: point.frequency.clone(),
        });
    }

    let found = series.frequencies();
    if found != baseline.frequencies() {
        return Err(OracleError::FrequencyMismatch {
            level: series.level,
            expected: baseline.frequencies().to_vec(),
            found,
        });
    }

    let mut ratios = Vec::with_capacity(series.points.len());
    for point in series.points.iter().filter(|p| !is_off_frequency(&p.frequency)) {
        // presence checked above
        let denominator = baseline.count(&point.frequency).unwrap_or(0);
        if denominator == 0 {
            return Err(OracleError::InvalidBaseline {
                frequency: point.frequency.clone(),
            });
        }
        ratios.push(OverheadPoint {
            frequency: point.frequency.clone(),
            ratio: point.count as f64 / denominator as f64,
        });
    }
    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(level: u32, buckets: &[(&str, u64)]) -> FrequencySeries {
        let mut series = FrequencySeries::new(level);
        for (frequency, count) in buckets {
            series.push(*frequency, *count, 100);
        }
        series
    }

    #[test]
    fn test_half_overhead() {
        let baseline = OracleBaseline::from_series(&series(0, &[("0x1", 10), ("0x4", 20), ("0x10", 30)]));
        let ratios = overhead_ratios(&baseline, &series(5, &[("0x1", 5), ("0x4", 10), ("0x10", 15)])).unwrap();
        let values: Vec<f64> = ratios.iter().map(|p| p.ratio).collect();
        assert_eq!(values, vec![0.5, 0.5, 0.5]);
        assert_eq!(ratios[2].frequency, "0x10");
    }

    #[test]
    fn test_off_bucket_skipped() {
        let base = series(0, &[("0x0", 0), ("0x100", 8)]);
        let ratios = overhead_ratios(&OracleBaseline::from_series(&base), &series(2, &[("0x0", 0), ("0x100", 4)])).unwrap();
        assert_eq!(ratios, vec![OverheadPoint { frequency: "0x100".into(), ratio: 0.5 }]);
    }

    #[test]
    fn test_zero_baseline_is_error() {
        let baseline = OracleBaseline::from_series(&series(0, &[("0x1", 0)]));
        let result = overhead_ratios(&baseline, &series(1, &[("0x1", 3)]));
        assert!(matches!(result, Err(OracleError::InvalidBaseline { frequency }) if frequency == "0x1"));
    }

    #[test]
    fn test_missing_and_reordered_frequencies() {
        let baseline = OracleBaseline::from_series(&series(0, &[("0x1", 1), ("0x4", 1)]));
        assert!(matches!(
            overhead_ratios(&baseline, &series(1, &[("0x1", 1), ("0x8", 1)])),
            Err(OracleError::MissingFrequency { level: 1, .. })
        ));
        assert!(matches!(
            overhead_ratios(&baseline, &series(1, &[("0x4", 1), ("0x1", 1)])),
            Err(OracleError::FrequencyMismatch { level: 1, .. })
        ));
        assert!(matches!(
            overhead_ratios(&baseline, &series(1, &[("0x1", 1)])),
            Err(OracleError::FrequencyMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_baseline_against_itself_is_one(counts in proptest::collection::vec(1u64..1_000_000, 1..8)) {
            let buckets: Vec<(String, u64)> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("0x{:x}", 1u64 << (4 * i)), *c))
                .collect();
            let mut base = FrequencySeries::new(BASELINE_LEVEL);
            for (frequency, count) in &buckets {
                base.push(frequency.clone(), *count, 1);
            }
            let ratios = overhead_ratios(&OracleBaseline::from_series(&base), &base).unwrap();
            prop_assert_eq!(ratios.len(), buckets.len());
            prop_assert!(ratios.iter().all(|p| p.ratio == 1.0));
        }
    }
}

// Changelog:
// - v1.1.0 (2026-10-14): Buckets are joined by frequency token and the
//   sequence must match the baseline; off buckets are skipped.
// - v1.0.0 (2026-10-12): Initial ratio computation.
