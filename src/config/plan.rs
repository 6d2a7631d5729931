// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/config/plan.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the in-memory sweep plan built from a sweep file: the
// benchmarks, their resolved frequency and thread-count lists, the sampling
// type and the repeated-run count.
//
// Tree Location:
// - src/config/plan.rs (sweep plan model)
// - Depends on: serde

use crate::core::types::SamplingType;
use serde::{Deserialize, Serialize};

/// Frequency swept when a benchmark has no #FREQ line
pub const STD_FREQ: [&str; 7] = ["0", "4096", "8192", "12288", "16384", "24576", "32768"];

/// Thread counts swept when a benchmark has no #THDS line
pub const STD_THDS: [&str; 7] = ["1", "2", "4", "8", "16", "32", "64"];

/// Sweep-wide fallback lists. Resolved once and never mutated; each
/// benchmark copies what it needs at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepDefaults {
    pub frequencies: Vec<String>,
    pub thread_counts: Vec<String>,
}

impl Default for SweepDefaults {
    fn default() -> Self {
        Self {
            frequencies: STD_FREQ.iter().map(|s| s.to_string()).collect(),
            thread_counts: STD_THDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One benchmark command with its resolved sweep axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Command tokens rejoined with single spaces
    pub command: String,

    /// Sampling frequencies, in sweep order
    pub frequencies: Vec<String>,

    /// Thread counts, in sweep order
    pub thread_counts: Vec<String>,
}

impl Benchmark {
    /// Number of workload invocations this benchmark costs for `runs` repetitions
    pub fn invocation_count(&self, runs: u32) -> usize {
        self.frequencies.len() * self.thread_counts.len() * runs as usize
    }
}

/// Immutable plan produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub sampling: SamplingType,
    pub run_count: u32,
    pub defaults: SweepDefaults,
    pub benchmarks: Vec<Benchmark>,
}

impl SweepPlan {
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Total workload invocations across every benchmark
    pub fn total_invocations(&self) -> usize {
        self.benchmarks
            .iter()
            .map(|b| b.invocation_count(self.run_count))
            .sum()
    }
}

/// True when `token` names the "sampling off" frequency (`0`, `0x0`, `0x00`...)
pub fn is_off_frequency(token: &str) -> bool {
    let token = token.trim();
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse::<u64>(),
    };
    matches!(parsed, Ok(0))
}


// Changelog:
// - v1.0.1 (2026-10-09): Fixed leaking default lists between benchmarks.
//   - SweepDefaults is read-only; benchmarks carry their own resolved lists.
// - v1.0.0 (2026-10-05): Initial sweep plan model.
