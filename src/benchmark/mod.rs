// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the benchmark module: the sweep executor and the pieces
// it drives (profiler control, timing parsing, aggregation and per-benchmark
// output files).
//
// Tree Location:
// - src/benchmark/mod.rs (benchmark module entry point)
// - Submodules: aggregator, output, profiler, runner, timing

pub mod aggregator;
pub mod output;
pub mod profiler;
pub mod runner;
pub mod timing;

// Re-export key benchmark types and functions
pub use aggregator::{AggregationError, CellResult, ReductionPolicy, RunStat, SampleAggregator, TaggedCounters};
pub use output::{BenchmarkOutput, OutputError};
pub use profiler::{FrequencyAction, ProfilerControl, ProfilerError};
pub use runner::{BenchmarkReport, SweepConfig, SweepError, SweepReport, SweepRunner, reload_module};
pub use timing::{Timing, TimingError};

// Changelog:
// - v1.1.0 (2026-10-11): Added aggregator and output submodules.
// - v1.0.0 (2026-10-05): Benchmark module reworked around the sweep executor.
//   - Purpose: Declares profiler, timing and runner submodules with re-exports.
