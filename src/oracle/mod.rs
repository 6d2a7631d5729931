// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the oracle module: baseline collection over injection
// levels and overhead normalization against the level 0 baseline.
//
// Tree Location:
// - src/oracle/mod.rs (oracle module entry point)
// - Submodules: collector, files, inject, normalizer, samples

pub mod collector;
pub mod files;
pub mod inject;
pub mod normalizer;
pub mod samples;

pub use collector::{OracleCollector, OracleConfig, OverheadNormalizer, OverheadOutcome};
pub use files::ResultsLayout;
pub use normalizer::{
    BASELINE_LEVEL, FrequencySeries, OracleBaseline, OracleError, OverheadPoint, SeriesPoint, overhead_ratios,
};
pub use samples::{SampleRecord, filter_samples};

// Changelog:
// - v1.0.0 (2026-10-12): Initial oracle module.
