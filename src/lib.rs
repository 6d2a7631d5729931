// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file serves as the library entry point for ime-sweep. It exports the
// sweep pipeline (configuration, external tool gateway, sweep executor and
// aggregation) and the oracle pipeline (collection and overhead ratios).
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: benchmark, config, core, gateway, help, oracle, utils

pub mod benchmark;
pub mod config;
pub mod core;
pub mod gateway;
pub mod help;
pub mod oracle;
pub mod utils;

// Re-export commonly used types at the crate root for convenience
pub use crate::benchmark::{ProfilerControl, ReductionPolicy, SampleAggregator, SweepConfig, SweepReport, SweepRunner};
pub use crate::config::{ConfigError, ConfigParser, SweepPlan};
pub use crate::core::{Args, SamplingType};
pub use crate::gateway::{ProcessGateway, ToolGateway};
pub use crate::help::display_full_help;
pub use crate::oracle::{OracleCollector, OverheadNormalizer, ResultsLayout};
pub use crate::utils::DirectoryManager;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Changelog:
// - v1.1.0 (2026-10-12): Added the oracle module.
// - v1.0.0 (2026-10-05): Library root reworked for the sweep harness.
//   - Purpose: Organizes the project into core, config, gateway, benchmark,
//     help and utils modules and re-exports the types main.rs needs.
