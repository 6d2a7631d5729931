// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/config/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the config module: the sweep plan model and the parser
// for the directive-based sweep file.
//
// Tree Location:
// - src/config/mod.rs (config module entry point)
// - Submodules: plan, parser

pub mod parser;
pub mod plan;

pub use parser::{ConfigError, ConfigParser};
pub use plan::{Benchmark, SweepDefaults, SweepPlan, is_off_frequency};

// Changelog:
// - v1.0.0 (2026-10-05): Initial config module.
