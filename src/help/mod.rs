// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/help/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the help module printed by `--help-config`: the
// command reference, the configuration language and the oracle pipeline.
//
// Tree Location:
// - src/help/mod.rs (help module entry point)
// - Submodules: commands, benchmarks, oracle

pub mod benchmarks;
pub mod commands;
pub mod oracle;

// Re-export key help functions
pub use benchmarks::{SAMPLE_CONFIG, print_config_help};
pub use commands::{get_command_examples, print_extended_help};
pub use oracle::print_oracle_help;

/// Display comprehensive help information
pub fn display_full_help() {
    println!("🔬 IME Sweep - Sampling overhead sweep harness");
    println!("==============================================");
    println!();

    commands::print_extended_help();
    println!();

    benchmarks::print_config_help();
    println!();

    oracle::print_oracle_help();
    println!();

    commands::print_command_examples();
}


// Changelog:
// - v1.1.0 (2026-10-14): Oracle help section.
// - v1.0.0 (2026-10-06): Help reworked for the sweep harness.
