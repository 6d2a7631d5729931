// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/help/benchmarks.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file documents the sweep configuration language and the layout of
// the files a sweep writes.
//
// Tree Location:
// - src/help/benchmarks.rs (configuration language help)
// - Depends on: config::plan

use crate::config::plan::{STD_FREQ, STD_THDS};

/// A complete configuration file
pub const SAMPLE_CONFIG: &str = "\
#TYPE irq
#RUNS 2

#BNCH ./workload --pages 512
#FREQ 0x0 0x100
#THDS 1 2

#BNCH ./workload --pages 4096
";

/// Print the directive reference
pub fn print_config_help() {
    println!("CONFIGURATION LANGUAGE:");
    println!("=======================");
    println!();
    println!("One directive per line, tokens separated by whitespace. Other lines are ignored.");
    println!();
    println!("  #TYPE <irq|nmi>            Sampling type, exactly once");
    println!("  #RUNS <n>                  Repeated runs per cell (n >= 1), exactly once");
    println!("  #BNCH <command...>         Starts a benchmark; closes the previous one");
    println!("  #FREQ <freq...>            Frequencies of the current benchmark");
    println!("  #THDS <count...>           Thread counts of the current benchmark");
    println!();
    println!("DEFAULTS (when a benchmark has no #FREQ or #THDS):");
    println!("  frequencies                {}", STD_FREQ.join(" "));
    println!("  thread counts              {}", STD_THDS.join(" "));
    println!();
    println!("A frequency of 0 (or 0x0) disables sampling for that column.");
    println!();
    println!("EXAMPLE:");
    for line in SAMPLE_CONFIG.lines() {
        println!("  {}", line);
    }
    println!();
    print_output_layout();
}

/// Print where results end up
pub fn print_output_layout() {
    println!("OUTPUT:");
    println!("  result/BENCH<n>.bch        '## CMD', '#FREQUENCY' headers and one row per thread count:");
    println!("                             <thds> | <wall> <user> <sys> | #THDS<n> <counters> | <cpu counters>");
    println!("  log/BENCH<n>.bch           Transcript of every external call");
    println!("  result/summary.json        Every cell with the reduction policy used");
    println!();
    println!("Existing log/, partial/ and result/ directories are renamed to <name>.<n> first.");
}

// Changelog:
// - v1.1.0 (2026-10-14): Output layout section.
// - v1.0.0 (2026-10-06): Configuration language help.
