// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines core data structures for the sweep harness, located in the
// core subdirectory. It includes the command-line arguments, their validation
// and the sampling type selected by the configuration file.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: clap, serde

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::benchmark::aggregator::ReductionPolicy;

/// Interrupt delivery used by the profiling module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingType {
    Irq,
    Nmi,
}

impl SamplingType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SamplingType::Irq => "irq",
            SamplingType::Nmi => "nmi",
        }
    }

    /// Script that loads the module flavour for this type
    pub const fn load_script(&self) -> &'static str {
        match self {
            SamplingType::Irq => "irq_load.sh",
            SamplingType::Nmi => "nmi_load.sh",
        }
    }
}

impl FromStr for SamplingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irq" => Ok(SamplingType::Irq),
            "nmi" => Ok(SamplingType::Nmi),
            other => Err(format!("unknown sampling type '{}'", other)),
        }
    }
}

impl fmt::Display for SamplingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command-line arguments for the sweep harness
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ime-sweep",
    author = "IME Sweep Team",
    version = "1.1.0",
    about = "Sampling-overhead sweep harness for the IME/HOP memory profiler",
    long_about = "IME Sweep drives the profiler control tool and a workload across every\n\
                  (benchmark x frequency x thread count x run) combination of a sweep file,\n\
                  then writes per-cell timing and sample-count results.\n\n\
                  SWEEP: Requires a sweep file (-f) written in the #TYPE/#RUNS/#BNCH directive language\n\
                  ORACLE: Collects per-injection-level sample series, level 0 is the baseline\n\
                  OVERHEAD: Divides every level's sample counts by the baseline counts\n\n\
                  Examples:\n\
                    Sweep: ime-sweep -f sweep.conf --policy median\n\
                    Clear old results: ime-sweep --clear\n\
                    Oracle collection: ime-sweep --oracle --workload './hot_page 1 10' --injections 0,1,2\n\
                    Overhead ratios: ime-sweep --overhead --injections 0,1,2\n\n\
                  For the sweep file format, use: ime-sweep --help-config"
)]
pub struct Args {
    /// Remove every previous log/partial/result directory (and the oracle tree) then exit
    #[arg(short = 'c', long = "clear", default_value = "false", help = "Wipe prior output directories and exit")]
    pub clear: bool,

    /// Sweep file to load and execute
    #[arg(short = 'f', long = "file", value_name = "PATH", help = "Sweep configuration file to execute")]
    pub file: Option<PathBuf>,

    /// Print the sweep file reference and exit
    #[arg(long, default_value = "false", help = "Describe the sweep file directives")]
    pub help_config: bool,

    /// Path of the profiler control tool
    #[arg(long, default_value = "../../main/profiler", value_name = "PATH", help = "Profiler control tool")]
    pub profiler: String,

    /// Directory exposing one entry per sampling device
    #[arg(long, default_value = "/dev/hop", value_name = "DIR", help = "Sampling device directory")]
    pub device_dir: PathBuf,

    /// Entry of the device directory that is the control device, not a sampler
    #[arg(long, default_value = "ctl", value_name = "NAME", help = "Control entry excluded from device iteration")]
    pub control_entry: String,

    /// Base directory for log/, partial/ and result/
    #[arg(long, default_value = ".", value_name = "DIR", help = "Output base directory")]
    pub output_dir: PathBuf,

    /// How repeated runs of one cell are reduced to the reported row
    #[arg(long, default_value = "median", value_name = "POLICY", help = "Run reduction policy [first, mean, median]")]
    pub policy: ReductionPolicy,

    /// Upper bound for every external call, in seconds
    #[arg(long, default_value = "3600", value_name = "SECONDS", help = "Timeout for each external call")]
    pub timeout: u64,

    /// Timing wrapper prepended to each workload invocation
    #[arg(long, default_value = "/usr/bin/time -f '%e, %U, %S'", value_name = "CMD", help = "Timing wrapper command")]
    pub time_cmd: String,

    /// Flag passed to the workload before the thread count
    #[arg(long, default_value = "-n", value_name = "FLAG", help = "Workload thread-count flag")]
    pub thread_flag: String,

    /// Directory holding xclean.sh, irq_load.sh and nmi_load.sh
    #[arg(long, value_name = "DIR", help = "Reload the profiling module from this directory before sweeping")]
    pub load_module: Option<PathBuf>,

    /// Run the per-injection-level collection pass
    #[arg(long, default_value = "false", help = "Collect oracle/injection sample series")]
    pub oracle: bool,

    /// Run the overhead normalization pass
    #[arg(long, default_value = "false", help = "Compute overhead ratios against the level 0 baseline")]
    pub overhead: bool,

    /// Workload command used by the collection pass
    #[arg(long, default_value = "./hot_page 1 10", value_name = "CMD", help = "Oracle workload command")]
    pub workload: String,

    /// Frequencies swept by the collection pass
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0x0,0x1,0x4,0x10,0x100,0x1000,0x10000",
        value_name = "LIST",
        help = "Oracle sampling frequencies (comma separated)"
    )]
    pub frequencies: Vec<String>,

    /// Injection levels, level 0 is the baseline
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,1,2,5,10,25,50,100",
        value_name = "LIST",
        help = "Injection counts (comma separated)"
    )]
    pub injections: Vec<u32>,

    /// Workload source template carrying the #INJECT marker
    #[arg(long, value_name = "PATH", help = "Injection template (e.g. main.c.origin)")]
    pub template: Option<PathBuf>,

    /// File the rendered template is written to
    #[arg(long, value_name = "PATH", help = "Rendered template destination (e.g. main.c)")]
    pub inject_target: Option<PathBuf>,

    /// Command rebuilding the workload after rendering
    #[arg(long, value_name = "CMD", help = "Build command run after each render")]
    pub build_cmd: Option<String>,

    /// Address-tag prefix kept by the sample filter
    #[arg(long, default_value = "0x4", value_name = "PREFIX", help = "Sample address-tag prefix to keep")]
    pub sample_prefix: String,

    /// Root of the oracle tree (info/, data/, plots/)
    #[arg(long, default_value = "results", value_name = "DIR", help = "Oracle results directory")]
    pub results_dir: PathBuf,

    /// log4rs YAML configuration
    #[arg(long, value_name = "PATH", help = "log4rs configuration file")]
    pub log_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value = "false", help = "Verbose (debug) logging")]
    pub verbose: bool,
}

impl Args {
    /// Validate arguments and return helpful errors
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Timeout must be greater than 0 seconds".to_string());
        }

        if self.profiler.trim().is_empty() {
            return Err("Profiler path cannot be empty. Use --profiler PATH".to_string());
        }

        if self.oracle || self.overhead {
            if self.frequencies.iter().all(|f| f.trim().is_empty()) {
                return Err("At least one frequency is required. Use --frequencies 0x1,0x10".to_string());
            }
            if self.injections.is_empty() {
                return Err("At least one injection level is required. Use --injections 0,1,2".to_string());
            }
            if !self.injections.contains(&0) {
                return Err("Injection level 0 (the baseline) must be part of --injections".to_string());
            }
        }

        if self.template.is_some() != self.inject_target.is_some() {
            return Err("--template and --inject-target must be given together".to_string());
        }

        if self.oracle && self.workload.trim().is_empty() {
            return Err("Oracle workload cannot be empty. Use --workload CMD".to_string());
        }

        Ok(())
    }

    /// Per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Frequencies with blank entries removed
    pub fn oracle_frequencies(&self) -> Vec<String> {
        self.frequencies
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut full = vec!["ime-sweep"];
        full.extend_from_slice(args);
        Args::parse_from(full)
    }

    #[test]
    fn test_sampling_type_round_trip() {
        assert_eq!("irq".parse::<SamplingType>(), Ok(SamplingType::Irq));
        assert_eq!("nmi".parse::<SamplingType>(), Ok(SamplingType::Nmi));
        assert!("IRQ".parse::<SamplingType>().is_err());
        assert_eq!(SamplingType::Nmi.load_script(), "nmi_load.sh");
    }

    #[test]
    fn test_defaults_validate() {
        let args = parse(&["-f", "sweep.conf"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.policy, ReductionPolicy::Median);
        assert_eq!(args.injections, vec![0, 1, 2, 5, 10, 25, 50, 100]);
        assert_eq!(args.oracle_frequencies().len(), 7);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = parse(&["--timeout", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_oracle_requires_baseline_level() {
        let args = parse(&["--overhead", "--injections", "1,2"]);
        assert!(args.validate().unwrap_err().contains("level 0"));
    }

    #[test]
    fn test_template_requires_target() {
        let args = parse(&["--oracle", "--template", "main.c.origin"]);
        assert!(args.validate().is_err());
    }
}

// Changelog:
// - v1.1.0 (2026-10-12): Added oracle/overhead arguments.
//   - Added --oracle, --overhead, --workload, --frequencies, --injections,
//     --template, --inject-target, --build-cmd, --sample-prefix, --results-dir.
//   - Validation requires injection level 0 whenever an oracle pass runs.
// - v1.0.0 (2026-10-05): Initial sweep arguments.
//   - Mirrors the -c/--clear and -f/--file interface of the sweep scripts.
//   - Added --policy, --timeout and --load-module.
