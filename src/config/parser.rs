// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/config/parser.rs
// Version: 1.0.3
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the sweep file parser. A sweep file is line oriented;
// every line starting with one of #TYPE, #RUNS, #BNCH, #FREQ or #THDS is a
// directive, every other line is ignored.
//
// Tree Location:
// - src/config/parser.rs (sweep file parser)
// - Depends on: log, thiserror

use crate::config::plan::{Benchmark, SweepDefaults, SweepPlan};
use crate::core::types::SamplingType;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_TARGET: &str = "ime::sweep::config";

pub const C_TYPE: &str = "#TYPE";
pub const C_RUNS: &str = "#RUNS";
pub const C_BNCH: &str = "#BNCH";
pub const C_FREQ: &str = "#FREQ";
pub const C_THDS: &str = "#THDS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("line {line}: {directive} already set")]
    DuplicateDirective { directive: &'static str, line: usize },

    #[error("line {line}: {directive} without a preceding #BNCH")]
    MissingContext { directive: &'static str, line: usize },

    #[error("{directive} directive is missing")]
    MissingDirective { directive: &'static str },

    #[error("line {line}: malformed {directive}: {reason}")]
    MalformedDirective {
        directive: &'static str,
        line: usize,
        reason: String,
    },

    #[error("line {line}: invalid type '{value}' (expected irq or nmi)")]
    InvalidType { value: String, line: usize },

    #[error("line {line}: invalid runs value {value} (must be at least 1)")]
    InvalidRuns { value: i64, line: usize },

    #[error("Failed to read sweep file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Benchmark still accepting #FREQ/#THDS lines
#[derive(Debug)]
struct OpenBenchmark {
    command: String,
    frequencies: Option<Vec<String>>,
    thread_counts: Option<Vec<String>>,
}

impl OpenBenchmark {
    fn close(self, defaults: &SweepDefaults) -> Benchmark {
        Benchmark {
            command: self.command,
            frequencies: self
                .frequencies
                .unwrap_or_else(|| defaults.frequencies.clone()),
            thread_counts: self
                .thread_counts
                .unwrap_or_else(|| defaults.thread_counts.clone()),
        }
    }
}

/// Sweep file parser
#[derive(Debug, Clone, Default)]
pub struct ConfigParser {
    defaults: SweepDefaults,
}

impl ConfigParser {
    pub fn new() -> Self {
        Self::with_defaults(SweepDefaults::default())
    }

    /// Parser whose benchmarks fall back to `defaults`
    pub fn with_defaults(defaults: SweepDefaults) -> Self {
        Self { defaults }
    }

    pub fn parse_file(&self, path: &Path) -> Result<SweepPlan, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(target: LOG_TARGET, "Parsing sweep file {:?}", path);
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> Result<SweepPlan, ConfigError> {
        let mut sampling: Option<SamplingType> = None;
        let mut runs: Option<u32> = None;
        let mut benchmarks = Vec::new();
        let mut current: Option<OpenBenchmark> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let mut tokens = raw.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };
            let rest: Vec<&str> = tokens.collect();

            match head {
                C_TYPE => {
                    if sampling.is_some() {
                        return Err(ConfigError::DuplicateDirective { directive: C_TYPE, line });
                    }
                    let value = single_argument(C_TYPE, &rest, line)?;
                    let parsed = value
                        .parse::<SamplingType>()
                        .map_err(|_| ConfigError::InvalidType {
                            value: value.to_string(),
                            line,
                        })?;
                    sampling = Some(parsed);
                }
                C_RUNS => {
                    if runs.is_some() {
                        return Err(ConfigError::DuplicateDirective { directive: C_RUNS, line });
                    }
                    let value = single_argument(C_RUNS, &rest, line)?;
                    let parsed = value.parse::<i64>().map_err(|e| ConfigError::MalformedDirective {
                        directive: C_RUNS,
                        line,
                        reason: format!("'{}' is not an integer ({})", value, e),
                    })?;
                    if parsed < 1 || parsed > u32::MAX as i64 {
                        return Err(ConfigError::InvalidRuns { value: parsed, line });
                    }
                    runs = Some(parsed as u32);
                }
                C_BNCH => {
                    if rest.is_empty() {
                        return Err(ConfigError::MalformedDirective {
                            directive: C_BNCH,
                            line,
                            reason: "missing command".to_string(),
                        });
                    }
                    if let Some(open) = current.take() {
                        benchmarks.push(open.close(&self.defaults));
                    }
                    current = Some(OpenBenchmark {
                        command: rest.join(" "),
                        frequencies: None,
                        thread_counts: None,
                    });
                }
                C_FREQ | C_THDS => {
                    let directive = if head == C_FREQ { C_FREQ } else { C_THDS };
                    let Some(open) = current.as_mut() else {
                        return Err(ConfigError::MissingContext { directive, line });
                    };
                    if rest.is_empty() {
                        return Err(ConfigError::MalformedDirective {
                            directive,
                            line,
                            reason: "no values given".to_string(),
                        });
                    }
                    let values: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
                    let slot = if directive == C_FREQ {
                        &mut open.frequencies
                    } else {
                        &mut open.thread_counts
                    };
                    if slot.is_some() {
                        warn!(target: LOG_TARGET,
                            "line {}: {} repeated for '{}', last one wins",
                            line, directive, open.command
                        );
                    }
                    *slot = Some(values);
                }
                _ => continue,
            }
        }

        if let Some(open) = current.take() {
            benchmarks.push(open.close(&self.defaults));
        }

        let sampling = sampling.ok_or(ConfigError::MissingDirective { directive: C_TYPE })?;
        let run_count = runs.ok_or(ConfigError::MissingDirective { directive: C_RUNS })?;

        debug!(target: LOG_TARGET,
            "Parsed plan: type {}, {} runs, {} benchmarks",
            sampling, run_count, benchmarks.len()
        );

        Ok(SweepPlan {
            sampling,
            run_count,
            defaults: self.defaults.clone(),
            benchmarks,
        })
    }
}

fn single_argument<'a>(
    directive: &'static str,
    rest: &[&'a str],
    line: usize,
) -> Result<&'a str, ConfigError> {
    match rest {
        [value] => Ok(*value),
        [] => Err(ConfigError::MalformedDirective {
            directive,
            line,
            reason: "missing value".to_string(),
        }),
        _ => Err(ConfigError::MalformedDirective {
            directive,
            line,
            reason: format!("expected one value, got {}", rest.len()),
        }),
    }
}


// Changelog:
// - v1.0.3 (2026-10-16): new() builds on with_defaults.
// - v1.0.2 (2026-10-09): Benchmarks resolve their own default lists.
//   - A #FREQ/#THDS override no longer replaces the sweep-wide default.
// - v1.0.1 (2026-10-07): Typed errors with line numbers.
//   - #FREQ/#THDS before any #BNCH is an error instead of a crash.
// - v1.0.0 (2026-10-05): Initial sweep file parser.
