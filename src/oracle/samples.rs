// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/samples.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file holds memory-access sample records as dumped by the profiler
// (`<address-tag> ...fields`) and the filter that keeps only workload
// addresses, dropping samples of the tool's own metadata.
//
// Tree Location:
// - src/oracle/samples.rs (sample record filtering)
// - Depends on: std only

use std::fmt;

/// Address prefix of workload pages in the default layout
pub const DEFAULT_SAMPLE_PREFIX: &str = "0x4";

/// One raw sample line
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleRecord(String);

impl SampleRecord {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// Leading address tag, empty for a blank line
    pub fn tag(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or("")
    }

    pub fn line(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, prefix: &str) -> bool {
        !self.tag().is_empty() && self.tag().starts_with(prefix)
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep records whose tag starts with `prefix`, sorted ascending
pub fn filter_samples<I>(records: I, prefix: &str) -> Vec<SampleRecord>
where
    I: IntoIterator<Item = SampleRecord>,
{
    let mut kept: Vec<SampleRecord> = records.into_iter().filter(|r| r.matches(prefix)).collect();
    kept.sort();
    kept
}

/// Raw dump lines to records
pub fn from_lines<I, S>(lines: I) -> impl Iterator<Item = SampleRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    lines.into_iter().map(SampleRecord::new)
}


// Changelog:
// - v1.0.0 (2026-10-12): Sample records and prefix filtering.
