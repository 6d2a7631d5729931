// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides formatting helpers shared by the result writers and the
// progress logs: space-joined token lists, second-resolution durations and
// overhead ratios.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

use std::fmt::Display;
use std::time::Duration;

/// Utility functions for formatting sweep output
pub struct FormatUtils;

impl FormatUtils {
    /// Join items with single spaces
    pub fn join_tokens<T: Display>(items: &[T]) -> String {
        items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Seconds with two decimals, the resolution of the timing wrapper
    pub fn format_seconds(duration: Duration) -> String {
        format!("{:.2}", duration.as_secs_f64())
    }

    /// Seconds with three decimals for progress logs
    pub fn format_elapsed(duration: Duration) -> String {
        format!("{:.3} sec", duration.as_secs_f64())
    }

    /// Ratio with enough precision for plotting
    pub fn format_ratio(ratio: f64) -> String {
        format!("{:.6}", ratio)
    }
}


// Changelog:
// - v1.1.1 (2026-10-16): Removed the unused millisecond formatter.
// - v1.1.0 (2026-10-12): Added ratio formatting for overhead files.
// - v1.0.0 (2026-10-05): Sweep formatting helpers.
//   - join_tokens replaces the ad hoc list printing of the sweep scripts.
