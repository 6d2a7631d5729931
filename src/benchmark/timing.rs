// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/timing.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file parses the wall/user/sys triple printed by the timing wrapper
// (`/usr/bin/time -f '%e, %U, %S'`) on the workload's stderr.
//
// Tree Location:
// - src/benchmark/timing.rs (timing triple parsing)
// - Depends on: serde, thiserror

use crate::utils::format::FormatUtils;
use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TimingError {
    #[error("no timing line found in workload diagnostics")]
    Missing,

    #[error("malformed timing line '{line}'")]
    Malformed { line: String },
}

/// Wall, user and system time of one workload run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Timing {
    #[serde(serialize_with = "as_secs")]
    pub wall: Duration,
    #[serde(serialize_with = "as_secs")]
    pub user: Duration,
    #[serde(serialize_with = "as_secs")]
    pub sys: Duration,
}

impl Timing {
    pub fn new(wall: Duration, user: Duration, sys: Duration) -> Self {
        Self { wall, user, sys }
    }

    /// Parse one `wall, user, sys` line
    pub fn parse(line: &str) -> Result<Self, TimingError> {
        let malformed = || TimingError::Malformed {
            line: line.to_string(),
        };
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let [wall, user, sys] = fields.as_slice() else {
            return Err(malformed());
        };
        let seconds = |field: &str| -> Result<Duration, TimingError> {
            let value: f64 = field.parse().map_err(|_| malformed())?;
            if !value.is_finite() || value < 0.0 {
                return Err(malformed());
            }
            Ok(Duration::from_secs_f64(value))
        };
        Ok(Self {
            wall: seconds(wall)?,
            user: seconds(user)?,
            sys: seconds(sys)?,
        })
    }

    /// The wrapper writes its line last, after anything the workload itself
    /// printed on stderr, so scan from the end.
    pub fn from_diagnostics(stderr: &[String]) -> Result<Self, TimingError> {
        let mut last_error = TimingError::Missing;
        for line in stderr.iter().rev().filter(|l| !l.trim().is_empty()) {
            match Self::parse(line) {
                Ok(timing) => return Ok(timing),
                Err(e) => {
                    if last_error == TimingError::Missing {
                        last_error = e;
                    }
                }
            }
        }
        Err(last_error)
    }

    /// Space separated seconds, as written in result rows
    pub fn tokens(&self) -> String {
        [self.wall, self.user, self.sys]
            .iter()
            .map(|d| FormatUtils::format_seconds(*d))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}


// Changelog:
// - v1.0.1 (2026-10-08): Workload stderr noise no longer hides the timing line.
// - v1.0.0 (2026-10-05): Initial timing triple parser.
