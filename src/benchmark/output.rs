// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/output.rs
// Version: 1.0.2
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file owns the two append-mode files of one benchmark: the result file
// (rows per cell) and the log file (transcript of every external call). The
// handles live for one benchmark and are released when the value is dropped,
// including on early returns.
//
// Tree Location:
// - src/benchmark/output.rs (per-benchmark output files)
// - Depends on: thiserror

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of result and log files
pub const EXT: &str = ".bch";

#[derive(Error, Debug)]
#[error("Cannot write benchmark output {path:?}")]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Result and log handles of one benchmark
#[derive(Debug)]
pub struct BenchmarkOutput {
    result: File,
    log: File,
    result_path: PathBuf,
    log_path: PathBuf,
}

impl BenchmarkOutput {
    /// `BENCH<index>.bch` file name
    pub fn file_name(index: usize) -> String {
        format!("BENCH{}{}", index, EXT)
    }

    /// Open (creating if needed) both files in append mode
    pub fn open(result_dir: &Path, log_dir: &Path, index: usize) -> Result<Self, OutputError> {
        let result_path = result_dir.join(Self::file_name(index));
        let log_path = log_dir.join(Self::file_name(index));
        Ok(Self {
            result: open_append(&result_path)?,
            log: open_append(&log_path)?,
            result_path,
            log_path,
        })
    }

    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append raw text to the result file
    pub fn result(&mut self, text: &str) -> Result<(), OutputError> {
        self.result
            .write_all(text.as_bytes())
            .map_err(|e| OutputError {
                path: self.result_path.clone(),
                source: e,
            })
    }

    /// Append raw text to the log file
    pub fn log(&mut self, text: &str) -> Result<(), OutputError> {
        self.log.write_all(text.as_bytes()).map_err(|e| OutputError {
            path: self.log_path.clone(),
            source: e,
        })
    }

    /// Sync both files to disk
    pub fn finish(self) -> Result<(), OutputError> {
        sync(&self.result, &self.result_path)?;
        sync(&self.log, &self.log_path)
    }
}

fn sync(file: &File, path: &Path) -> Result<(), OutputError> {
    file.sync_all().map_err(|e| OutputError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn open_append(path: &Path) -> Result<File, OutputError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OutputError {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_appends_across_reopen() {
        let temp = tempdir().unwrap();
        let result_dir = temp.path().join("result");
        let log_dir = temp.path().join("log");
        std::fs::create_dir(&result_dir).unwrap();
        std::fs::create_dir(&log_dir).unwrap();
        {
            let mut out = BenchmarkOutput::open(&result_dir, &log_dir, 0).unwrap();
            out.result("## CMD ./a\n").unwrap();
            out.log("Running: profiler -c\n").unwrap();
        }
        let mut out = BenchmarkOutput::open(&result_dir, &log_dir, 0).unwrap();
        out.result("#FREQUENCY 0\n").unwrap();
        out.finish().unwrap();

        let text = std::fs::read_to_string(result_dir.join("BENCH0.bch")).unwrap();
        assert_eq!(text, "## CMD ./a\n#FREQUENCY 0\n");
        let log = std::fs::read_to_string(log_dir.join("BENCH0.bch")).unwrap();
        assert_eq!(log, "Running: profiler -c\n");
    }

    #[test]
    fn test_finish_writes_both_files() {
        let temp = tempdir().unwrap();
        let result_dir = temp.path().join("result");
        let log_dir = temp.path().join("log");
        std::fs::create_dir(&result_dir).unwrap();
        std::fs::create_dir(&log_dir).unwrap();

        let mut out = BenchmarkOutput::open(&result_dir, &log_dir, 3).unwrap();
        assert_eq!(out.result_path(), result_dir.join("BENCH3.bch"));
        assert_eq!(out.log_path(), log_dir.join("BENCH3.bch"));
        out.result("\n## ELAPSED 1.00\n").unwrap();
        out.log("Done\n").unwrap();
        let (result_path, log_path) = (out.result_path().to_path_buf(), out.log_path().to_path_buf());
        out.finish().unwrap();

        assert_eq!(std::fs::read_to_string(result_path).unwrap(), "\n## ELAPSED 1.00\n");
        assert_eq!(std::fs::read_to_string(log_path).unwrap(), "Done\n");
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing");
        assert!(BenchmarkOutput::open(&missing, temp.path(), 1).is_err());
    }
}

// Changelog:
// - v1.0.2 (2026-10-16): finish syncs the log file like the result file.
// - v1.0.1 (2026-10-09): Writes go straight to the files so an aborted sweep
//   keeps everything written before the abort.
// - v1.0.0 (2026-10-05): Per-benchmark result/log handles.
