// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/files.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the file adapter of the oracle pipeline. It knows the layout
// of the results tree and the tab separated formats; the normalizer never
// touches the filesystem.
//
// Layout under the results directory:
// - info/ime<L>.dat        `<freq>\t<count>\t<elapsed_ms>` per frequency
// - info/oracle_info.dat   `<L>\t<elapsed_ms>` per collected level
// - info/ovh<L>.dat        `<freq>\t<ratio>` per sampled frequency
// - data/hop<L>_<freq>.dat filtered and sorted sample lines
// - data/agg<L>.dat        `#` and `Samples` rows, one column per frequency
// - plots/                 left to the plotting scripts
//
// Tree Location:
// - src/oracle/files.rs (results tree reader/writer)
// - Depends on: std only

use crate::oracle::normalizer::{FrequencySeries, OracleError, OverheadPoint, SeriesPoint};
use crate::oracle::samples::SampleRecord;
use crate::utils::format::FormatUtils;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DIR_INFO: &str = "info";
pub const DIR_DATA: &str = "data";
pub const DIR_PLOTS: &str = "plots";
pub const EXT: &str = ".dat";
pub const ORACLE_INFO: &str = "oracle_info";

/// Paths and formats of the oracle results tree
#[derive(Debug, Clone)]
pub struct ResultsLayout {
    root: PathBuf,
}

impl ResultsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Subdirectory names relative to the working directory, for clearing
    pub fn subdirectories(&self) -> Vec<PathBuf> {
        [DIR_INFO, DIR_DATA, DIR_PLOTS]
            .iter()
            .map(|dir| self.root.join(dir))
            .collect()
    }

    /// Create info/, data/ and plots/ if missing
    pub fn prepare(&self) -> Result<(), OracleError> {
        for dir in self.subdirectories() {
            std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }
        Ok(())
    }

    pub fn series_path(&self, level: u32) -> PathBuf {
        self.info(&format!("ime{}", level))
    }

    pub fn overhead_path(&self, level: u32) -> PathBuf {
        self.info(&format!("ovh{}", level))
    }

    pub fn oracle_info_path(&self) -> PathBuf {
        self.info(ORACLE_INFO)
    }

    pub fn samples_path(&self, level: u32, frequency: &str) -> PathBuf {
        self.data(&format!("hop{}_{}", level, frequency))
    }

    pub fn aggregate_path(&self, level: u32) -> PathBuf {
        self.data(&format!("agg{}", level))
    }

    fn info(&self, stem: &str) -> PathBuf {
        self.root.join(DIR_INFO).join(format!("{}{}", stem, EXT))
    }

    fn data(&self, stem: &str) -> PathBuf {
        self.root.join(DIR_DATA).join(format!("{}{}", stem, EXT))
    }

    /// Empty a level's series before it is collected again
    pub fn reset_series(&self, level: u32) -> Result<(), OracleError> {
        write_file(&self.series_path(level), "")
    }

    pub fn reset_oracle_info(&self) -> Result<(), OracleError> {
        write_file(&self.oracle_info_path(), "")
    }

    pub fn append_point(&self, level: u32, point: &SeriesPoint) -> Result<(), OracleError> {
        append_line(
            &self.series_path(level),
            &format!("{}\t{}\t{}", point.frequency, point.count, point.elapsed_ms),
        )
    }

    pub fn append_oracle_info(&self, level: u32, elapsed_ms: u64) -> Result<(), OracleError> {
        append_line(&self.oracle_info_path(), &format!("{}\t{}", level, elapsed_ms))
    }

    pub fn write_samples(&self, level: u32, frequency: &str, samples: &[SampleRecord]) -> Result<(), OracleError> {
        let contents: String = samples.iter().map(|s| format!("{}\n", s)).collect();
        write_file(&self.samples_path(level, frequency), &contents)
    }

    pub fn write_aggregate(&self, series: &FrequencySeries) -> Result<(), OracleError> {
        let mut header = String::from("#");
        let mut samples = String::from("Samples");
        for point in &series.points {
            header.push_str(&format!("\t{}", point.frequency));
            samples.push_str(&format!("\t{}", point.count));
        }
        write_file(&self.aggregate_path(series.level), &format!("{}\n{}\n", header, samples))
    }

    pub fn write_overhead(&self, level: u32, ratios: &[OverheadPoint]) -> Result<PathBuf, OracleError> {
        let path = self.overhead_path(level);
        let contents: String = ratios
            .iter()
            .map(|p| format!("{}\t{}\n", p.frequency, FormatUtils::format_ratio(p.ratio)))
            .collect();
        write_file(&path, &contents)?;
        Ok(path)
    }

    pub fn read_series(&self, level: u32) -> Result<FrequencySeries, OracleError> {
        let path = self.series_path(level);
        let text = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        parse_series(&path, level, &text)
    }
}

/// Parse `<freq>\t<count>\t<elapsed_ms>` lines; blank lines are ignored
pub fn parse_series(path: &Path, level: u32, text: &str) -> Result<FrequencySeries, OracleError> {
    let mut series = FrequencySeries::new(level);
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason: &str| OracleError::MalformedSeries {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: reason.to_string(),
        };
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let [frequency, count, elapsed] = fields.as_slice() else {
            return Err(malformed("expected three tab separated fields"));
        };
        let count = count.parse::<u64>().map_err(|_| malformed("count is not an integer"))?;
        let elapsed = elapsed
            .parse::<u64>()
            .map_err(|_| malformed("elapsed time is not an integer"))?;
        series.push(*frequency, count, elapsed);
    }
    Ok(series)
}

fn io_error(path: &Path, source: std::io::Error) -> OracleError {
    OracleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), OracleError> {
    std::fs::write(path, contents).map_err(|e| io_error(path, e))
}

fn append_line(path: &Path, line: &str) -> Result<(), OracleError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error(path, e))?;
    writeln!(file, "{}", line).map_err(|e| io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_series_written_and_read_back() {
        let temp = tempdir().unwrap();
        let layout = ResultsLayout::new(temp.path().join("results"));
        layout.prepare().unwrap();
        layout.reset_series(3).unwrap();
        for (frequency, count) in [("0x0", 0), ("0x10", 42)] {
            let point = SeriesPoint {
                frequency: frequency.into(),
                count,
                elapsed_ms: 7,
            };
            layout.append_point(3, &point).unwrap();
        }

        let text = std::fs::read_to_string(layout.series_path(3)).unwrap();
        assert_eq!(text, "0x0\t0\t7\n0x10\t42\t7\n");
        let series = layout.read_series(3).unwrap();
        assert_eq!(series.frequencies(), vec!["0x0", "0x10"]);
        assert_eq!(series.total_elapsed_ms(), 14);
    }

    #[test]
    fn test_aggregate_rows() {
        let temp = tempdir().unwrap();
        let layout = ResultsLayout::new(temp.path());
        layout.prepare().unwrap();
        let mut series = FrequencySeries::new(1);
        series.push("0x1", 10, 0);
        series.push("0x4", 3, 0);
        layout.write_aggregate(&series).unwrap();
        let text = std::fs::read_to_string(temp.path().join("data/agg1.dat")).unwrap();
        assert_eq!(text, "#\t0x1\t0x4\nSamples\t10\t3\n");
    }

    #[test]
    fn test_malformed_series_line() {
        let err = parse_series(Path::new("ime1.dat"), 1, "0x1\t10\t5\n0x4\tmany\t5\n").unwrap_err();
        assert!(matches!(err, OracleError::MalformedSeries { line: 2, .. }));
    }

    #[test]
    fn test_paths() {
        let layout = ResultsLayout::new("results");
        assert_eq!(layout.samples_path(2, "0x100"), PathBuf::from("results/data/hop2_0x100.dat"));
        assert_eq!(layout.overhead_path(5), PathBuf::from("results/info/ovh5.dat"));
        assert_eq!(layout.oracle_info_path(), PathBuf::from("results/info/oracle_info.dat"));
    }
}

// Changelog:
// - v1.0.1 (2026-10-14): Series lines carry the elapsed time per frequency.
// - v1.0.0 (2026-10-12): Results tree adapter for the oracle pipeline.
