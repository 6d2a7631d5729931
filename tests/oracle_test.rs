// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/oracle_test.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file runs the oracle collection pass against the scripted gateway and
// the overhead pass over the files it produced.
//
// Tree Location:
// - tests/oracle_test.rs (oracle pipeline integration tests)
// - Depends on: ime-sweep, tokio, tempfile

mod common;

#[cfg(test)]
mod tests {
    use super::common::{ScriptedGateway, TOOL, device_dir};
    use ime_sweep::oracle::{OracleConfig, OracleError};
    use ime_sweep::{OracleCollector, OverheadNormalizer, ProfilerControl, ResultsLayout};
    use std::path::Path;
    use tempfile::TempDir;

    fn oracle_config(work: &Path) -> OracleConfig {
        OracleConfig {
            workload: "./hot_page 1 10".to_string(),
            frequencies: vec!["0x0".to_string(), "0x10".to_string()],
            levels: vec![0, 2],
            template: Some((work.join("main.c.origin"), work.join("main.c"))),
            build_cmd: Some("make".to_string()),
            sample_prefix: "0x4".to_string(),
        }
    }

    async fn collect(gateway: &ScriptedGateway, work: &TempDir) -> Result<usize, OracleError> {
        std::fs::write(work.path().join("main.c.origin"), "int main() {\n#INJECT\nreturn 0;\n}\n").unwrap();
        let devices = device_dir(&["0", "1"]);
        let profiler = ProfilerControl::new(gateway, TOOL, devices.path(), "ctl");
        let layout = ResultsLayout::new(work.path().join("results"));
        let collector = OracleCollector::new(oracle_config(work.path()), profiler, layout);
        Ok(collector.collect().await?.len())
    }

    fn read(work: &TempDir, relative: &str) -> String {
        std::fs::read_to_string(work.path().join("results").join(relative)).unwrap()
    }

    #[tokio::test]
    async fn test_collection_writes_series_and_samples() {
        let gateway = ScriptedGateway::new();
        let work = tempfile::tempdir().unwrap();
        assert_eq!(collect(&gateway, &work).await.unwrap(), 2);

        assert_eq!(read(&work, "data/hop0_0x10.dat"), "0x4001 r\n0x4002 r\n0x4003 w\n");
        assert_eq!(read(&work, "info/ime2.dat"), "0x0\t3\t5\n0x10\t3\t5\n");
        assert_eq!(read(&work, "info/oracle_info.dat"), "0\t10\n2\t10\n");
        assert_eq!(read(&work, "data/agg0.dat"), "#\t0x0\t0x10\nSamples\t3\t3\n");

        // last rendered level is 2
        let source = std::fs::read_to_string(work.path().join("main.c")).unwrap();
        assert_eq!(source.matches("xchgq").count(), 4);

        let lines = gateway.lines();
        assert_eq!(lines.iter().filter(|l| l.as_str() == "make").count(), 2);
        assert_eq!(lines.iter().filter(|l| l.as_str() == "./hot_page 1 10").count(), 4);
        // one disable per level for 0x0, one when the pass ends
        assert_eq!(gateway.count_tool(&["-f"]), 3);
        assert_eq!(gateway.count_tool(&["-n", "-s", "0x10"]), 2);
        // one reset per level plus one after every dump
        assert_eq!(gateway.count_tool(&["-c"]), 6);
        assert_eq!(lines.last().map(String::as_str), Some("profiler -f"));
    }

    #[tokio::test]
    async fn test_counters_reset_before_each_level() {
        let gateway = ScriptedGateway::new();
        let work = tempfile::tempdir().unwrap();
        collect(&gateway, &work).await.unwrap();

        // each level: build, reset, then the first frequency
        let lines = gateway.lines();
        let builds: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.as_str() == "make")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(builds.len(), 2);
        for build in builds {
            assert_eq!(
                &lines[build + 1..build + 4],
                &["profiler -c", "profiler -f", "./hot_page 1 10"]
            );
        }
    }

    #[tokio::test]
    async fn test_failed_build_stops_collection() {
        let gateway = ScriptedGateway::failing_when(|inv| inv.to_string() == "make");
        let work = tempfile::tempdir().unwrap();
        let result = collect(&gateway, &work).await;

        assert!(matches!(result, Err(OracleError::CommandFault { status: 1, .. })));
        assert!(gateway.lines().iter().all(|l| l != "./hot_page 1 10"));
    }

    #[tokio::test]
    async fn test_overhead_after_collection() {
        let gateway = ScriptedGateway::new();
        let work = tempfile::tempdir().unwrap();
        collect(&gateway, &work).await.unwrap();

        let layout = ResultsLayout::new(work.path().join("results"));
        let outcome = OverheadNormalizer::new(layout).run(&[0, 2]).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.written.len(), 2);
        assert_eq!(read(&work, "info/ovh0.dat"), "0x10\t1.000000\n");
        assert_eq!(read(&work, "info/ovh2.dat"), "0x10\t1.000000\n");
    }

    #[test]
    fn test_overhead_failures_are_per_level() {
        let work = tempfile::tempdir().unwrap();
        let layout = ResultsLayout::new(work.path());
        layout.prepare().unwrap();
        let info = work.path().join("info");
        std::fs::write(info.join("ime0.dat"), "0x1\t10\t1\n0x4\t20\t1\n0x10\t30\t1\n").unwrap();
        std::fs::write(info.join("ime1.dat"), "0x1\t5\t1\n0x4\t10\t1\n0x10\t15\t1\n").unwrap();
        std::fs::write(info.join("ime2.dat"), "0x4\t5\t1\n0x1\t10\t1\n0x10\t15\t1\n").unwrap();

        let outcome = OverheadNormalizer::new(layout).run(&[1, 2, 3]).unwrap();

        assert_eq!(outcome.written.len(), 1);
        assert_eq!(
            std::fs::read_to_string(info.join("ovh1.dat")).unwrap(),
            "0x1\t0.500000\n0x4\t0.500000\n0x10\t0.500000\n"
        );
        let failed: Vec<u32> = outcome.failures.iter().map(|(level, _)| *level).collect();
        assert_eq!(failed, vec![2, 3]);
        assert!(matches!(outcome.failures[0].1, OracleError::FrequencyMismatch { level: 2, .. }));
        assert!(matches!(outcome.failures[1].1, OracleError::Io { .. }));
    }

    #[test]
    fn test_missing_baseline_fails_pass() {
        let work = tempfile::tempdir().unwrap();
        let layout = ResultsLayout::new(work.path());
        layout.prepare().unwrap();
        assert!(OverheadNormalizer::new(layout).run(&[1]).is_err());
    }
}

// Changelog:
// - v1.0.1 (2026-10-16): Reset before each level and final disable.
// - v1.0.0 (2026-10-14): Oracle pipeline integration tests.
