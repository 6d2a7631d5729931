// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/config_test.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains property tests of the sweep file parser and a check of
// file loading from disk.
//
// Tree Location:
// - tests/config_test.rs (configuration parser integration tests)
// - Depends on: ime-sweep, proptest, tempfile

#[cfg(test)]
mod tests {
    use ime_sweep::config::{ConfigError, ConfigParser};
    use ime_sweep::SamplingType;
    use proptest::prelude::*;

    /// Benchmark blocks with optional #FREQ/#THDS lines and noise
    fn benchmark_block() -> impl Strategy<Value = String> {
        (
            "[a-z]{1,8}( -[a-z] [0-9]{1,3})?",
            proptest::option::of(proptest::collection::vec("0x[0-9a-f]{1,4}", 1..5)),
            proptest::option::of(proptest::collection::vec("[1-9][0-9]?", 1..5)),
            any::<bool>(),
        )
            .prop_map(|(cmd, freqs, thds, noise)| {
                let mut block = format!("#BNCH ./{}\n", cmd);
                if let Some(freqs) = freqs {
                    block.push_str(&format!("#FREQ {}\n", freqs.join(" ")));
                }
                if noise {
                    block.push_str("# just a comment\n\n");
                }
                if let Some(thds) = thds {
                    block.push_str(&format!("#THDS {}\n", thds.join(" ")));
                }
                block
            })
    }

    proptest! {
        #[test]
        fn prop_benchmark_count_matches_directives(
            blocks in proptest::collection::vec(benchmark_block(), 1..8),
            header_first in any::<bool>(),
            runs in 1u32..50,
        ) {
            let header = format!("#TYPE nmi\n#RUNS {}\n", runs);
            let body = blocks.concat();
            // #TYPE/#RUNS may follow the benchmarks
            let text = if header_first { format!("{}{}", header, body) } else { format!("{}{}", body, header) };

            let plan = ConfigParser::new().parse_str(&text).unwrap();
            prop_assert_eq!(plan.benchmarks.len(), blocks.len());
            prop_assert_eq!(plan.run_count, runs);
            prop_assert_eq!(plan.sampling, SamplingType::Nmi);
            prop_assert!(plan.benchmarks.iter().all(|b| !b.frequencies.is_empty() && !b.thread_counts.is_empty()));
        }

        #[test]
        fn prop_duplicate_type_or_runs_always_fails(
            blocks in proptest::collection::vec(benchmark_block(), 0..5),
            position in 0usize..6,
            duplicate_runs in any::<bool>(),
        ) {
            let mut lines: Vec<String> = vec!["#TYPE irq".into(), "#RUNS 3".into()];
            for block in &blocks {
                lines.extend(block.lines().map(String::from));
            }
            let extra = if duplicate_runs { "#RUNS 4" } else { "#TYPE nmi" };
            let at = position.min(lines.len());
            lines.insert(at, extra.to_string());

            let result = ConfigParser::new().parse_str(&lines.join("\n"));
            let is_duplicate = matches!(result, Err(ConfigError::DuplicateDirective { .. }));
            prop_assert!(is_duplicate);
        }
    }

    #[test]
    fn test_parse_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.cfg");
        std::fs::write(&path, "#TYPE irq\n#RUNS 1\n#BNCH ./w  --big\n#THDS 8\n").unwrap();

        let plan = ConfigParser::new().parse_file(&path).unwrap();
        assert_eq!(plan.benchmarks[0].command, "./w --big");
        assert_eq!(plan.benchmarks[0].thread_counts, vec!["8"]);
        assert_eq!(plan.benchmarks[0].frequencies.len(), 7);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigParser::new().parse_file(std::path::Path::new("/nonexistent/sweep.cfg"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_values() {
        let parser = ConfigParser::new();
        assert!(matches!(parser.parse_str("#TYPE pmi\n#RUNS 1\n"), Err(ConfigError::InvalidType { .. })));
        assert!(matches!(parser.parse_str("#TYPE irq\n#RUNS 0\n"), Err(ConfigError::InvalidRuns { value: 0, .. })));
        assert!(matches!(
            parser.parse_str("#TYPE irq\n#RUNS 1\n#THDS 1\n"),
            Err(ConfigError::MissingContext { .. })
        ));
    }
}

// Changelog:
// - v1.0.0 (2026-10-09): Parser property tests.
