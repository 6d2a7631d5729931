// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/oracle/inject.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file renders the workload source for one injection level. Every line
// carrying the `#INJECT` marker is replaced by an inline assembly block with
// `level` register swap pairs; level 0 drops the marker line.
//
// Tree Location:
// - src/oracle/inject.rs (injection template rendering)
// - Depends on: log

use crate::oracle::normalizer::OracleError;
use log::debug;
use std::path::Path;

const LOG_TARGET: &str = "ime::sweep::inject";

pub const INJECT_MARKER: &str = "#INJECT";

/// Source text with the marker lines expanded for `level`
pub fn render(template: &str, level: u32) -> String {
    let mut out = String::with_capacity(template.len() + level as usize * 48);
    for line in template.split_inclusive('\n') {
        if !line.contains(INJECT_MARKER) {
            out.push_str(line);
            continue;
        }
        if level > 0 {
            out.push_str("asm volatile (\n");
            for _ in 0..level {
                out.push_str("\"xchgq %rax, %rbx\\n\"\n");
                out.push_str("\"xchgq %rbx, %rax\\n\"\n");
            }
            out.push_str(");\n");
        }
    }
    out
}

/// Render `template` into `target`, replacing its contents
pub fn render_file(template: &Path, target: &Path, level: u32) -> Result<(), OracleError> {
    let text = std::fs::read_to_string(template).map_err(|e| OracleError::Io {
        path: template.to_path_buf(),
        source: e,
    })?;
    std::fs::write(target, render(&text, level)).map_err(|e| OracleError::Io {
        path: target.to_path_buf(),
        source: e,
    })?;
    debug!(target: LOG_TARGET, "Rendered {:?} into {:?} with {} swap pairs", template, target, level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TEMPLATE: &str = "int main() {\n    #INJECT\n    return 0;\n}\n";

    #[test]
    fn test_level_zero_drops_marker() {
        assert_eq!(render(TEMPLATE, 0), "int main() {\n    return 0;\n}\n");
    }

    #[test]
    fn test_level_two_block() {
        let rendered = render(TEMPLATE, 2);
        assert!(rendered.starts_with("int main() {\nasm volatile (\n"));
        assert_eq!(rendered.matches("xchgq %rax, %rbx").count(), 2);
        assert_eq!(rendered.matches("xchgq %rbx, %rax").count(), 2);
        assert!(rendered.ends_with(");\n    return 0;\n}\n"));
        assert!(!rendered.contains(INJECT_MARKER));
    }

    #[test]
    fn test_render_file() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("main.c.origin");
        let target = temp.path().join("main.c");
        std::fs::write(&template, TEMPLATE).unwrap();
        render_file(&template, &target, 1).unwrap();
        let text = std::fs::read_to_string(&target).unwrap();
        assert_eq!(text.matches("asm volatile").count(), 1);
        assert!(render_file(&temp.path().join("missing"), &target, 1).is_err());
    }
}

// Changelog:
// - v1.0.0 (2026-10-12): Injection template rendering.
