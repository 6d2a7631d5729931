// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/dirs.rs
// Version: 1.0.2
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements output directory rotation. An existing output
// directory is renamed to `<name>.<version>` before a fresh one is created,
// so a rerun never overwrites an earlier run's data. Removal only happens
// through an explicit clear.
//
// Tree Location:
// - src/utils/dirs.rs (output directory management)
// - Depends on: log, thiserror

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_TARGET: &str = "ime::sweep::dirs";

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Base path {path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Invalid directory name '{name}'")]
    InvalidName { name: String },

    #[error("IO operation failed on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rotating output directories below a base path
#[derive(Debug, Clone)]
pub struct DirectoryManager {
    base: PathBuf,
}

impl DirectoryManager {
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, DirectoryError> {
        let base = base.into();
        if !base.is_dir() {
            return Err(DirectoryError::NotADirectory { path: base });
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    /// Makes `name` a fresh empty directory, moving any existing one to a
    /// versioned name. Returns the versioned path if a rotation happened.
    pub fn ensure_fresh(&self, name: &str) -> Result<Option<PathBuf>, DirectoryError> {
        validate_name(name)?;
        let target = self.path_of(name);
        let mut rotated = None;

        if target.exists() {
            let mut version = self.sibling_entries(|entry| entry.contains(name))?.len();
            let mut versioned = self.path_of(&format!("{}.{}", name, version));
            while versioned.exists() {
                version += 1;
                versioned = self.path_of(&format!("{}.{}", name, version));
            }
            fs::rename(&target, &versioned).map_err(|e| DirectoryError::IoError {
                path: target.clone(),
                source: e,
            })?;
            info!(target: LOG_TARGET, "📦 Rotated {:?} -> {:?}", target, versioned);
            rotated = Some(versioned);
        }

        fs::create_dir(&target).map_err(|e| DirectoryError::IoError {
            path: target.clone(),
            source: e,
        })?;
        debug!(target: LOG_TARGET, "Created fresh directory {:?}", target);
        Ok(rotated)
    }

    pub fn ensure_fresh_all(&self, names: &[&str]) -> Result<(), DirectoryError> {
        for name in names {
            self.ensure_fresh(name)?;
        }
        Ok(())
    }

    /// Recursively removes the directories `<name>` and `<name>.<n>` for each
    /// of `names`. Files and other directories are left alone. Returns the
    /// number of removed directories.
    pub fn clear(&self, names: &[&str]) -> Result<usize, DirectoryError> {
        let mut removed = 0;
        for name in names {
            validate_name(name)?;
            for entry in self.sibling_entries(|entry| is_version_of(entry, name))? {
                let path = self.path_of(&entry);
                if !path.is_dir() {
                    continue;
                }
                fs::remove_dir_all(&path).map_err(|e| DirectoryError::IoError {
                    path: path.clone(),
                    source: e,
                })?;
                debug!(target: LOG_TARGET, "Removed {:?}", path);
                removed += 1;
            }
        }
        info!(target: LOG_TARGET, "🧹 Cleared {} entries in {:?}", removed, self.base);
        Ok(removed)
    }

    fn sibling_entries<F>(&self, keep: F) -> Result<Vec<String>, DirectoryError>
    where
        F: Fn(&str) -> bool,
    {
        let reader = fs::read_dir(&self.base).map_err(|e| DirectoryError::IoError {
            path: self.base.clone(),
            source: e,
        })?;
        let mut names = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| DirectoryError::IoError {
                path: self.base.clone(),
                source: e,
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if keep(&file_name) {
                names.push(file_name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// `entry` is `name` itself or one of its rotated `name.<n>` versions
fn is_version_of(entry: &str, name: &str) -> bool {
    match entry.strip_prefix(name) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|version| !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

fn validate_name(name: &str) -> Result<(), DirectoryError> {
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(DirectoryError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_fresh_creates_directory() {
        let temp = tempdir().unwrap();
        let manager = DirectoryManager::new(temp.path()).unwrap();
        assert_eq!(manager.ensure_fresh("result").unwrap(), None);
        assert!(temp.path().join("result").is_dir());
    }

    #[test]
    fn test_ensure_fresh_rotates_existing() {
        let temp = tempdir().unwrap();
        let manager = DirectoryManager::new(temp.path()).unwrap();
        manager.ensure_fresh("log").unwrap();
        fs::write(temp.path().join("log").join("BENCH0.bch"), "first").unwrap();

        let rotated = manager.ensure_fresh("log").unwrap().unwrap();
        assert_eq!(rotated, temp.path().join("log.1"));
        assert_eq!(fs::read_to_string(rotated.join("BENCH0.bch")).unwrap(), "first");
        assert_eq!(fs::read_dir(temp.path().join("log")).unwrap().count(), 0);
    }

    #[test]
    fn test_rejects_nested_names() {
        let temp = tempdir().unwrap();
        let manager = DirectoryManager::new(temp.path()).unwrap();
        assert!(matches!(
            manager.ensure_fresh("a/b"),
            Err(DirectoryError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_version_names() {
        assert!(is_version_of("result", "result"));
        assert!(is_version_of("result.12", "result"));
        assert!(!is_version_of("results", "result"));
        assert!(!is_version_of("result.", "result"));
        assert!(!is_version_of("result.bak", "result"));
        assert!(!is_version_of("log4rs.yml", "log"));
    }

    #[test]
    fn test_missing_base_is_error() {
        assert!(matches!(
            DirectoryManager::new("/non/existent/base"),
            Err(DirectoryError::NotADirectory { .. })
        ));
    }
}

// Changelog:
// - v1.0.2 (2026-10-16): Clear removes only `<name>` and `<name>.<n>`
//   directories; files and `results/` next to `result/` survive.
// - v1.0.1 (2026-10-08): Versioned names never collide.
//   - If `<name>.<n>` already exists the version is bumped until free.
// - v1.0.0 (2026-10-05): Initial directory rotation and clear.
