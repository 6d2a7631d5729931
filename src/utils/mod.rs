// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for utility functions of the sweep
// harness. It declares submodules for shared utility logic used across the
// project.
//
// Tree Location:
// - src/utils/mod.rs (utils module entry point)
// - Submodules: dirs, format, logging

pub mod dirs;
pub mod format;
pub mod logging;

pub use dirs::{DirectoryError, DirectoryManager};
pub use format::FormatUtils;

// Changelog:
// - v1.1.0 (2026-10-08): Added dirs and logging submodules.
// - v1.0.0 (2026-10-05): Format helpers for sweep output.
