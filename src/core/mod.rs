// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the core module, which holds the command-line surface
// and the small shared types used across the harness.
//
// Tree Location:
// - src/core/mod.rs (core module entry point)
// - Submodules: types

pub mod types;

pub use types::{Args, SamplingType};

// Changelog:
// - v1.1.0 (2026-10-12): Re-export SamplingType.
// - v1.0.0 (2026-10-05): Reduced to the harness types module.
