// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/gateway/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the gateway module through which every external command
// is executed.
//
// Tree Location:
// - src/gateway/mod.rs (gateway module entry point)
// - Submodules: command

pub mod command;

pub use command::{CommandOutput, GatewayError, Invocation, ProcessGateway, ToolGateway};

// Changelog:
// - v1.0.0 (2026-10-05): Initial gateway module.
