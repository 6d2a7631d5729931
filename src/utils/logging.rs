// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/logging.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file sets up log4rs for the binary. A YAML configuration is used when
// one is supplied, otherwise a console appender is built in code.
//
// Tree Location:
// - src/utils/logging.rs (logging setup)
// - Depends on: log, log4rs, anyhow

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

pub fn init_logging(config_file: Option<&Path>, verbose: bool) -> Result<()> {
    if let Some(path) = config_file {
        return log4rs::init_file(path, Default::default())
            .with_context(|| format!("Could not load log4rs config {:?}", path));
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .context("Invalid console logging config")?;
    log4rs::init_config(config).context("Logger already initialised")?;
    Ok(())
}

// Changelog:
// - v1.0.0 (2026-10-05): Console logging via log4rs with optional YAML config.
