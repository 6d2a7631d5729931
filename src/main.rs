// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/main.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Command-line entry point. Exit status is 0 on success, after --clear and
// for an empty sweep file, and 1 on any error.
//
// Tree Location:
// - src/main.rs (binary entry point)
// - Depends on: anyhow, clap, log, tokio

use anyhow::{Context, bail};
use clap::Parser;
use ime_sweep::{
    benchmark::runner::{DIR_LOG, DIR_PARTIAL, DIR_RESULT, reload_module},
    core::types::Args,
    display_full_help,
    oracle::{
        OracleConfig,
        files::{DIR_DATA, DIR_INFO, DIR_PLOTS},
    },
    utils::logging::init_logging,
    ConfigParser, DirectoryManager, OracleCollector, OverheadNormalizer, ProcessGateway, ProfilerControl,
    ResultsLayout, SweepConfig, SweepRunner,
};
use log::{debug, error, info, warn};
use std::path::Path;

const LOG_TARGET: &str = "ime::sweep::main";

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.help_config {
        display_full_help();
        return;
    }

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = init_logging(args.log_config.as_deref(), args.verbose) {
        eprintln!("❌ Error: {:#}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(&args).await {
        error!(target: LOG_TARGET, "❌ {:#}", err);
        eprintln!("❌ Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    if args.clear {
        return handle_clear(args);
    }

    if args.file.is_none() && !args.oracle && !args.overhead {
        bail!("No sweep file given. Use -f PATH (see --help-config)");
    }

    let gateway = ProcessGateway::new(args.call_timeout());
    debug!(target: LOG_TARGET, "External calls are bounded by {:?}", gateway.timeout());

    if let Some(file) = &args.file {
        handle_sweep(args, &gateway, file).await?;
    }
    if args.oracle {
        handle_oracle(args, &gateway).await?;
    }
    if args.overhead {
        handle_overhead(args)?;
    }
    Ok(())
}

fn handle_clear(args: &Args) -> anyhow::Result<()> {
    let outputs = DirectoryManager::new(&args.output_dir)?;
    let mut removed = outputs.clear(&[DIR_LOG, DIR_PARTIAL, DIR_RESULT])?;

    if args.results_dir.is_dir() {
        let oracle = DirectoryManager::new(&args.results_dir)?;
        removed += oracle.clear(&[DIR_INFO, DIR_DATA, DIR_PLOTS])?;
    }
    info!(target: LOG_TARGET, "🧹 Removed {} previous outputs below {:?}", removed, outputs.base());
    Ok(())
}

fn profiler<'g>(args: &Args, gateway: &'g ProcessGateway) -> ProfilerControl<'g, ProcessGateway> {
    ProfilerControl::new(
        gateway,
        args.profiler.clone(),
        args.device_dir.clone(),
        args.control_entry.clone(),
    )
}

async fn handle_sweep(args: &Args, gateway: &ProcessGateway, file: &Path) -> anyhow::Result<()> {
    let plan = ConfigParser::new()
        .parse_file(file)
        .with_context(|| format!("Invalid sweep file {:?}", file))?;

    if plan.is_empty() {
        warn!(target: LOG_TARGET, "⚠️ {:?} declares no benchmark, nothing to run", file);
        return Ok(());
    }

    let dirs = DirectoryManager::new(&args.output_dir)?;
    dirs.ensure_fresh_all(&[DIR_LOG, DIR_PARTIAL, DIR_RESULT])?;

    if let Some(module_dir) = &args.load_module {
        reload_module(gateway, module_dir, plan.sampling).await?;
    }

    let config = SweepConfig {
        output_dir: args.output_dir.clone(),
        time_cmd: args.time_cmd.clone(),
        thread_flag: args.thread_flag.clone(),
        policy: args.policy,
    };
    let runner = SweepRunner::new(config, profiler(args, gateway));
    let report = runner.run(&plan).await?;
    let summary = report.write_summary(&runner.config().result_dir())?;

    info!(target: LOG_TARGET, "📊 Sweep Complete!");
    info!(target: LOG_TARGET, "🧪 Benchmarks: {}", report.benchmarks.len());
    info!(target: LOG_TARGET, "🔁 Workload runs: {}", report.workload_runs());
    info!(target: LOG_TARGET, "📝 Summary: {:?}", summary);
    Ok(())
}

async fn handle_oracle(args: &Args, gateway: &ProcessGateway) -> anyhow::Result<()> {
    let config = OracleConfig {
        workload: args.workload.clone(),
        frequencies: args.oracle_frequencies(),
        levels: args.injections.clone(),
        template: args.template.clone().zip(args.inject_target.clone()),
        build_cmd: args.build_cmd.clone(),
        sample_prefix: args.sample_prefix.clone(),
    };
    let layout = ResultsLayout::new(&args.results_dir);
    let collector = OracleCollector::new(config, profiler(args, gateway), layout.clone());
    let series = collector.collect().await.context("Oracle collection failed")?;
    info!(target: LOG_TARGET, "📊 Collected {} injection levels into {:?}", series.len(), layout.root());
    Ok(())
}

fn handle_overhead(args: &Args) -> anyhow::Result<()> {
    let normalizer = OverheadNormalizer::new(ResultsLayout::new(&args.results_dir));
    let outcome = normalizer.run(&args.injections).context("Overhead pass failed")?;
    for path in &outcome.written {
        info!(target: LOG_TARGET, "📈 Wrote {:?}", path);
    }
    if !outcome.is_success() {
        for (level, err) in &outcome.failures {
            eprintln!("❌ Level {}: {}", level, err);
        }
        bail!(
            "{} of {} injection levels failed",
            outcome.failures.len(),
            args.injections.len()
        );
    }
    Ok(())
}

// Changelog:
// - v1.1.1 (2026-10-16): Logs the call timeout and output locations.
// - v1.1.0 (2026-10-14): --oracle and --overhead passes.
// - v1.0.0 (2026-10-05): Entry point reworked for the sweep harness.
//   - Purpose: Parses arguments, initialises logging and dispatches to the
//     clear, sweep and oracle handlers with exit status 1 on any error.
