//! # Roster Server
//!
//! Seeds the player registry, drives it from many threads, prints the level
//! report and waits for Ctrl-C.
//!
//! ## Usage
//!
//! ```bash
//! roster_server --config roster.toml --workers 100
//! roster_server --no-wait          # exit right after the report
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use roster::seed::{seed_registry, source_for};
use roster::{logging, shutdown, RosterConfig, ServerResult, Workload};
use roster_core::PlayerRegistry;
use tracing::{error, info};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "roster_server")]
#[command(about = "Concurrent player registry server")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `workload.workers`
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Exit after the report instead of waiting for Ctrl-C
    #[arg(long)]
    no_wait: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => RosterConfig::load(path),
        None => Ok(RosterConfig::default()),
    };
    let filter = loaded
        .as_ref()
        .map_or_else(|_| "info".to_owned(), |config| config.logging.filter.clone());
    logging::init(args.verbose, &filter);

    let outcome = loaded.and_then(|config| run(&args, config));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "roster server failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, mut config: RosterConfig) -> ServerResult<()> {
    if let Some(workers) = args.workers {
        config.workload.workers = workers;
        config.validate()?;
    }

    info!(
        workers = config.workload.workers,
        award = config.workload.award,
        pinned = %config.workload.pinned_player,
        "starting roster server"
    );

    let registry = PlayerRegistry::new();
    let source = source_for(&config.seed);
    seed_registry(source.as_ref(), &registry);

    let report = Workload::new(&registry, &config.workload).run();
    info!(
        traversals = report.traversals,
        pinned_updates = report.pinned_updates,
        missing_lookups = report.missing_lookups,
        bytes_serialized = report.bytes_serialized,
        elapsed_us = report.elapsed_us,
        "workload complete"
    );

    let counts = registry.level_counts_excluding(&config.report.exclude_display_name);
    for (level, count) in &counts {
        println!("Level {level}: {count} users");
    }

    if args.no_wait {
        return Ok(());
    }

    info!("waiting for interrupt (Ctrl-C)");
    shutdown::wait_for_interrupt()?;
    info!("stopping server");
    Ok(())
}
