//! Yggdrasil key generator CLI
//!
//! Usage:
//!   ygg-vanity                    # First key that beats the worst possible key
//!   ygg-vanity --strong           # Best key found in 5 seconds
//!   ygg-vanity --strong -d 60 --json

use std::process;

use clap::Parser;
use crossbeam_channel::{bounded, never, Receiver};
use tracing::{error, info, warn};

use ygg_vanity::{logging, Config, Coordinator, KeyReport, SearchMode, WorkerPool};

fn main() {
    let config = Config::parse();
    logging::init(config.quiet);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        process::exit(1);
    }

    let threads = config.worker_count();
    info!("Threads: {}", threads);

    let mode = config.search_mode();
    if let SearchMode::BestOf(window) = mode {
        info!(
            "Running in strong mode - searching for best key over {} seconds...",
            window.as_secs()
        );
    }

    let interrupt = ctrlc_channel();

    // Workers are never joined: they die with the process once we have an answer
    let (_pool, candidates) = match WorkerPool::spawn_os(threads) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let report = match Coordinator::new(mode).run(&candidates, &interrupt) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!(
        "Generated {}key after trying {} keys in {:.2}s:",
        if config.strong { "best " } else { "" },
        report.total_trials,
        report.elapsed.as_secs_f64()
    );

    match KeyReport::new(&report.candidate.keypair).render(config.output_format()) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            error!("Failed to encode result: {}", e);
            process::exit(1);
        }
    }
}

/// Turns Ctrl+C into a message the coordinator can select on.
fn ctrlc_channel() -> Receiver<()> {
    let (tx, rx) = bounded(1);
    match ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    }) {
        Ok(()) => rx,
        Err(e) => {
            // A disconnected receiver would fire at once, so never fire instead
            warn!("Could not install Ctrl+C handler: {}", e);
            never()
        }
    }
}
