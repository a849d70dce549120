//! Delete metric descriptors matching a substring.
//!
//! Prints the name of every metric descriptor whose type contains the given
//! substring and deletes it, unless `--dry-run` is set.
//!
//! Usage:
//!   prune-metric-descriptors --project <id> --match-substring <text> [--dry-run]
//!
//! Environment variables required:
//! - GOOGLE_APPLICATION_CREDENTIALS: path to the Google credentials file
//!
//! Optional:
//! - MONITORING_ENDPOINT: override for the Cloud Monitoring API base URL
//! - PRUNER_LOG: tracing filter, e.g. `debug`

use std::{io, process::ExitCode};

use clap::Parser;
use descriptor_pruner::cli::{self, Args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    descriptor_pruner::init_logging();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    match cli::execute(&args, &mut stdout, &mut stderr).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
