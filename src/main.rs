//! labsim CLI - headless runner for the lab demos.
//!
//! Snapshots go to stdout as JSON lines; logs go to stderr.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use labsim::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("labsim=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labsim=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run_cli(&args)
}
