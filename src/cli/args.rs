//! CLI argument parsing.
//!
//! Kept in the library so argument handling can be tested without
//! spawning the binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (rev ",
    env!("LABSIM_GIT_REVISION"),
    ")"
);

/// Run a lab demo headless and stream JSON snapshots to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "labsim", version, long_version = LONG_VERSION, about)]
pub struct Args {
    /// Demo to run.
    #[arg(value_enum)]
    pub demo: DemoKind,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 100)]
    pub steps: u64,

    /// Master seed; overrides the seeds in the config file.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lab configuration YAML.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit one snapshot every K ticks.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Demos selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Particle field with proximity graph.
    Particles,
    /// Gradient descent visualizer.
    Optimizer,
    /// Q-learning maze.
    GridWorld,
    /// Loss function playground.
    Regression,
}
