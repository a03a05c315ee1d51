//! CLI command handlers.

use std::io::{self, Write};
use std::process::ExitCode;

use super::args::{Args, DemoKind};
use super::output::write_frame;
use crate::config::LabConfig;
use crate::demos::{DemoEngine, FunctionOptimizer, GridWorldAgent, ParticleField, RegressionTrainer};
use crate::error::LabResult;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub steps: u64,
    /// Snapshots written.
    pub frames: u64,
    /// Checksum of the final state.
    pub checksum: u64,
    /// The engine reached a terminal state before the step budget ran out.
    pub completed: bool,
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: &Args) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(args, &mut out) {
        Ok(summary) => {
            tracing::info!(
                steps = summary.steps,
                frames = summary.frames,
                checksum = summary.checksum,
                completed = summary.completed,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration, apply overrides and drive the selected demo.
///
/// # Errors
///
/// Returns error if the config file cannot be loaded or output fails.
pub fn run<W: Write>(args: &Args, out: &mut W) -> LabResult<RunSummary> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            LabConfig::load(path)?
        }
        None => LabConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.reseed(seed);
    }

    match args.demo {
        DemoKind::Particles => drive(ParticleField::from_config(config.particles), args, out),
        DemoKind::Optimizer => drive(FunctionOptimizer::from_config(config.optimizer), args, out),
        DemoKind::GridWorld => drive(GridWorldAgent::from_config(config.grid_world), args, out),
        DemoKind::Regression => {
            drive(RegressionTrainer::from_config(config.regression), args, out)
        }
    }
}

/// Step `engine` up to `args.steps` times, writing every `args.every`-th
/// snapshot. A terminal state ends the run early with a final snapshot.
fn drive<E: DemoEngine, W: Write>(mut engine: E, args: &Args, out: &mut W) -> LabResult<RunSummary> {
    tracing::info!(
        demo = engine.name(),
        seed = engine.seed(),
        steps = args.steps,
        "starting run"
    );

    let every = args.every.max(1);
    let mut frames = 0;
    let mut completed = false;

    for tick in 1..=args.steps {
        engine.step();
        completed = engine.is_complete();

        if tick % every == 0 || completed {
            write_frame(out, &engine)?;
            frames += 1;
        }
        if completed {
            break;
        }
    }
    out.flush()?;

    Ok(RunSummary {
        steps: engine.step_count(),
        frames,
        checksum: engine.state_checksum(),
        completed,
    })
}
