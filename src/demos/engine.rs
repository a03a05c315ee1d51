//! Unified demo engine trait.
//!
//! Every lab demo implements [`DemoEngine`]. The trait fixes the
//! (state, step, reset) shape that an external scheduler relies on:
//!
//! - YAML-first configuration (`from_yaml` validates before building)
//! - Deterministic replay (same config + seed gives the same states)
//! - Renderer independence (the renderer only sees owned snapshots)
//!
//! # Scheduling
//!
//! ```text
//! scheduler tick ──► step() ──► state() ──► renderer
//!        ▲                                     │
//!        └──────── stop when is_complete() ◄───┘
//! ```

use serde::{de::DeserializeOwned, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use validator::{Validate, ValidationError};

use crate::error::LabResult;

/// MANDATORY trait for all lab demos.
///
/// # Example
///
/// ```rust
/// use labsim::demos::{DemoEngine, RegressionTrainer};
///
/// let yaml = "learning_rate: 0.2\nseed: 7\n";
/// let mut trainer = RegressionTrainer::from_yaml(yaml).expect("valid config");
/// trainer.run(10);
/// assert_eq!(trainer.step_count(), 10);
/// ```
pub trait DemoEngine: Sized + Clone {
    /// Configuration type loaded from YAML.
    type Config: DeserializeOwned + Validate + Debug;

    /// State snapshot handed to renderers and replay checks.
    type State: Clone + Serialize + PartialEq + Debug;

    /// Result of a single step.
    type StepResult: Debug;

    // === Lifecycle ===

    /// Create engine from YAML configuration string.
    ///
    /// # Errors
    ///
    /// Returns `LabError::YamlParse` if YAML is invalid, or
    /// `LabError::Validation` if a field is out of range or not finite.
    fn from_yaml(yaml: &str) -> LabResult<Self> {
        let config: Self::Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Create engine from config struct.
    fn from_config(config: Self::Config) -> Self;

    /// Get the current configuration.
    fn config(&self) -> &Self::Config;

    /// Reset to initial state (same seed = same result).
    fn reset(&mut self) {
        self.reset_with_seed(self.seed());
    }

    /// Reset with a new seed.
    fn reset_with_seed(&mut self, seed: u64);

    // === Execution ===

    /// Execute one tick.
    fn step(&mut self) -> Self::StepResult;

    /// Execute N steps.
    fn run(&mut self, n: usize) -> Vec<Self::StepResult> {
        (0..n).map(|_| self.step()).collect()
    }

    /// Step until the run reaches its terminal state or `max_steps` ticks
    /// have elapsed. Returns the number of ticks taken.
    fn run_until_complete(&mut self, max_steps: usize) -> usize {
        let mut taken = 0;
        while taken < max_steps && !self.is_complete() {
            self.step();
            taken += 1;
        }
        taken
    }

    /// Check if the run has reached a terminal state.
    fn is_complete(&self) -> bool {
        false
    }

    // === State Access ===

    /// Get current state snapshot.
    fn state(&self) -> Self::State;

    /// Number of `step` calls since the last reset.
    fn step_count(&self) -> u64;

    /// Seed for reproducibility.
    fn seed(&self) -> u64;

    /// Human-readable demo name.
    fn name(&self) -> &'static str;

    /// Stable checksum of the current snapshot for quick replay comparison.
    fn state_checksum(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match serde_json::to_vec(&self.state()) {
            Ok(bytes) => bytes.hash(&mut hasher),
            Err(_) => self.step_count().hash(&mut hasher),
        }
        hasher.finish()
    }
}

/// Schema check shared by every engine config.
///
/// `range` validators compare with `<` and `>`, which NaN never fails, so
/// each config lists its float fields here from a struct-level
/// `#[validate(schema(..))]` hook.
pub(crate) fn require_finite(fields: &[(&'static str, f64)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        None => Ok(()),
        Some((name, value)) => {
            let mut err = ValidationError::new("non_finite");
            err.message = Some(format!("{name} must be finite, got {value}").into());
            Err(err)
        }
    }
}

/// Serialize a snapshot of any engine as a single JSON line.
///
/// # Errors
///
/// Returns `LabError::Serialization` if the snapshot cannot be encoded.
pub fn snapshot_json<E: DemoEngine>(engine: &E) -> LabResult<String> {
    Ok(serde_json::to_string(&engine.state())?)
}
