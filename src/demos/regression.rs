//! Online linear regression under selectable losses.
//!
//! # Governing Equations
//!
//! ```text
//! ŷ  = w·x + b
//! e  = y − ŷ
//! dw = mean(−2·e·x)
//! db = mean(−2·e)
//! w ← w − η·dw;  b ← b − η·db
//! ```
//!
//! The descent direction is always the MSE gradient. The selected loss
//! only changes the reported value, so MAE, Huber and cross-entropy runs
//! follow the same parameter path as MSE.
//!
//! Data: `y = 0.5 + 0.3·x + u` with `u ~ U[−0.15, 0.15)` and `x` evenly
//! spaced on `[0, 1]`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use validator::{Validate, ValidationError};

use super::engine::{require_finite, DemoEngine};
use crate::engine::rng::SimRng;

/// Generating intercept.
pub const TRUE_BIAS: f64 = 0.5;
/// Generating slope.
pub const TRUE_WEIGHT: f64 = 0.3;
/// Half-width of the uniform target noise.
pub const NOISE_AMPLITUDE: f64 = 0.15;
/// Maximum number of loss history entries kept.
pub const HISTORY_CAPACITY: usize = 50;
/// Huber transition point δ.
pub const HUBER_DELTA: f64 = 0.5;

const INITIAL_WEIGHT: f64 = 0.5;
const INITIAL_BIAS: f64 = 0.0;
const PROBABILITY_FLOOR: f64 = 0.001;

/// Reported loss functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LossKind {
    /// Mean squared error.
    #[default]
    Mse,
    /// Mean absolute error.
    Mae,
    /// Huber loss with δ = 0.5.
    Huber,
    /// Binary cross-entropy against targets thresholded at 0.5.
    CrossEntropy,
}

impl LossKind {
    /// All losses in display order.
    pub const ALL: [Self; 4] = [Self::Mse, Self::Mae, Self::Huber, Self::CrossEntropy];

    /// Per-example loss.
    #[must_use]
    pub fn per_example(self, predicted: f64, target: f64) -> f64 {
        let error = target - predicted;
        match self {
            Self::Mse => error * error,
            Self::Mae => error.abs(),
            Self::Huber => {
                if error.abs() < HUBER_DELTA {
                    0.5 * error * error
                } else {
                    HUBER_DELTA * error.abs() - 0.5 * HUBER_DELTA * HUBER_DELTA
                }
            }
            Self::CrossEntropy => {
                let p = predicted.clamp(PROBABILITY_FLOOR, 1.0 - PROBABILITY_FLOOR);
                let label = if target > 0.5 { 1.0 } else { 0.0 };
                -(label * p.ln() + (1.0 - label) * (1.0 - p).ln())
            }
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mse => "MSE",
            Self::Mae => "MAE",
            Self::Huber => "Huber",
            Self::CrossEntropy => "Cross-Entropy",
        }
    }
}

/// One training example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Input `x`.
    pub input: f64,
    /// Target `y`.
    pub target: f64,
}

/// Model output at one example, for residual plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Input `x`.
    pub input: f64,
    /// Model output `ŷ`.
    pub predicted: f64,
    /// `y − ŷ`.
    pub residual: f64,
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_dataset_size() -> usize {
    20
}

fn default_seed() -> u64 {
    42
}

/// Regression configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_regression_config"))]
pub struct RegressionConfig {
    /// Learning rate η.
    #[validate(range(min = 0.001, max = 1.0))]
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Number of generated examples.
    #[validate(range(max = 10_000))]
    #[serde(default = "default_dataset_size")]
    pub dataset_size: usize,
    /// Reported loss.
    #[serde(default)]
    pub loss: LossKind,
    /// RNG seed for dataset noise.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn validate_regression_config(config: &RegressionConfig) -> Result<(), ValidationError> {
    require_finite(&[("learning_rate", config.learning_rate)])
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            dataset_size: default_dataset_size(),
            loss: LossKind::default(),
            seed: default_seed(),
        }
    }
}

/// Regression snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionState {
    /// Slope.
    pub weight: f64,
    /// Intercept.
    pub bias: f64,
    /// Completed epochs.
    pub epoch: u64,
    /// Loss after the last epoch; 0 before the first.
    pub loss: f64,
    /// Selected loss.
    pub loss_kind: LossKind,
    /// Recent losses, oldest first.
    pub history: Vec<f64>,
    /// Training data.
    pub dataset: Vec<DataPoint>,
}

/// Step result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionStepResult {
    /// Slope after the step.
    pub weight: f64,
    /// Intercept after the step.
    pub bias: f64,
    /// Reported loss after the step.
    pub loss: f64,
}

/// Full-batch gradient descent trainer for `ŷ = w·x + b`.
#[derive(Debug, Clone)]
pub struct RegressionTrainer {
    config: RegressionConfig,
    dataset: Vec<DataPoint>,
    weight: f64,
    bias: f64,
    epoch: u64,
    loss: f64,
    history: VecDeque<f64>,
    step_count: u64,
    seed: u64,
}

impl RegressionTrainer {
    /// Build a trainer over an explicit dataset instead of generated data.
    #[must_use]
    pub fn with_dataset(config: RegressionConfig, dataset: Vec<DataPoint>) -> Self {
        let mut trainer = Self::from_config(config);
        trainer.dataset = dataset;
        trainer
    }

    /// Training data.
    #[must_use]
    pub fn dataset(&self) -> &[DataPoint] {
        &self.dataset
    }

    /// Current `(weight, bias)`.
    #[must_use]
    pub const fn parameters(&self) -> (f64, f64) {
        (self.weight, self.bias)
    }

    /// Loss after the last epoch.
    #[must_use]
    pub const fn loss(&self) -> f64 {
        self.loss
    }

    /// Recent losses, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &f64> {
        self.history.iter()
    }

    /// Switch the reported loss; resets the run.
    pub fn set_loss_kind(&mut self, loss: LossKind) {
        self.config.loss = loss;
        self.reset();
    }

    /// Change the learning rate for subsequent epochs.
    ///
    /// Non-finite or non-positive rates are ignored.
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        if learning_rate.is_finite() && learning_rate > 0.0 {
            self.config.learning_rate = learning_rate;
        }
    }

    /// Model output for `input`.
    #[must_use]
    pub fn predict(&self, input: f64) -> f64 {
        self.weight * input + self.bias
    }

    /// Per-example predictions and residuals.
    #[must_use]
    pub fn predictions(&self) -> Vec<Prediction> {
        self.dataset
            .iter()
            .map(|p| {
                let predicted = self.predict(p.input);
                Prediction {
                    input: p.input,
                    predicted,
                    residual: p.target - predicted,
                }
            })
            .collect()
    }

    /// Mean loss of `kind` at the current parameters; 0 on an empty dataset.
    #[must_use]
    pub fn loss_under(&self, kind: LossKind) -> f64 {
        if self.dataset.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .dataset
            .iter()
            .map(|p| kind.per_example(self.predict(p.input), p.target))
            .sum();
        total / self.dataset.len() as f64
    }

    fn generate_dataset(size: usize, seed: u64) -> Vec<DataPoint> {
        let mut rng = SimRng::new(seed);
        let span = size.saturating_sub(1).max(1) as f64;
        (0..size)
            .map(|i| {
                let input = i as f64 / span;
                let noise = rng.gen_symmetric(NOISE_AMPLITUDE);
                DataPoint {
                    input,
                    target: TRUE_BIAS + TRUE_WEIGHT * input + noise,
                }
            })
            .collect()
    }

    fn step_result(&self) -> RegressionStepResult {
        RegressionStepResult {
            weight: self.weight,
            bias: self.bias,
            loss: self.loss,
        }
    }
}

impl DemoEngine for RegressionTrainer {
    type Config = RegressionConfig;
    type State = RegressionState;
    type StepResult = RegressionStepResult;

    fn from_config(config: Self::Config) -> Self {
        let seed = config.seed;
        let dataset = Self::generate_dataset(config.dataset_size, seed);
        Self {
            config,
            dataset,
            weight: INITIAL_WEIGHT,
            bias: INITIAL_BIAS,
            epoch: 0,
            loss: 0.0,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            step_count: 0,
            seed,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.dataset = Self::generate_dataset(self.config.dataset_size, seed);
        self.weight = INITIAL_WEIGHT;
        self.bias = INITIAL_BIAS;
        self.epoch = 0;
        self.loss = 0.0;
        self.history.clear();
        self.step_count = 0;
        tracing::debug!(seed, loss = ?self.config.loss, "regression reset");
    }

    fn step(&mut self) -> Self::StepResult {
        self.step_count += 1;
        if self.dataset.is_empty() {
            return self.step_result();
        }

        let n = self.dataset.len() as f64;
        let (mut dw, mut db) = (0.0, 0.0);
        for p in &self.dataset {
            let error = p.target - self.predict(p.input);
            dw += -2.0 * error * p.input;
            db += -2.0 * error;
        }
        dw /= n;
        db /= n;

        let lr = self.config.learning_rate;
        self.weight -= lr * dw;
        self.bias -= lr * db;
        self.epoch += 1;

        self.loss = self.loss_under(self.config.loss);
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(self.loss);

        self.step_result()
    }

    fn state(&self) -> Self::State {
        RegressionState {
            weight: self.weight,
            bias: self.bias,
            epoch: self.epoch,
            loss: self.loss,
            loss_kind: self.config.loss,
            history: self.history.iter().copied().collect(),
            dataset: self.dataset.clone(),
        }
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn name(&self) -> &'static str {
        "Loss Function Playground"
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{DemoEngine, LossKind, RegressionConfig, RegressionTrainer};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmRegressionTrainer {
        inner: RegressionTrainer,
    }

    #[wasm_bindgen]
    impl WasmRegressionTrainer {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u64) -> Self {
            let config = RegressionConfig {
                seed,
                ..RegressionConfig::default()
            };
            Self {
                inner: RegressionTrainer::from_config(config),
            }
        }

        /// Returns the reported loss after the epoch.
        pub fn step(&mut self) -> f64 {
            self.inner.step().loss
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }

        /// 0 = mse, 1 = mae, 2 = huber, 3 = cross-entropy.
        pub fn set_loss_kind(&mut self, index: usize) {
            if let Some(kind) = LossKind::ALL.get(index) {
                self.inner.set_loss_kind(*kind);
            }
        }

        pub fn set_learning_rate(&mut self, learning_rate: f64) {
            self.inner.set_learning_rate(learning_rate);
        }

        pub fn get_weight(&self) -> f64 {
            self.inner.parameters().0
        }

        pub fn get_bias(&self) -> f64 {
            self.inner.parameters().1
        }

        pub fn get_state_json(&self) -> String {
            serde_json::to_string(&self.inner.state()).unwrap_or_default()
        }
    }
}
