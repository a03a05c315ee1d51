//! Gradient descent on fixed 2-D landscapes.
//!
//! A single point descends one of three objective functions under a
//! selectable optimizer. The point lives in the box `[-5, 5]²` and is
//! clamped back into it after every update.
//!
//! # Governing Equations
//!
//! ```text
//! Sgd:       p ← p − η·g
//! Momentum:  v ← β·v − η·g;  p ← p + v                     (β = 0.9)
//! Adam:      m ← β₁·m + (1−β₁)·g
//!            s ← β₂·s + (1−β₂)·|g|²
//!            p ← p − η·(m/(1−β₁)) / (√(s/(1−β₂)) + ε)     (β₁ = 0.9, β₂ = 0.999)
//! ```
//!
//! Adam's bias correction divides by the constant `1−β` rather than the
//! step-indexed `1−βᵗ`, so early steps are under-corrected. The second
//! moment is a single scalar over the squared gradient norm, which makes
//! the step direction always follow the first moment.
//!
//! A run converges when the point is within `0.01` of the objective's
//! tracked minimum. Convergence ends the step loop; `reset` re-arms it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use validator::{Validate, ValidationError};

use super::engine::{require_finite, DemoEngine};

/// Half-width of the search box.
pub const DOMAIN_LIMIT: f64 = 5.0;
/// Maximum number of trajectory points kept.
pub const TRAJECTORY_CAPACITY: usize = 50;
/// Distance to the target that counts as converged.
pub const CONVERGENCE_RADIUS: f64 = 0.01;

const MOMENTUM_BETA: f64 = 0.9;
const ADAM_BETA1: f64 = 0.9;
const ADAM_BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-8;

/// Objective landscapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// `(x−2)² + (y−2)²`.
    #[default]
    Quadratic,
    /// `(1−x)² + 100(y−x²)²`.
    Rosenbrock,
    /// `(x²+y−11)² + (x+y²−7)²`.
    Himmelblau,
}

impl Objective {
    /// All objectives in display order.
    pub const ALL: [Self; 3] = [Self::Quadratic, Self::Rosenbrock, Self::Himmelblau];

    /// Objective value at `(x, y)`.
    #[must_use]
    pub fn value(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Quadratic => (x - 2.0).powi(2) + (y - 2.0).powi(2),
            Self::Rosenbrock => (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2),
            Self::Himmelblau => (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2),
        }
    }

    /// Analytic gradient at `(x, y)`.
    #[must_use]
    pub fn gradient(self, x: f64, y: f64) -> [f64; 2] {
        match self {
            Self::Quadratic => [2.0 * (x - 2.0), 2.0 * (y - 2.0)],
            Self::Rosenbrock => [
                -2.0 * (1.0 - x) - 400.0 * x * (y - x * x),
                200.0 * (y - x * x),
            ],
            Self::Himmelblau => {
                let a = x * x + y - 11.0;
                let b = x + y * y - 7.0;
                [4.0 * x * a + 2.0 * b, 2.0 * a + 4.0 * y * b]
            }
        }
    }

    /// The minimum tracked as the run's target.
    ///
    /// Himmelblau has four global minima; only `(3, 2)` counts.
    #[must_use]
    pub const fn target(self) -> [f64; 2] {
        match self {
            Self::Quadratic => [2.0, 2.0],
            Self::Rosenbrock => [1.0, 1.0],
            Self::Himmelblau => [3.0, 2.0],
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quadratic => "Quadratic Bowl",
            Self::Rosenbrock => "Rosenbrock's Valley",
            Self::Himmelblau => "Himmelblau's Function",
        }
    }
}

/// Update rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerKind {
    /// Plain gradient step.
    #[default]
    Sgd,
    /// Heavy-ball momentum.
    Momentum,
    /// Adam with instantaneous bias correction.
    Adam,
}

impl OptimizerKind {
    /// All optimizers in display order.
    pub const ALL: [Self; 3] = [Self::Sgd, Self::Momentum, Self::Adam];
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_start() -> f64 {
    4.0
}

fn default_seed() -> u64 {
    42
}

/// Optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_optimizer_config"))]
pub struct OptimizerConfig {
    /// Objective landscape.
    #[serde(default)]
    pub objective: Objective,
    /// Update rule.
    #[serde(default)]
    pub optimizer: OptimizerKind,
    /// Learning rate η.
    #[validate(range(min = 0.001, max = 1.0))]
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Starting x coordinate.
    #[validate(range(min = -5.0, max = 5.0))]
    #[serde(default = "default_start")]
    pub start_x: f64,
    /// Starting y coordinate.
    #[validate(range(min = -5.0, max = 5.0))]
    #[serde(default = "default_start")]
    pub start_y: f64,
    /// Carried for replay metadata; descent itself draws no randomness.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn validate_optimizer_config(config: &OptimizerConfig) -> Result<(), ValidationError> {
    require_finite(&[
        ("learning_rate", config.learning_rate),
        ("start_x", config.start_x),
        ("start_y", config.start_y),
    ])
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            objective: Objective::default(),
            optimizer: OptimizerKind::default(),
            learning_rate: default_learning_rate(),
            start_x: default_start(),
            start_y: default_start(),
            seed: default_seed(),
        }
    }
}

/// Auxiliary accumulators, zeroed on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Accumulators {
    /// Momentum velocity.
    pub velocity: [f64; 2],
    /// Adam first moment.
    pub first_moment: [f64; 2],
    /// Adam second moment (scalar, over `|g|²`).
    pub second_moment: f64,
    /// Adam update count.
    pub adam_steps: u64,
}

/// Optimizer snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerState {
    /// Current point.
    pub position: [f64; 2],
    /// Objective in use.
    pub objective: Objective,
    /// Optimizer in use.
    pub optimizer: OptimizerKind,
    /// Objective value at the current point.
    pub loss: f64,
    /// Recent points, oldest first.
    pub trajectory: Vec<[f64; 2]>,
    /// Accumulators.
    pub accumulators: Accumulators,
    /// Completed updates.
    pub iteration: u64,
    /// Whether the run has converged.
    pub converged: bool,
}

/// Step result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerStepResult {
    /// Point after the step.
    pub position: [f64; 2],
    /// Objective value after the step.
    pub loss: f64,
    /// Distance to the tracked minimum.
    pub distance_to_target: f64,
    /// Whether the run is converged.
    pub converged: bool,
}

/// One arrow of the descent field overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldArrow {
    /// Sample point.
    pub origin: [f64; 2],
    /// Softly normalized descent direction `−g/(|g| + 0.1)`.
    pub direction: [f64; 2],
}

/// Gradient descent engine.
#[derive(Debug, Clone)]
pub struct FunctionOptimizer {
    config: OptimizerConfig,
    position: [f64; 2],
    accumulators: Accumulators,
    trajectory: VecDeque<[f64; 2]>,
    iteration: u64,
    converged: bool,
    step_count: u64,
    seed: u64,
}

impl FunctionOptimizer {
    /// Switch objective; resets the run.
    pub fn set_objective(&mut self, objective: Objective) {
        self.config.objective = objective;
        self.reset();
    }

    /// Switch optimizer; resets the run.
    pub fn set_optimizer(&mut self, optimizer: OptimizerKind) {
        self.config.optimizer = optimizer;
        self.reset();
    }

    /// Change the learning rate for subsequent steps.
    ///
    /// Non-finite or non-positive rates are ignored.
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        if learning_rate.is_finite() && learning_rate > 0.0 {
            self.config.learning_rate = learning_rate;
        }
    }

    /// Current point.
    #[must_use]
    pub const fn position(&self) -> [f64; 2] {
        self.position
    }

    /// Objective value at the current point.
    #[must_use]
    pub fn loss(&self) -> f64 {
        self.config
            .objective
            .value(self.position[0], self.position[1])
    }

    /// Euclidean distance to the tracked minimum.
    #[must_use]
    pub fn distance_to_target(&self) -> f64 {
        let [tx, ty] = self.config.objective.target();
        ((self.position[0] - tx).powi(2) + (self.position[1] - ty).powi(2)).sqrt()
    }

    /// Recent points, oldest first.
    pub fn trajectory(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.trajectory.iter()
    }

    /// Sample the descent field on the integer lattice `[min, max]²`.
    #[must_use]
    pub fn gradient_field(&self, min: i32, max: i32) -> Vec<FieldArrow> {
        let objective = self.config.objective;
        let mut arrows = Vec::new();
        for xi in min..=max {
            for yi in min..=max {
                let (x, y) = (f64::from(xi), f64::from(yi));
                let [gx, gy] = objective.gradient(x, y);
                let scale = (gx * gx + gy * gy).sqrt() + 0.1;
                arrows.push(FieldArrow {
                    origin: [x, y],
                    direction: [-gx / scale, -gy / scale],
                });
            }
        }
        arrows
    }

    /// Proposed next point and accumulators, before clamping.
    fn propose(&self, gradient: [f64; 2]) -> ([f64; 2], Accumulators) {
        let lr = self.config.learning_rate;
        let [gx, gy] = gradient;
        let [x, y] = self.position;
        let mut acc = self.accumulators;

        let next = match self.config.optimizer {
            OptimizerKind::Sgd => [x - lr * gx, y - lr * gy],
            OptimizerKind::Momentum => {
                acc.velocity = [
                    MOMENTUM_BETA * acc.velocity[0] - lr * gx,
                    MOMENTUM_BETA * acc.velocity[1] - lr * gy,
                ];
                [x + acc.velocity[0], y + acc.velocity[1]]
            }
            OptimizerKind::Adam => {
                acc.adam_steps += 1;
                acc.first_moment = [
                    ADAM_BETA1 * acc.first_moment[0] + (1.0 - ADAM_BETA1) * gx,
                    ADAM_BETA1 * acc.first_moment[1] + (1.0 - ADAM_BETA1) * gy,
                ];
                acc.second_moment =
                    ADAM_BETA2 * acc.second_moment + (1.0 - ADAM_BETA2) * (gx * gx + gy * gy);

                let m_hat_x = acc.first_moment[0] / (1.0 - ADAM_BETA1);
                let m_hat_y = acc.first_moment[1] / (1.0 - ADAM_BETA1);
                let v_hat = acc.second_moment / (1.0 - ADAM_BETA2);
                let denom = v_hat.sqrt() + ADAM_EPSILON;

                [x - lr * m_hat_x / denom, y - lr * m_hat_y / denom]
            }
        };

        (next, acc)
    }

    fn step_result(&self) -> OptimizerStepResult {
        OptimizerStepResult {
            position: self.position,
            loss: self.loss(),
            distance_to_target: self.distance_to_target(),
            converged: self.converged,
        }
    }
}

impl DemoEngine for FunctionOptimizer {
    type Config = OptimizerConfig;
    type State = OptimizerState;
    type StepResult = OptimizerStepResult;

    fn from_config(config: Self::Config) -> Self {
        let seed = config.seed;
        let position = [
            config.start_x.clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
            config.start_y.clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
        ];
        Self {
            config,
            position,
            accumulators: Accumulators::default(),
            trajectory: VecDeque::with_capacity(TRAJECTORY_CAPACITY),
            iteration: 0,
            converged: false,
            step_count: 0,
            seed,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.position = [
            self.config.start_x.clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
            self.config.start_y.clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
        ];
        self.accumulators = Accumulators::default();
        self.trajectory.clear();
        self.iteration = 0;
        self.converged = false;
        self.step_count = 0;
        tracing::debug!(
            objective = ?self.config.objective,
            optimizer = ?self.config.optimizer,
            "optimizer reset"
        );
    }

    fn step(&mut self) -> Self::StepResult {
        self.step_count += 1;
        if self.converged {
            return self.step_result();
        }

        let gradient = self
            .config
            .objective
            .gradient(self.position[0], self.position[1]);
        let (next, accumulators) = self.propose(gradient);

        if !(next[0].is_finite() && next[1].is_finite()) {
            tracing::warn!(
                iteration = self.iteration,
                "rejected non-finite optimizer update"
            );
            return self.step_result();
        }

        self.position = [
            next[0].clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
            next[1].clamp(-DOMAIN_LIMIT, DOMAIN_LIMIT),
        ];
        self.accumulators = accumulators;

        if self.trajectory.len() == TRAJECTORY_CAPACITY {
            self.trajectory.pop_front();
        }
        self.trajectory.push_back(self.position);
        self.iteration += 1;

        if self.distance_to_target() < CONVERGENCE_RADIUS {
            self.converged = true;
            tracing::debug!(iteration = self.iteration, "optimizer converged");
        }

        self.step_result()
    }

    fn is_complete(&self) -> bool {
        self.converged
    }

    fn state(&self) -> Self::State {
        OptimizerState {
            position: self.position,
            objective: self.config.objective,
            optimizer: self.config.optimizer,
            loss: self.loss(),
            trajectory: self.trajectory.iter().copied().collect(),
            accumulators: self.accumulators,
            iteration: self.iteration,
            converged: self.converged,
        }
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn name(&self) -> &'static str {
        "Gradient Descent Visualizer"
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{DemoEngine, FunctionOptimizer, Objective, OptimizerConfig, OptimizerKind};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmFunctionOptimizer {
        inner: FunctionOptimizer,
    }

    #[wasm_bindgen]
    impl WasmFunctionOptimizer {
        #[wasm_bindgen(constructor)]
        pub fn new(learning_rate: f64) -> Self {
            let config = OptimizerConfig {
                learning_rate,
                ..OptimizerConfig::default()
            };
            Self {
                inner: FunctionOptimizer::from_config(config),
            }
        }

        /// Returns `true` once the run has converged.
        pub fn step(&mut self) -> bool {
            self.inner.step().converged
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }

        /// 0 = quadratic, 1 = rosenbrock, 2 = himmelblau.
        pub fn set_objective(&mut self, index: usize) {
            if let Some(objective) = Objective::ALL.get(index) {
                self.inner.set_objective(*objective);
            }
        }

        /// 0 = sgd, 1 = momentum, 2 = adam.
        pub fn set_optimizer(&mut self, index: usize) {
            if let Some(optimizer) = OptimizerKind::ALL.get(index) {
                self.inner.set_optimizer(*optimizer);
            }
        }

        pub fn set_learning_rate(&mut self, learning_rate: f64) {
            self.inner.set_learning_rate(learning_rate);
        }

        pub fn get_loss(&self) -> f64 {
            self.inner.loss()
        }

        pub fn get_state_json(&self) -> String {
            serde_json::to_string(&self.inner.state()).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    fn optimizer(objective: Objective, kind: OptimizerKind, lr: f64) -> FunctionOptimizer {
        FunctionOptimizer::from_config(OptimizerConfig {
            objective,
            optimizer: kind,
            learning_rate: lr,
            ..OptimizerConfig::default()
        })
    }

    #[test]
    fn test_objectives_vanish_at_targets() {
        for objective in Objective::ALL {
            let [tx, ty] = objective.target();
            assert!(objective.value(tx, ty).abs() < 1e-12, "{}", objective.name());
            let [gx, gy] = objective.gradient(tx, ty);
            assert!(gx.abs() < 1e-12 && gy.abs() < 1e-12, "{}", objective.name());
        }
    }

    #[test]
    fn test_gradients_match_finite_differences() {
        let h = 1e-6;
        for objective in Objective::ALL {
            for &(x, y) in &[(0.5, -1.5), (-2.0, 3.0), (4.0, 4.0)] {
                let [gx, gy] = objective.gradient(x, y);
                let fx = (objective.value(x + h, y) - objective.value(x - h, y)) / (2.0 * h);
                let fy = (objective.value(x, y + h) - objective.value(x, y - h)) / (2.0 * h);
                let tol = 1e-4 * (1.0 + gx.abs().max(gy.abs()));
                assert!((gx - fx).abs() < tol, "{} d/dx at ({x},{y})", objective.name());
                assert!((gy - fy).abs() < tol, "{} d/dy at ({x},{y})", objective.name());
            }
        }
    }

    #[test]
    fn test_sgd_single_step() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.1);
        let result = opt.step();
        // g = (4, 4) at (4, 4).
        assert!((result.position[0] - 3.6).abs() < 1e-12);
        assert!((result.position[1] - 3.6).abs() < 1e-12);
        assert_eq!(opt.state().iteration, 1);
    }

    #[test]
    fn test_sgd_converges_on_quadratic() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.1);
        let taken = opt.run_until_complete(200);
        assert!(opt.is_complete());
        assert!(taken <= 40, "took {taken} steps");
        assert!(opt.distance_to_target() < CONVERGENCE_RADIUS);
    }

    #[test]
    fn test_converged_run_stops_advancing() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.1);
        opt.run_until_complete(200);
        let frozen = opt.state();

        let result = opt.step();
        assert!(result.converged);
        assert_eq!(opt.state(), frozen);
    }

    #[test]
    fn test_momentum_first_step() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Momentum, 0.1);
        opt.step();
        let state = opt.state();
        assert!((state.accumulators.velocity[0] + 0.4).abs() < 1e-12);
        assert!((state.position[0] - 3.6).abs() < 1e-12);

        opt.step();
        // v = 0.9·(−0.4) − 0.1·2·(3.6 − 2) = −0.68
        let state = opt.state();
        assert!((state.accumulators.velocity[0] + 0.68).abs() < 1e-12);
    }

    #[test]
    fn test_adam_uses_instantaneous_bias_correction() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Adam, 0.1);
        opt.step();
        // m̂ = g, v̂ = |g|², so the first step has length η along −g/|g|.
        let [x, y] = opt.position();
        let moved = ((x - 4.0).powi(2) + (y - 4.0).powi(2)).sqrt();
        assert!((moved - 0.1).abs() < 1e-6);
        assert_eq!(opt.state().accumulators.adam_steps, 1);
    }

    #[test]
    fn test_adam_and_momentum_reduce_loss() {
        for kind in [OptimizerKind::Momentum, OptimizerKind::Adam] {
            let mut opt = optimizer(Objective::Quadratic, kind, 0.1);
            let initial = opt.loss();
            let losses: Vec<f64> = opt.run(100).iter().map(|r| r.loss).collect();

            let first_half: f64 = losses[..50].iter().sum::<f64>() / 50.0;
            let second_half: f64 = losses[50..].iter().sum::<f64>() / 50.0;
            assert!(second_half <= first_half, "{kind:?}");
            assert!(losses[99] < initial, "{kind:?}");
        }
    }

    #[test]
    fn test_position_clamped_to_domain() {
        // A huge step on Rosenbrock overshoots far outside the box.
        let mut opt = optimizer(Objective::Rosenbrock, OptimizerKind::Sgd, 1.0);
        for _ in 0..20 {
            let [x, y] = opt.step().position;
            assert!((-DOMAIN_LIMIT..=DOMAIN_LIMIT).contains(&x));
            assert!((-DOMAIN_LIMIT..=DOMAIN_LIMIT).contains(&y));
        }
    }

    #[test]
    fn test_trajectory_capacity() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.001);
        opt.run(120);
        assert!(!opt.is_complete());
        let state = opt.state();
        assert_eq!(state.trajectory.len(), TRAJECTORY_CAPACITY);
        assert_eq!(state.trajectory.last().copied(), Some(state.position));
    }

    #[test]
    fn test_switching_resets_run() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Adam, 0.1);
        opt.run(10);
        opt.set_objective(Objective::Himmelblau);

        let state = opt.state();
        assert_eq!(state.position, [4.0, 4.0]);
        assert_eq!(state.iteration, 0);
        assert!(state.trajectory.is_empty());
        assert_eq!(state.accumulators, Accumulators::default());

        opt.run(5);
        opt.set_optimizer(OptimizerKind::Sgd);
        assert_eq!(opt.state().iteration, 0);
        assert_eq!(opt.state().objective, Objective::Himmelblau);
    }

    #[test]
    fn test_learning_rate_guard() {
        let mut opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.1);
        opt.set_learning_rate(f64::NAN);
        opt.set_learning_rate(-1.0);
        assert!((opt.config().learning_rate - 0.1).abs() < f64::EPSILON);
        opt.set_learning_rate(0.25);
        assert!((opt.config().learning_rate - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gradient_field_points_downhill() {
        let opt = optimizer(Objective::Quadratic, OptimizerKind::Sgd, 0.1);
        let field = opt.gradient_field(-4, 4);
        assert_eq!(field.len(), 81);

        let arrow = field
            .iter()
            .find(|a| a.origin == [4.0, 2.0])
            .copied()
            .unwrap_or(FieldArrow {
                origin: [0.0, 0.0],
                direction: [0.0, 0.0],
            });
        assert!(arrow.direction[0] < 0.0);
        assert!(arrow.direction[1].abs() < 1e-12);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "objective: rosenbrock\noptimizer: adam\nlearning_rate: 0.05\n";
        let opt = FunctionOptimizer::from_yaml(yaml);
        assert!(opt.is_ok());
        let opt = opt.ok();
        assert_eq!(opt.as_ref().map(|o| o.config().objective), Some(Objective::Rosenbrock));
        assert_eq!(opt.as_ref().map(|o| o.config().optimizer), Some(OptimizerKind::Adam));

        assert!(FunctionOptimizer::from_yaml("learning_rate: 3.0\n").is_err());
        assert!(FunctionOptimizer::from_yaml("start_x: 9.0\n").is_err());
    }

    #[test]
    fn test_from_yaml_rejects_non_finite() {
        for yaml in [
            "start_x: .nan\n",
            "start_y: .nan\n",
            "start_x: -.inf\n",
            "learning_rate: .nan\n",
        ] {
            let result = FunctionOptimizer::from_yaml(yaml);
            assert!(matches!(result, Err(LabError::Validation(_))), "{yaml}");
        }
    }
}
