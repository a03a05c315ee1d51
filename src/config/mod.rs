//! Lab configuration with YAML schema and validation.
//!
//! One file configures every demo. Each engine section carries its own
//! `Default`, so a file only needs the keys it changes:
//!
//! ```yaml
//! schema_version: "1.0"
//! optimizer:
//!   objective: rosenbrock
//!   optimizer: adam
//!   learning_rate: 0.05
//! grid_world:
//!   epsilon: 0.2
//! ```
//!
//! Parsing rejects unknown top-level keys, then validates every section
//! through the same checks the engines' own `from_yaml` runs: field ranges,
//! finiteness of every float, and cross-field rules.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::demos::gradient_descent::{Objective, OptimizerConfig, OptimizerKind};
use crate::demos::grid_world::GridWorldConfig;
use crate::demos::particle_field::ParticleFieldConfig;
use crate::demos::regression::{LossKind, RegressionConfig};
use crate::engine::rng::SimRng;
use crate::error::LabResult;

/// Top-level lab configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LabConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Particle field section.
    #[validate(nested)]
    #[serde(default)]
    pub particles: ParticleFieldConfig,

    /// Gradient descent section.
    #[validate(nested)]
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Q-learning maze section.
    #[validate(nested)]
    #[serde(default)]
    pub grid_world: GridWorldConfig,

    /// Regression section.
    #[validate(nested)]
    #[serde(default)]
    pub regression: RegressionConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            particles: ParticleFieldConfig::default(),
            optimizer: OptimizerConfig::default(),
            grid_world: GridWorldConfig::default(),
            regression: RegressionConfig::default(),
        }
    }
}

impl LabConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> LabResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> LabResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> LabConfigBuilder {
        LabConfigBuilder::default()
    }

    /// Derive every engine seed from one master seed.
    ///
    /// Each engine draws from its own partitioned stream, so changing one
    /// engine's seed never shifts another's.
    pub fn reseed(&mut self, seed: u64) {
        let seeds: Vec<u64> = SimRng::new(seed)
            .partition(4)
            .into_iter()
            .map(|mut stream| stream.gen_u64())
            .collect();
        if let [particles, optimizer, grid_world, regression] = seeds[..] {
            self.particles.seed = particles;
            self.optimizer.seed = optimizer;
            self.grid_world.seed = grid_world;
            self.regression.seed = regression;
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct LabConfigBuilder {
    seed: Option<u64>,
    particle_count: Option<usize>,
    objective: Option<Objective>,
    optimizer: Option<OptimizerKind>,
    loss: Option<LossKind>,
}

impl LabConfigBuilder {
    /// Set the master seed (see [`LabConfig::reseed`]).
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the particle count.
    #[must_use]
    pub const fn particle_count(mut self, count: usize) -> Self {
        self.particle_count = Some(count);
        self
    }

    /// Set the optimizer objective.
    #[must_use]
    pub const fn objective(mut self, objective: Objective) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Set the optimizer update rule.
    #[must_use]
    pub const fn optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Set the reported regression loss.
    #[must_use]
    pub const fn loss(mut self, loss: LossKind) -> Self {
        self.loss = Some(loss);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> LabConfig {
        let mut config = LabConfig::default();

        if let Some(seed) = self.seed {
            config.reseed(seed);
        }

        if let Some(count) = self.particle_count {
            config.particles.count = count;
        }

        if let Some(objective) = self.objective {
            config.optimizer.objective = objective;
        }

        if let Some(optimizer) = self.optimizer {
            config.optimizer.optimizer = optimizer;
        }

        if let Some(loss) = self.loss {
            config.regression.loss = loss;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    #[test]
    fn test_config_defaults() {
        let config = LabConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.particles.count, 60);
        assert_eq!(config.optimizer.objective, Objective::Quadratic);
        assert!((config.grid_world.discount - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.regression.dataset_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = LabConfig::builder()
            .seed(12345)
            .particle_count(10)
            .objective(Objective::Himmelblau)
            .optimizer(OptimizerKind::Momentum)
            .loss(LossKind::Huber)
            .build();

        assert_eq!(config.particles.count, 10);
        assert_eq!(config.optimizer.objective, Objective::Himmelblau);
        assert_eq!(config.optimizer.optimizer, OptimizerKind::Momentum);
        assert_eq!(config.regression.loss, LossKind::Huber);
    }

    #[test]
    fn test_builder_seed_partitions_streams() {
        let a = LabConfig::builder().seed(7).build();
        let b = LabConfig::builder().seed(7).build();
        let c = LabConfig::builder().seed(8).build();

        assert_eq!(a.particles.seed, b.particles.seed);
        assert_eq!(a.regression.seed, b.regression.seed);
        assert_ne!(a.particles.seed, c.particles.seed);

        let seeds = [
            a.particles.seed,
            a.optimizer.seed,
            a.grid_world.seed,
            a.regression.seed,
        ];
        for (i, x) in seeds.iter().enumerate() {
            for y in &seeds[i + 1..] {
                assert_ne!(x, y);
            }
        }
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
schema_version: '1.0'
particles:
  count: 12
optimizer:
  objective: rosenbrock
  optimizer: adam
grid_world:
  epsilon: 0.2
regression:
  loss: cross-entropy
";
        let config = LabConfig::from_yaml(yaml);
        assert!(config.is_ok());

        let config = config.ok();
        assert_eq!(config.as_ref().map(|c| c.particles.count), Some(12));
        assert_eq!(
            config.as_ref().map(|c| c.optimizer.optimizer),
            Some(OptimizerKind::Adam)
        );
        assert_eq!(
            config.as_ref().map(|c| c.regression.loss),
            Some(LossKind::CrossEntropy)
        );
        // Untouched keys keep their defaults.
        assert_eq!(config.as_ref().map(|c| c.particles.max_degree), Some(3));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = LabConfig::from_yaml("{}");
        assert!(config.is_ok());
        assert_eq!(config.ok().map(|c| c.regression.dataset_size), Some(20));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = LabConfig::from_yaml("renderer: webgl\n");
        assert!(matches!(result, Err(LabError::YamlParse(_))));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = LabConfig::from_yaml("grid_world:\n  epsilon: 1.5\n");
        assert!(matches!(result, Err(LabError::Validation(_))));

        let result = LabConfig::from_yaml("optimizer:\n  learning_rate: 0.0\n");
        assert!(matches!(result, Err(LabError::Validation(_))));
    }

    #[test]
    fn test_non_finite_rejected_in_every_section() {
        for yaml in [
            "particles:\n  bound: .nan\n",
            "particles:\n  max_distance: .inf\n",
            "optimizer:\n  start_x: .nan\n",
            "grid_world:\n  learning_rate: .nan\n",
            "regression:\n  learning_rate: .nan\n",
        ] {
            let result = LabConfig::from_yaml(yaml);
            assert!(matches!(result, Err(LabError::Validation(_))), "{yaml}");
        }
    }

    #[test]
    fn test_min_epsilon_above_epsilon_rejected() {
        let result = LabConfig::from_yaml("grid_world:\n  epsilon: 0.1\n  min_epsilon: 0.5\n");
        assert!(result.as_ref().is_err_and(LabError::is_config_error));
    }

    #[test]
    fn test_load_missing_file() {
        let result = LabConfig::load("/nonexistent/labsim.yaml");
        assert!(matches!(result, Err(LabError::Io(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = LabConfig::builder().seed(3).build();
        let yaml = serde_yaml::to_string(&config);
        assert!(yaml.is_ok());
        let parsed = yaml.ok().map(|y| LabConfig::from_yaml(&y));
        let parsed = parsed.and_then(Result::ok);
        assert_eq!(
            parsed.as_ref().map(|c| c.grid_world.seed),
            Some(config.grid_world.seed)
        );
    }
}
