//! Demo parity suite.
//!
//! Every lab demo is driven through the same lifecycle checks:
//!
//! 1. YAML Loading - all demos load from YAML configs
//! 2. Deterministic Replay - same seed produces identical states
//! 3. State Parity - two instances produce identical state sequences
//! 4. Reset - reset after any run equals a fresh engine

#![allow(clippy::unwrap_used, clippy::expect_used)]

use labsim::demos::{
    DemoEngine, FunctionOptimizer, GridWorldAgent, ParticleField, RegressionTrainer,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Object-safe wrapper trait for heterogeneous engine testing.
trait DemoEngineObject {
    fn step_engine(&mut self);
    fn state_hash(&self) -> u64;
    fn state_json(&self) -> String;
    fn step_count_val(&self) -> u64;
    fn seed_val(&self) -> u64;
    fn reset_val(&mut self);
    fn reset_with_seed_val(&mut self, seed: u64);
    fn name_val(&self) -> &'static str;
}

impl<E: DemoEngine> DemoEngineObject for E {
    fn step_engine(&mut self) {
        self.step();
    }

    fn state_hash(&self) -> u64 {
        self.state_checksum()
    }

    fn state_json(&self) -> String {
        labsim::demos::snapshot_json(self).expect("serializable state")
    }

    fn step_count_val(&self) -> u64 {
        self.step_count()
    }

    fn seed_val(&self) -> u64 {
        self.seed()
    }

    fn reset_val(&mut self) {
        self.reset();
    }

    fn reset_with_seed_val(&mut self, seed: u64) {
        self.reset_with_seed(seed);
    }

    fn name_val(&self) -> &'static str {
        self.name()
    }
}

const PARTICLES_YAML: &str = "count: 30\nseed: 11\n";
const OPTIMIZER_YAML: &str = "objective: himmelblau\noptimizer: adam\nlearning_rate: 0.05\nseed: 11\n";
const GRID_WORLD_YAML: &str = "epsilon: 0.4\nlearning_rate: 0.2\nseed: 11\n";
const REGRESSION_YAML: &str = "loss: huber\ndataset_size: 25\nseed: 11\n";

fn all_engines() -> Vec<Box<dyn DemoEngineObject>> {
    vec![
        Box::new(ParticleField::from_yaml(PARTICLES_YAML).expect("particles yaml")),
        Box::new(FunctionOptimizer::from_yaml(OPTIMIZER_YAML).expect("optimizer yaml")),
        Box::new(GridWorldAgent::from_yaml(GRID_WORLD_YAML).expect("grid world yaml")),
        Box::new(RegressionTrainer::from_yaml(REGRESSION_YAML).expect("regression yaml")),
    ]
}

fn hash_sequence(engine: &mut dyn DemoEngineObject, steps: usize) -> Vec<u64> {
    (0..steps)
        .map(|_| {
            engine.step_engine();
            engine.state_hash()
        })
        .collect()
}

// =============================================================================
// 1. YAML Loading
// =============================================================================

#[test]
fn test_all_demos_load_from_yaml() {
    let engines = all_engines();
    assert_eq!(engines.len(), 4);
    for engine in &engines {
        assert_eq!(engine.seed_val(), 11, "{}", engine.name_val());
        assert_eq!(engine.step_count_val(), 0, "{}", engine.name_val());
    }
}

#[test]
fn test_invalid_yaml_rejected() {
    assert!(ParticleField::from_yaml("count: [1, 2]\n").is_err());
    assert!(FunctionOptimizer::from_yaml("optimizer: rmsprop\n").is_err());
    assert!(GridWorldAgent::from_yaml("discount: 1.5\n").is_err());
    assert!(RegressionTrainer::from_yaml("dataset_size: 20000\n").is_err());
}

#[test]
fn test_nan_config_rejected_by_every_demo() {
    assert!(ParticleField::from_yaml("bound: .nan\n").is_err());
    assert!(FunctionOptimizer::from_yaml("start_x: .nan\n").is_err());
    assert!(GridWorldAgent::from_yaml("learning_rate: .nan\n").is_err());
    assert!(RegressionTrainer::from_yaml("learning_rate: .nan\n").is_err());
}

// =============================================================================
// 2. Deterministic Replay
// =============================================================================

#[test]
fn test_replay_after_reset_matches() {
    for mut engine in all_engines() {
        let first = hash_sequence(engine.as_mut(), 200);
        engine.reset_val();
        let second = hash_sequence(engine.as_mut(), 200);
        assert_eq!(first, second, "{} replay diverged", engine.name_val());
    }
}

// =============================================================================
// 3. State Parity
// =============================================================================

#[test]
fn test_two_instances_in_lockstep() {
    let mut left = all_engines();
    let mut right = all_engines();
    for (a, b) in left.iter_mut().zip(right.iter_mut()) {
        for step in 0..150 {
            a.step_engine();
            b.step_engine();
            assert_eq!(
                a.state_json(),
                b.state_json(),
                "{} diverged at step {step}",
                a.name_val()
            );
        }
    }
}

#[test]
fn test_clone_continues_identically() {
    let mut agent = GridWorldAgent::from_yaml(GRID_WORLD_YAML).expect("grid world yaml");
    agent.run(500);
    let mut checkpoint = agent.clone();

    agent.run(500);
    checkpoint.run(500);
    assert_eq!(agent.state(), checkpoint.state());
}

// =============================================================================
// 4. Reset
// =============================================================================

#[test]
fn test_reset_equals_fresh_engine() {
    let fresh: Vec<String> = all_engines().iter().map(|e| e.state_json()).collect();
    for (mut engine, expected) in all_engines().into_iter().zip(fresh) {
        for _ in 0..300 {
            engine.step_engine();
        }
        engine.reset_val();
        assert_eq!(engine.step_count_val(), 0, "{}", engine.name_val());
        assert_eq!(engine.state_json(), expected, "{}", engine.name_val());
    }
}

#[test]
fn test_reset_with_seed_adopts_seed() {
    for mut engine in all_engines() {
        engine.reset_with_seed_val(99);
        assert_eq!(engine.seed_val(), 99, "{}", engine.name_val());
        assert_eq!(engine.step_count_val(), 0, "{}", engine.name_val());
    }
}

#[test]
fn test_step_count_tracks_calls() {
    for mut engine in all_engines() {
        for _ in 0..37 {
            engine.step_engine();
        }
        assert_eq!(engine.step_count_val(), 37, "{}", engine.name_val());
    }
}
