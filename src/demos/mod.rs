//! Lab demos - small numerical engines driven one tick at a time.
//!
//! Every demo implements [`DemoEngine`], so a scheduler, the CLI and the
//! WASM wrappers can drive any of them the same way.
//!
//! # Demos
//!
//! 1. [`particle_field`] - drifting particles with pointer repulsion and a
//!    [`proximity`] graph rebuilt every frame
//! 2. [`gradient_descent`] - SGD, momentum and Adam on three landscapes
//! 3. [`grid_world`] - tabular Q-learning in a walled maze
//! 4. [`regression`] - linear regression reported under four losses

pub mod engine;
pub mod gradient_descent;
pub mod grid_world;
pub mod particle_field;
pub mod proximity;
pub mod regression;

pub use engine::{snapshot_json, DemoEngine};
pub use gradient_descent::{FunctionOptimizer, Objective, OptimizerConfig, OptimizerKind};
pub use grid_world::{Action, GridWorldAgent, GridWorldConfig};
pub use particle_field::{ParticleField, ParticleFieldConfig, Pointer};
pub use proximity::{ConnectionEdge, ProximityGraphBuilder};
pub use regression::{LossKind, RegressionConfig, RegressionTrainer};
