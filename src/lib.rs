//! # labsim
//!
//! Interactive numerical lab demos driven one tick at a time.
//!
//! Four small engines share one lifecycle ([`demos::DemoEngine`]):
//! - Particle field with pointer repulsion and a proximity graph
//! - Gradient descent (SGD, momentum, Adam) on three landscapes
//! - Tabular Q-learning in a walled maze
//! - Linear regression reported under four losses
//!
//! Every engine is seeded, so the same configuration replays the same
//! state sequence.
//!
//! ## Example
//!
//! ```rust
//! use labsim::prelude::*;
//!
//! let config = LabConfig::builder().seed(42).build();
//! let mut optimizer = FunctionOptimizer::from_config(config.optimizer);
//! optimizer.run_until_complete(500);
//! assert!(optimizer.is_complete());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod cli;
pub mod config;
pub mod demos;
pub mod engine;
pub mod error;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LabConfig, LabConfigBuilder};
    pub use crate::demos::{
        DemoEngine, FunctionOptimizer, GridWorldAgent, ParticleField, RegressionTrainer,
    };
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{LabError, LabResult};
}

/// Re-export for public API
pub use error::{LabError, LabResult};
