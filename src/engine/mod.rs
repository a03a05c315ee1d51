//! Shared engine infrastructure.
//!
//! Engines own all of their state; the only thing they share is the way
//! they draw randomness.

pub mod rng;

pub use rng::SimRng;
