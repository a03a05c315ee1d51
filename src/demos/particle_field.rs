//! Particle field: drifting points with pointer repulsion.
//!
//! # Governing Rules
//!
//! ```text
//! Integration:  p ← p + v                         (Euler, unit timestep)
//! Repulsion:    p ← p + (Δ/d)·((R − d)/R)·k       if 0 < d < R
//! Wrap:         x > B ⇒ x = −B,  x < −B ⇒ x = B   (toroidal, per axis)
//! ```
//!
//! Repulsion is a transient displacement: it moves the particle this tick
//! and leaves its velocity untouched. The pointer rests at the origin until
//! a host moves it, so particles near the centre are pushed from the first
//! tick. Particles never collide with each
//! other. The depth coordinate is fixed at creation and only matters for
//! the proximity graph.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::engine::{require_finite, DemoEngine};
use super::proximity::{build_edges, ConnectionEdge};
use crate::engine::rng::SimRng;

fn default_seed() -> u64 {
    42
}

/// Particle field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_particle_config"))]
#[serde(default)]
pub struct ParticleFieldConfig {
    /// Number of particles.
    #[validate(range(max = 10_000))]
    pub count: usize,
    /// Half-width of the square domain on both planar axes.
    #[validate(range(min = 0.001))]
    pub bound: f64,
    /// Half-width of the depth range particles are placed in.
    #[validate(range(min = 0.0))]
    pub depth: f64,
    /// Maximum absolute velocity component.
    #[validate(range(min = 0.0))]
    pub max_speed: f64,
    /// Pointer repulsion radius R.
    #[validate(range(min = 0.0))]
    pub repulsion_radius: f64,
    /// Repulsion strength k.
    #[validate(range(min = 0.0))]
    pub repulsion_strength: f64,
    /// Simulation-space half-width covered by the viewport.
    #[validate(range(min = 0.0))]
    pub viewport_half_width: f64,
    /// Simulation-space half-height covered by the viewport.
    #[validate(range(min = 0.0))]
    pub viewport_half_height: f64,
    /// Proximity graph: links per lower endpoint.
    #[validate(range(max = 64))]
    pub max_degree: usize,
    /// Proximity graph: strict linking distance.
    #[validate(range(min = 0.0))]
    pub max_distance: f64,
    /// RNG seed for placement.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn validate_particle_config(config: &ParticleFieldConfig) -> Result<(), ValidationError> {
    require_finite(&[
        ("bound", config.bound),
        ("depth", config.depth),
        ("max_speed", config.max_speed),
        ("repulsion_radius", config.repulsion_radius),
        ("repulsion_strength", config.repulsion_strength),
        ("viewport_half_width", config.viewport_half_width),
        ("viewport_half_height", config.viewport_half_height),
        ("max_distance", config.max_distance),
    ])
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 60,
            bound: 10.0,
            depth: 5.0,
            max_speed: 0.005,
            repulsion_radius: 3.0,
            repulsion_strength: 0.02,
            viewport_half_width: 10.0,
            viewport_half_height: 10.0,
            max_degree: 3,
            max_distance: 2.5,
            seed: default_seed(),
        }
    }
}

/// Pointer position in normalized device coordinates, `[-1, 1]` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    /// Horizontal coordinate (right is positive).
    pub x: f64,
    /// Vertical coordinate (up is positive).
    pub y: f64,
}

impl Pointer {
    /// Create a pointer.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position `(x, y, depth)`.
    pub position: [f64; 3],
    /// Planar velocity `(vx, vy)`.
    pub velocity: [f64; 2],
}

/// Snapshot for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleFieldState {
    /// All particles.
    pub particles: Vec<Particle>,
    /// Proximity links at snapshot time.
    pub edges: Vec<ConnectionEdge>,
    /// Pointer in simulation space, if one is active.
    pub pointer: Option<[f64; 2]>,
    /// Step count.
    pub step_count: u64,
}

/// Per-tick summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleStepResult {
    /// Particles displaced by the pointer this tick.
    pub repelled: usize,
    /// Particles that wrapped across the domain edge this tick.
    pub wrapped: usize,
}

/// Particle field simulator.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticleFieldConfig,
    particles: Vec<Particle>,
    pointer: Option<Pointer>,
    step_count: u64,
    seed: u64,
}

impl ParticleField {
    /// Build a field from explicit particles instead of random placement.
    #[must_use]
    pub fn with_particles(config: ParticleFieldConfig, particles: Vec<Particle>) -> Self {
        let seed = config.seed;
        Self {
            config,
            particles,
            pointer: Some(Pointer::default()),
            step_count: 0,
            seed,
        }
    }

    /// Current particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Set the pointer (normalized device coordinates).
    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = Some(pointer);
    }

    /// Remove the pointer; no repulsion is applied until it returns.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Set the pointer, then advance one tick.
    pub fn step_with_pointer(&mut self, pointer: Pointer) -> ParticleStepResult {
        self.set_pointer(pointer);
        self.step()
    }

    /// Pointer scaled into simulation space.
    #[must_use]
    pub fn pointer_in_sim_space(&self) -> Option<[f64; 2]> {
        self.pointer.map(|p| {
            [
                p.x * self.config.viewport_half_width,
                p.y * self.config.viewport_half_height,
            ]
        })
    }

    /// Proximity edges among the current positions.
    #[must_use]
    pub fn connections(&self) -> Vec<ConnectionEdge> {
        let positions: Vec<[f64; 3]> = self.particles.iter().map(|p| p.position).collect();
        build_edges(&positions, self.config.max_degree, self.config.max_distance)
    }

    fn spawn(config: &ParticleFieldConfig, seed: u64) -> Vec<Particle> {
        let mut rng = SimRng::new(seed);
        (0..config.count)
            .map(|_| Particle {
                position: [
                    rng.gen_symmetric(config.bound),
                    rng.gen_symmetric(config.bound),
                    rng.gen_symmetric(config.depth),
                ],
                velocity: [
                    rng.gen_symmetric(config.max_speed),
                    rng.gen_symmetric(config.max_speed),
                ],
            })
            .collect()
    }

    /// Repulsion displacement for a particle at `(x, y)`; zero outside the
    /// radius and exactly at the pointer.
    fn repulsion(&self, x: f64, y: f64, pointer: [f64; 2]) -> Option<[f64; 2]> {
        let radius = self.config.repulsion_radius;
        let dx = x - pointer[0];
        let dy = y - pointer[1];
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > 0.0 && dist < radius {
            let force = (radius - dist) / radius * self.config.repulsion_strength;
            Some([dx / dist * force, dy / dist * force])
        } else {
            None
        }
    }

    fn wrap(value: f64, bound: f64) -> (f64, bool) {
        if value > bound {
            (-bound, true)
        } else if value < -bound {
            (bound, true)
        } else {
            (value, false)
        }
    }
}

impl DemoEngine for ParticleField {
    type Config = ParticleFieldConfig;
    type State = ParticleFieldState;
    type StepResult = ParticleStepResult;

    fn from_config(config: Self::Config) -> Self {
        let seed = config.seed;
        let particles = Self::spawn(&config, seed);
        Self {
            config,
            particles,
            pointer: Some(Pointer::default()),
            step_count: 0,
            seed,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.particles = Self::spawn(&self.config, seed);
        self.pointer = Some(Pointer::default());
        self.step_count = 0;
        tracing::debug!(seed, count = self.particles.len(), "particle field reset");
    }

    fn step(&mut self) -> Self::StepResult {
        self.step_count += 1;

        let pointer = self.pointer_in_sim_space();
        let bound = self.config.bound;
        let mut result = ParticleStepResult {
            repelled: 0,
            wrapped: 0,
        };

        for i in 0..self.particles.len() {
            let Particle { position, velocity } = self.particles[i];
            let mut x = position[0] + velocity[0];
            let mut y = position[1] + velocity[1];

            if let Some(push) = pointer.and_then(|p| self.repulsion(x, y, p)) {
                x += push[0];
                y += push[1];
                result.repelled += 1;
            }

            let (x, wrapped_x) = Self::wrap(x, bound);
            let (y, wrapped_y) = Self::wrap(y, bound);
            if wrapped_x || wrapped_y {
                result.wrapped += 1;
            }

            self.particles[i].position[0] = x;
            self.particles[i].position[1] = y;
        }

        result
    }

    fn state(&self) -> Self::State {
        ParticleFieldState {
            particles: self.particles.clone(),
            edges: self.connections(),
            pointer: self.pointer_in_sim_space(),
            step_count: self.step_count,
        }
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn name(&self) -> &'static str {
        "Particle Field"
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{DemoEngine, ParticleField, ParticleFieldConfig, Pointer};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmParticleField {
        inner: ParticleField,
    }

    #[wasm_bindgen]
    impl WasmParticleField {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u64, count: usize) -> Self {
            let config = ParticleFieldConfig {
                count,
                seed,
                ..ParticleFieldConfig::default()
            };
            Self {
                inner: ParticleField::from_config(config),
            }
        }

        pub fn step(&mut self, pointer_x: f64, pointer_y: f64) {
            self.inner.step_with_pointer(Pointer::new(pointer_x, pointer_y));
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }

        pub fn get_positions(&self) -> Vec<f64> {
            self.inner
                .particles()
                .iter()
                .flat_map(|p| p.position)
                .collect()
        }

        pub fn get_state_json(&self) -> String {
            serde_json::to_string(&self.inner.state()).unwrap_or_default()
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_coordinates_stay_in_domain(
            seed in 0u64..5_000,
            count in 0usize..40,
            px in -1.0f64..1.0,
            py in -1.0f64..1.0,
            steps in 1usize..200,
        ) {
            let config = ParticleFieldConfig {
                count,
                seed,
                max_speed: 0.5,
                ..ParticleFieldConfig::default()
            };
            let bound = config.bound;
            let mut field = ParticleField::from_config(config);
            for _ in 0..steps {
                field.step_with_pointer(Pointer::new(px, py));
                for p in field.particles() {
                    prop_assert!(p.position[0] >= -bound && p.position[0] <= bound);
                    prop_assert!(p.position[1] >= -bound && p.position[1] <= bound);
                }
            }
        }
    }
}
