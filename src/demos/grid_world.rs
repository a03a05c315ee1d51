//! Tabular Q-learning on a fixed walled maze.
//!
//! # Governing Equation
//!
//! ```text
//! Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·maxₐ' Q(s',a'))
//! ```
//!
//! # Maze
//!
//! ```text
//!   x: 0 1 2 3 4 5 6 7
//! y=0  # # # # # # # #
//! y=1  # S . . . . . #
//! y=2  # . . # . . . #
//! y=3  # . . # . . . #
//! y=4  # . . # # # # #
//! y=5  # . . # . . . #
//! y=6  # . . . . . G #
//! y=7  # # # # # # # #
//! ```
//!
//! A move into a wall or off the grid is a bump: the agent stays put, but
//! the chosen action's Q-value is still updated with `s' = s`. Reaching the
//! goal ends the episode and sends the agent back to the start.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::engine::{require_finite, DemoEngine};
use crate::engine::rng::SimRng;

/// Side length of the maze.
pub const GRID_SIZE: usize = 8;
/// Start cell.
pub const START: [usize; 2] = [1, 1];
/// Goal cell.
pub const GOAL: [usize; 2] = [GRID_SIZE - 2, GRID_SIZE - 2];
/// Reward for entering the goal.
pub const GOAL_REWARD: f64 = 10.0;
/// Reward for every other move, bumps included.
pub const STEP_REWARD: f64 = -0.1;

/// Cardinal moves. Declaration order is the greedy tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// y − 1.
    Up,
    /// y + 1.
    Down,
    /// x − 1.
    Left,
    /// x + 1.
    Right,
}

impl Action {
    /// All actions in tie-break order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Grid offset `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Arrow glyph for policy overlays.
    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
            Self::Left => '←',
            Self::Right => '→',
        }
    }
}

/// Q-values of one cell, keyed by action.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QValues {
    /// Q(s, up).
    pub up: f64,
    /// Q(s, down).
    pub down: f64,
    /// Q(s, left).
    pub left: f64,
    /// Q(s, right).
    pub right: f64,
}

impl QValues {
    /// Value for `action`.
    #[must_use]
    pub const fn get(&self, action: Action) -> f64 {
        match action {
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Left => self.left,
            Action::Right => self.right,
        }
    }

    /// Overwrite the value for `action`.
    pub fn set(&mut self, action: Action, value: f64) {
        match action {
            Action::Up => self.up = value,
            Action::Down => self.down = value,
            Action::Left => self.left = value,
            Action::Right => self.right = value,
        }
    }

    /// Highest value.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.up.max(self.down).max(self.left).max(self.right)
    }

    /// Highest-valued action; the first in `Action::ALL` wins ties.
    #[must_use]
    pub fn best_action(&self) -> Action {
        let mut best = Action::Up;
        for action in Action::ALL {
            if self.get(action) > self.get(best) {
                best = action;
            }
        }
        best
    }
}

/// One maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Impassable.
    pub is_wall: bool,
    /// Terminal cell.
    pub is_goal: bool,
    /// Learned action values.
    pub q_values: QValues,
}

/// Maze layout plus Q-table, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<GridCell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Build the fixed maze with a zeroed Q-table.
    #[must_use]
    pub fn new() -> Self {
        let n = GRID_SIZE;
        let mut cells = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let is_wall = x == 0
                    || x == n - 1
                    || y == 0
                    || y == n - 1
                    || (x == 3 && y > 1 && y < 6)
                    || (y == 4 && x > 3 && x < 7);
                cells.push(GridCell {
                    x,
                    y,
                    is_wall,
                    is_goal: [x, y] == GOAL,
                    q_values: QValues::default(),
                });
            }
        }
        Self { cells }
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell at `(x, y)`, if in bounds.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&GridCell> {
        if x < GRID_SIZE && y < GRID_SIZE {
            self.cells.get(y * GRID_SIZE + x)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut GridCell> {
        if x < GRID_SIZE && y < GRID_SIZE {
            self.cells.get_mut(y * GRID_SIZE + x)
        } else {
            None
        }
    }

    /// Whether `(x, y)` is in bounds and not a wall.
    #[must_use]
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|c| !c.is_wall)
    }

    /// Whether `(x, y)` is the goal.
    #[must_use]
    pub fn is_goal(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|c| c.is_goal)
    }

    /// Cell reached by `action` from `(x, y)`, or `None` on a bump.
    #[must_use]
    pub fn target(&self, x: usize, y: usize, action: Action) -> Option<[usize; 2]> {
        let (dx, dy) = action.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.is_open(nx, ny).then_some([nx, ny])
    }

    /// Q-values at `(x, y)`; zero for out-of-bounds lookups.
    #[must_use]
    pub fn q_values(&self, x: usize, y: usize) -> QValues {
        self.cell(x, y).map(|c| c.q_values).unwrap_or_default()
    }
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_epsilon() -> f64 {
    0.3
}

fn default_decay() -> f64 {
    1.0
}

fn default_discount() -> f64 {
    0.9
}

fn default_seed() -> u64 {
    42
}

/// Grid world configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_grid_world_config"))]
pub struct GridWorldConfig {
    /// Learning rate α.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Exploration probability ε.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Multiplier applied to ε after each finished episode.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_decay")]
    pub epsilon_decay: f64,
    /// Floor for decayed ε.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub min_epsilon: f64,
    /// Discount γ.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_discount")]
    pub discount: f64,
    /// RNG seed for exploration.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn validate_grid_world_config(config: &GridWorldConfig) -> Result<(), ValidationError> {
    require_finite(&[
        ("learning_rate", config.learning_rate),
        ("epsilon", config.epsilon),
        ("epsilon_decay", config.epsilon_decay),
        ("min_epsilon", config.min_epsilon),
        ("discount", config.discount),
    ])?;
    if config.min_epsilon > config.epsilon {
        let mut err = ValidationError::new("min_epsilon_above_epsilon");
        err.message = Some(
            format!(
                "min_epsilon ({}) exceeds epsilon ({})",
                config.min_epsilon, config.epsilon
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epsilon: default_epsilon(),
            epsilon_decay: default_decay(),
            min_epsilon: 0.0,
            discount: default_discount(),
            seed: default_seed(),
        }
    }
}

/// Grid world snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldState {
    /// Agent cell.
    pub agent: [usize; 2],
    /// Completed episodes.
    pub episode: u64,
    /// Steps in the current episode.
    pub episode_steps: u64,
    /// Reward accumulated across the whole run.
    pub total_reward: f64,
    /// Current exploration probability.
    pub epsilon: f64,
    /// Maze with Q-values.
    pub grid: Grid,
}

/// Step result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStepResult {
    /// Action taken; `None` when no move was available.
    pub action: Option<Action>,
    /// Reward received.
    pub reward: f64,
    /// The move hit a wall or the edge.
    pub bumped: bool,
    /// The move entered the goal.
    pub reached_goal: bool,
}

/// Greedy walk from the start, without learning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollout {
    /// Visited cells, start first.
    pub path: Vec<[usize; 2]>,
    /// The walk ended on a bump.
    pub bumped: bool,
    /// The walk ended on the goal.
    pub reached_goal: bool,
}

/// Q-learning agent.
#[derive(Debug, Clone)]
pub struct GridWorldAgent {
    config: GridWorldConfig,
    grid: Grid,
    agent: [usize; 2],
    episode: u64,
    episode_steps: u64,
    total_reward: f64,
    epsilon: f64,
    rng: SimRng,
    step_count: u64,
    seed: u64,
}

impl GridWorldAgent {
    /// Current agent cell.
    #[must_use]
    pub const fn agent(&self) -> [usize; 2] {
        self.agent
    }

    /// The maze and Q-table.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Completed episodes.
    #[must_use]
    pub const fn episode(&self) -> u64 {
        self.episode
    }

    /// Current exploration probability.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Set ε (clamped to [0, 1]); also becomes the reset value.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        if epsilon.is_finite() {
            self.epsilon = epsilon.clamp(0.0, 1.0);
            self.config.epsilon = self.epsilon;
        }
    }

    /// Set α (clamped to [0, 1]).
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        if learning_rate.is_finite() {
            self.config.learning_rate = learning_rate.clamp(0.0, 1.0);
        }
    }

    /// Greedy action at `(x, y)`.
    #[must_use]
    pub fn greedy_action(&self, x: usize, y: usize) -> Action {
        self.grid.q_values(x, y).best_action()
    }

    /// Highest Q-value at `(x, y)`, for heatmaps.
    #[must_use]
    pub fn best_q_value(&self, x: usize, y: usize) -> f64 {
        self.grid.q_values(x, y).max()
    }

    /// Greedy action per cell, `[y][x]`; `None` for walls and the goal.
    #[must_use]
    pub fn policy(&self) -> Vec<Vec<Option<Action>>> {
        (0..GRID_SIZE)
            .map(|y| {
                (0..GRID_SIZE)
                    .map(|x| {
                        self.grid
                            .cell(x, y)
                            .filter(|c| !c.is_wall && !c.is_goal)
                            .map(|c| c.q_values.best_action())
                    })
                    .collect()
            })
            .collect()
    }

    /// Follow the greedy policy from the start for at most `max_steps`.
    #[must_use]
    pub fn greedy_rollout(&self, max_steps: usize) -> Rollout {
        let mut position = START;
        let mut rollout = Rollout {
            path: vec![position],
            bumped: false,
            reached_goal: false,
        };

        for _ in 0..max_steps {
            let action = self.greedy_action(position[0], position[1]);
            let Some(next) = self.grid.target(position[0], position[1], action) else {
                rollout.bumped = true;
                break;
            };
            position = next;
            rollout.path.push(position);
            if self.grid.is_goal(position[0], position[1]) {
                rollout.reached_goal = true;
                break;
            }
        }

        rollout
    }

    fn choose_action(&mut self) -> Option<Action> {
        let [x, y] = self.agent;
        if self.rng.gen_bool(self.epsilon) {
            let valid: Vec<Action> = Action::ALL
                .into_iter()
                .filter(|a| self.grid.target(x, y, *a).is_some())
                .collect();
            let idx = self.rng.gen_index(valid.len())?;
            valid.get(idx).copied()
        } else {
            Some(self.greedy_action(x, y))
        }
    }

    fn finish_episode(&mut self) {
        self.episode += 1;
        self.agent = START;
        self.episode_steps = 0;
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
        tracing::debug!(
            episode = self.episode,
            total_reward = self.total_reward,
            epsilon = self.epsilon,
            "episode finished"
        );
    }
}

impl DemoEngine for GridWorldAgent {
    type Config = GridWorldConfig;
    type State = GridWorldState;
    type StepResult = GridStepResult;

    fn from_config(config: Self::Config) -> Self {
        let seed = config.seed;
        let epsilon = config.epsilon;
        Self {
            config,
            grid: Grid::new(),
            agent: START,
            episode: 0,
            episode_steps: 0,
            total_reward: 0.0,
            epsilon,
            rng: SimRng::new(seed),
            step_count: 0,
            seed,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = SimRng::new(seed);
        self.grid = Grid::new();
        self.agent = START;
        self.episode = 0;
        self.episode_steps = 0;
        self.total_reward = 0.0;
        self.epsilon = self.config.epsilon;
        self.step_count = 0;
        tracing::debug!(seed, "grid world reset");
    }

    fn step(&mut self) -> Self::StepResult {
        self.step_count += 1;

        let Some(action) = self.choose_action() else {
            return GridStepResult {
                action: None,
                reward: 0.0,
                bumped: false,
                reached_goal: false,
            };
        };

        let [x, y] = self.agent;
        let target = self.grid.target(x, y, action);
        let bumped = target.is_none();
        let [nx, ny] = target.unwrap_or(self.agent);

        let reached_goal = self.grid.is_goal(nx, ny);
        let reward = if reached_goal { GOAL_REWARD } else { STEP_REWARD };

        let alpha = self.config.learning_rate;
        let gamma = self.config.discount;
        let best_next = self.grid.q_values(nx, ny).max();
        if let Some(cell) = self.grid.cell_mut(x, y) {
            let old = cell.q_values.get(action);
            let updated = (1.0 - alpha) * old + alpha * (reward + gamma * best_next);
            cell.q_values.set(action, updated);
        }

        self.total_reward += reward;

        if reached_goal {
            self.finish_episode();
        } else {
            self.agent = [nx, ny];
            self.episode_steps += 1;
        }

        GridStepResult {
            action: Some(action),
            reward,
            bumped,
            reached_goal,
        }
    }

    fn state(&self) -> Self::State {
        GridWorldState {
            agent: self.agent,
            episode: self.episode,
            episode_steps: self.episode_steps,
            total_reward: self.total_reward,
            epsilon: self.epsilon,
            grid: self.grid.clone(),
        }
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn name(&self) -> &'static str {
        "Q-Learning Maze"
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

#[cfg(feature = "wasm")]
mod wasm {
    use super::{DemoEngine, GridWorldAgent, GridWorldConfig};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmGridWorld {
        inner: GridWorldAgent,
    }

    #[wasm_bindgen]
    impl WasmGridWorld {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u64) -> Self {
            let config = GridWorldConfig {
                seed,
                ..GridWorldConfig::default()
            };
            Self {
                inner: GridWorldAgent::from_config(config),
            }
        }

        pub fn step(&mut self) {
            self.inner.step();
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }

        pub fn set_epsilon(&mut self, epsilon: f64) {
            self.inner.set_epsilon(epsilon);
        }

        pub fn set_learning_rate(&mut self, learning_rate: f64) {
            self.inner.set_learning_rate(learning_rate);
        }

        pub fn get_agent_x(&self) -> usize {
            self.inner.agent()[0]
        }

        pub fn get_agent_y(&self) -> usize {
            self.inner.agent()[1]
        }

        pub fn get_episode(&self) -> u64 {
            self.inner.episode()
        }

        pub fn get_state_json(&self) -> String {
            serde_json::to_string(&self.inner.state()).unwrap_or_default()
        }
    }
}
