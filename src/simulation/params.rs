//! Simulation parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable simulation parameters.
///
/// Every field has a sensible default, so partial JSON configs work: missing
/// fields fall back to `Params::default()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// World width in world units.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Number of entities bred into each generation.
    pub population_size: usize,
    /// Food pellets present at world init and topped up after each generation.
    pub initial_food_count: usize,
    /// Hard cap on concurrent food pellets.
    pub max_food_count: usize,
    /// Per-tick probability of spawning one pellet while below the cap.
    pub food_spawn_rate: f32,
    /// Ticks per generation.
    pub generation_duration: u32,
    /// Number of obstacles placed at world init.
    pub obstacle_count: usize,
    /// Hidden layer widths for newly created brains.
    pub hidden_layers: Vec<usize>,
    /// Per-weight mutation probability applied when breeding.
    pub mutation_rate: f32,
    /// Ticks advanced per external frame.
    pub simulation_speed: usize,
    /// Energy a fresh entity starts with; also the energy normalizer for
    /// brain inputs.
    pub initial_energy: f32,
    /// Energy an entity must exceed to reproduce mid-generation.
    pub reproduction_min_energy: f32,
    /// Energy deducted from a parent per offspring.
    pub reproduction_cost: f32,
    /// Brain output above which an entity tries to reproduce.
    pub reproduction_threshold: f32,
    /// The population may transiently grow to `population_size * headroom`
    /// through in-generation reproduction.
    pub population_headroom: f32,
    /// Energy lost when a move is rejected by an obstacle.
    pub obstacle_penalty: f32,
    /// Displacement per tick below which an entity counts as stagnant.
    pub movement_threshold: f32,
    /// Stagnant ticks tolerated before penalties kick in.
    pub stagnation_limit: u32,
    /// Energy drained per tick while stagnating past the limit.
    pub stagnation_energy_penalty: f32,
    /// Fitness drained per tick while stagnating past the limit.
    pub stagnation_fitness_penalty: f32,
    /// Flat energy drain per tick.
    pub base_energy_decay: f32,
    /// Additional energy drain per unit of speed.
    pub speed_energy_decay: f32,
    /// Fitness gained per tick alive.
    pub survival_reward: f32,
    /// Energy gained per unit of consumed pellet size.
    pub food_energy_factor: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            world_height: 800.0,
            population_size: 20,
            initial_food_count: 300,
            max_food_count: 300,
            food_spawn_rate: 0.05,
            generation_duration: 1000,
            obstacle_count: 10,
            hidden_layers: vec![16, 16, 8],
            mutation_rate: 0.1,
            simulation_speed: 1,
            initial_energy: 100.0,
            reproduction_min_energy: 50.0,
            reproduction_cost: 30.0,
            reproduction_threshold: 0.8,
            population_headroom: 1.5,
            obstacle_penalty: 5.0,
            movement_threshold: 0.5,
            stagnation_limit: 50,
            stagnation_energy_penalty: 0.5,
            stagnation_fitness_penalty: 0.1,
            base_energy_decay: 0.1,
            speed_energy_decay: 0.05,
            survival_reward: 0.1,
            food_energy_factor: 10.0,
        }
    }
}

/// Rejection reasons for parameter sets the simulation cannot run with.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// World dimensions must be finite and positive.
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidWorldSize {
        /// Offending width.
        width: f32,
        /// Offending height.
        height: f32,
    },
    /// A generation must breed at least one entity.
    #[error("population size must be at least 1")]
    EmptyPopulation,
    /// Mutation is a probability.
    #[error("mutation rate must be in [0, 1], got {0}")]
    MutationRateOutOfRange(f32),
    /// The brain topology needs at least one hidden layer.
    #[error("at least one hidden layer is required")]
    NoHiddenLayers,
    /// Zero-width layers would collapse the network.
    #[error("hidden layer widths must be nonzero")]
    ZeroWidthLayer,
    /// A generation must last at least one tick.
    #[error("generation duration must be at least 1 tick")]
    ZeroGenerationDuration,
}

impl Params {
    /// Checks the parameter set for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.world_width.is_finite()
            || !self.world_height.is_finite()
            || self.world_width <= 0.0
            || self.world_height <= 0.0
        {
            return Err(ParamsError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ParamsError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.hidden_layers.is_empty() {
            return Err(ParamsError::NoHiddenLayers);
        }
        if self.hidden_layers.contains(&0) {
            return Err(ParamsError::ZeroWidthLayer);
        }
        if self.generation_duration == 0 {
            return Err(ParamsError::ZeroGenerationDuration);
        }
        Ok(())
    }
}
