//! Aggregate statistics reported to external observers.

use serde::Serialize;

use super::world::World;

/// Point-in-time summary of a running world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    /// Completed generation count.
    pub generation: u32,
    /// Ticks elapsed in the current generation.
    pub ticks: u32,
    /// Entities currently alive.
    pub alive: usize,
    /// Food pellets currently on the ground.
    pub food: usize,
    /// Mean fitness across the population; 0 when the population is empty.
    pub avg_fitness: f32,
    /// Highest fitness in the population; 0 when the population is empty.
    pub best_fitness: f32,
}

impl Stats {
    /// Collects statistics from the world's current state.
    pub fn gather(world: &World) -> Self {
        let alive = world.entities.len();
        let (avg_fitness, best_fitness) = if alive == 0 {
            (0.0, 0.0)
        } else {
            let total: f32 = world.entities.iter().map(|e| e.fitness).sum();
            let best = world
                .entities
                .iter()
                .map(|e| e.fitness)
                .fold(f32::NEG_INFINITY, f32::max);
            (total / alive as f32, best)
        };

        Self {
            generation: world.generation,
            ticks: world.ticks,
            alive,
            food: world.foods.len(),
            avg_fitness,
            best_fitness,
        }
    }
}
