//! Entity state, sensing, and per-tick update logic.
//!
//! An entity decodes its brain's three outputs into a heading, a speed, and
//! a reproduction signal, then moves, bounces off world borders, backs off
//! from obstacles, and pays for all of it in energy. Fitness accrues for
//! staying alive and (through the world) for eating.

use std::f32::consts::{PI, TAU};

use ndarray::Array1;
use rand::Rng;

use super::brain::Brain;
use super::obstacle::Obstacle;
use super::params::Params;
use super::spatial::Positioned;

/// What an entity sensed at the start of its turn.
///
/// Offsets point from the entity to its nearest neighbor of each kind and
/// are already normalized by the world extents. A missing neighbor leaves
/// its pair at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SenseReport {
    /// Normalized offset to the nearest food pellet.
    pub food_offset: (f32, f32),
    /// Distance to the nearest food pellet, when one exists.
    pub food_distance: Option<f32>,
    /// Normalized offset to the nearest other entity.
    pub entity_offset: (f32, f32),
    /// Normalized offset to the nearest obstacle center.
    pub obstacle_offset: (f32, f32),
}

/// An autonomous agent with a position, an energy budget, and a brain.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique id, stable for the entity's lifetime.
    pub id: u64,
    /// X position, always within [0, world_width].
    pub x: f32,
    /// Y position, always within [0, world_height].
    pub y: f32,
    /// Travel direction in radians, always in [0, 2π) after an update.
    pub heading: f32,
    /// Distance covered per tick, decoded from the brain every update.
    pub speed: f32,
    /// Remaining energy; the entity dies at <= 0.
    pub energy: f32,
    /// Selection weight accumulated over the generation. May go negative.
    pub fitness: f32,
    /// Ticks lived this generation.
    pub age: u32,
    /// Distance to the nearest pellet the last time one was sensed.
    pub last_meal_distance: f32,
    /// Visual radius derived from energy, clamped to [5, 15].
    pub size: f32,
    /// Controlling brain, exclusively owned by this entity.
    pub brain: Brain,
    /// Per-layer activations from the latest decision, input vector first.
    /// Inspection only; the simulation itself never reads this.
    pub activations: Vec<Array1<f32>>,
    /// Position at the end of the previous tick.
    pub last_x: f32,
    /// Position at the end of the previous tick.
    pub last_y: f32,
    /// Consecutive ticks with sub-threshold displacement.
    pub stagnant_ticks: u32,
}

impl Entity {
    /// Creates an entity at `(x, y)`, clamped into the world, owning `brain`.
    pub fn new<R: Rng>(id: u64, x: f32, y: f32, brain: Brain, params: &Params, rng: &mut R) -> Self {
        let x = x.clamp(0.0, params.world_width);
        let y = y.clamp(0.0, params.world_height);
        Self {
            id,
            x,
            y,
            heading: rng.gen_range(0.0..TAU),
            speed: 0.0,
            energy: params.initial_energy,
            fitness: 0.0,
            age: 0,
            last_meal_distance: 0.0,
            size: 20.0,
            brain,
            activations: Vec::new(),
            last_x: x,
            last_y: y,
            stagnant_ticks: 0,
        }
    }

    /// Creates an entity at a random position with a fresh random brain.
    pub fn new_random<R: Rng>(id: u64, params: &Params, rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..params.world_width);
        let y = rng.gen_range(0.0..params.world_height);
        let brain = Brain::with_hidden_layers(&params.hidden_layers, rng);
        Self::new(id, x, y, brain, params, rng)
    }

    /// Whether the entity still has energy left.
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Advances the entity by one tick.
    ///
    /// Runs the brain on the sensed surroundings, applies movement with
    /// border reflection and obstacle rejection, then the stagnation, energy,
    /// fitness, and age bookkeeping. Returns `true` when the entity wants to
    /// reproduce this tick; the world decides whether it may.
    pub fn update<R: Rng>(
        &mut self,
        senses: &SenseReport,
        obstacles: &[Obstacle],
        params: &Params,
        rng: &mut R,
    ) -> bool {
        if let Some(distance) = senses.food_distance {
            self.last_meal_distance = distance;
        }

        let inputs = self.build_inputs(senses, params);
        self.activations = self.brain.forward_trace(&inputs);
        let outputs = &self.activations[self.activations.len() - 1];
        let (steer, thrust, reproduce) = (outputs[0], outputs[1], outputs[2]);

        self.heading = steer * TAU;
        self.speed = (thrust + 1.0) * 2.0;

        let mut new_x = self.x + self.heading.cos() * self.speed;
        let mut new_y = self.y + self.heading.sin() * self.speed;

        // Border handling: clamp, and mirror the heading across the wall hit.
        if new_x < 0.0 {
            new_x = 0.0;
            self.heading = PI - self.heading;
        } else if new_x > params.world_width {
            new_x = params.world_width;
            self.heading = PI - self.heading;
        }
        if new_y < 0.0 {
            new_y = 0.0;
            self.heading = -self.heading;
        } else if new_y > params.world_height {
            new_y = params.world_height;
            self.heading = -self.heading;
        }
        self.heading = self.heading.rem_euclid(TAU);
        // rem_euclid can round up to the modulus itself for tiny negatives.
        if self.heading >= TAU {
            self.heading = 0.0;
        }

        if obstacles.iter().any(|o| o.contains(new_x, new_y)) {
            // Move rejected: stay put, pick a fresh direction, pay the toll.
            self.heading = rng.gen_range(0.0..TAU);
            self.energy -= params.obstacle_penalty;
        } else {
            self.x = new_x;
            self.y = new_y;
        }

        let moved = (self.x - self.last_x).hypot(self.y - self.last_y);
        if moved < params.movement_threshold {
            self.stagnant_ticks += 1;
            if self.stagnant_ticks > params.stagnation_limit {
                self.energy -= params.stagnation_energy_penalty;
                self.fitness -= params.stagnation_fitness_penalty;
            }
        } else {
            self.stagnant_ticks = 0;
        }
        self.last_x = self.x;
        self.last_y = self.y;

        self.energy -= params.base_energy_decay + self.speed * params.speed_energy_decay;
        self.fitness += params.survival_reward;
        self.age += 1;
        self.size = (self.energy / 10.0).clamp(5.0, 15.0);

        reproduce > params.reproduction_threshold && self.energy > params.reproduction_min_energy
    }

    /// Builds the 10-element sensory input vector.
    fn build_inputs(&self, senses: &SenseReport, params: &Params) -> Array1<f32> {
        Array1::from_vec(vec![
            self.x / params.world_width,
            self.y / params.world_height,
            self.energy / params.initial_energy,
            self.age as f32 / params.generation_duration as f32,
            senses.food_offset.0,
            senses.food_offset.1,
            senses.entity_offset.0,
            senses.entity_offset.1,
            senses.obstacle_offset.0,
            senses.obstacle_offset.1,
        ])
    }
}

impl Positioned for Entity {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}
