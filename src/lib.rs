//! # Neuroevo - Generational Neural Agent Evolution
//!
//! A simulation that evolves a population of agents ("entities") controlled by
//! small feed-forward neural networks. Each tick every entity senses its
//! nearest food pellet, neighbor, and obstacle, asks its brain for a heading,
//! a speed, and a reproduction signal, and pays for the resulting movement in
//! energy. When a generation's tick budget runs out, the survivors are bred
//! into a fresh population by fitness-proportional selection with per-weight
//! mutation.
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Fixed-topology MLP brains with mutation support
//! - [`simulation::entity`] - Agent state, sensing, and per-tick physics
//! - [`simulation::world`] - Tick loop, reproduction, selection, and controls
//! - [`simulation::obstacle`] - Static polygonal obstacles
//!
//! Rendering and UI live outside this crate. [`simulation::world::World`]
//! exposes its collections, counters, and per-entity activation snapshots for
//! a frontend to draw, plus the run/pause toggle, speed multiplier, and
//! mutation-rate control a frontend needs to offer.

/// Core simulation logic and data structures.
pub mod simulation {
    /// Feed-forward neural networks that control entity behavior.
    pub mod brain;
    /// Entity state, sensing, and per-tick update logic.
    pub mod entity;
    /// Food pellets entities consume for energy.
    pub mod food;
    /// Static polygonal obstacles entities must steer around.
    pub mod obstacle;
    /// Simulation parameters and their validation.
    pub mod params;
    /// Nearest-neighbor queries over the world's flat collections.
    pub mod spatial;
    /// Aggregate statistics reported to external observers.
    pub mod stats;
    /// The world state and the tick/generation driver.
    pub mod world;
}
