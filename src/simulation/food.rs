//! Food pellets entities consume for energy.

use rand::Rng;

use super::params::Params;
use super::spatial::Positioned;

/// A consumable food pellet.
///
/// A pellet's size doubles as its value: eating it grants
/// `size * food_energy_factor` energy.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    /// X position in world units.
    pub x: f32,
    /// Y position in world units.
    pub y: f32,
    /// Pellet radius, uniform in [2, 5).
    pub size: f32,
}

impl Food {
    /// Creates a pellet at a uniformly random position in the world.
    pub fn new_random<R: Rng>(params: &Params, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..params.world_width),
            y: rng.gen_range(0.0..params.world_height),
            size: rng.gen_range(2.0..5.0),
        }
    }
}

impl Positioned for Food {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}
