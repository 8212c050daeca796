//! Static polygonal obstacles entities must steer around.

use std::f32::consts::TAU;

use geo::{Contains, Coord, LineString, Point, Polygon};
use rand::Rng;

use super::params::Params;
use super::spatial::Positioned;

/// An impassable polygon.
///
/// Obstacles are generated once at world initialization and never move or
/// despawn within a run. The vertex ring is built around the center at even
/// angular spacing, so the polygon is star-shaped and containment is
/// unambiguous.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Center x in world units.
    pub x: f32,
    /// Center y in world units.
    pub y: f32,
    /// Base radius the vertex ring is scaled around.
    pub size: f32,
    /// Vertex offsets relative to the center, in ring order.
    pub vertices: Vec<(f32, f32)>,
    /// Absolute-coordinate ring used for containment tests.
    polygon: Polygon<f32>,
}

impl Obstacle {
    /// Creates an obstacle from an explicit vertex ring.
    pub fn new(x: f32, y: f32, size: f32, vertices: Vec<(f32, f32)>) -> Self {
        let ring: Vec<Coord<f32>> = vertices
            .iter()
            .map(|&(dx, dy)| Coord {
                x: x + dx,
                y: y + dy,
            })
            .collect();
        let polygon = Polygon::new(LineString::from(ring), vec![]);
        Self {
            x,
            y,
            size,
            vertices,
            polygon,
        }
    }

    /// Creates an obstacle at a random position.
    ///
    /// The ring has 5-7 vertices at even angular spacing, each pushed out to
    /// 80-120% of a base radius uniform in [5, 10), giving an irregular but
    /// roughly convex shape.
    pub fn new_random<R: Rng>(params: &Params, rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..params.world_width);
        let y = rng.gen_range(0.0..params.world_height);
        let size = rng.gen_range(5.0..10.0);
        let vertex_count = rng.gen_range(5..8);
        let vertices = (0..vertex_count)
            .map(|i| {
                let angle = i as f32 / vertex_count as f32 * TAU;
                let radius = size * rng.gen_range(0.8..1.2);
                (angle.cos() * radius, angle.sin() * radius)
            })
            .collect();
        Self::new(x, y, size, vertices)
    }

    /// Whether a world-space point lies inside the obstacle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.polygon.contains(&Point::new(x, y))
    }
}

impl Positioned for Obstacle {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}
