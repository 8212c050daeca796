//! The world state and the tick/generation driver.
//!
//! The world owns every entity, pellet, and obstacle. Entities are processed
//! strictly sequentially within a tick against the live collections, so an
//! entity sees the moves, offspring, and consumed food of every entity
//! processed before it in the same tick. The tick order is the collection
//! order, and offspring appended mid-tick do not act until the next tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::entity::{Entity, SenseReport};
use super::food::Food;
use super::obstacle::Obstacle;
use super::params::{Params, ParamsError};
use super::spatial;
use super::stats::Stats;

/// Complete simulation state plus the driver that advances it.
#[derive(Debug, Clone)]
pub struct World {
    /// Live population, in processing order.
    pub entities: Vec<Entity>,
    /// Food pellets currently on the ground.
    pub foods: Vec<Food>,
    /// Static obstacles, fixed for the lifetime of a run.
    pub obstacles: Vec<Obstacle>,
    /// Completed generation count.
    pub generation: u32,
    /// Ticks elapsed in the current generation.
    pub ticks: u32,
    /// Run/pause toggle, checked once per frame.
    pub running: bool,
    /// Ticks advanced per [`World::frame`] call.
    pub simulation_speed: usize,
    /// Per-weight mutation probability for future reproductions.
    pub mutation_rate: f32,
    /// Parameters the world was created with.
    pub params: Params,
    rng: StdRng,
    next_entity_id: u64,
}

impl World {
    /// Creates a freshly populated world.
    ///
    /// All randomness flows through a generator seeded with `seed`, so equal
    /// seeds reproduce equal runs.
    pub fn new(params: Params, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;
        let mutation_rate = params.mutation_rate;
        let simulation_speed = params.simulation_speed;
        let mut world = Self {
            entities: Vec::new(),
            foods: Vec::new(),
            obstacles: Vec::new(),
            generation: 0,
            ticks: 0,
            running: false,
            simulation_speed,
            mutation_rate,
            params,
            rng: StdRng::seed_from_u64(seed),
            next_entity_id: 0,
        };
        world.populate();
        Ok(world)
    }

    /// (Re)creates entities, food, and obstacles from scratch.
    fn populate(&mut self) {
        self.ticks = 0;

        self.entities.clear();
        for _ in 0..self.params.population_size {
            let id = self.alloc_id();
            let entity = Entity::new_random(id, &self.params, &mut self.rng);
            self.entities.push(entity);
        }

        self.foods.clear();
        while self.foods.len() < self.params.initial_food_count {
            self.foods.push(Food::new_random(&self.params, &mut self.rng));
        }

        self.obstacles.clear();
        for _ in 0..self.params.obstacle_count {
            self.obstacles
                .push(Obstacle::new_random(&self.params, &mut self.rng));
        }
    }

    /// Advances one external frame.
    ///
    /// The running flag is checked once per frame, then `simulation_speed`
    /// ticks run back to back without further checks.
    pub fn frame(&mut self) {
        if !self.running {
            return;
        }
        for _ in 0..self.simulation_speed {
            self.tick();
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        let acting = self.entities.len();
        for i in 0..acting {
            let senses = self.sense(i);
            let wants_child = {
                let entity = &mut self.entities[i];
                entity.update(&senses, &self.obstacles, &self.params, &mut self.rng)
            };
            if wants_child {
                self.reproduce(i);
            }
            self.consume_food(i);
        }

        self.spawn_food();
        self.entities.retain(Entity::is_alive);
        self.ticks += 1;

        if self.ticks >= self.params.generation_duration || self.entities.is_empty() {
            self.next_generation();
        }
    }

    /// Gathers normalized nearest-neighbor offsets for entity `i` against
    /// the live collections.
    fn sense(&self, i: usize) -> SenseReport {
        let entity = &self.entities[i];
        let mut report = SenseReport::default();

        if let Some(found) = spatial::nearest(entity.x, entity.y, &self.foods, None) {
            let food = &self.foods[found.index];
            report.food_offset = (
                (food.x - entity.x) / self.params.world_width,
                (food.y - entity.y) / self.params.world_height,
            );
            report.food_distance = Some(found.distance);
        }

        if let Some(other) = spatial::nearest(entity.x, entity.y, &self.entities, Some(i)) {
            let neighbor = &self.entities[other.index];
            report.entity_offset = (
                (neighbor.x - entity.x) / self.params.world_width,
                (neighbor.y - entity.y) / self.params.world_height,
            );
        }

        if let Some(block) = spatial::nearest(entity.x, entity.y, &self.obstacles, None) {
            let obstacle = &self.obstacles[block.index];
            report.obstacle_offset = (
                (obstacle.x - entity.x) / self.params.world_width,
                (obstacle.y - entity.y) / self.params.world_height,
            );
        }

        report
    }

    /// Spawns a mutated clone of entity `i` at its current position.
    ///
    /// The parent pays the reproduction cost only when the population still
    /// has headroom and a child is actually produced.
    fn reproduce(&mut self, i: usize) {
        let cap = self.params.population_size as f32 * self.params.population_headroom;
        if self.entities.len() as f32 >= cap {
            return;
        }

        let mut child_brain = self.entities[i].brain.clone();
        child_brain.mutate(self.mutation_rate, &mut self.rng);

        let id = self.alloc_id();
        let (x, y) = (self.entities[i].x, self.entities[i].y);
        let child = Entity::new(id, x, y, child_brain, &self.params, &mut self.rng);

        self.entities[i].energy -= self.params.reproduction_cost;
        self.entities.push(child);
    }

    /// Lets entity `i` eat the nearest pellet when it is within reach.
    ///
    /// At most one pellet per entity per tick, and the pellet disappears
    /// from the shared collection immediately.
    fn consume_food(&mut self, i: usize) {
        let entity = &self.entities[i];
        let Some(found) = spatial::nearest(entity.x, entity.y, &self.foods, None) else {
            return;
        };
        let food_size = self.foods[found.index].size;
        if found.distance >= entity.size + food_size {
            return;
        }

        self.foods.remove(found.index);
        let entity = &mut self.entities[i];
        entity.energy += food_size * self.params.food_energy_factor;
        // Shorter trips to food score higher; a meal sensed from beyond 100
        // units scores negative.
        entity.fitness += 10.0 + (100.0 - entity.last_meal_distance) / 10.0;
    }

    /// Probabilistically drops one new pellet while below the cap.
    fn spawn_food(&mut self) {
        if self.foods.len() < self.params.max_food_count
            && self.rng.gen::<f32>() < self.params.food_spawn_rate
        {
            self.foods.push(Food::new_random(&self.params, &mut self.rng));
        }
    }

    /// Ends the current generation.
    ///
    /// An extinct population resets the whole world instead of breeding, and
    /// the generation counter stays where it was: extinction is not progress.
    /// Otherwise the survivors are replaced wholesale by `population_size`
    /// offspring of fitness-proportionally selected parents, each at a fresh
    /// random position with a cloned-then-mutated brain.
    pub fn next_generation(&mut self) {
        if self.entities.is_empty() {
            debug!(
                generation = self.generation,
                "population extinct, reinitializing world"
            );
            self.populate();
            return;
        }

        let closing = Stats::gather(self);
        info!(
            generation = closing.generation,
            alive = closing.alive,
            avg_fitness = closing.avg_fitness,
            best_fitness = closing.best_fitness,
            "generation complete"
        );

        self.generation += 1;
        self.ticks = 0;

        let total_fitness: f32 = self.entities.iter().map(|e| e.fitness).sum();

        let mut offspring = Vec::with_capacity(self.params.population_size);
        for _ in 0..self.params.population_size {
            let parent = self.select_parent(total_fitness);
            let mut child_brain = self.entities[parent].brain.clone();
            child_brain.mutate(self.mutation_rate, &mut self.rng);

            let id = self.alloc_id();
            let x = self.rng.gen_range(0.0..self.params.world_width);
            let y = self.rng.gen_range(0.0..self.params.world_height);
            offspring.push(Entity::new(id, x, y, child_brain, &self.params, &mut self.rng));
        }
        self.entities = offspring;

        // Every generation starts with zeroed fitness and a full energy tank.
        for entity in &mut self.entities {
            entity.fitness = 0.0;
            entity.energy = self.params.initial_energy;
        }

        while self.foods.len() < self.params.initial_food_count {
            self.foods.push(Food::new_random(&self.params, &mut self.rng));
        }
    }

    /// Picks a parent index with probability proportional to fitness share.
    ///
    /// Draws a uniform threshold in `[0, total_fitness)` and scans the
    /// running fitness sum. Falls back to the last entity when the total is
    /// zero or rounding keeps the sum below the threshold, so a nonempty
    /// population always yields a parent.
    pub fn select_parent(&mut self, total_fitness: f32) -> usize {
        let threshold = self.rng.gen::<f32>() * total_fitness;
        let mut running = 0.0;
        for (index, entity) in self.entities.iter().enumerate() {
            running += entity.fitness;
            if running > threshold {
                return index;
            }
        }
        self.entities.len() - 1
    }

    /// Forces a generation boundary right now, exactly as if the tick budget
    /// had run out.
    pub fn force_next_generation(&mut self) {
        self.next_generation();
    }

    /// The highest-fitness entity, if any. Ties go to the earlier entity.
    pub fn fittest(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .reduce(|best, entity| if entity.fitness > best.fitness { entity } else { best })
    }

    /// Aggregate statistics for external display.
    pub fn stats(&self) -> Stats {
        Stats::gather(self)
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }
}
