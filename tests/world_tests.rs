#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroevo::simulation::food::Food;
use neuroevo::simulation::params::Params;
use neuroevo::simulation::world::World;

fn create_test_params() -> Params {
    Params {
        world_width: 300.0,
        world_height: 200.0,
        population_size: 6,
        initial_food_count: 20,
        max_food_count: 20,
        food_spawn_rate: 0.0,
        generation_duration: 40,
        obstacle_count: 2,
        ..Params::default()
    }
}

/// Zeroes every brain in the world: all outputs become 0, so every entity
/// moves at heading 0 with speed 2 and never signals reproduction.
fn zero_brains(world: &mut World) {
    for entity in &mut world.entities {
        for layer in &mut entity.brain.layers {
            layer.weights.fill(0.0);
            layer.biases.fill(0.0);
        }
    }
}

/// Pins one output of every zeroed brain through its final-layer bias.
fn set_output_bias(world: &mut World, slot: usize, value: f32) {
    for entity in &mut world.entities {
        entity.brain.layers.last_mut().unwrap().biases[slot] = value;
    }
}

#[test]
fn test_world_creation() {
    let params = create_test_params();
    let world = World::new(params, 1).unwrap();

    assert_eq!(world.entities.len(), world.params.population_size);
    assert_eq!(world.foods.len(), world.params.initial_food_count);
    assert_eq!(world.obstacles.len(), world.params.obstacle_count);
    assert_eq!(world.generation, 0);
    assert_eq!(world.ticks, 0);
    assert!(!world.running);

    for entity in &world.entities {
        assert!((0.0..=world.params.world_width).contains(&entity.x));
        assert!((0.0..=world.params.world_height).contains(&entity.y));
        assert_eq!(entity.energy, world.params.initial_energy);
        assert_eq!(entity.fitness, 0.0);
    }
}

#[test]
fn test_invalid_params_rejected() {
    let bad_rate = Params {
        mutation_rate: 2.0,
        ..create_test_params()
    };
    assert!(World::new(bad_rate, 1).is_err());

    let no_population = Params {
        population_size: 0,
        ..create_test_params()
    };
    assert!(World::new(no_population, 1).is_err());

    let no_hidden = Params {
        hidden_layers: vec![],
        ..create_test_params()
    };
    assert!(World::new(no_hidden, 1).is_err());
}

#[test]
fn test_frame_respects_running_flag_and_speed() {
    let params = create_test_params();
    let mut world = World::new(params, 2).unwrap();

    world.frame();
    assert_eq!(world.ticks, 0);

    world.running = true;
    world.simulation_speed = 3;
    world.frame();
    assert_eq!(world.ticks, 3);
}

#[test]
fn test_generation_advances_after_duration() {
    let params = Params {
        obstacle_count: 0,
        ..create_test_params()
    };
    let mut world = World::new(params, 3).unwrap();
    // Zeroed brains never raise the reproduction signal, so the population
    // rides out the whole generation unchanged.
    zero_brains(&mut world);

    for _ in 0..39 {
        world.tick();
    }
    assert_eq!(world.generation, 0);
    assert_eq!(world.ticks, 39);
    assert_eq!(world.entities.len(), world.params.population_size);

    world.tick();
    assert_eq!(world.generation, 1);
    assert_eq!(world.ticks, 0);
    assert_eq!(world.entities.len(), world.params.population_size);
}

#[test]
fn test_extinction_resets_world() {
    let params = create_test_params();
    let mut world = World::new(params, 4).unwrap();

    world.foods.clear();
    for entity in &mut world.entities {
        entity.energy = 0.0;
    }
    world.tick();

    // A fresh random world, not a bred one: the generation counter stays put.
    assert_eq!(world.generation, 0);
    assert_eq!(world.ticks, 0);
    assert_eq!(world.entities.len(), world.params.population_size);
    assert_eq!(world.foods.len(), world.params.initial_food_count);
    assert_eq!(world.obstacles.len(), world.params.obstacle_count);
    for entity in &world.entities {
        assert_eq!(entity.energy, world.params.initial_energy);
    }
}

#[test]
fn test_in_tick_reproduction_capped_at_headroom() {
    let params = Params {
        population_size: 4,
        initial_food_count: 0,
        max_food_count: 0,
        obstacle_count: 0,
        generation_duration: 1000,
        ..create_test_params()
    };
    let mut world = World::new(params, 5).unwrap();
    zero_brains(&mut world);
    set_output_bias(&mut world, 2, 20.0);
    // Children must inherit the always-reproduce brain unperturbed.
    world.mutation_rate = 0.0;

    let cap = 6; // population_size * 1.5

    world.tick();
    assert_eq!(world.entities.len(), cap);
    // The first parent paid the tick's decay plus the reproduction cost.
    let expected = 100.0 - (0.1 + 2.0 * 0.05) - world.params.reproduction_cost;
    assert!((world.entities[0].energy - expected).abs() < 1e-3);

    for _ in 0..15 {
        for entity in &mut world.entities {
            entity.energy = 100.0;
        }
        world.tick();
        assert!(
            world.entities.len() <= cap,
            "population {} broke the headroom cap",
            world.entities.len()
        );
    }
    assert_eq!(world.entities.len(), cap);
}

#[test]
fn test_next_generation_breeds_exact_population() {
    let params = create_test_params();
    let mut world = World::new(params, 6).unwrap();

    for _ in 0..10 {
        world.tick();
    }
    world.force_next_generation();

    assert_eq!(world.generation, 1);
    assert_eq!(world.ticks, 0);
    assert_eq!(world.entities.len(), world.params.population_size);
    assert_eq!(world.foods.len(), world.params.initial_food_count);
    for entity in &world.entities {
        assert_eq!(entity.fitness, 0.0);
        assert_eq!(entity.energy, world.params.initial_energy);
    }
}

#[test]
fn test_select_parent_zero_total_falls_back_to_last() {
    let params = create_test_params();
    let mut world = World::new(params, 7).unwrap();

    for entity in &mut world.entities {
        entity.fitness = 0.0;
    }
    let last = world.entities.len() - 1;
    for _ in 0..10 {
        assert_eq!(world.select_parent(0.0), last);
    }
}

#[test]
fn test_select_parent_follows_fitness_share() {
    let params = create_test_params();
    let mut world = World::new(params, 8).unwrap();

    for entity in &mut world.entities {
        entity.fitness = 0.0;
    }
    world.entities[2].fitness = 8.0;

    // One entity holds the entire fitness mass, so every draw lands on it.
    for _ in 0..10 {
        assert_eq!(world.select_parent(8.0), 2);
    }
}

#[test]
fn test_fittest_prefers_earlier_on_ties() {
    let params = create_test_params();
    let mut world = World::new(params, 9).unwrap();

    for (i, entity) in world.entities.iter_mut().enumerate() {
        entity.fitness = i as f32;
    }
    world.entities[1].fitness = 50.0;
    world.entities[4].fitness = 50.0;

    let best = world.fittest().unwrap();
    assert_eq!(best.id, world.entities[1].id);

    world.entities.clear();
    assert!(world.fittest().is_none());
}

#[test]
fn test_stats_handle_empty_population() {
    let params = create_test_params();
    let mut world = World::new(params, 10).unwrap();

    world.entities.clear();
    let stats = world.stats();
    assert_eq!(stats.alive, 0);
    assert_eq!(stats.avg_fitness, 0.0);
    assert_eq!(stats.best_fitness, 0.0);
}

#[test]
fn test_stats_aggregate_fitness() {
    let params = create_test_params();
    let mut world = World::new(params, 11).unwrap();

    world.entities.truncate(2);
    world.entities[0].fitness = 2.0;
    world.entities[1].fitness = 4.0;

    let stats = world.stats();
    assert_eq!(stats.alive, 2);
    assert_eq!(stats.avg_fitness, 3.0);
    assert_eq!(stats.best_fitness, 4.0);
    assert_eq!(stats.food, world.foods.len());
}

#[test]
fn test_food_consumption_rewards_short_trips() {
    let params = Params {
        population_size: 1,
        initial_food_count: 0,
        max_food_count: 0,
        obstacle_count: 0,
        ..create_test_params()
    };
    let mut world = World::new(params, 12).unwrap();
    zero_brains(&mut world);

    let entity = &mut world.entities[0];
    entity.x = 100.0;
    entity.y = 100.0;
    entity.last_x = 100.0;
    entity.last_y = 100.0;
    world.foods.push(Food {
        x: 100.0,
        y: 100.0,
        size: 3.0,
    });

    world.tick();

    // Sensed at distance 0, walked 2 units, still in eating range.
    assert!(world.foods.is_empty());
    let entity = &world.entities[0];
    assert_eq!(entity.last_meal_distance, 0.0);
    assert!((entity.energy - (100.0 - 0.2 + 30.0)).abs() < 1e-3);
    assert!((entity.fitness - (0.1 + 10.0 + 10.0)).abs() < 1e-3);
}

#[test]
fn test_consumed_food_invisible_later_in_same_tick() {
    let params = Params {
        population_size: 2,
        initial_food_count: 0,
        max_food_count: 0,
        obstacle_count: 0,
        ..create_test_params()
    };
    let mut world = World::new(params, 13).unwrap();
    zero_brains(&mut world);

    for entity in &mut world.entities {
        entity.x = 100.0;
        entity.y = 100.0;
        entity.last_x = 100.0;
        entity.last_y = 100.0;
    }
    world.foods.push(Food {
        x: 100.0,
        y: 100.0,
        size: 3.0,
    });

    world.tick();

    // Entity 0 ate the only pellet; entity 1, processed after it, found
    // nothing left and paid plain decay.
    assert!(world.foods.is_empty());
    assert!((world.entities[0].energy - (100.0 - 0.2 + 30.0)).abs() < 1e-3);
    assert!((world.entities[1].energy - (100.0 - 0.2)).abs() < 1e-3);
}

#[test]
fn test_same_seed_reproduces_same_run() {
    let mut a = World::new(create_test_params(), 14).unwrap();
    let mut b = World::new(create_test_params(), 14).unwrap();

    // 50 ticks crosses one generation boundary at duration 40.
    for _ in 0..50 {
        a.tick();
        b.tick();
    }

    assert_eq!(a.generation, b.generation);
    assert_eq!(a.ticks, b.ticks);
    assert_eq!(a.entities.len(), b.entities.len());
    assert_eq!(a.foods.len(), b.foods.len());
    for (ea, eb) in a.entities.iter().zip(&b.entities) {
        assert_eq!(ea.x, eb.x);
        assert_eq!(ea.y, eb.y);
        assert_eq!(ea.energy, eb.energy);
        assert_eq!(ea.fitness, eb.fitness);
    }
}
