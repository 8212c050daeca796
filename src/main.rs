//! Headless simulation runner.
//!
//! Drives a world for a fixed number of generations and logs per-generation
//! statistics through `tracing`. Rendering frontends link the library
//! directly; this binary exists for long unattended evolution runs and for
//! reproducing a run from a seed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use neuroevo::simulation::params::Params;
use neuroevo::simulation::world::World;

/// Evolve neural agents headlessly and report per-generation statistics.
#[derive(Debug, Parser)]
#[command(name = "neuroevo")]
struct Args {
    /// RNG seed; identical seeds reproduce identical runs.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of generations to run before exiting.
    #[arg(long, default_value_t = 10)]
    generations: u32,

    /// Ticks advanced per frame, overriding the parameter file.
    #[arg(long)]
    speed: Option<usize>,

    /// Per-weight mutation probability, overriding the parameter file.
    #[arg(long)]
    mutation_rate: Option<f32>,

    /// JSON parameter file; missing fields fall back to the defaults.
    #[arg(long)]
    params: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let params = match &args.params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameter file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing parameter file {}", path.display()))?
        }
        None => Params::default(),
    };

    let mut world = World::new(params, args.seed).context("invalid simulation parameters")?;
    if let Some(speed) = args.speed {
        world.simulation_speed = speed;
    }
    if let Some(rate) = args.mutation_rate {
        world.mutation_rate = rate;
    }

    info!(
        seed = args.seed,
        generations = args.generations,
        population = world.params.population_size,
        "starting simulation"
    );

    world.running = true;
    while world.generation < args.generations {
        world.frame();
    }
    world.running = false;

    let last = world.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&last).context("serializing final statistics")?
    );
    Ok(())
}
