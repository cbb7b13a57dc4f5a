//! Headless horde runner
//!
//! Drives the horde simulation around a stationary observer in a sandbox
//! world and prints a census at the end.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wandering_horde::aggregate::{HordeRecord, HordeSimulation};
use wandering_horde::core::config::{TURNS_PER_DAY, TURNS_PER_HOUR};
use wandering_horde::core::types::{CoarsePos, LocalCell, LocalPos, REGION_SIZE};
use wandering_horde::core::HordeConfig;
use wandering_horde::spatial::LoadedWindow;
use wandering_horde::world::{SandboxMap, SandboxWorld, TerrainClass};

/// Headless Horde Runner - wandering hordes around a fixed observer
#[derive(Parser, Debug)]
#[command(name = "wandering-horde")]
#[command(about = "Simulate wandering hordes around a stationary observer")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Turns to simulate (one turn is six seconds)
    #[arg(long, default_value_t = TURNS_PER_DAY * 12)]
    turns: u64,

    /// TOML file overriding horde tuning values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hordes placed around the observer before the first turn
    #[arg(long, default_value_t = 4)]
    hordes: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => HordeConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path.display(), e);
            eprintln!("Using default config");
            HordeConfig::default()
        }),
        None => HordeConfig::default(),
    };

    let observer = CoarsePos::new(REGION_SIZE / 2, REGION_SIZE / 2);
    let window = LoadedWindow::centered_on(observer);
    let mut sim = match HordeSimulation::new(config.clone(), window, args.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));
    let mut world = SandboxWorld::new(args.seed);
    scatter_terrain(&mut world, observer, &mut rng);
    let centre_cell = window.cell_span() / 2;
    world.map = SandboxMap::new().with_observer(LocalCell::new(centre_cell, centre_cell), 30);

    for _ in 0..args.hordes {
        let position = observer.offset(rng.gen_range(-30..=30), rng.gen_range(-30..=30));
        let total = rng.gen_range(config.spawn_population_min..=config.spawn_population_max);
        let horde = HordeRecord::new(
            config.horde_group.clone(),
            LocalPos::default(),
            total.saturating_sub(config.spawn_leaders),
            config.spawn_leaders,
            0,
        );
        if let Err(e) = sim.world_mut().place(position, horde) {
            tracing::warn!("Could not place starting horde: {}", e);
        }
    }

    tracing::info!(
        "Simulating {} turns around {:?} with {} starting hordes",
        args.turns,
        observer,
        sim.world().horde_count()
    );

    let mut materialized = 0;
    let mut despawned = 0;
    for turn in 0..args.turns {
        sim.tick(turn, &world.terrain);

        if turn % config.move_budget_ticks == 0 {
            materialized += sim.materialize_nearby(turn, &mut world.groups, &mut world.map);
        }

        // Creatures drift back out of the window every few minutes
        if turn % 50 == 0 {
            let handles: Vec<_> = world.map.creatures().iter().map(|c| c.handle).collect();
            for handle in handles {
                let Some(creature) = world.map.remove_creature(handle) else {
                    continue;
                };
                if sim.try_despawn(&creature, (0, 0), turn, &world.groups) {
                    despawned += 1;
                }
            }
        }

        // Gunfire at the observer's position
        if turn % TURNS_PER_HOUR == 0 && rng.gen_bool(0.25) {
            sim.notify_sound(observer, 120, turn);
        }
    }

    let census = sim.census();
    if args.format == "json" {
        println!("{}", census.to_json());
    } else {
        println!("{}", census.summary());
        println!(
            "{} creatures materialized, {} despawned back into hordes",
            materialized, despawned
        );
    }
}

/// Towns, woods and a river near the observer; open field elsewhere
fn scatter_terrain(world: &mut SandboxWorld, observer: CoarsePos, rng: &mut ChaCha8Rng) {
    for dx in -40..=40 {
        for dy in -40..=40 {
            let class = match rng.gen_range(0..100) {
                0..=9 => TerrainClass::Urban,
                10..=29 => TerrainClass::Forest,
                30..=34 => TerrainClass::ForestThick,
                35..=37 => TerrainClass::Swamp,
                38 => TerrainClass::Crater,
                _ => continue,
            };
            world.terrain.set(observer.offset(dx, dy), class);
        }
    }
    for dy in -40..=40 {
        world.terrain.set(observer.offset(7, dy), TerrainClass::River);
    }
}
