//! New horde placement around the observer

use rand::Rng;

use crate::aggregate::record::HordeRecord;
use crate::aggregate::systems::one_in;
use crate::aggregate::world::Overworld;
use crate::core::config::HordeConfig;
use crate::core::types::{CoarsePos, LocalPos, Tick};

/// A horde the spawner decided to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPlan {
    pub position: CoarsePos,
    pub horde: HordeRecord,
}

/// Decide whether a new horde appears this tick, and where
///
/// An empty neighborhood tries every tick; otherwise the one-in-N roll
/// gates the attempt. Candidates are drawn from the square around the observer and kept only
/// inside the ring between the configured distances, away from any horde
/// already nearby.
pub fn plan_spawn<R: Rng>(
    world: &Overworld,
    now: Tick,
    config: &HordeConfig,
    rng: &mut R,
) -> Option<SpawnPlan> {
    if now < config.spawn_grace_ticks {
        return None;
    }
    if world.horde_count() > 0 && !one_in(rng, config.spawn_one_in) {
        return None;
    }

    let reach = config.spawn_max_distance;
    let dx = rng.gen_range(-reach..=reach);
    let dy = rng.gen_range(-reach..=reach);
    let dist = dx.abs().max(dy.abs());
    if dist < config.spawn_min_distance || dist > config.spawn_max_distance {
        return None;
    }

    let position = world.window().center().offset(dx, dy);
    if world.is_horde_near(position, config.spawn_min_separation) {
        tracing::trace!("Horde spawn at {:?} rejected: too close to another", position);
        return None;
    }

    let total = rng.gen_range(config.spawn_population_min..=config.spawn_population_max);
    let horde = HordeRecord::new(
        config.horde_group.clone(),
        LocalPos::default(),
        total.saturating_sub(config.spawn_leaders),
        config.spawn_leaders,
        now,
    );
    Some(SpawnPlan { position, horde })
}
