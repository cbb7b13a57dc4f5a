//! Horde movement and targeting
//!
//! A horde accumulates ticks until it has enough budget for an evaluation.
//! Each evaluation rests the horde (population dynamics), then maybe takes
//! one orthogonal step toward its target, rolling a fresh random target when
//! it has nothing better to do.

use rand::Rng;

use crate::aggregate::record::HordeRecord;
use crate::aggregate::systems::one_in;
use crate::aggregate::systems::population::rest_here;
use crate::core::config::HordeConfig;
use crate::core::types::{RegionId, Tick};
use crate::world::oracle::TerrainOracle;

/// What one evaluation did to a horde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not enough elapsed ticks; nothing changed
    Waiting,
    /// Rested (population may have changed) but did not step
    Stayed,
    /// Took one step
    Moved,
}

/// Evaluate one horde at tick `now`
pub fn step_horde<R: Rng>(
    horde: &mut HordeRecord,
    region: RegionId,
    now: Tick,
    config: &HordeConfig,
    terrain: &dyn TerrainOracle,
    rng: &mut R,
) -> StepOutcome {
    let Some(elapsed) = now.checked_sub(horde.last_move_tick) else {
        // Clock went backwards (e.g. a reloaded save)
        horde.last_move_tick = now;
        return StepOutcome::Waiting;
    };
    if elapsed < config.move_budget_ticks {
        return StepOutcome::Waiting;
    }

    rest_here(horde, region, terrain, rng);
    horde.last_move_tick = now;

    // Hordes are slow; most evaluations end here
    if !one_in(rng, config.move_one_in) {
        return StepOutcome::Stayed;
    }

    if horde.wander_timer > 0 {
        horde.wander_timer -= 1;
    } else if horde.at_target() || one_in(rng, config.retarget_one_in) {
        pick_wander_target(horde, config, rng);
    }

    if horde.at_target() {
        return StepOutcome::Stayed;
    }

    step_toward_target(horde);
    StepOutcome::Moved
}

/// Roll a random target around the horde and lock it in for a few turns
pub fn pick_wander_target<R: Rng>(horde: &mut HordeRecord, config: &HordeConfig, rng: &mut R) {
    let radius = config.wander_radius;
    horde.target.x = horde.position.x + rng.gen_range(-radius..=radius);
    horde.target.y = horde.position.y + rng.gen_range(-radius..=radius);
    horde.target.z = horde.position.z;
    horde.wander_timer = rng.gen_range(1..=config.wander_timer_max);
}

/// One orthogonal step along the axis with the larger offset (x on ties)
pub fn step_toward_target(horde: &mut HordeRecord) {
    let dx = horde.target.x - horde.position.x;
    let dy = horde.target.y - horde.position.y;
    if dx == 0 && dy == 0 {
        return;
    }
    if dx.abs() >= dy.abs() {
        horde.position.x += dx.signum();
    } else {
        horde.position.y += dy.signum();
    }
    if horde.at_target() {
        horde.wander_timer = 0;
    }
}
