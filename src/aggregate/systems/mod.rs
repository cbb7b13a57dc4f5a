//! Simulation systems

pub mod bridge;
pub mod merge;
pub mod movement;
pub mod population;
pub mod sound;
pub mod spawner;

use rand::Rng;

pub use bridge::{despawn_into_horde, materialize_horde, materialize_region, DespawnOutcome};
pub use merge::{find_merge_target, merge_if_colocated, merge_into};
pub use movement::{pick_wander_target, step_horde, step_toward_target, StepOutcome};
pub use population::{change_population_by_terrain, rest_here};
pub use sound::{attract, effective_range};
pub use spawner::{plan_spawn, SpawnPlan};

/// True with probability 1/n; `n <= 1` always succeeds
#[inline]
pub(crate) fn one_in<R: Rng>(rng: &mut R, n: u32) -> bool {
    n <= 1 || rng.gen_range(0..n) == 0
}
