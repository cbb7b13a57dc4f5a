//! Merging hordes that ended up on the same tile
//!
//! A horde is only ever folded into one with a lower index in the same
//! registry. The first match wins, so each sweep has a single survivor per
//! tile and no horde is merged twice.

use crate::aggregate::registry::HordeRegistry;
use crate::core::error::{HordeError, Result};

/// Earliest horde before `mover` standing on the same tile
pub fn find_merge_target(registry: &HordeRegistry, mover: usize) -> Option<usize> {
    let position = registry.get(mover)?.position;
    (0..mover).find(|&idx| registry.get(idx).is_some_and(|h| h.position == position))
}

/// Fold `mover` into `survivor` and delete it
///
/// Returns the survivor's new population. Rejects the merge, leaving both
/// hordes untouched, unless `survivor < mover`.
pub fn merge_into(registry: &mut HordeRegistry, survivor: usize, mover: usize) -> Result<u32> {
    let (into, from) = registry
        .pair_mut(survivor, mover)
        .ok_or(HordeError::AmbiguousMerge { survivor, mover })?;

    into.population_master += from.population_master;
    into.population_normal += from.population_normal;
    if into.target != from.target {
        // Neither target is right for the combined horde; roll a new one
        into.wander_timer = 0;
    }
    let population = into.population();

    registry.remove_at(mover);
    Ok(population)
}

/// Merge `mover` into an earlier co-located horde, if there is one
///
/// Returns the survivor's index and new population.
pub fn merge_if_colocated(registry: &mut HordeRegistry, mover: usize) -> Option<(usize, u32)> {
    let survivor = find_merge_target(registry, mover)?;
    match merge_into(registry, survivor, mover) {
        Ok(population) => Some((survivor, population)),
        Err(err) => {
            tracing::error!("Horde merge skipped: {}", err);
            None
        }
    }
}
