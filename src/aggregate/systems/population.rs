//! Population dynamics for a resting horde
//!
//! Leaderless hordes bleed members, towns feed them, forests and water
//! thin them out.

use rand::Rng;

use crate::aggregate::record::HordeRecord;
use crate::aggregate::systems::one_in;
use crate::core::types::{RegionId, TILE_CAPACITY};
use crate::world::oracle::{TerrainClass, TerrainOracle};

/// Apply one resting evaluation to a horde
pub fn rest_here<R: Rng>(
    horde: &mut HordeRecord,
    region: RegionId,
    terrain: &dyn TerrainOracle,
    rng: &mut R,
) {
    if horde.population_normal > 0 && horde.population_master == 0 {
        horde.population_normal -= 1;
    }

    if horde.position.in_bounds() {
        let here = terrain.terrain_at(horde.position.to_absolute(region), horde.position.z);
        change_population_by_terrain(horde, here, rng);
    }

    if horde.population_normal == 0 && horde.population_master > 0 {
        horde.population_master -= 1;
    }
}

/// Random growth or attrition from the terrain under the horde
pub fn change_population_by_terrain<R: Rng>(horde: &mut HordeRecord, terrain: TerrainClass, rng: &mut R) {
    let delta: i64 = match terrain {
        TerrainClass::Field => 0,
        TerrainClass::Crater => {
            if one_in(rng, 10) {
                1
            } else {
                0
            }
        }
        TerrainClass::Urban => {
            if one_in(rng, 20) {
                // 10% chance of a straggler; a led horde picks up a few more
                let mut gain = rng.gen_range(0..=10) / 10;
                if horde.population_master > 0 {
                    gain += rng.gen_range(0..=3);
                }
                gain
            } else {
                0
            }
        }
        TerrainClass::Forest => {
            if one_in(rng, 40) {
                -1
            } else {
                0
            }
        }
        TerrainClass::ForestThick => {
            if one_in(rng, 20) {
                -1
            } else {
                0
            }
        }
        TerrainClass::Swamp => {
            if one_in(rng, 10) {
                -1
            } else {
                0
            }
        }
        TerrainClass::River => {
            if one_in(rng, 20) {
                -rng.gen_range(0..=4)
            } else {
                0
            }
        }
    };

    let adjusted = (horde.population_normal as i64 + delta).clamp(0, TILE_CAPACITY as i64);
    horde.population_normal = adjusted as u32;
}
