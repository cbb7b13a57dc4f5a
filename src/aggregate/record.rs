//! HordeRecord - one horde at coarse resolution

use serde::{Deserialize, Serialize};

use crate::core::types::{GroupId, LocalPos, Tick, TILE_CAPACITY};

/// A horde tracked as a head count on a single coarse tile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HordeRecord {
    /// Group the members are drawn from when materialized
    pub group_id: GroupId,
    /// Region-local coarse position
    pub position: LocalPos,
    pub population_normal: u32,
    /// Leaders; a horde without any slowly falls apart
    pub population_master: u32,
    /// Where the horde is heading; equal to `position` when it has no goal
    pub target: LocalPos,
    /// Tick movement and resting were last evaluated
    pub last_move_tick: Tick,
    /// Turns the current target stays locked in
    pub wander_timer: u32,
}

impl HordeRecord {
    pub fn new(
        group_id: GroupId,
        position: LocalPos,
        population_normal: u32,
        population_master: u32,
        now: Tick,
    ) -> Self {
        Self {
            group_id,
            position,
            population_normal,
            population_master,
            target: position,
            last_move_tick: now,
            wander_timer: 0,
        }
    }

    pub fn population(&self) -> u32 {
        self.population_normal + self.population_master
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    pub fn at_target(&self) -> bool {
        self.position == self.target
    }

    /// Whether one more member fits (leaders always do)
    pub fn can_absorb(&self, leader: bool) -> bool {
        leader || self.population_normal < TILE_CAPACITY
    }

    /// Count one member in
    pub fn absorb(&mut self, leader: bool) {
        if leader {
            self.population_master += 1;
        } else {
            self.population_normal = (self.population_normal + 1).min(TILE_CAPACITY);
        }
    }
}
