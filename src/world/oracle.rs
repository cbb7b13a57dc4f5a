//! Interfaces to the systems hordes live alongside
//!
//! The horde systems never reach for a global world. Terrain, monster group
//! resolution and the fine-grained map are handed in through these traits
//! on every call.

use serde::{Deserialize, Serialize};

use crate::core::types::{CoarsePos, CreatureKind, GroupId, LocalCell, Tick};

/// Coarse terrain classes, as far as horde population cares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainClass {
    /// Open field: neutral
    #[default]
    Field,
    /// Blast crater: slowly attracts stragglers
    Crater,
    /// Towns and other built-up tiles
    Urban,
    Forest,
    ForestThick,
    /// Forest water, marsh and other wetlands
    Swamp,
    /// Flowing water
    River,
}

/// Terrain lookup for coarse tiles
pub trait TerrainOracle {
    fn terrain_at(&self, pos: CoarsePos, z: i32) -> TerrainClass;
}

/// What the monster group oracle picked for one spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResolution {
    pub creature: CreatureKind,
    /// Updated population hint to pass to the next query
    pub hint: u32,
}

/// Monster group resolution, treated as a black box
pub trait GroupOracle {
    /// Pick a concrete creature type out of a group
    fn resolve_group(&mut self, group: &GroupId, population_hint: u32, now: Tick) -> GroupResolution;

    /// Whether a creature type belongs to a group
    fn is_member_of_group(&self, group: &GroupId, creature: &CreatureKind) -> bool;
}

/// Handle to a creature living in the fine-grained simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureHandle(pub u32);

/// Queries and lifecycle hooks of the fine-grained map
///
/// All cells are relative to the loaded window's top-left corner.
pub trait LocalMap {
    fn is_occupied(&self, cell: LocalCell) -> bool;

    fn is_traversable(&self, cell: LocalCell, creature: &CreatureKind) -> bool;

    fn is_outdoors(&self, cell: LocalCell) -> bool;

    /// Whether the observer has line of sight to the cell
    fn observer_can_see(&self, cell: LocalCell) -> bool;

    /// Place a new creature; `None` if the map refused it
    fn spawn_creature(&mut self, creature: &CreatureKind, cell: LocalCell) -> Option<CreatureHandle>;

    /// Send a creature on a long walk toward a cell, which may lie off the map
    fn assign_waypoint(&mut self, creature: CreatureHandle, cell: LocalCell);
}

/// A creature stepping out of the loaded window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DespawningCreature {
    pub kind: CreatureKind,
    /// Last fine-grained cell the creature occupied
    pub cell: LocalCell,
}

impl DespawningCreature {
    pub fn new(kind: CreatureKind, cell: LocalCell) -> Self {
        Self { kind, cell }
    }
}
