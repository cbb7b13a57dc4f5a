//! In-memory world used by the demo binary and the tests
//!
//! Implements every collaborator trait with plain hash sets so scenarios can
//! block cells, mark cells indoors or visible, and inspect what spawned.

use ahash::{AHashMap, AHashSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{CoarsePos, CreatureKind, GroupId, LocalCell, Tick};
use crate::world::oracle::{
    CreatureHandle, DespawningCreature, GroupOracle, GroupResolution, LocalMap, TerrainClass,
    TerrainOracle,
};

/// Terrain map with a fallback class for unset tiles
#[derive(Debug, Clone, Default)]
pub struct SandboxTerrain {
    tiles: AHashMap<CoarsePos, TerrainClass>,
    fallback: TerrainClass,
}

impl SandboxTerrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: TerrainClass) -> Self {
        Self {
            tiles: AHashMap::new(),
            fallback,
        }
    }

    pub fn set(&mut self, pos: CoarsePos, terrain: TerrainClass) {
        self.tiles.insert(pos, terrain);
    }
}

impl TerrainOracle for SandboxTerrain {
    fn terrain_at(&self, pos: CoarsePos, _z: i32) -> TerrainClass {
        self.tiles.get(&pos).copied().unwrap_or(self.fallback)
    }
}

/// Weighted monster group with a single member list
#[derive(Debug, Clone)]
pub struct SandboxGroups {
    group: GroupId,
    members: Vec<(CreatureKind, u32)>,
    rng: ChaCha8Rng,
    queries: u32,
}

impl SandboxGroups {
    pub fn new(group: GroupId, members: Vec<(CreatureKind, u32)>, seed: u64) -> Self {
        Self {
            group,
            members,
            rng: ChaCha8Rng::seed_from_u64(seed),
            queries: 0,
        }
    }

    /// The wandering zombie group: mostly plain zombies, a few soldiers
    pub fn wandering_zombies(seed: u64) -> Self {
        Self::new(
            GroupId::new("GROUP_WANDERING_ZOMBIE"),
            vec![
                (CreatureKind::new("mon_zombie"), 80),
                (CreatureKind::new("mon_zombie_fast"), 15),
                (CreatureKind::new("mon_zombie_soldier"), 5),
            ],
            seed,
        )
    }

    /// How many times `resolve_group` has been called
    pub fn queries(&self) -> u32 {
        self.queries
    }
}

impl GroupOracle for SandboxGroups {
    fn resolve_group(&mut self, _group: &GroupId, population_hint: u32, _now: Tick) -> GroupResolution {
        self.queries += 1;
        let total: u32 = self.members.iter().map(|(_, weight)| weight).sum();
        let mut roll = self.rng.gen_range(0..total.max(1));
        let mut creature = match self.members.first() {
            Some((kind, _)) => kind.clone(),
            None => CreatureKind::new("mon_null"),
        };
        for (kind, weight) in &self.members {
            if roll < *weight {
                creature = kind.clone();
                break;
            }
            roll -= weight;
        }
        GroupResolution {
            creature,
            hint: population_hint.saturating_sub(1),
        }
    }

    fn is_member_of_group(&self, group: &GroupId, creature: &CreatureKind) -> bool {
        *group == self.group && self.members.iter().any(|(kind, _)| kind == creature)
    }
}

/// A creature living on the sandbox map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxCreature {
    pub handle: CreatureHandle,
    pub kind: CreatureKind,
    pub cell: LocalCell,
    pub waypoint: Option<LocalCell>,
}

/// Fine-grained map with flag sets for blocked, indoor and visible cells
#[derive(Debug, Clone, Default)]
pub struct SandboxMap {
    blocked: AHashSet<LocalCell>,
    indoors: AHashSet<LocalCell>,
    visible: AHashSet<LocalCell>,
    observer: Option<(LocalCell, i32)>,
    occupants: AHashMap<LocalCell, CreatureHandle>,
    creatures: Vec<SandboxCreature>,
    next_handle: u32,
}

impl SandboxMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer at `center` sees every cell within `sight` steps
    pub fn with_observer(mut self, center: LocalCell, sight: i32) -> Self {
        self.observer = Some((center, sight));
        self
    }

    pub fn block(&mut self, cell: LocalCell) {
        self.blocked.insert(cell);
    }

    pub fn mark_indoors(&mut self, cell: LocalCell) {
        self.indoors.insert(cell);
    }

    pub fn mark_visible(&mut self, cell: LocalCell) {
        self.visible.insert(cell);
    }

    pub fn creatures(&self) -> &[SandboxCreature] {
        &self.creatures
    }

    pub fn creature(&self, handle: CreatureHandle) -> Option<&SandboxCreature> {
        self.creatures.iter().find(|c| c.handle == handle)
    }

    /// Take a creature off the map, e.g. because it walked out of the window
    pub fn remove_creature(&mut self, handle: CreatureHandle) -> Option<DespawningCreature> {
        let idx = self.creatures.iter().position(|c| c.handle == handle)?;
        let creature = self.creatures.remove(idx);
        self.occupants.remove(&creature.cell);
        Some(DespawningCreature::new(creature.kind, creature.cell))
    }
}

impl LocalMap for SandboxMap {
    fn is_occupied(&self, cell: LocalCell) -> bool {
        self.occupants.contains_key(&cell)
    }

    fn is_traversable(&self, cell: LocalCell, _creature: &CreatureKind) -> bool {
        !self.blocked.contains(&cell)
    }

    fn is_outdoors(&self, cell: LocalCell) -> bool {
        !self.indoors.contains(&cell)
    }

    fn observer_can_see(&self, cell: LocalCell) -> bool {
        if self.visible.contains(&cell) {
            return true;
        }
        match self.observer {
            Some((center, sight)) => {
                (center.x - cell.x).abs().max((center.y - cell.y).abs()) <= sight
            }
            None => false,
        }
    }

    fn spawn_creature(&mut self, creature: &CreatureKind, cell: LocalCell) -> Option<CreatureHandle> {
        if self.is_occupied(cell) || self.blocked.contains(&cell) {
            return None;
        }
        let handle = CreatureHandle(self.next_handle);
        self.next_handle += 1;
        self.occupants.insert(cell, handle);
        self.creatures.push(SandboxCreature {
            handle,
            kind: creature.clone(),
            cell,
            waypoint: None,
        });
        Some(handle)
    }

    fn assign_waypoint(&mut self, creature: CreatureHandle, cell: LocalCell) {
        if let Some(c) = self.creatures.iter_mut().find(|c| c.handle == creature) {
            c.waypoint = Some(cell);
        }
    }
}

/// All three sandbox collaborators, as separate fields so they borrow apart
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    pub terrain: SandboxTerrain,
    pub groups: SandboxGroups,
    pub map: SandboxMap,
}

impl SandboxWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            terrain: SandboxTerrain::new(),
            groups: SandboxGroups::wandering_zombies(seed),
            map: SandboxMap::new(),
        }
    }
}
