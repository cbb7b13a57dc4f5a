//! Boundary conversion between hordes and individual creatures
//!
//! Despawn folds a creature leaving the loaded window into the nearest
//! horde. Materialize turns horde head count back into creatures while the
//! horde's tile is inside the window. Each call converts whole units only:
//! population changes exactly when a creature is created or removed.

use rand::Rng;

use crate::aggregate::events::HordeEvent;
use crate::aggregate::record::HordeRecord;
use crate::aggregate::region::Region;
use crate::aggregate::world::Overworld;
use crate::core::config::HordeConfig;
use crate::core::error::Result;
use crate::core::types::{CoarsePos, CreatureKind, LocalCell, RegionId, Tick, SUBMAP_SIZE};
use crate::spatial::LoadedWindow;
use crate::world::oracle::{CreatureHandle, DespawningCreature, GroupOracle, LocalMap};

/// Where a despawned creature went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DespawnOutcome {
    pub region: RegionId,
    pub position: CoarsePos,
    pub leader: bool,
    /// A new horde had to be created for it
    pub created: bool,
}

/// Fold a creature leaving the loaded window into a horde
///
/// `coarse_hint` is added to the creature's coarse tile, for callers that
/// shift the window before its creatures are moved. Returns `Ok(None)` when
/// the creature does not belong in a horde at all.
pub fn despawn_into_horde(
    world: &mut Overworld,
    creature: &DespawningCreature,
    coarse_hint: (i32, i32),
    now: Tick,
    config: &HordeConfig,
    oracle: &dyn GroupOracle,
) -> Result<Option<DespawnOutcome>> {
    let window = *world.window();
    if !window.on_surface() {
        return Ok(None);
    }
    if !oracle.is_member_of_group(&config.horde_group, &creature.kind) {
        return Ok(None);
    }

    let position = window
        .cell_to_coarse(creature.cell)
        .offset(coarse_hint.0, coarse_hint.1);
    let (region, local) = world.resolver().resolve(position)?;
    let leader = creature.kind == config.leader_kind;

    let registry = &mut world.region_mut(region).hordes;
    let existing = registry.find_near(local, 1, |h| {
        h.group_id == config.horde_group && h.can_absorb(leader)
    });
    let (idx, created) = match existing {
        Some(idx) => (idx, false),
        None => {
            let fresh = HordeRecord::new(config.horde_group.clone(), local, 0, 0, now);
            (registry.insert(fresh), true)
        }
    };
    if let Some(horde) = registry.get_mut(idx) {
        horde.absorb(leader);
    }

    tracing::debug!(
        "Despawned {} into horde at {:?} (new horde: {})",
        creature.kind,
        position,
        created
    );
    Ok(Some(DespawnOutcome {
        region,
        position,
        leader,
        created,
    }))
}

/// Materialize every horde of a region that sits inside the loaded window
///
/// Emptied hordes are removed before returning.
#[allow(clippy::too_many_arguments)]
pub fn materialize_region<R: Rng>(
    region: &mut Region,
    window: &LoadedWindow,
    now: Tick,
    config: &HordeConfig,
    oracle: &mut dyn GroupOracle,
    map: &mut dyn LocalMap,
    rng: &mut R,
    events: &mut Vec<HordeEvent>,
) {
    let region_id = region.id;
    let mut idx = 0;
    while idx < region.hordes.len() {
        let Some(position) = region.horde_position(idx) else {
            break;
        };
        if !window.contains(position) {
            idx += 1;
            continue;
        }
        let Some(horde) = region.hordes.get_mut(idx) else {
            break;
        };

        materialize_horde(horde, position, window, now, config, oracle, map, rng, events);

        if horde.is_empty() {
            region.hordes.remove_at(idx);
            events.push(HordeEvent::Emptied {
                region: region_id,
                position,
            });
            // Next horde shifted into `idx`
            continue;
        }
        idx += 1;
    }
}

/// Turn part of one horde into creatures; returns how many were placed
#[allow(clippy::too_many_arguments)]
pub fn materialize_horde<R: Rng>(
    horde: &mut HordeRecord,
    position: CoarsePos,
    window: &LoadedWindow,
    now: Tick,
    config: &HordeConfig,
    oracle: &mut dyn GroupOracle,
    map: &mut dyn LocalMap,
    rng: &mut R,
    events: &mut Vec<HordeEvent>,
) -> u32 {
    let most = config.materialize_batch_max.min(horde.population());
    if most == 0 {
        return 0;
    }
    let batch = rng.gen_range(1..=most);
    let mut hint = batch;

    let area = window.coarse_to_cell(position);
    let target_area = if horde.at_target() {
        None
    } else {
        let target = position.offset(
            horde.target.x - horde.position.x,
            horde.target.y - horde.position.y,
        );
        Some(window.coarse_to_cell(target))
    };

    let mut placed = 0;
    for _ in 0..batch {
        if horde.is_empty() {
            break;
        }
        let Some(kind) = choose_member(horde, &mut hint, now, config, oracle) else {
            continue;
        };
        let Some((handle, cell)) = place_member(&kind, area, config, map, rng) else {
            tracing::trace!("No free cell for {} near {:?}; retrying later", kind, position);
            continue;
        };

        if kind == config.leader_kind {
            horde.population_master = horde.population_master.saturating_sub(1);
        } else {
            horde.population_normal = horde.population_normal.saturating_sub(1);
        }
        placed += 1;

        if let Some(target) = target_area {
            let waypoint = LocalCell::new(
                target.x + rng.gen_range(0..SUBMAP_SIZE),
                target.y + rng.gen_range(0..SUBMAP_SIZE),
            );
            map.assign_waypoint(handle, waypoint);
        }

        tracing::debug!("Horde at {:?} materialized {} at {:?}", position, kind, cell);
        events.push(HordeEvent::MemberMaterialized {
            position,
            cell,
            creature: kind,
        });
    }
    placed
}

/// Creature type for the next unit, or `None` if only an unearned leader came up
fn choose_member(
    horde: &HordeRecord,
    hint: &mut u32,
    now: Tick,
    config: &HordeConfig,
    oracle: &mut dyn GroupOracle,
) -> Option<CreatureKind> {
    if horde.population_normal == 0 {
        return Some(config.leader_kind.clone());
    }
    for _ in 0..=config.oracle_retries {
        let resolution = oracle.resolve_group(&horde.group_id, *hint, now);
        *hint = resolution.hint;
        if resolution.creature == config.leader_kind && horde.population_master == 0 {
            continue;
        }
        return Some(resolution.creature);
    }
    None
}

/// Find a hidden outdoor cell in a tile and spawn the creature there
fn place_member<R: Rng>(
    kind: &CreatureKind,
    area: LocalCell,
    config: &HordeConfig,
    map: &mut dyn LocalMap,
    rng: &mut R,
) -> Option<(CreatureHandle, LocalCell)> {
    for _ in 0..config.placement_attempts {
        let cell = LocalCell::new(
            area.x + rng.gen_range(0..SUBMAP_SIZE),
            area.y + rng.gen_range(0..SUBMAP_SIZE),
        );
        if map.is_occupied(cell)
            || !map.is_traversable(cell, kind)
            || map.observer_can_see(cell)
            || !map.is_outdoors(cell)
        {
            continue;
        }
        if let Some(handle) = map.spawn_creature(kind, cell) {
            return Some((handle, cell));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GroupId, LocalPos};
    use crate::world::sandbox::{SandboxGroups, SandboxMap};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn window() -> LoadedWindow {
        LoadedWindow::centered_on(CoarsePos::new(100, 100))
    }

    fn world() -> Overworld {
        Overworld::new(window())
    }

    fn zombie() -> CreatureKind {
        CreatureKind::new("mon_zombie")
    }

    fn soldier() -> CreatureKind {
        CreatureKind::new("mon_zombie_soldier")
    }

    #[test]
    fn test_despawn_leader_creates_horde() {
        let mut world = world();
        let config = HordeConfig::default();
        let groups = SandboxGroups::wandering_zombies(1);
        let creature = DespawningCreature::new(soldier(), LocalCell::new(30, 40));

        let outcome = despawn_into_horde(&mut world, &creature, (0, 0), 7, &config, &groups)
            .unwrap()
            .unwrap();

        assert!(outcome.created && outcome.leader);
        assert_eq!(outcome.position, CoarsePos::new(97, 98));
        let horde = world.region(outcome.region).unwrap().hordes.get(0).unwrap();
        assert_eq!((horde.population_normal, horde.population_master), (0, 1));
        assert_eq!(horde.last_move_tick, 7);
    }

    #[test]
    fn test_despawn_reuses_adjacent_horde() {
        let mut world = world();
        let config = HordeConfig::default();
        let groups = SandboxGroups::wandering_zombies(1);
        world
            .place(
                CoarsePos::new(98, 98),
                HordeRecord::new(config.horde_group.clone(), LocalPos::default(), 4, 1, 0),
            )
            .unwrap();

        let creature = DespawningCreature::new(zombie(), LocalCell::new(30, 40));
        let outcome = despawn_into_horde(&mut world, &creature, (0, 0), 0, &config, &groups)
            .unwrap()
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(world.horde_count(), 1);
        assert_eq!(world.total_population(), 6);
    }

    #[test]
    fn test_despawn_applies_hint() {
        let mut world = world();
        let config = HordeConfig::default();
        let groups = SandboxGroups::wandering_zombies(1);
        let creature = DespawningCreature::new(zombie(), LocalCell::new(0, 0));

        let outcome = despawn_into_horde(&mut world, &creature, (-1, 2), 0, &config, &groups)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.position, window().origin.offset(-1, 2));
    }

    #[test]
    fn test_despawn_ignores_outsiders_and_underground() {
        let mut world = world();
        let config = HordeConfig::default();
        let groups = SandboxGroups::wandering_zombies(1);
        let dog = DespawningCreature::new(CreatureKind::new("mon_dog"), LocalCell::new(5, 5));
        assert!(despawn_into_horde(&mut world, &dog, (0, 0), 0, &config, &groups)
            .unwrap()
            .is_none());

        let mut cellar = window();
        cellar.z = -1;
        world.set_window(cellar);
        let creature = DespawningCreature::new(zombie(), LocalCell::new(5, 5));
        assert!(despawn_into_horde(&mut world, &creature, (0, 0), 0, &config, &groups)
            .unwrap()
            .is_none());
        assert_eq!(world.horde_count(), 0);
    }

    #[test]
    fn test_materialize_lone_leader_skips_oracle() {
        let config = HordeConfig::default();
        let window = window();
        let mut groups = SandboxGroups::wandering_zombies(1);
        let mut map = SandboxMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let mut horde = HordeRecord::new(GroupId::new("GROUP_WANDERING_ZOMBIE"), LocalPos::new(98, 98), 0, 1, 0);

        let placed = materialize_horde(
            &mut horde,
            CoarsePos::new(98, 98),
            &window,
            0,
            &config,
            &mut groups,
            &mut map,
            &mut rng,
            &mut events,
        );

        assert_eq!(placed, 1);
        assert!(horde.is_empty());
        assert_eq!(groups.queries(), 0);
        assert_eq!(map.creatures()[0].kind, soldier());
    }

    #[test]
    fn test_materialize_never_places_in_sight_or_indoors() {
        let config = HordeConfig::default();
        let window = window();
        let mut groups = SandboxGroups::wandering_zombies(1);
        let mut map = SandboxMap::new();
        let area = window.coarse_to_cell(CoarsePos::new(96, 96));
        // Everything in the tile is indoors or visible except one cell
        for dx in 0..SUBMAP_SIZE {
            for dy in 0..SUBMAP_SIZE {
                let cell = LocalCell::new(area.x + dx, area.y + dy);
                if (dx + dy) % 2 == 0 {
                    map.mark_indoors(cell);
                } else if cell != LocalCell::new(area.x + 1, area.y) {
                    map.mark_visible(cell);
                }
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut horde = HordeRecord::new(config.horde_group.clone(), LocalPos::new(96, 96), 20, 1, 0);

        for _ in 0..50 {
            materialize_horde(
                &mut horde,
                CoarsePos::new(96, 96),
                &window,
                0,
                &config,
                &mut groups,
                &mut map,
                &mut rng,
                &mut Vec::new(),
            );
        }

        assert!(map.creatures().len() <= 1);
        for creature in map.creatures() {
            assert_eq!(creature.cell, LocalCell::new(area.x + 1, area.y));
        }
        assert_eq!(horde.population() as usize + map.creatures().len(), 21);
    }

    #[test]
    fn test_materialized_creature_heads_for_target() {
        let config = HordeConfig::default();
        let window = window();
        let mut groups = SandboxGroups::wandering_zombies(1);
        let mut map = SandboxMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut horde = HordeRecord::new(config.horde_group.clone(), LocalPos::new(97, 97), 5, 1, 0);
        horde.target = LocalPos::new(107, 97);

        materialize_horde(
            &mut horde,
            CoarsePos::new(97, 97),
            &window,
            0,
            &config,
            &mut groups,
            &mut map,
            &mut rng,
            &mut Vec::new(),
        );

        let target_area = window.coarse_to_cell(CoarsePos::new(107, 97));
        assert!(!map.creatures().is_empty());
        for creature in map.creatures() {
            let waypoint = creature.waypoint.unwrap();
            assert!((target_area.x..target_area.x + SUBMAP_SIZE).contains(&waypoint.x));
            assert!((target_area.y..target_area.y + SUBMAP_SIZE).contains(&waypoint.y));
        }
    }

    #[test]
    fn test_unearned_leader_is_refused() {
        let config = HordeConfig::default();
        let window = window();
        let mut groups = SandboxGroups::new(
            config.horde_group.clone(),
            vec![(soldier(), 1)],
            4,
        );
        let mut map = SandboxMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut horde = HordeRecord::new(config.horde_group.clone(), LocalPos::new(97, 97), 6, 0, 0);

        let placed = materialize_horde(
            &mut horde,
            CoarsePos::new(97, 97),
            &window,
            0,
            &config,
            &mut groups,
            &mut map,
            &mut rng,
            &mut Vec::new(),
        );

        assert_eq!(placed, 0);
        assert_eq!(horde.population_normal, 6);
        assert!(map.creatures().is_empty());
        assert!(groups.queries() > 0);
    }
}
