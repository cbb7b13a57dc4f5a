use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wandering_horde::aggregate::registry::HordeRegistry;
use wandering_horde::aggregate::systems::{
    change_population_by_terrain, merge_into, rest_here, step_toward_target,
};
use wandering_horde::aggregate::{HordeRecord, HordeSimulation};
use wandering_horde::core::types::{CoarsePos, CreatureKind, GroupId, LocalCell, LocalPos, RegionId};
use wandering_horde::core::HordeConfig;
use wandering_horde::spatial::{LoadedWindow, RegionResolver};
use wandering_horde::world::{DespawningCreature, SandboxGroups, SandboxTerrain, TerrainClass};

fn terrain_class() -> impl Strategy<Value = TerrainClass> {
    prop_oneof![
        Just(TerrainClass::Field),
        Just(TerrainClass::Crater),
        Just(TerrainClass::Urban),
        Just(TerrainClass::Forest),
        Just(TerrainClass::ForestThick),
        Just(TerrainClass::Swamp),
        Just(TerrainClass::River),
    ]
}

fn record(x: i32, y: i32, normal: u32, master: u32) -> HordeRecord {
    HordeRecord::new(GroupId::new("GROUP_WANDERING_ZOMBIE"), LocalPos::new(x, y), normal, master, 0)
}

proptest! {
    #[test]
    fn property_terrain_never_underflows_or_overfills(
        seed in any::<u64>(),
        normal in 0_u32..=144,
        master in 0_u32..4,
        terrain in terrain_class(),
        rounds in 1_usize..200,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut horde = record(10, 10, normal, master);
        for _ in 0..rounds {
            change_population_by_terrain(&mut horde, terrain, &mut rng);
            prop_assert!(horde.population_normal <= 144);
        }
        prop_assert_eq!(horde.population_master, master);
    }

    #[test]
    fn property_resting_sheds_at_most_six(
        seed in any::<u64>(),
        normal in 0_u32..60,
        master in 0_u32..3,
        terrain in terrain_class(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sandbox = SandboxTerrain::with_fallback(terrain);
        let mut horde = record(10, 10, normal, master);
        let before = horde.population();

        rest_here(&mut horde, RegionId::new(0, 0), &sandbox, &mut rng);

        prop_assert!(horde.population_master <= master);
        prop_assert!(before <= horde.population() + 6);
    }

    #[test]
    fn property_merge_conserves_population(
        a_normal in 0_u32..144,
        a_master in 0_u32..5,
        b_normal in 0_u32..144,
        b_master in 0_u32..5,
    ) {
        let mut registry = HordeRegistry::new();
        registry.insert(record(3, 3, a_normal, a_master));
        registry.insert(record(3, 3, b_normal, b_master));

        let population = merge_into(&mut registry, 0, 1).unwrap();

        prop_assert_eq!(population, a_normal + a_master + b_normal + b_master);
        prop_assert_eq!(registry.len(), 1);
    }

    #[test]
    fn property_step_moves_one_unit_on_one_axis(
        x in -50_i32..50,
        y in -50_i32..50,
        tx in -50_i32..50,
        ty in -50_i32..50,
    ) {
        let mut horde = record(x, y, 1, 0);
        horde.target = LocalPos::new(tx, ty);
        let before_dist = (x - tx).abs() + (y - ty).abs();

        step_toward_target(&mut horde);

        let dx = (horde.position.x - x).abs();
        let dy = (horde.position.y - y).abs();
        if (x, y) == (tx, ty) {
            prop_assert_eq!(dx + dy, 0);
        } else {
            prop_assert_eq!(dx + dy, 1);
            let after_dist = (horde.position.x - tx).abs() + (horde.position.y - ty).abs();
            prop_assert_eq!(after_dist + 1, before_dist);
        }
    }

    #[test]
    fn property_despawn_adds_exactly_one(
        seed in 0_u64..1000,
        cells in prop::collection::vec((0_i32..132, 0_i32..132, any::<bool>()), 1..40),
    ) {
        let window = LoadedWindow::centered_on(CoarsePos::new(180, 180));
        let mut sim = HordeSimulation::new(HordeConfig::default(), window, seed).unwrap();
        let groups = SandboxGroups::wandering_zombies(seed);

        for (i, (x, y, leader)) in cells.into_iter().enumerate() {
            let kind = if leader { "mon_zombie_soldier" } else { "mon_zombie" };
            let creature = DespawningCreature::new(CreatureKind::new(kind), LocalCell::new(x, y));
            let count_before = sim.world().horde_count();

            prop_assert!(sim.try_despawn(&creature, (0, 0), 0, &groups));

            prop_assert_eq!(sim.world().total_population() as usize, i + 1);
            let created = sim.world().horde_count() - count_before;
            prop_assert!(created <= 1);
        }
    }

    #[test]
    fn property_resolver_round_trips_tracked_positions(
        cx in -2000_i32..2000,
        cy in -2000_i32..2000,
        dx in -360_i32..360,
        dy in -360_i32..360,
    ) {
        let window = LoadedWindow::centered_on(CoarsePos::new(cx, cy));
        let resolver = RegionResolver::for_window(&window);
        let pos = CoarsePos::new(cx + dx, cy + dy);

        let (region, local) = resolver.resolve(pos).unwrap();
        prop_assert!(local.in_bounds());
        prop_assert_eq!(local.to_absolute(region), pos);
    }

    #[test]
    fn property_same_seed_same_history(seed in 0_u64..500, turns in 1_u64..2000) {
        let run = || {
            let config = HordeConfig {
                spawn_grace_ticks: 0,
                spawn_one_in: 20,
                ..HordeConfig::default()
            };
            let window = LoadedWindow::centered_on(CoarsePos::new(180, 180));
            let mut sim = HordeSimulation::new(config, window, seed).unwrap();
            let terrain = SandboxTerrain::with_fallback(TerrainClass::Urban);
            for tick in 0..turns {
                sim.tick(tick, &terrain);
            }
            sim.log().entries().cloned().collect::<Vec<_>>()
        };

        prop_assert_eq!(run(), run());
    }
}
