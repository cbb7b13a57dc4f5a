//! Horde simulation driver
//!
//! Owns the overworld, the seeded random stream and the event log, and runs
//! the horde systems in a fixed order so a given seed always replays the
//! same way.

use std::slice;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::aggregate::events::{HordeEvent, HordeLog};
use crate::aggregate::output::HordeCensus;
use crate::aggregate::record::HordeRecord;
use crate::aggregate::systems::{self, StepOutcome};
use crate::aggregate::world::Overworld;
use crate::core::config::HordeConfig;
use crate::core::error::Result;
use crate::core::types::{CoarsePos, LocalCell, RegionId, Tick};
use crate::spatial::LoadedWindow;
use crate::world::oracle::{DespawningCreature, GroupOracle, LocalMap, TerrainOracle};

/// The wandering-horde simulation around one observer
#[derive(Debug, Clone)]
pub struct HordeSimulation {
    config: HordeConfig,
    world: Overworld,
    rng: ChaCha8Rng,
    log: HordeLog,
}

impl HordeSimulation {
    pub fn new(config: HordeConfig, window: LoadedWindow, seed: u64) -> Result<Self> {
        config.validate()?;
        let log = HordeLog::new(config.log_capacity);
        Ok(Self {
            config,
            world: Overworld::new(window),
            rng: ChaCha8Rng::seed_from_u64(seed),
            log,
        })
    }

    pub fn config(&self) -> &HordeConfig {
        &self.config
    }

    pub fn world(&self) -> &Overworld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut Overworld {
        &mut self.world
    }

    pub fn log(&self) -> &HordeLog {
        &self.log
    }

    pub fn window(&self) -> &LoadedWindow {
        self.world.window()
    }

    /// Move the loaded window; the tracked regions follow its center
    pub fn set_window(&mut self, window: LoadedWindow) {
        self.world.set_window(window);
    }

    /// Advance every tracked horde to tick `now`
    ///
    /// The spawner runs first, then each tracked region in resolver order.
    pub fn tick(&mut self, now: Tick, terrain: &dyn TerrainOracle) {
        self.maybe_spawn_new_horde(now);
        for region in self.world.tracked_ids() {
            self.tick_hordes(region, now, terrain);
        }
    }

    /// Evaluate, merge and migrate the hordes of one region
    pub fn tick_hordes(
        &mut self,
        region_id: RegionId,
        now: Tick,
        terrain: &dyn TerrainOracle,
    ) -> Vec<HordeEvent> {
        let Self {
            config,
            world,
            rng,
            log,
        } = self;
        let mut events = Vec::new();
        let mut emigrants = Vec::new();

        let registry = &mut world.region_mut(region_id).hordes;
        let mut idx = 0;
        while idx < registry.len() {
            let Some(horde) = registry.get_mut(idx) else {
                break;
            };
            let outcome = systems::step_horde(horde, region_id, now, config, terrain, rng);
            if outcome == StepOutcome::Waiting {
                idx += 1;
                continue;
            }

            let position = horde.position.to_absolute(region_id);
            if horde.is_empty() {
                registry.remove_at(idx);
                events.push(HordeEvent::Emptied {
                    region: region_id,
                    position,
                });
                continue;
            }

            if outcome == StepOutcome::Moved {
                if let Some((_, population)) = systems::merge_if_colocated(registry, idx) {
                    events.push(HordeEvent::Merged {
                        region: region_id,
                        position,
                        population,
                    });
                    continue;
                }
                let left_region = registry.get(idx).is_some_and(|h| !h.position.in_bounds());
                if left_region {
                    emigrants.push(registry.remove_at(idx));
                    continue;
                }
            }
            idx += 1;
        }

        for horde in emigrants {
            relocate(world, region_id, horde, &mut events);
        }

        log.record(now, &events);
        events
    }

    /// Fold a creature leaving the loaded window into a horde
    ///
    /// Returns true if a horde took it, in which case the caller removes the
    /// creature from the map.
    pub fn try_despawn(
        &mut self,
        creature: &DespawningCreature,
        coarse_hint: (i32, i32),
        now: Tick,
        oracle: &dyn GroupOracle,
    ) -> bool {
        let outcome = systems::despawn_into_horde(
            &mut self.world,
            creature,
            coarse_hint,
            now,
            &self.config,
            oracle,
        );
        match outcome {
            Ok(Some(outcome)) => {
                let event = HordeEvent::MemberDespawned {
                    position: outcome.position,
                    leader: outcome.leader,
                    created: outcome.created,
                };
                self.log.record(now, slice::from_ref(&event));
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("{} left the window but no horde can take it: {}", creature.kind, err);
                false
            }
        }
    }

    /// Materialize hordes standing inside the loaded window
    ///
    /// Returns how many creatures were placed on the map.
    pub fn materialize_nearby(
        &mut self,
        now: Tick,
        oracle: &mut dyn GroupOracle,
        map: &mut dyn LocalMap,
    ) -> usize {
        let window = *self.world.window();
        if !window.on_surface() {
            return 0;
        }

        let mut events = Vec::new();
        for region in self.world.tracked_ids() {
            systems::materialize_region(
                self.world.region_mut(region),
                &window,
                now,
                &self.config,
                oracle,
                map,
                &mut self.rng,
                &mut events,
            );
        }

        let placed = events
            .iter()
            .filter(|e| matches!(e, HordeEvent::MemberMaterialized { .. }))
            .count();
        self.log.record(now, &events);
        placed
    }

    /// Point every horde in earshot at a sound; returns how many heard it
    pub fn notify_sound(&mut self, origin: CoarsePos, volume: i32, now: Tick) -> usize {
        let range = systems::effective_range(volume);
        if range == 0 {
            return 0;
        }

        let z = self.world.window().z;
        let mut events = Vec::new();
        for id in self.world.tracked_ids() {
            let mut local = id.to_local(origin);
            local.z = z;
            for horde in self.world.region_mut(id).hordes.iter_mut() {
                if systems::attract(horde, local, range) {
                    events.push(HordeEvent::SoundHeard {
                        position: horde.position.to_absolute(id),
                        origin,
                        range,
                    });
                }
            }
        }

        if !events.is_empty() {
            tracing::debug!("Sound at {:?} (range {}) drew {} hordes", origin, range, events.len());
        }
        self.log.record(now, &events);
        events.len()
    }

    /// Same as `notify_sound`, for a sound at a fine cell of the loaded window
    pub fn notify_sound_at_cell(&mut self, cell: LocalCell, volume: i32, now: Tick) -> usize {
        let origin = self.world.window().cell_to_coarse(cell);
        self.notify_sound(origin, volume, now)
    }

    /// Roll for a new horde near the observer and place it
    pub fn maybe_spawn_new_horde(&mut self, now: Tick) -> Option<HordeEvent> {
        let plan = systems::plan_spawn(&self.world, now, &self.config, &mut self.rng)?;
        let population = plan.horde.population();

        match self.world.place(plan.position, plan.horde) {
            Ok((region, _)) => {
                tracing::debug!("Spawned horde of {} at {:?}", population, plan.position);
                let event = HordeEvent::Spawned {
                    region,
                    position: plan.position,
                    population,
                };
                self.log.record(now, slice::from_ref(&event));
                Some(event)
            }
            Err(err) => {
                tracing::trace!("Horde spawn at {:?} dropped: {}", plan.position, err);
                None
            }
        }
    }

    /// Snapshot of every tracked region
    pub fn census(&self) -> HordeCensus {
        HordeCensus::collect(&self.world, &self.log)
    }
}

/// Move a horde that stepped off its region's edge into the region now owning it
///
/// Position and target are rewritten into the new region's frame. A horde
/// that walked out of the tracked neighborhood is dropped.
fn relocate(world: &mut Overworld, from: RegionId, mut horde: HordeRecord, events: &mut Vec<HordeEvent>) {
    let position = horde.position.to_absolute(from);
    let target = horde.target.to_absolute(from);

    let (to, local) = match world.resolver().resolve(position) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!("Horde at {:?} dropped: {}", position, err);
            events.push(HordeEvent::Lost { position });
            return;
        }
    };

    let z = horde.position.z;
    horde.position = local;
    horde.position.z = z;
    horde.target = to.to_local(target);
    horde.target.z = z;

    let registry = &mut world.region_mut(to).hordes;
    let idx = registry.insert(horde);
    events.push(HordeEvent::Migrated { from, to, position });

    if let Some((_, population)) = systems::merge_if_colocated(registry, idx) {
        events.push(HordeEvent::Merged {
            region: to,
            position,
            population,
        });
    }
}
