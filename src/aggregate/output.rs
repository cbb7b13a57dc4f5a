//! Horde census and serialization

use serde::{Deserialize, Serialize};

use crate::aggregate::events::{HordeEvent, HordeLog};
use crate::aggregate::world::Overworld;
use crate::core::types::{CoarsePos, RegionId};

/// Snapshot of every tracked region's hordes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HordeCensus {
    pub observer: CoarsePos,
    pub regions: Vec<RegionCensus>,
    pub statistics: CensusStats,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCensus {
    pub region: RegionId,
    pub hordes: usize,
    pub population_normal: u32,
    pub population_master: u32,
    pub largest: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CensusStats {
    pub hordes: usize,
    pub population: u32,
    pub leaders: u32,
    pub events_total: u64,
    pub spawned: usize,
    pub merged: usize,
    pub emptied: usize,
    pub migrated: usize,
}

impl HordeCensus {
    pub fn collect(world: &Overworld, log: &HordeLog) -> Self {
        let regions: Vec<RegionCensus> = world
            .tracked_ids()
            .into_iter()
            .filter_map(|id| world.region(id))
            .map(|region| RegionCensus {
                region: region.id,
                hordes: region.hordes.len(),
                population_normal: region.hordes.iter().map(|h| h.population_normal).sum(),
                population_master: region.hordes.iter().map(|h| h.population_master).sum(),
                largest: region.hordes.iter().map(|h| h.population()).max().unwrap_or(0),
            })
            .collect();

        let statistics = CensusStats {
            hordes: regions.iter().map(|r| r.hordes).sum(),
            population: regions
                .iter()
                .map(|r| r.population_normal + r.population_master)
                .sum(),
            leaders: regions.iter().map(|r| r.population_master).sum(),
            events_total: log.total(),
            spawned: log.count_matching(|e| matches!(e, HordeEvent::Spawned { .. })),
            merged: log.count_matching(|e| matches!(e, HordeEvent::Merged { .. })),
            emptied: log.count_matching(|e| matches!(e, HordeEvent::Emptied { .. })),
            migrated: log.count_matching(|e| matches!(e, HordeEvent::Migrated { .. })),
        };

        Self {
            observer: world.window().center(),
            regions,
            statistics,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} hordes ({} creatures, {} leaders) around {:?}\n{} events: {} spawned, {} merged, {} emptied, {} migrated",
            self.statistics.hordes,
            self.statistics.population,
            self.statistics.leaders,
            self.observer,
            self.statistics.events_total,
            self.statistics.spawned,
            self.statistics.merged,
            self.statistics.emptied,
            self.statistics.migrated,
        )
    }
}
