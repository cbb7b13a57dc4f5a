//! Horde events and the rolling event log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{CoarsePos, CreatureKind, LocalCell, RegionId, Tick};

/// Something that happened to a horde
///
/// Positions are absolute coarse coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HordeEvent {
    // Lifecycle
    Spawned { region: RegionId, position: CoarsePos, population: u32 },
    Merged { region: RegionId, position: CoarsePos, population: u32 },
    Emptied { region: RegionId, position: CoarsePos },

    // Region bookkeeping
    Migrated { from: RegionId, to: RegionId, position: CoarsePos },
    Lost { position: CoarsePos },

    // Boundary conversion
    MemberDespawned { position: CoarsePos, leader: bool, created: bool },
    MemberMaterialized { position: CoarsePos, cell: LocalCell, creature: CreatureKind },

    // Attraction
    SoundHeard { position: CoarsePos, origin: CoarsePos, range: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub tick: Tick,
    pub event: HordeEvent,
}

/// Most recent horde events, oldest dropped first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HordeLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
    total: u64,
}

impl HordeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            total: 0,
        }
    }

    pub fn record(&mut self, tick: Tick, events: &[HordeEvent]) {
        for event in events {
            if self.capacity == 0 {
                break;
            }
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(LoggedEvent {
                tick,
                event: event.clone(),
            });
        }
        self.total += events.len() as u64;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    pub fn events_at(&self, tick: Tick) -> impl Iterator<Item = &HordeEvent> {
        self.entries.iter().filter(move |e| e.tick == tick).map(|e| &e.event)
    }

    /// Events ever recorded, including ones already dropped
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count_matching(&self, pred: impl Fn(&HordeEvent) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.event)).count()
    }
}
