//! Horde configuration with documented constants
//!
//! All tuning numbers for the horde systems live here with notes on what
//! they control. Values can be overridden from a TOML file; missing keys
//! keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{HordeError, Result};
use crate::core::types::{CreatureKind, GroupId, Tick, SUBMAP_SIZE, TILE_CAPACITY};

/// Turns in one in-game hour (one turn is six seconds)
pub const TURNS_PER_HOUR: Tick = 600;

/// Turns in one in-game day
pub const TURNS_PER_DAY: Tick = TURNS_PER_HOUR * 24;

/// Configuration for the horde systems
///
/// Chances are written as "one in N": a value of 1 means "always".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HordeConfig {
    // === POPULATION ===
    /// Monster group every horde resolves its members from
    pub horde_group: GroupId,

    /// Creature type that counts as a horde leader
    ///
    /// Leaders go into `population_master`; everything else in the group
    /// goes into `population_normal`.
    pub leader_kind: CreatureKind,

    // === MOVEMENT ===
    /// Elapsed ticks a horde must accumulate before it is evaluated again
    ///
    /// Twice the width of one coarse tile in fine cells, so a horde never
    /// outpaces the creatures it stands for.
    pub move_budget_ticks: Tick,

    /// A qualifying evaluation actually moves only one time in N
    pub move_one_in: u32,

    /// While wandering freely, a new target is rolled one time in N
    pub retarget_one_in: u32,

    /// Half-width of the square a random wander target is drawn from
    pub wander_radius: i32,

    /// Longest lock-in (turns) for a freshly rolled wander target
    pub wander_timer_max: u32,

    // === MATERIALIZATION ===
    /// Upper bound on creatures one horde materializes per call
    pub materialize_batch_max: u32,

    /// Oracle re-queries when it offers a leader the horde no longer has
    pub oracle_retries: u32,

    /// Random cells tried before a unit is left for a later tick
    pub placement_attempts: u32,

    // === SPAWNING ===
    /// No new hordes appear before this many ticks have passed
    ///
    /// Zero by default; scenarios that want a quiet opening can raise it.
    pub spawn_grace_ticks: Tick,

    /// With other hordes around, a spawn is attempted one tick in N
    ///
    /// A world with no hordes at all attempts a spawn every tick.
    pub spawn_one_in: u32,

    /// Closest a new horde may appear to the observer (coarse tiles)
    pub spawn_min_distance: i32,

    /// Farthest a new horde may appear from the observer (coarse tiles)
    pub spawn_max_distance: i32,

    /// New hordes are rejected if an existing one is this close
    pub spawn_min_separation: i32,

    /// Smallest starting population of a spawned horde, leaders included
    pub spawn_population_min: u32,

    /// Largest starting population of a spawned horde, leaders included
    pub spawn_population_max: u32,

    /// Starting `population_master` of a spawned horde, taken out of its total
    pub spawn_leaders: u32,

    // === EVENTS ===
    /// Entries kept in the rolling horde event log
    pub log_capacity: usize,
}

impl Default for HordeConfig {
    fn default() -> Self {
        Self {
            horde_group: GroupId::new("GROUP_WANDERING_ZOMBIE"),
            leader_kind: CreatureKind::new("mon_zombie_soldier"),

            move_budget_ticks: (SUBMAP_SIZE * 2) as Tick,
            move_one_in: 10,
            retarget_one_in: 10,
            wander_radius: 10,
            wander_timer_max: 5,

            materialize_batch_max: 20,
            oracle_retries: 10,
            placement_attempts: 10,

            spawn_grace_ticks: 0,
            spawn_one_in: (TURNS_PER_HOUR * 36) as u32,
            spawn_min_distance: 10,
            spawn_max_distance: 30,
            spawn_min_separation: 12,
            spawn_population_min: 10,
            spawn_population_max: 50,
            spawn_leaders: 1,

            log_capacity: 256,
        }
    }
}

impl HordeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; keys that are absent keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HordeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.move_one_in == 0 || self.retarget_one_in == 0 || self.spawn_one_in == 0 {
            return Err(HordeError::InvalidConfig(
                "one-in chances must be at least 1".into(),
            ));
        }

        if self.move_budget_ticks == 0 {
            return Err(HordeError::InvalidConfig(
                "move_budget_ticks must be at least 1".into(),
            ));
        }

        if self.wander_timer_max == 0 {
            return Err(HordeError::InvalidConfig(
                "wander_timer_max must be at least 1".into(),
            ));
        }

        if self.wander_radius < 0 {
            return Err(HordeError::InvalidConfig(format!(
                "wander_radius ({}) must not be negative",
                self.wander_radius
            )));
        }

        if self.spawn_min_distance < 0 {
            return Err(HordeError::InvalidConfig(format!(
                "spawn_min_distance ({}) must not be negative",
                self.spawn_min_distance
            )));
        }

        if self.spawn_min_distance > self.spawn_max_distance {
            return Err(HordeError::InvalidConfig(format!(
                "spawn_min_distance ({}) should be <= spawn_max_distance ({})",
                self.spawn_min_distance, self.spawn_max_distance
            )));
        }

        if self.spawn_population_min > self.spawn_population_max
            || self.spawn_population_max > TILE_CAPACITY
        {
            return Err(HordeError::InvalidConfig(format!(
                "spawn population range {}..={} must be ordered and fit in {}",
                self.spawn_population_min, self.spawn_population_max, TILE_CAPACITY
            )));
        }

        if self.spawn_leaders > self.spawn_population_min {
            return Err(HordeError::InvalidConfig(format!(
                "spawn_leaders ({}) should be <= spawn_population_min ({})",
                self.spawn_leaders, self.spawn_population_min
            )));
        }

        if self.materialize_batch_max == 0 {
            return Err(HordeError::InvalidConfig(
                "materialize_batch_max must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
