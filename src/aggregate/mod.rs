//! Wandering hordes
//!
//! Groups of roaming creatures tracked as aggregate records on the coarse
//! map while they are out of the observer's sight. Hordes wander, grow or
//! shrink with the terrain, merge when they meet, follow loud noises and
//! turn back into individual creatures when they enter the loaded window.

pub mod events;
pub mod output;
pub mod record;
pub mod region;
pub mod registry;
pub mod simulation;
pub mod systems;
pub mod world;

pub use events::{HordeEvent, HordeLog, LoggedEvent};
pub use output::{HordeCensus, RegionCensus};
pub use record::HordeRecord;
pub use region::Region;
pub use registry::HordeRegistry;
pub use simulation::HordeSimulation;
pub use world::Overworld;
