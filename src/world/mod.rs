//! The world hordes live in, seen through the traits they need

pub mod oracle;
pub mod sandbox;

pub use oracle::{
    CreatureHandle, DespawningCreature, GroupOracle, GroupResolution, LocalMap, TerrainClass,
    TerrainOracle,
};
pub use sandbox::{SandboxGroups, SandboxMap, SandboxTerrain, SandboxWorld};
