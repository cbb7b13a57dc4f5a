//! Wandering Horde - aggregate simulation of roaming creature groups

pub mod aggregate;
pub mod core;
pub mod spatial;
pub mod world;
