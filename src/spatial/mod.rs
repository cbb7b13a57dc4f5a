//! Coarse-world geometry: the loaded window and region resolution

pub mod resolver;
pub mod window;

pub use resolver::RegionResolver;
pub use window::LoadedWindow;
