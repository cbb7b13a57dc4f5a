pub mod config;
pub mod error;
pub mod types;

pub use config::HordeConfig;
pub use error::{HordeError, Result};
