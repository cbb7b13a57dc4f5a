use thiserror::Error;

#[derive(Error, Debug)]
pub enum HordeError {
    #[error("Coordinate ({x}, {y}) is outside the tracked regions")]
    OutOfReach { x: i32, y: i32 },

    #[error("Refusing merge of horde {mover} into {survivor}: survivor must come first")]
    AmbiguousMerge { survivor: usize, mover: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HordeError>;
