//! Error types for the engine, the offload protocol and configuration loading

use std::path::PathBuf;

/// Contract violations raised by the core.
///
/// None of these describe a real game position: they signal a caller that
/// handed the engine malformed input, so they are reported instead of being
/// coerced into something playable.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("mark masks overlap on cells {overlap:#018x}")]
    OverlappingMasks { overlap: u64 },

    #[error("cell index {0} is outside the cube (0..64)")]
    CellOutOfRange(usize),

    #[error("coordinate ({x}, {y}, {z}) is outside the cube (0..4)")]
    CoordOutOfRange { x: i32, y: i32, z: i32 },

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("unknown mark tag {0}")]
    UnknownMark(u8),

    #[error("unknown difficulty tag {0}")]
    UnknownDifficulty(u8),

    #[error("game is already over")]
    GameOver,

    #[error("malformed move message: {0}")]
    Protocol(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
