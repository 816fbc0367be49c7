//! Startup errors
//!
//! Everything here is detected before the loop starts; nothing in the
//! simulation returns an error once a session is running.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("obstacle spawn range is empty (upper bound {upper}); check screen, ground and offset sizes")]
    EmptySpawnRange { upper: i32 },
    #[error("gap of {gap} units cannot fit a player {player_height} units tall")]
    GapTooNarrow { gap: f32, player_height: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
    #[error("sprite `{name}` is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    SpriteSize {
        name: &'static str,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
    #[error("frame rate must be at least 1 tick per second")]
    ZeroFrameRate,
    #[error("failed to read settings from {path}: {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    ParseSettings(#[from] serde_json::Error),
}
