//! Game settings and preferences
//!
//! Loaded from an optional JSON file. Only presentation and tooling choices
//! live here; physics and geometry are fixed in `consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BBOX_PADDING, FPS, OPACITY_THRESHOLD};
use crate::error::ConfigError;
use crate::sim::CollisionStrategy;

/// Collision strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    BoundingBox,
    #[default]
    PixelPerfect,
}

impl CollisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionMode::BoundingBox => "bounding_box",
            CollisionMode::PixelPerfect => "pixel_perfect",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounding_box" | "bbox" | "box" => Some(CollisionMode::BoundingBox),
            "pixel_perfect" | "pixel" => Some(CollisionMode::PixelPerfect),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Collision ===
    pub collision: CollisionMode,
    /// Inset applied to the player box in bounding-box mode
    pub bbox_padding: f32,
    /// Opacity above which a pixel counts as solid in pixel-perfect mode
    pub opacity_threshold: u8,

    // === Loop ===
    /// Target ticks per second
    pub fps: u32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Cosmetics ===
    /// Flip the background theme every 20 points
    pub background_switch: bool,
    /// Remember recent player positions for a motion trail
    pub motion_trail: bool,

    // === Audio ===
    pub muted: bool,

    // === Demo ===
    /// Let the simulation fly the player
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collision: CollisionMode::PixelPerfect,
            bbox_padding: BBOX_PADDING,
            opacity_threshold: OPACITY_THRESHOLD,

            fps: FPS,
            seed: None,

            background_switch: true,
            motion_trail: false,

            muted: false,

            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.bbox_padding < 0.0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "bbox_padding",
                value: self.bbox_padding,
            });
        }
        Ok(())
    }

    /// Strategy the collision detector should run with
    pub fn collision_strategy(&self) -> CollisionStrategy {
        match self.collision {
            CollisionMode::BoundingBox => CollisionStrategy::BoundingBox {
                padding: self.bbox_padding,
            },
            CollisionMode::PixelPerfect => CollisionStrategy::PixelPerfect {
                threshold: self.opacity_threshold,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_mode_parse() {
        assert_eq!(CollisionMode::from_str("BBox"), Some(CollisionMode::BoundingBox));
        assert_eq!(CollisionMode::from_str("pixel"), Some(CollisionMode::PixelPerfect));
        assert_eq!(CollisionMode::from_str("circle"), None);
        assert_eq!(CollisionMode::BoundingBox.as_str(), "bounding_box");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "collision": "bounding_box", "seed": 7 }"#).unwrap();
        assert_eq!(settings.collision, CollisionMode::BoundingBox);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.fps, FPS);
        assert!(settings.background_switch);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = Settings::from_json(r#"{ "fps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFrameRate));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Settings::from_json("{ fps: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseSettings(_)));
    }

    #[test]
    fn test_strategy_follows_mode() {
        let settings = Settings {
            collision: CollisionMode::BoundingBox,
            bbox_padding: 6.0,
            ..Default::default()
        };
        assert_eq!(
            settings.collision_strategy(),
            CollisionStrategy::BoundingBox { padding: 6.0 }
        );
    }
}
