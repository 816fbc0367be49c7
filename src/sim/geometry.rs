//! Playfield geometry and rectangles
//!
//! Screen space: origin top-left, y grows downward.

use glam::{IVec2, Vec2};

use crate::consts::*;
use crate::error::ConfigError;

/// Axis-aligned rectangle in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Rectangle shrunk by `pad` on every side
    pub fn shrink(&self, pad: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(pad),
            max: self.max - Vec2::splat(pad),
        }
    }

    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Integer pixel rectangle, `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl PixelRect {
    /// Rectangle of an image blitted at `pos` (floored to the pixel grid)
    pub fn at(pos: Vec2, width: u32, height: u32) -> Self {
        let min = pos.floor().as_ivec2();
        Self {
            min,
            max: min + IVec2::new(width as i32, height as i32),
        }
    }

    /// Overlapping area, None when the rectangles only touch or are apart
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x < max.x && min.y < max.y {
            Some(PixelRect { min, max })
        } else {
            None
        }
    }
}

/// Environment constants, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Top edge of the ground strip
    pub ground_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub barrier_width: f32,
    pub barrier_height: f32,
    pub gap_size: f32,
    pub spawn_margin: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Geometry {
    pub fn standard() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_y: SCREEN_HEIGHT * GROUND_RATIO,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
            barrier_width: BARRIER_WIDTH,
            barrier_height: BARRIER_HEIGHT,
            gap_size: GAP_SIZE,
            spawn_margin: SPAWN_MARGIN,
        }
    }

    /// Height of the ground strip in whole pixels
    pub fn ground_thickness(&self) -> f32 {
        (self.screen_height - self.ground_y).floor()
    }

    /// Lowest y a lower barrier may start at
    pub fn spawn_offset(&self) -> f32 {
        (self.screen_height / 3.0).floor()
    }

    /// Exclusive upper bound of the random lower-barrier draw
    pub fn spawn_range(&self) -> i32 {
        // 1.2 * offset, kept exact for whole-unit offsets
        let reserve = self.spawn_offset() * 6.0 / 5.0;
        (self.screen_height - self.ground_thickness() - reserve) as i32
    }

    /// x where generated columns appear
    pub fn spawn_x(&self) -> f32 {
        self.screen_width + self.spawn_margin
    }

    /// Where each session's player starts
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            (self.screen_width / 5.0).floor(),
            (self.screen_height / 2.0).floor(),
        )
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn barrier_size(&self) -> Vec2 {
        Vec2::new(self.barrier_width, self.barrier_height)
    }

    /// Reject geometry the generator or the motion model can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ground_y", self.ground_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("barrier_width", self.barrier_width),
            ("barrier_height", self.barrier_height),
            ("gap_size", self.gap_size),
        ];
        for (name, value) in dims {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }

        let upper = self.spawn_range();
        if upper < 1 {
            return Err(ConfigError::EmptySpawnRange { upper });
        }

        if self.gap_size <= self.player_height {
            return Err(ConfigError::GapTooNarrow {
                gap: self.gap_size,
                player_height: self.player_height,
            });
        }

        Ok(())
    }
}
