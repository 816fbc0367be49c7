//! Obstacle column generation

use glam::Vec2;

use super::geometry::{Geometry, Rect};
use crate::platform::RandomSource;

/// An upper and a lower barrier sharing one x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleColumn {
    pub x: f32,
    /// Top edge of the upper barrier (usually above the screen)
    pub upper_y: f32,
    /// Top edge of the lower barrier
    pub lower_y: f32,
    /// Already counted towards the score
    pub scored: bool,
}

impl ObstacleColumn {
    pub fn upper_pos(&self) -> Vec2 {
        Vec2::new(self.x, self.upper_y)
    }

    pub fn lower_pos(&self) -> Vec2 {
        Vec2::new(self.x, self.lower_y)
    }

    pub fn upper_rect(&self, barrier: Vec2) -> Rect {
        Rect::from_pos_size(self.upper_pos(), barrier)
    }

    pub fn lower_rect(&self, barrier: Vec2) -> Rect {
        Rect::from_pos_size(self.lower_pos(), barrier)
    }

    /// Horizontal midpoint
    #[inline]
    pub fn mid_x(&self, barrier_width: f32) -> f32 {
        self.x + barrier_width / 2.0
    }
}

/// Produces columns with a random gap height
#[derive(Debug, Clone, Copy)]
pub struct ObstacleGenerator {
    offset: f32,
    range: i32,
    gap_size: f32,
    barrier_height: f32,
    spawn_x: f32,
}

impl ObstacleGenerator {
    /// `geometry` must already be validated
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            offset: geometry.spawn_offset(),
            range: geometry.spawn_range(),
            gap_size: geometry.gap_size,
            barrier_height: geometry.barrier_height,
            spawn_x: geometry.spawn_x(),
        }
    }

    /// New column just past the right edge
    pub fn generate(&self, rng: &mut dyn RandomSource) -> ObstacleColumn {
        self.spawn_at(self.spawn_x, rng)
    }

    /// New column at an explicit x
    pub fn spawn_at(&self, x: f32, rng: &mut dyn RandomSource) -> ObstacleColumn {
        let lower_y = self.offset + rng.uniform(0, self.range) as f32;
        let upper_y = lower_y - self.gap_size - self.barrier_height;
        ObstacleColumn {
            x,
            upper_y,
            lower_y,
            scored: false,
        }
    }
}
