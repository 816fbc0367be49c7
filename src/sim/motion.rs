//! Vertical motion of the player

use glam::Vec2;

use super::geometry::{Geometry, Rect};
use crate::consts::*;

/// The player's body. x never changes during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    /// Units per tick, positive is downward
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayerBody {
    /// Fresh body for a new session
    pub fn spawn(geometry: &Geometry) -> Self {
        let start = geometry.player_start();
        Self {
            x: start.x,
            y: start.y,
            velocity: LAUNCH_VELOCITY,
            width: geometry.player_width,
            height: geometry.player_height,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos(), Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Gravity, flap and the ground clamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionModel {
    pub flap_impulse: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub max_rise_speed: f32,
    pub ground_y: f32,
}

impl MotionModel {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            flap_impulse: FLAP_IMPULSE,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            max_rise_speed: MAX_RISE_SPEED,
            ground_y: geometry.ground_y,
        }
    }

    /// Advance one tick. Returns true if the flap took effect.
    pub fn advance(&self, body: &mut PlayerBody, flap_requested: bool) -> bool {
        let flapped = flap_requested && body.y > 0.0;

        if flapped {
            // Replaces the current velocity, gravity skipped this tick
            body.velocity = self.flap_impulse.max(-self.max_rise_speed);
        } else if body.velocity < self.max_fall_speed {
            body.velocity += self.gravity;
        }

        // Never step past the ground line in one tick
        let room = self.ground_y - body.y - body.height;
        body.y += body.velocity.min(room);

        flapped
    }
}
