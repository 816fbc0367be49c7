//! Scrolling obstacle track
//!
//! Columns are kept oldest-first. The front column drives both spawning and
//! retirement, so the track never runs empty during a session.

use std::collections::VecDeque;

use super::generator::{ObstacleColumn, ObstacleGenerator};
use super::geometry::Geometry;
use crate::consts::{FIRST_COLUMN_LEAD, SPAWN_WINDOW};
use crate::platform::RandomSource;

#[derive(Debug, Clone, Default)]
pub struct ObstacleTrack {
    columns: VecDeque<ObstacleColumn>,
}

impl ObstacleTrack {
    /// Two columns ahead of the player, half a screen apart
    pub fn seeded(
        geometry: &Geometry,
        generator: &ObstacleGenerator,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let first = geometry.screen_width + FIRST_COLUMN_LEAD;
        let second = first + geometry.screen_width / 2.0;
        Self::from_columns([
            generator.spawn_at(first, rng),
            generator.spawn_at(second, rng),
        ])
    }

    pub fn from_columns(columns: impl IntoIterator<Item = ObstacleColumn>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ObstacleColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Oldest column
    pub fn front(&self) -> Option<&ObstacleColumn> {
        self.columns.front()
    }

    /// Shift every column horizontally
    pub fn advance(&mut self, delta_x: f32) {
        for column in &mut self.columns {
            column.x += delta_x;
        }
    }

    /// Append a column once the front one is about to leave the screen
    pub fn maybe_spawn(&mut self, generator: &ObstacleGenerator, rng: &mut dyn RandomSource) -> bool {
        let due = self
            .front()
            .is_some_and(|c| 0.0 < c.x && c.x < SPAWN_WINDOW);
        if due {
            let column = generator.generate(rng);
            log::debug!("spawned column at x={} gap top={}", column.x, column.upper_y);
            self.columns.push_back(column);
        }
        due
    }

    /// Drop the front column once it is fully past the left edge
    pub fn maybe_retire(&mut self, barrier_width: f32) -> Option<ObstacleColumn> {
        if self.front().is_some_and(|c| c.x < -barrier_width) {
            self.columns.pop_front()
        } else {
            None
        }
    }

    /// Count columns whose midpoint just crossed the player's midpoint.
    ///
    /// A column is counted the tick its midpoint lands in
    /// `[player_mid - window, player_mid]`, and never again.
    pub fn score_passes(&mut self, player_mid_x: f32, barrier_width: f32, window: f32) -> u32 {
        let mut passed = 0;
        for column in &mut self.columns {
            if column.scored {
                continue;
            }
            let mid = column.mid_x(barrier_width);
            if mid <= player_mid_x && player_mid_x < mid + window {
                column.scored = true;
                passed += 1;
            }
        }
        passed
    }
}
