//! Optional cosmetic observers attached to a session
//!
//! Neither affects gameplay; the session reports what they changed as events.

use std::collections::VecDeque;

use glam::Vec2;

/// Background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

/// Flips the theme every `interval` points
#[derive(Debug, Clone)]
pub struct BackgroundCycle {
    theme: Theme,
    interval: u32,
    /// Score that last triggered a flip this session
    last_switch: u32,
}

impl BackgroundCycle {
    pub fn new(interval: u32) -> Self {
        Self {
            theme: Theme::Day,
            interval: interval.max(1),
            last_switch: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Theme carries over between sessions, the trigger marker doesn't
    pub fn reset_session(&mut self) {
        self.last_switch = 0;
    }

    /// Called whenever the score changes; returns the new theme on a flip
    pub fn on_score(&mut self, score: u32) -> Option<Theme> {
        if score == 0 || score % self.interval != 0 || score == self.last_switch {
            return None;
        }
        self.theme = self.theme.toggled();
        self.last_switch = score;
        Some(self.theme)
    }
}

/// Recent player positions, newest first
#[derive(Debug, Clone)]
pub struct MotionTrail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl MotionTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record current position (call each tick while playing)
    pub fn record(&mut self, pos: Vec2) {
        self.points.push_front(pos);
        self.points.truncate(self.capacity);
    }

    /// Old points drift with the scrolling world
    pub fn scroll(&mut self, delta_x: f32) {
        for p in &mut self.points {
            p.x += delta_x;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
