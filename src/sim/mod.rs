//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through `RandomSource`
//! - No rendering, audio or input dependencies; sprites are only read for opacity

pub mod collision;
pub mod cosmetics;
pub mod generator;
pub mod geometry;
pub mod motion;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{CollisionDetector, CollisionStrategy, Contact, Silhouettes, pixel_overlap};
pub use cosmetics::{BackgroundCycle, MotionTrail, Theme};
pub use generator::{ObstacleColumn, ObstacleGenerator};
pub use geometry::{Geometry, PixelRect, Rect};
pub use motion::{MotionModel, PlayerBody};
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{TickContext, TickInput, tick};
pub use track::ObstacleTrack;
