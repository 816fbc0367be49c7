//! Flappy - a side-scrolling reflex game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, obstacles, collisions, session state)
//! - `game`: Fixed-timestep loop wiring input, simulation, sound and redraw
//! - `renderer`: Scene drawing against an abstract renderer
//! - `platform`: Collaborator interfaces (sprites, input, sound, randomness, pacing)
//! - `settings`: Player preferences loaded from JSON

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::{Game, StepOutcome};
pub use highscores::HighScores;
pub use settings::{CollisionMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Target tick rate of the fixed-timestep loop
    pub const FPS: u32 = 32;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 289.0;
    pub const SCREEN_HEIGHT: f32 = 511.0;
    /// Ground line as a fraction of screen height
    pub const GROUND_RATIO: f32 = 0.8;

    /// Player sprite is square
    pub const PLAYER_SIZE: f32 = 35.0;

    /// Barrier sprite dimensions (one half of a column)
    pub const BARRIER_WIDTH: f32 = 88.0;
    pub const BARRIER_HEIGHT: f32 = 320.0;
    /// Vertical clearance between upper and lower barrier
    pub const GAP_SIZE: f32 = 120.0;
    /// New columns appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Lead distance of the first column at session start
    pub const FIRST_COLUMN_LEAD: f32 = 200.0;
    /// Spawn fires while the front column is inside (0, SPAWN_WINDOW)
    pub const SPAWN_WINDOW: f32 = 5.0;

    /// Horizontal scroll per tick
    pub const SCROLL_VELOCITY: f32 = -4.0;

    /// Vertical motion (units per tick)
    pub const FLAP_IMPULSE: f32 = -8.0;
    pub const GRAVITY: f32 = 1.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;
    pub const MAX_RISE_SPEED: f32 = 8.0;
    /// Upward hop given at session start
    pub const LAUNCH_VELOCITY: f32 = -9.0;

    /// Collision tuning
    pub const BBOX_PADDING: f32 = 4.0;
    pub const OPACITY_THRESHOLD: u8 = 128;

    /// Background theme flips every this many points
    pub const BACKGROUND_INTERVAL: u32 = 20;
    /// Number of remembered trail points
    pub const TRAIL_LENGTH: usize = 8;

    /// Score digits are drawn this far from the top-right corner
    pub const HUD_MARGIN: f32 = 10.0;
}
