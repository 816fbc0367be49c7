//! Scene drawing
//!
//! Turns a read-only `GameState` into draw calls on any `Renderer`.

pub mod scene;
pub mod sprites;

pub use scene::{digits_of, draw_frame};
pub use sprites::SpriteSet;
