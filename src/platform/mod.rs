//! Platform abstraction layer
//!
//! Everything the core needs from the outside world:
//! - Sprites with an opacity query
//! - A renderer that draws sprites and presents a frame
//! - Fire-and-forget sound by name
//! - Input polling
//! - Uniform random integers
//! - Frame pacing

pub mod headless;
pub mod time;

use rand::Rng;
use rand_pcg::Pcg32;

pub use headless::{AlphaMask, HeadlessRenderer, LogSound, ScriptedInput, Silent};
pub use time::FramePacer;

/// Opaque drawable with a pixel opacity query
pub trait Sprite {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Opacity 0..=255 at a local pixel, None outside the image
    fn opacity_at(&self, x: u32, y: u32) -> Option<u8>;
}

/// Draw target
pub trait Renderer {
    type Image: Sprite;

    fn draw(&mut self, image: &Self::Image, x: f32, y: f32);
    fn present(&mut self);
}

/// Sound playback, never blocks
pub trait SoundSink {
    fn play(&mut self, name: &str);
}

/// Everything that happened on the input devices since the last poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub quit: bool,
    pub flap: bool,
}

pub trait InputSource {
    /// Drain all pending events into one frame
    fn poll(&mut self) -> InputFrame;
}

pub trait RandomSource {
    /// Uniform integer in `low..high`
    fn uniform(&mut self, low: i32, high: i32) -> i32;
}

impl RandomSource for Pcg32 {
    fn uniform(&mut self, low: i32, high: i32) -> i32 {
        self.random_range(low..high)
    }
}
