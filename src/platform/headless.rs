//! Headless collaborators
//!
//! Used by tests and the demo runner; no window, no audio device.

use std::collections::VecDeque;

use super::{InputFrame, InputSource, Renderer, SoundSink, Sprite};

/// In-memory opacity grid standing in for a decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Build from a per-pixel opacity function
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                alpha.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            alpha,
        }
    }

    /// Fully opaque rectangle
    pub fn solid(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| u8::MAX)
    }

    /// Fully transparent rectangle
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| 0)
    }

    /// Opaque disc inscribed in the rectangle, transparent corners
    pub fn disc(width: u32, height: u32) -> Self {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let r = cx.min(cy);
        Self::from_fn(width, height, |x, y| {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r { u8::MAX } else { 0 }
        })
    }
}

impl Sprite for AlphaMask {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn opacity_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.alpha.get((y * self.width + x) as usize).copied()
    }
}

/// A draw call as seen by the headless renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub width: u32,
    pub height: u32,
    pub x: f32,
    pub y: f32,
}

/// Renderer that records draw calls instead of rasterizing
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }
}

impl Renderer for HeadlessRenderer {
    type Image = AlphaMask;

    fn draw(&mut self, image: &AlphaMask, x: f32, y: f32) {
        self.pending.push(DrawCall {
            width: image.width,
            height: image.height,
            x,
            y,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

/// Plays back a fixed list of input frames, then reports no input
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Never produces input
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Discards every sound
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _name: &str) {}
}

/// Writes sound triggers to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSound;

impl SoundSink for LogSound {
    fn play(&mut self, name: &str) {
        log::debug!("sound: {}", name);
    }
}
