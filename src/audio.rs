//! Sound effect dispatch
//!
//! The core only knows effect names; playback belongs to a `SoundSink`.

use crate::platform::SoundSink;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player flapped
    Wing,
    /// Player touched ground, ceiling or a barrier
    Hit,
    /// Column passed
    Point,
    /// Welcome screen and background switch
    Helicopter,
}

impl SoundEffect {
    /// Name handed to the sound collaborator
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Wing => "wing",
            SoundEffect::Hit => "hit",
            SoundEffect::Point => "point",
            SoundEffect::Helicopter => "helicopter",
        }
    }

    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Wing),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::Scored { .. } => Some(SoundEffect::Point),
            GameEvent::BackgroundSwitched { .. } | GameEvent::EnteredWelcome => {
                Some(SoundEffect::Helicopter)
            }
            GameEvent::SessionStarted { .. }
            | GameEvent::Crashed { .. }
            | GameEvent::NewHighScore { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn SoundSink>,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn SoundSink>) -> Self {
        Self { sink, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.sink.play(effect.name());
    }

    /// Play whatever the event calls for
    pub fn play_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
