//! Fixed-timestep game loop
//!
//! Wires the collaborators around the simulation: one `step` polls input,
//! runs one tick, dispatches sounds and redraws.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::error::ConfigError;
use crate::platform::{FramePacer, InputSource, Renderer, SoundSink};
use crate::renderer::{SpriteSet, draw_frame};
use crate::settings::{CollisionMode, Settings};
use crate::sim::{GameState, Geometry, TickContext, TickInput, tick};

/// Result of a single loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// Quit was requested; nothing was ticked or drawn
    Quit,
}

pub struct Game<R: Renderer> {
    state: GameState,
    renderer: R,
    sprites: SpriteSet<R::Image>,
    input: Box<dyn InputSource>,
    audio: AudioManager,
    rng: Pcg32,
    pacer: FramePacer,
    shutdown: Arc<AtomicBool>,
    autopilot: bool,
}

impl<R: Renderer> Game<R> {
    /// Game on the standard playfield
    pub fn new(
        settings: &Settings,
        renderer: R,
        sprites: SpriteSet<R::Image>,
        input: Box<dyn InputSource>,
        sound: Box<dyn SoundSink>,
    ) -> Result<Self, ConfigError> {
        Self::with_geometry(settings, Geometry::standard(), renderer, sprites, input, sound)
    }

    pub fn with_geometry(
        settings: &Settings,
        geometry: Geometry,
        renderer: R,
        sprites: SpriteSet<R::Image>,
        input: Box<dyn InputSource>,
        sound: Box<dyn SoundSink>,
    ) -> Result<Self, ConfigError> {
        sprites.validate(&geometry)?;

        let mut settings = settings.clone();
        if settings.collision == CollisionMode::PixelPerfect && sprites.has_placeholder_silhouette() {
            log::warn!("Placeholder collision sprite, using bounding-box collision");
            settings.collision = CollisionMode::BoundingBox;
        }
        let state = GameState::new(&settings, geometry)?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("RNG seed {}", seed);

        let mut audio = AudioManager::new(sound);
        audio.set_muted(settings.muted);

        Ok(Self {
            state,
            renderer,
            sprites,
            input,
            audio,
            rng: Pcg32::seed_from_u64(seed),
            pacer: FramePacer::new(settings.fps),
            shutdown: Arc::new(AtomicBool::new(false)),
            autopilot: settings.autopilot,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Raising this flag ends `run` at the next poll or pacing slice
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn set_autopilot(&mut self, autopilot: bool) {
        self.autopilot = autopilot;
        log::info!("Autopilot: {}", autopilot);
    }

    /// Poll, tick, play sounds, redraw
    pub fn step(&mut self) -> StepOutcome {
        let frame = self.input.poll();
        if frame.quit || self.shutdown.load(Ordering::Relaxed) {
            log::info!("Quit requested after {} ticks", self.state.time_ticks());
            return StepOutcome::Quit;
        }

        let input = TickInput {
            flap: frame.flap,
            autopilot: self.autopilot,
        };
        let mut ctx = TickContext {
            rng: &mut self.rng,
            silhouettes: self.sprites.silhouettes(),
        };
        tick(&mut self.state, &input, &mut ctx);

        for event in self.state.take_events() {
            log::trace!("event {:?}", event);
            self.audio.play_event(&event);
        }

        draw_frame(&mut self.renderer, &self.sprites, &self.state);
        StepOutcome::Continue
    }

    /// Step at the configured rate until quit or shutdown
    pub fn run(&mut self) {
        log::info!("Game loop running at {:?} per tick", self.pacer.budget());
        loop {
            if self.step() == StepOutcome::Quit {
                break;
            }
            if !self.pacer.wait(&self.shutdown) {
                log::info!("Shutdown requested");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::{AlphaMask, HeadlessRenderer, InputFrame, ScriptedInput, Silent};
    use crate::sim::{CollisionStrategy, GamePhase};

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl SoundSink for Recorder {
        fn play(&mut self, name: &str) {
            self.0.borrow_mut().push(name.to_string());
        }
    }

    fn sprites() -> SpriteSet<AlphaMask> {
        SpriteSet {
            player: AlphaMask::disc(35, 35),
            upper_barrier: AlphaMask::solid(88, 320),
            lower_barrier: AlphaMask::solid(88, 320),
            ground: AlphaMask::solid(289, 102),
            background_day: AlphaMask::solid(289, 511),
            background_night: AlphaMask::solid(289, 511),
            message: AlphaMask::solid(150, 150),
            digits: std::array::from_fn(|_| AlphaMask::solid(24, 36)),
            trail: None,
        }
    }

    fn settings() -> Settings {
        Settings {
            seed: Some(7),
            ..Default::default()
        }
    }

    const FLAP: InputFrame = InputFrame {
        quit: false,
        flap: true,
    };
    const QUIT: InputFrame = InputFrame {
        quit: true,
        flap: false,
    };

    #[test]
    fn test_quit_skips_tick_and_redraw() {
        let input = ScriptedInput::new([QUIT]);
        let mut game = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites(),
            Box::new(input),
            Box::new(Silent),
        )
        .unwrap();

        assert_eq!(game.step(), StepOutcome::Quit);
        assert_eq!(game.renderer().frames(), 0);
        assert_eq!(game.state().time_ticks(), 0);
    }

    #[test]
    fn test_shutdown_flag_stops_step() {
        let mut game = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites(),
            Box::new(ScriptedInput::idle()),
            Box::new(Silent),
        )
        .unwrap();

        assert_eq!(game.step(), StepOutcome::Continue);
        game.shutdown_handle().store(true, Ordering::Relaxed);
        assert_eq!(game.step(), StepOutcome::Quit);
        assert_eq!(game.renderer().frames(), 1);
    }

    #[test]
    fn test_flap_starts_session_with_sounds() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let input = ScriptedInput::new([FLAP, FLAP]);
        let mut game = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites(),
            Box::new(input),
            Box::new(Recorder(Rc::clone(&played))),
        )
        .unwrap();

        game.step();
        assert_eq!(game.state().phase(), GamePhase::Playing);
        assert_eq!(*played.borrow(), vec!["helicopter"]);

        game.step();
        assert_eq!(*played.borrow(), vec!["helicopter", "wing"]);
        assert_eq!(game.renderer().frames(), 2);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let settings = Settings {
            muted: true,
            ..settings()
        };
        let mut game = Game::new(
            &settings,
            HeadlessRenderer::new(),
            sprites(),
            Box::new(ScriptedInput::new([FLAP, FLAP])),
            Box::new(Recorder(Rc::clone(&played))),
        )
        .unwrap();

        game.step();
        game.step();
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_run_stops_on_quit() {
        let input = ScriptedInput::new([InputFrame::default(), InputFrame::default(), QUIT]);
        let mut game = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites(),
            Box::new(input),
            Box::new(Silent),
        )
        .unwrap();

        game.run();
        assert_eq!(game.renderer().frames(), 2);
        assert_eq!(game.state().time_ticks(), 2);
    }

    #[test]
    fn test_placeholder_player_plays_with_bounding_box() {
        let sprites = SpriteSet {
            player: AlphaMask::transparent(0, 0),
            ..sprites()
        };
        let mut game = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites,
            Box::new(ScriptedInput::new([FLAP])),
            Box::new(Silent),
        )
        .unwrap();
        assert_eq!(
            game.state().detector().strategy(),
            CollisionStrategy::BoundingBox {
                padding: crate::consts::BBOX_PADDING
            }
        );

        game.step();
        assert_eq!(game.state().phase(), GamePhase::Playing);
        let mut steps = 0;
        while game.state().phase() == GamePhase::Playing {
            assert_eq!(game.step(), StepOutcome::Continue);
            steps += 1;
            assert!(steps < 200, "session never ended");
        }
        assert_eq!(game.state().sessions_played(), 1);
    }

    #[test]
    fn test_mismatched_sprites_rejected() {
        let sprites = SpriteSet {
            lower_barrier: AlphaMask::solid(80, 320),
            ..sprites()
        };
        let result = Game::new(
            &settings(),
            HeadlessRenderer::new(),
            sprites,
            Box::new(ScriptedInput::idle()),
            Box::new(Silent),
        );
        assert!(matches!(result, Err(ConfigError::SpriteSize { .. })));
    }
}
