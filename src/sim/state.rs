//! Game state and the session state machine
//!
//! `GameState` owns everything that survives between ticks: the current
//! phase, the running session, the high-score table and cosmetic state.
//! Renderers and tests only get read access.

use std::mem;

use super::collision::{CollisionDetector, Contact};
use super::cosmetics::{BackgroundCycle, MotionTrail, Theme};
use super::generator::ObstacleGenerator;
use super::geometry::Geometry;
use super::motion::{MotionModel, PlayerBody};
use super::track::ObstacleTrack;
use crate::consts::{BACKGROUND_INTERVAL, TRAIL_LENGTH};
use crate::error::ConfigError;
use crate::highscores::HighScores;
use crate::platform::RandomSource;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen, waiting for a flap to start
    Welcome,
    /// Active session
    Playing,
}

/// Something the outside world may want to react to (sound, logs, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnteredWelcome,
    SessionStarted { session: u32 },
    Flapped,
    Scored { score: u32 },
    BackgroundSwitched { theme: Theme },
    Hit { contact: Contact },
    NewHighScore { score: u32 },
    Crashed { score: u32 },
}

/// One play attempt, from spawn to collision
#[derive(Debug, Clone)]
pub struct Session {
    pub player: PlayerBody,
    pub track: ObstacleTrack,
    pub score: u32,
    pub ticks: u64,
}

#[derive(Debug, Clone)]
pub(super) enum Phase {
    Welcome { idle_ticks: u64 },
    Playing(Session),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) phase: Phase,
    pub(super) geometry: Geometry,
    pub(super) motion: MotionModel,
    pub(super) generator: ObstacleGenerator,
    pub(super) detector: CollisionDetector,
    pub(super) background: Option<BackgroundCycle>,
    pub(super) trail: Option<MotionTrail>,
    pub(super) events: Vec<GameEvent>,
    pub(super) time_ticks: u64,
    high_scores: HighScores,
    last_score: u32,
    sessions_played: u32,
}

impl GameState {
    /// Validate configuration and start on the welcome screen
    pub fn new(settings: &Settings, geometry: Geometry) -> Result<Self, ConfigError> {
        settings.validate()?;
        geometry.validate()?;

        log::info!(
            "Playfield {}x{}, ground at {}, collision {}",
            geometry.screen_width,
            geometry.screen_height,
            geometry.ground_y,
            settings.collision.as_str()
        );

        Ok(Self {
            phase: Phase::Welcome { idle_ticks: 0 },
            geometry,
            motion: MotionModel::new(&geometry),
            generator: ObstacleGenerator::new(&geometry),
            detector: CollisionDetector::new(settings.collision_strategy(), &geometry),
            background: settings
                .background_switch
                .then(|| BackgroundCycle::new(BACKGROUND_INTERVAL)),
            trail: settings.motion_trail.then(|| MotionTrail::new(TRAIL_LENGTH)),
            events: vec![GameEvent::EnteredWelcome],
            time_ticks: 0,
            high_scores: HighScores::new(),
            last_score: 0,
            sessions_played: 0,
        })
    }

    pub fn phase(&self) -> GamePhase {
        match self.phase {
            Phase::Welcome { .. } => GamePhase::Welcome,
            Phase::Playing(_) => GamePhase::Playing,
        }
    }

    /// Running session, None on the welcome screen
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Playing(session) => Some(session),
            Phase::Welcome { .. } => None,
        }
    }

    /// Ticks spent on the current welcome screen
    pub fn idle_ticks(&self) -> Option<u64> {
        match self.phase {
            Phase::Welcome { idle_ticks } => Some(idle_ticks),
            Phase::Playing(_) => None,
        }
    }

    /// Current session's score, or the last finished one
    pub fn score(&self) -> u32 {
        self.session().map(|s| s.score).unwrap_or(self.last_score)
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    pub fn theme(&self) -> Theme {
        self.background
            .as_ref()
            .map(BackgroundCycle::theme)
            .unwrap_or_default()
    }

    pub fn trail(&self) -> Option<&MotionTrail> {
        self.trail.as_ref()
    }

    /// Events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub(super) fn start_session(&mut self, rng: &mut dyn RandomSource) {
        let number = self.sessions_played + 1;
        let session = Session {
            player: PlayerBody::spawn(&self.geometry),
            track: ObstacleTrack::seeded(&self.geometry, &self.generator, rng),
            score: 0,
            ticks: 0,
        };

        if let Some(background) = &mut self.background {
            background.reset_session();
        }
        if let Some(trail) = &mut self.trail {
            trail.clear();
        }

        self.phase = Phase::Playing(session);
        self.events.push(GameEvent::SessionStarted { session: number });
        log::info!("Session {} started", number);
    }

    pub(super) fn finish_session(&mut self, contact: Contact) {
        let Phase::Playing(session) = mem::replace(&mut self.phase, Phase::Welcome { idle_ticks: 0 })
        else {
            return;
        };

        self.sessions_played += 1;
        self.last_score = session.score;

        let previous_best = self.high_scores.best();
        self.high_scores
            .add_score(session.score, self.sessions_played, session.ticks);
        if session.score > previous_best {
            log::info!("New high score: {}!", session.score);
            self.events.push(GameEvent::NewHighScore {
                score: session.score,
            });
        }

        log::info!(
            "Session {} over after {} ticks: score {} ({:?})",
            self.sessions_played,
            session.ticks,
            session.score,
            contact
        );
        self.events.push(GameEvent::Crashed {
            score: session.score,
        });
        self.events.push(GameEvent::EnteredWelcome);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn state() -> GameState {
        GameState::new(&Settings::default(), Geometry::standard()).unwrap()
    }

    #[test]
    fn test_starts_on_welcome() {
        let mut state = state();
        assert_eq!(state.phase(), GamePhase::Welcome);
        assert!(state.session().is_none());
        assert_eq!(state.idle_ticks(), Some(0));
        assert_eq!(state.take_events(), vec![GameEvent::EnteredWelcome]);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_bad_geometry_fails_before_start() {
        let geometry = Geometry {
            gap_size: 10.0,
            ..Geometry::standard()
        };
        assert!(GameState::new(&Settings::default(), geometry).is_err());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.take_events();

        state.start_session(&mut rng);
        assert_eq!(state.phase(), GamePhase::Playing);
        let session = state.session().unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.track.len(), 2);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::SessionStarted { session: 1 }]
        );

        if let Phase::Playing(session) = &mut state.phase {
            session.score = 4;
        }
        state.finish_session(Contact::Ground);
        assert_eq!(state.phase(), GamePhase::Welcome);
        assert_eq!(state.score(), 4);
        assert_eq!(state.high_score(), 4);
        assert_eq!(state.sessions_played(), 1);
        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::NewHighScore { score: 4 },
                GameEvent::Crashed { score: 4 },
                GameEvent::EnteredWelcome,
            ]
        );
    }

    #[test]
    fn test_worse_session_keeps_high_score() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(1);
        for score in [6, 2] {
            state.start_session(&mut rng);
            if let Phase::Playing(session) = &mut state.phase {
                session.score = score;
            }
            state.finish_session(Contact::Ceiling);
        }
        assert_eq!(state.high_score(), 6);
        assert_eq!(state.score(), 2);
        assert!(!state
            .take_events()
            .contains(&GameEvent::NewHighScore { score: 2 }));
    }

    #[test]
    fn test_disabled_cosmetics() {
        let settings = Settings {
            background_switch: false,
            motion_trail: false,
            ..Default::default()
        };
        let state = GameState::new(&settings, Geometry::standard()).unwrap();
        assert_eq!(state.theme(), Theme::Day);
        assert!(state.trail().is_none());
    }
}
