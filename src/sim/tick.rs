//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one tick. Quit handling lives in
//! the loop, not here: by the time `tick` runs the tick is going to happen.

use super::collision::Silhouettes;
use super::geometry::Geometry;
use super::state::{GameEvent, GameState, Phase, Session};
use crate::consts::{FPS, GRAVITY, SCROLL_VELOCITY};
use crate::platform::RandomSource;

/// Autopilot waits this long on the welcome screen before starting
const AUTOPILOT_START_DELAY: u64 = FPS as u64;
/// Autopilot keeps the player's bottom this far above the lower barrier
const AUTOPILOT_MARGIN: f32 = 6.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap (also starts a session from the welcome screen)
    pub flap: bool,
    /// Demo mode - the simulation flies the player
    pub autopilot: bool,
}

/// Collaborators a tick needs
pub struct TickContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub silhouettes: Silhouettes<'a>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, ctx: &mut TickContext<'_>) {
    state.time_ticks += 1;

    match state.phase {
        Phase::Welcome { .. } => tick_welcome(state, input, ctx),
        Phase::Playing(_) => tick_playing(state, input, ctx),
    }
}

fn tick_welcome(state: &mut GameState, input: &TickInput, ctx: &mut TickContext<'_>) {
    let Phase::Welcome { idle_ticks } = &mut state.phase else {
        return;
    };
    *idle_ticks += 1;

    let start = input.flap || (input.autopilot && *idle_ticks >= AUTOPILOT_START_DELAY);
    if start {
        state.start_session(ctx.rng);
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, ctx: &mut TickContext<'_>) {
    let geometry = state.geometry;
    let Phase::Playing(session) = &mut state.phase else {
        return;
    };

    let flap = input.flap || (input.autopilot && autopilot_wants_flap(session, &geometry));

    if let Some(contact) = state
        .detector
        .test(&session.player, &session.track, &ctx.silhouettes)
    {
        state.events.push(GameEvent::Hit { contact });
        state.finish_session(contact);
        return;
    }

    // Scoring
    let passed = session.track.score_passes(
        session.player.mid_x(),
        geometry.barrier_width,
        -SCROLL_VELOCITY,
    );
    for _ in 0..passed {
        session.score += 1;
        log::debug!("Score {}", session.score);
        state.events.push(GameEvent::Scored {
            score: session.score,
        });

        if let Some(theme) = state
            .background
            .as_mut()
            .and_then(|background| background.on_score(session.score))
        {
            log::info!("Background switched to {:?} at score {}", theme, session.score);
            state.events.push(GameEvent::BackgroundSwitched { theme });
        }
    }

    // Player
    if state.motion.advance(&mut session.player, flap) {
        state.events.push(GameEvent::Flapped);
    }

    // Obstacles
    session.track.advance(SCROLL_VELOCITY);
    session.track.maybe_spawn(&state.generator, ctx.rng);
    if let Some(retired) = session.track.maybe_retire(geometry.barrier_width) {
        log::trace!("retired column at x={}", retired.x);
    }

    if let Some(trail) = &mut state.trail {
        trail.scroll(SCROLL_VELOCITY);
        trail.record(session.player.pos());
    }

    session.ticks += 1;
}

/// Aim for the lower edge of the next gap the player hasn't cleared yet
fn autopilot_wants_flap(session: &Session, geometry: &Geometry) -> bool {
    let player = &session.player;
    let floor = session
        .track
        .columns()
        .find(|c| c.x + geometry.barrier_width > player.x)
        .map(|c| c.lower_y)
        .unwrap_or(geometry.ground_y);

    let next_bottom = player.bottom() + player.velocity.max(0.0) + GRAVITY;
    next_bottom > floor - AUTOPILOT_MARGIN
}
