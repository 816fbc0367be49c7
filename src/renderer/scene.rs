//! Frame composition for the welcome and playing screens
//!
//! Draw order is back to front: background, trail, barriers, ground,
//! player, then the HUD.

use std::f32::consts::TAU;

use super::sprites::SpriteSet;
use crate::consts::{FPS, HUD_MARGIN};
use crate::platform::{Renderer, Sprite};
use crate::sim::{GameState, Session};

/// Welcome screen bob, one full cycle per second
const BOB_AMPLITUDE: f32 = 6.0;
/// High score sits this far above the bottom edge on the welcome screen
const HIGH_SCORE_OFFSET: f32 = 80.0;

/// Draw the current phase and present the frame
pub fn draw_frame<R: Renderer>(renderer: &mut R, sprites: &SpriteSet<R::Image>, state: &GameState) {
    match state.session() {
        Some(session) => draw_playing(renderer, sprites, state, session),
        None => draw_welcome(renderer, sprites, state),
    }
    renderer.present();
}

fn draw_welcome<R: Renderer>(renderer: &mut R, sprites: &SpriteSet<R::Image>, state: &GameState) {
    let geometry = state.geometry();
    let sw = geometry.screen_width;
    let sh = geometry.screen_height;

    renderer.draw(sprites.background(state.theme()), 0.0, 0.0);
    renderer.draw(&sprites.ground, 0.0, geometry.ground_y);

    let idle = state.idle_ticks().unwrap_or(0) as f32;
    let bob = (idle * TAU / FPS as f32).sin() * BOB_AMPLITUDE;
    let player_x = (sw / 5.0).floor();
    let player_y = ((sh - geometry.player_height) / 2.0).floor() + bob;
    renderer.draw(&sprites.player, player_x, player_y);

    let message_x = ((sw - sprites.message.width() as f32) / 2.0).floor();
    let message_y = (sh * 0.13).floor();
    renderer.draw(&sprites.message, message_x, message_y);

    let digits = digits_of(state.high_score());
    let width = number_width(sprites, &digits);
    let height = sprites.digits[0].height() as f32;
    let x = ((sw - width) / 2.0).floor();
    let y = (sh - HIGH_SCORE_OFFSET - height / 2.0).floor();
    draw_number(renderer, sprites, &digits, x, y);
}

fn draw_playing<R: Renderer>(
    renderer: &mut R,
    sprites: &SpriteSet<R::Image>,
    state: &GameState,
    session: &Session,
) {
    let geometry = state.geometry();

    renderer.draw(sprites.background(state.theme()), 0.0, 0.0);

    if let (Some(image), Some(trail)) = (&sprites.trail, state.trail()) {
        for point in trail.points() {
            renderer.draw(image, point.x, point.y);
        }
    }

    for column in session.track.columns() {
        renderer.draw(&sprites.upper_barrier, column.x, column.upper_y);
        renderer.draw(&sprites.lower_barrier, column.x, column.lower_y);
    }

    renderer.draw(&sprites.ground, 0.0, geometry.ground_y);
    renderer.draw(&sprites.player, session.player.x, session.player.y);

    // Score, right-aligned
    let digits = digits_of(session.score);
    let x = geometry.screen_width - number_width(sprites, &digits) - HUD_MARGIN;
    draw_number(renderer, sprites, &digits, x, HUD_MARGIN);
}

/// Decimal digits, most significant first
pub fn digits_of(mut n: u32) -> Vec<usize> {
    let mut digits = Vec::new();
    loop {
        digits.push((n % 10) as usize);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

fn number_width<I: Sprite>(sprites: &SpriteSet<I>, digits: &[usize]) -> f32 {
    digits
        .iter()
        .map(|&d| sprites.digits[d].width() as f32)
        .sum()
}

fn draw_number<R: Renderer>(
    renderer: &mut R,
    sprites: &SpriteSet<R::Image>,
    digits: &[usize],
    mut x: f32,
    y: f32,
) {
    for &d in digits {
        let image = &sprites.digits[d];
        renderer.draw(image, x, y);
        x += image.width() as f32;
    }
}
