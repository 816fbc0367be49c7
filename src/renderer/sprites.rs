//! Typed sprite registry
//!
//! Every image the game draws has a named slot; sizes that gameplay
//! depends on are checked once, before the first tick.

use crate::error::ConfigError;
use crate::platform::Sprite;
use crate::sim::{Geometry, Silhouettes, Theme};

#[derive(Debug, Clone)]
pub struct SpriteSet<I> {
    pub player: I,
    /// Barrier flipped to hang from the top
    pub upper_barrier: I,
    pub lower_barrier: I,
    pub ground: I,
    pub background_day: I,
    pub background_night: I,
    /// Welcome screen banner
    pub message: I,
    /// Score digits 0-9
    pub digits: [I; 10],
    /// Drawn at each remembered trail point when present
    pub trail: Option<I>,
}

impl<I: Sprite> SpriteSet<I> {
    /// Collision-relevant sprites must match the playfield geometry.
    ///
    /// Empty placeholders (a failed asset load) are let through with a
    /// warning; collision extents come from the geometry, not the image.
    pub fn validate(&self, geometry: &Geometry) -> Result<(), ConfigError> {
        check_size("player", &self.player, geometry.player_width, geometry.player_height)?;
        check_size(
            "upper_barrier",
            &self.upper_barrier,
            geometry.barrier_width,
            geometry.barrier_height,
        )?;
        check_size(
            "lower_barrier",
            &self.lower_barrier,
            geometry.barrier_width,
            geometry.barrier_height,
        )?;
        Ok(())
    }

    /// Some collision sprite has no pixels to test
    pub fn has_placeholder_silhouette(&self) -> bool {
        [&self.player, &self.upper_barrier, &self.lower_barrier]
            .into_iter()
            .any(is_placeholder)
    }

    pub fn silhouettes(&self) -> Silhouettes<'_> {
        Silhouettes {
            player: &self.player,
            upper_barrier: &self.upper_barrier,
            lower_barrier: &self.lower_barrier,
        }
    }

    pub fn background(&self, theme: Theme) -> &I {
        match theme {
            Theme::Day => &self.background_day,
            Theme::Night => &self.background_night,
        }
    }
}

fn is_placeholder<I: Sprite + ?Sized>(sprite: &I) -> bool {
    sprite.width() == 0 || sprite.height() == 0
}

fn check_size(name: &'static str, sprite: &dyn Sprite, width: f32, height: f32) -> Result<(), ConfigError> {
    if is_placeholder(sprite) {
        log::warn!("sprite `{}` is empty, drawing nothing in its place", name);
        return Ok(());
    }
    let expected_width = width as u32;
    let expected_height = height as u32;
    if sprite.width() != expected_width || sprite.height() != expected_height {
        return Err(ConfigError::SpriteSize {
            name,
            expected_width,
            expected_height,
            actual_width: sprite.width(),
            actual_height: sprite.height(),
        });
    }
    Ok(())
}
