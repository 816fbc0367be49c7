//! Collision detection
//!
//! Ground and ceiling are always checked first. Barriers are checked with
//! one of two strategies: a padded bounding box, or a pixel scan of the
//! overlapping area using the sprites' opacity.

use glam::{IVec2, Vec2};

use super::geometry::{Geometry, PixelRect};
use super::motion::PlayerBody;
use super::track::ObstacleTrack;
use crate::platform::Sprite;

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ceiling,
    Ground,
    /// Index into the track, front = 0
    UpperBarrier { column: usize },
    LowerBarrier { column: usize },
}

/// How barriers are tested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionStrategy {
    /// Player box inset by `padding` on every side
    BoundingBox { padding: f32 },
    /// Both sprites must be more opaque than `threshold` at the same pixel
    PixelPerfect { threshold: u8 },
}

/// Images used by the pixel-perfect strategy
#[derive(Clone, Copy)]
pub struct Silhouettes<'a> {
    pub player: &'a dyn Sprite,
    pub upper_barrier: &'a dyn Sprite,
    pub lower_barrier: &'a dyn Sprite,
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector {
    strategy: CollisionStrategy,
    ground_y: f32,
    barrier: Vec2,
}

impl CollisionDetector {
    pub fn new(strategy: CollisionStrategy, geometry: &Geometry) -> Self {
        Self {
            strategy,
            ground_y: geometry.ground_y,
            barrier: geometry.barrier_size(),
        }
    }

    pub fn strategy(&self) -> CollisionStrategy {
        self.strategy
    }

    /// First contact found, if any
    pub fn test(
        &self,
        player: &PlayerBody,
        track: &ObstacleTrack,
        silhouettes: &Silhouettes<'_>,
    ) -> Option<Contact> {
        if let Some(contact) = self.bounds_contact(player) {
            return Some(contact);
        }

        match self.strategy {
            CollisionStrategy::BoundingBox { padding } => self.box_contact(player, track, padding),
            CollisionStrategy::PixelPerfect { threshold } => {
                pixel_contact(player, track, silhouettes, threshold)
            }
        }
    }

    pub fn hits(
        &self,
        player: &PlayerBody,
        track: &ObstacleTrack,
        silhouettes: &Silhouettes<'_>,
    ) -> bool {
        self.test(player, track, silhouettes).is_some()
    }

    /// Ceiling at y = 0, floor at the exact ground line
    pub fn bounds_contact(&self, player: &PlayerBody) -> Option<Contact> {
        if player.y <= 0.0 {
            Some(Contact::Ceiling)
        } else if player.bottom() >= self.ground_y {
            Some(Contact::Ground)
        } else {
            None
        }
    }

    fn box_contact(&self, player: &PlayerBody, track: &ObstacleTrack, padding: f32) -> Option<Contact> {
        let body = player.rect().shrink(padding);

        for (i, column) in track.columns().enumerate() {
            let upper = column.upper_rect(self.barrier);
            if body.overlaps_x(&upper) && body.min.y < upper.max.y {
                return Some(Contact::UpperBarrier { column: i });
            }

            let lower = column.lower_rect(self.barrier);
            if body.overlaps_x(&lower) && body.max.y > lower.min.y {
                return Some(Contact::LowerBarrier { column: i });
            }
        }
        None
    }
}

fn pixel_contact(
    player: &PlayerBody,
    track: &ObstacleTrack,
    silhouettes: &Silhouettes<'_>,
    threshold: u8,
) -> Option<Contact> {
    for (i, column) in track.columns().enumerate() {
        if pixel_overlap(
            silhouettes.player,
            player.pos(),
            silhouettes.upper_barrier,
            column.upper_pos(),
            threshold,
        ) {
            return Some(Contact::UpperBarrier { column: i });
        }
    }

    for (i, column) in track.columns().enumerate() {
        if pixel_overlap(
            silhouettes.player,
            player.pos(),
            silhouettes.lower_barrier,
            column.lower_pos(),
            threshold,
        ) {
            return Some(Contact::LowerBarrier { column: i });
        }
    }
    None
}

/// True if any screen pixel is solid in both sprites
pub fn pixel_overlap(a: &dyn Sprite, a_pos: Vec2, b: &dyn Sprite, b_pos: Vec2, threshold: u8) -> bool {
    let rect_a = PixelRect::at(a_pos, a.width(), a.height());
    let rect_b = PixelRect::at(b_pos, b.width(), b.height());

    let Some(overlap) = rect_a.intersection(&rect_b) else {
        return false;
    };

    for x in overlap.min.x..overlap.max.x {
        for y in overlap.min.y..overlap.max.y {
            let p = IVec2::new(x, y);
            let (Some(alpha_a), Some(alpha_b)) =
                (sample(a, p - rect_a.min), sample(b, p - rect_b.min))
            else {
                continue;
            };
            if alpha_a > threshold && alpha_b > threshold {
                return true;
            }
        }
    }
    false
}

/// Opacity at a local coordinate, None when outside the image
#[inline]
fn sample(sprite: &dyn Sprite, local: IVec2) -> Option<u8> {
    if local.x < 0 || local.y < 0 {
        return None;
    }
    sprite.opacity_at(local.x as u32, local.y as u32)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::{BBOX_PADDING, OPACITY_THRESHOLD};
    use crate::platform::AlphaMask;
    use crate::sim::generator::ObstacleColumn;

    struct Masks {
        player: AlphaMask,
        upper: AlphaMask,
        lower: AlphaMask,
    }

    impl Masks {
        fn solid() -> Self {
            Self {
                player: AlphaMask::solid(35, 35),
                upper: AlphaMask::solid(88, 320),
                lower: AlphaMask::solid(88, 320),
            }
        }

        fn silhouettes(&self) -> Silhouettes<'_> {
            Silhouettes {
                player: &self.player,
                upper_barrier: &self.upper,
                lower_barrier: &self.lower,
            }
        }
    }

    fn column(x: f32, lower_y: f32) -> ObstacleColumn {
        ObstacleColumn {
            x,
            upper_y: lower_y - 120.0 - 320.0,
            lower_y,
            scored: false,
        }
    }

    fn body(y: f32) -> PlayerBody {
        let mut body = PlayerBody::spawn(&Geometry::standard());
        body.y = y;
        body
    }

    fn detectors() -> [CollisionDetector; 2] {
        let g = Geometry::standard();
        [
            CollisionDetector::new(CollisionStrategy::BoundingBox { padding: BBOX_PADDING }, &g),
            CollisionDetector::new(CollisionStrategy::PixelPerfect { threshold: OPACITY_THRESHOLD }, &g),
        ]
    }

    #[test]
    fn test_ground_and_ceiling() {
        let masks = Masks::solid();
        let track = ObstacleTrack::from_columns([column(400.0, 250.0)]);
        for detector in detectors() {
            assert_eq!(
                detector.test(&body(0.0), &track, &masks.silhouettes()),
                Some(Contact::Ceiling)
            );
            assert_eq!(
                detector.test(&body(-3.0), &track, &masks.silhouettes()),
                Some(Contact::Ceiling)
            );
            // bottom exactly on the ground line
            let ground_y = Geometry::standard().ground_y;
            assert_eq!(
                detector.test(&body(ground_y - 35.0), &track, &masks.silhouettes()),
                Some(Contact::Ground)
            );
            assert!(!detector.hits(&body(200.0), &track, &masks.silhouettes()));
        }
    }

    #[test]
    fn test_inside_the_gap_is_clear() {
        let masks = Masks::solid();
        // Player spans x 57..92, column straddles it; gap is 200..320
        let track = ObstacleTrack::from_columns([column(40.0, 320.0)]);
        for detector in detectors() {
            assert!(!detector.hits(&body(240.0), &track, &masks.silhouettes()));
        }
    }

    #[test]
    fn test_barrier_hits() {
        let masks = Masks::solid();
        let track = ObstacleTrack::from_columns([column(40.0, 320.0)]);
        for detector in detectors() {
            assert_eq!(
                detector.test(&body(190.0), &track, &masks.silhouettes()),
                Some(Contact::UpperBarrier { column: 0 })
            );
            assert_eq!(
                detector.test(&body(300.0), &track, &masks.silhouettes()),
                Some(Contact::LowerBarrier { column: 0 })
            );
        }
    }

    #[test]
    fn test_padding_forgives_grazes() {
        let masks = Masks::solid();
        let [bbox, pixel] = detectors();
        // Player bottom 2 units into the lower barrier
        let track = ObstacleTrack::from_columns([column(40.0, 320.0)]);
        let grazing = body(320.0 - 35.0 + 2.0);
        assert!(!bbox.hits(&grazing, &track, &masks.silhouettes()));
        assert!(pixel.hits(&grazing, &track, &masks.silhouettes()));
    }

    #[test]
    fn test_transparent_corners_dont_collide() {
        let masks = Masks {
            player: AlphaMask::disc(35, 35),
            ..Masks::solid()
        };
        let [_, pixel] = detectors();
        // Lower barrier's top-left corner sits under the player's bottom-right corner
        let track = ObstacleTrack::from_columns([column(57.0 + 33.0, 255.0 + 33.0)]);
        assert!(!pixel.hits(&body(255.0), &track, &masks.silhouettes()));

        let solid = Masks::solid();
        assert!(pixel.hits(&body(255.0), &track, &solid.silhouettes()));
    }

    #[test]
    fn test_out_of_range_samples_are_skipped() {
        // Reports a larger size than it can sample
        struct Liar;
        impl Sprite for Liar {
            fn width(&self) -> u32 {
                50
            }
            fn height(&self) -> u32 {
                50
            }
            fn opacity_at(&self, x: u32, y: u32) -> Option<u8> {
                (x < 5 && y < 5).then_some(255)
            }
        }
        let solid = AlphaMask::solid(10, 10);
        assert!(!pixel_overlap(&Liar, Vec2::ZERO, &solid, Vec2::new(20.0, 20.0), 128));
        assert!(pixel_overlap(&Liar, Vec2::ZERO, &solid, Vec2::new(2.0, 2.0), 128));
    }

    proptest! {
        #[test]
        fn prop_disjoint_never_collides(
            y in 40.0f32..300.0,
            dx in 0.0f32..200.0,
        ) {
            let masks = Masks::solid();
            let player = body(y);
            // Column entirely to the right of the player
            let track = ObstacleTrack::from_columns([column(player.x + player.width + dx, 200.0)]);
            for detector in detectors() {
                prop_assert!(!detector.hits(&player, &track, &masks.silhouettes()));
            }
        }

        #[test]
        fn prop_transparent_side_never_collides(
            y in 40.0f32..300.0,
            x in -40.0f32..120.0,
            lower_y in 170.0f32..374.0,
        ) {
            let masks = Masks {
                player: AlphaMask::from_fn(35, 35, |x, y| ((x * 7 + y * 3) % 129) as u8),
                ..Masks::solid()
            };
            let [_, pixel] = detectors();
            let track = ObstacleTrack::from_columns([column(x, lower_y.floor())]);
            prop_assert!(!pixel.hits(&body(y), &track, &masks.silhouettes()));
        }

        #[test]
        fn prop_faint_barriers_never_collide(
            y in 40.0f32..300.0,
            x in -40.0f32..120.0,
            lower_y in 170.0f32..374.0,
        ) {
            // Opacity tops out at the threshold, which doesn't count as solid
            let faint = |x: u32, y: u32| ((x * 5 + y * 11) % 129) as u8;
            let masks = Masks {
                upper: AlphaMask::from_fn(88, 320, faint),
                lower: AlphaMask::from_fn(88, 320, faint),
                ..Masks::solid()
            };
            let [_, pixel] = detectors();
            let track = ObstacleTrack::from_columns([column(x, lower_y.floor())]);
            prop_assert!(!pixel.hits(&body(y), &track, &masks.silhouettes()));
        }
    }
}
