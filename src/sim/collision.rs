//! Collision detection between the player and obstacles
//!
//! Everything in the playfield is an axis-aligned box. Before testing, both
//! boxes are shrunk by a fixed padding on every side so that near-misses
//! read as misses on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle in playfield units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Shrink by `padding` on all four sides.
    ///
    /// A box narrower than twice the padding collapses to its center line
    /// rather than turning inside out.
    pub fn inset(&self, padding: f32) -> Self {
        let size = (self.size - Vec2::splat(2.0 * padding)).max(Vec2::ZERO);
        Self {
            min: self.center() - size * 0.5,
            size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Overlap test after insetting both boxes by `padding`
#[inline]
pub fn padded_overlap(a: &Rect, b: &Rect, padding: f32) -> bool {
    a.inset(padding).overlaps(&b.inset(padding))
}

/// Index of the first obstacle the player hits, in collection order.
///
/// Stops at the first hit; later obstacles are not tested.
pub fn first_collision(player: &Rect, obstacles: &[Obstacle], padding: f32) -> Option<usize> {
    let player = player.inset(padding);
    obstacles
        .iter()
        .position(|o| player.overlaps(&o.rect().inset(padding)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn obstacle_at(id: u32, x: f32, kind: ObstacleKind) -> Obstacle {
        Obstacle::spawn(id, kind, x)
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 10.0, 10.0)));
    }

    #[test]
    fn test_padding_forgives_near_miss() {
        // Raw boxes overlap by 15 units horizontally; padding eats 20.
        let player = Rect::new(80.0, 300.0, 80.0, 80.0);
        let obstacle = Rect::new(145.0, 330.0, 50.0, 50.0);
        assert!(player.overlaps(&obstacle));
        assert!(!padded_overlap(&player, &obstacle, HITBOX_PADDING));

        let obstacle = Rect::new(120.0, 330.0, 50.0, 50.0);
        assert!(padded_overlap(&player, &obstacle, HITBOX_PADDING));
    }

    #[test]
    fn test_inset_never_inverts() {
        let r = Rect::new(0.0, 0.0, 15.0, 40.0).inset(10.0);
        assert_eq!(r.size, Vec2::new(0.0, 20.0));
        assert_eq!(r.center(), Vec2::new(7.5, 20.0));
    }

    #[test]
    fn test_standing_player_clears_air_obstacle() {
        let player = Rect::new(PLAYER_X, GROUND_Y, PLAYER_WIDTH, PLAYER_HEIGHT);
        let air = obstacle_at(1, PLAYER_X, ObstacleKind::Air);
        assert_eq!(first_collision(&player, &[air], HITBOX_PADDING), None);
    }

    #[test]
    fn test_first_collision_wins() {
        let player = Rect::new(PLAYER_X, GROUND_Y, PLAYER_WIDTH, PLAYER_HEIGHT);
        let obstacles = [
            obstacle_at(1, 600.0, ObstacleKind::Ground),
            obstacle_at(2, 100.0, ObstacleKind::Ground),
            obstacle_at(3, 110.0, ObstacleKind::Ground),
        ];
        assert_eq!(
            first_collision(&player, &obstacles, HITBOX_PADDING),
            Some(1)
        );
    }

    proptest! {
        #[test]
        fn prop_padded_separation_never_collides(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 20.0f32..200.0, ah in 20.0f32..200.0,
            gap in 0.0f32..19.9,
            bw in 20.0f32..200.0, bh in 20.0f32..200.0,
            by in -500.0f32..500.0,
        ) {
            // `b` starts less than 2*padding to the right of `a`'s right edge
            // minus the padding band, so padded boxes stay apart horizontally.
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(ax + aw - 20.0 + gap + 0.05, by, bw, bh);
            prop_assert!(!padded_overlap(&a, &b, 10.0));
        }

        #[test]
        fn prop_padded_overlap_is_symmetric(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, 80.0, 80.0);
            let b = Rect::new(bx, by, 50.0, 50.0);
            prop_assert_eq!(padded_overlap(&a, &b, 10.0), padded_overlap(&b, &a, 10.0));
        }
    }
}
