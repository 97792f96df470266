//! Axis-aligned collision tests between the bird and the world
//!
//! The bird's hitbox is a box; a pipe is a full-height column with a gap cut
//! into it. A run ends on the first overlap with solid pipe or ground.

use glam::Vec2;

use super::state::{Bird, Pipe};
use crate::consts::*;

/// An axis-aligned box in screen coordinates (origin = top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap: touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.max().x
            && self.max().x > other.pos.x
            && self.pos.y < other.max().y
            && self.max().y > other.pos.y
    }
}

/// The bird's effective hitbox.
///
/// Vertical edges carry asymmetric fudge margins: the top is forgiving by
/// TOP_FUDGE pixels, the belly reaches BOTTOM_FUDGE pixels below the sprite
/// box. Horizontal edges are exact.
pub fn bird_hitbox(bird: &Bird) -> Aabb {
    Aabb::new(
        BIRD_X,
        bird.y + TOP_FUDGE,
        BIRD_SIZE,
        BIRD_SIZE - TOP_FUDGE + BOTTOM_FUDGE,
    )
}

/// True if the bird overlaps solid pipe.
///
/// The solid segments extend past the viewport edges, so flying above the
/// screen does not clear a pipe: inside the column the hitbox must sit
/// entirely within the gap interval.
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let hitbox = bird_hitbox(bird);
    let horizontal = hitbox.min().x < pipe.right_edge() && hitbox.max().x > pipe.x;
    horizontal && (hitbox.min().y < pipe.gap_y || hitbox.max().y > pipe.gap_bottom())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird_at(y: f32) -> Bird {
        Bird {
            y,
            vel: 0.0,
            visible: true,
        }
    }

    fn pipe_at(x: f32, gap_y: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            gap_y,
            passed: false,
        }
    }

    #[test]
    fn test_overlap_strictness() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b), "touching edges must not collide");
        let c = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_gap_aligned_bird_is_safe() {
        // Gap spans [150, 300); center the bird inside it
        let pipe = pipe_at(BIRD_X, 150.0);
        let bird = bird_at(200.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_in_upper_segment() {
        let pipe = pipe_at(BIRD_X, 150.0);
        let bird = bird_at(50.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_in_lower_segment() {
        let pipe = pipe_at(BIRD_X, 150.0);
        let bird = bird_at(400.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_above_the_screen_still_collides() {
        // The upper segment is not bounded by the viewport top
        let pipe = pipe_at(BIRD_X, 150.0);
        let bird = bird_at(-500.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_horizontally_clear_pipe_is_safe() {
        // Pipe entirely to the right of the bird
        let pipe = pipe_at(BIRD_X + BIRD_SIZE + 1.0, 150.0);
        let bird = bird_at(50.0);
        assert!(!bird_hits_pipe(&bird, &pipe));

        // Pipe entirely behind the bird
        let pipe = pipe_at(BIRD_X - PIPE_WIDTH - 1.0, 150.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_top_fudge_margin() {
        let pipe = pipe_at(BIRD_X, 150.0);
        // Sprite top pokes into the upper segment but stays within the fudge
        let bird = bird_at(150.0 - TOP_FUDGE);
        assert!(!bird_hits_pipe(&bird, &pipe));
        // One pixel higher and the hitbox enters the segment
        let bird = bird_at(150.0 - TOP_FUDGE - 1.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bottom_fudge_margin() {
        let pipe = pipe_at(BIRD_X, 150.0);
        let gap_bottom = pipe.gap_bottom();
        // Sprite bottom exactly BOTTOM_FUDGE above the lower segment: safe
        let bird = bird_at(gap_bottom - BIRD_SIZE - BOTTOM_FUDGE);
        assert!(!bird_hits_pipe(&bird, &pipe));
        // One pixel lower and the belly margin trips the collision
        let bird = bird_at(gap_bottom - BIRD_SIZE - BOTTOM_FUDGE + 1.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_hitbox_fudge_geometry() {
        let hitbox = bird_hitbox(&bird_at(100.0));
        assert_eq!(hitbox.min().x, BIRD_X);
        assert_eq!(hitbox.min().y, 100.0 + TOP_FUDGE);
        assert_eq!(hitbox.max().x, BIRD_X + BIRD_SIZE);
        assert_eq!(hitbox.max().y, 100.0 + BIRD_SIZE + BOTTOM_FUDGE);
    }
}
