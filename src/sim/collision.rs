//! Collision geometry: AABB overlap and the sword hit-cone
//!
//! The interesting part of the combat feel lives here: an attack connects
//! inside a 180°-wide frontal cone centered on the attacker's facing.

use glam::Vec2;

use super::state::Rect;
use crate::angle_diff;

/// Strict AABB overlap test.
///
/// All four half-plane comparisons are strict, so rectangles that merely
/// touch along an edge or corner do not collide.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

/// Attack hit test: is `target` within `range` of `origin` and inside the
/// 180° frontal cone around `facing_angle`?
///
/// Angles follow screen coordinates (y down): right = 0, down = π/2,
/// left = π, up = -π/2. A target exactly on the cone edge (90° off-axis)
/// counts as a hit.
pub fn in_attack_cone(origin: Vec2, target: Vec2, facing_angle: f32, range: f32) -> bool {
    let delta = target - origin;
    let distance = delta.length();
    if distance > range {
        return false;
    }
    // Coincident centers: bearing is undefined, but the target is
    // unambiguously in range. Count it.
    if distance <= f32::EPSILON {
        return true;
    }
    let bearing = delta.y.atan2(delta.x);
    angle_diff(bearing, facing_angle) <= std::f32::consts::FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(rects_overlap(&a, &b));
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let edge = Rect::new(10.0, 0.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &edge));
        assert!(!rects_overlap(&a, &corner));
    }

    #[test]
    fn test_cone_is_exactly_180_degrees() {
        let origin = Vec2::ZERO;
        let range = 100.0;
        let eps = 1e-3;

        // Facing right: a target at bearing +π/2 - ε hits, +π/2 + ε misses
        let just_inside = Vec2::new((FRAC_PI_2 - eps).cos(), (FRAC_PI_2 - eps).sin()) * 50.0;
        let just_outside = Vec2::new((FRAC_PI_2 + eps).cos(), (FRAC_PI_2 + eps).sin()) * 50.0;
        assert!(in_attack_cone(origin, just_inside, 0.0, range));
        assert!(!in_attack_cone(origin, just_outside, 0.0, range));

        // Directly behind always misses
        assert!(!in_attack_cone(origin, Vec2::new(-50.0, 0.0), 0.0, range));
    }

    #[test]
    fn test_cone_wraps_around_seam() {
        // Facing left (π): a target slightly below the -x axis has bearing
        // near -π; the wrap-aware difference must keep it inside the cone.
        let origin = Vec2::ZERO;
        let target = Vec2::new(-50.0, -1.0);
        assert!(in_attack_cone(origin, target, PI, 100.0));
    }

    #[test]
    fn test_out_of_range_misses() {
        assert!(!in_attack_cone(Vec2::ZERO, Vec2::new(101.0, 0.0), 0.0, 100.0));
        assert!(in_attack_cone(Vec2::ZERO, Vec2::new(99.0, 0.0), 0.0, 100.0));
    }

    #[test]
    fn test_coincident_centers_hit() {
        assert!(in_attack_cone(Vec2::ZERO, Vec2::ZERO, 0.0, 100.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn prop_rect_never_overlaps_distant(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            shift in 200.0f32..1000.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(ax + shift, ay, aw, ah);
            prop_assert!(!rects_overlap(&a, &b));
        }
    }
}
