//! Collision System
//!
//! Axis-separated AABB resolution against static tile rects. A body moves
//! along x and is pushed out of anything it overlaps, then the same for y.
//! Resolution direction comes from the sign of the motion, so a body that
//! isn't moving on an axis is never pushed on it.
//!
//! Correct as long as nothing moves a full tile in one step; `max_dt`
//! keeps that true for the speeds the game uses.

use macroquad::prelude::Vec2;
use super::Rect;

/// What happened during one move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Horizontal motion was stopped by a solid
    pub hit_wall: bool,
    /// Landed on top of a solid (moving down)
    pub grounded: bool,
    /// Bumped a solid from below (moving up)
    pub hit_ceiling: bool,
}

/// Move along x by `dx` and snap out of any solid hit
pub fn move_x(body: &mut Rect, dx: f32, solids: &[Rect]) -> bool {
    body.x += dx;
    let mut hit = false;
    for s in solids {
        if !body.intersects(s) {
            continue;
        }
        if dx > 0.0 {
            body.set_right(s.left());
            hit = true;
        } else if dx < 0.0 {
            body.set_left(s.right());
            hit = true;
        }
    }
    hit
}

/// Move along y by `dy`. Returns (landed, hit_ceiling).
pub fn move_y(body: &mut Rect, dy: f32, solids: &[Rect]) -> (bool, bool) {
    body.y += dy;
    let mut landed = false;
    let mut ceiling = false;
    for s in solids {
        if !body.intersects(s) {
            continue;
        }
        if dy > 0.0 {
            body.set_bottom(s.top());
            landed = true;
        } else if dy < 0.0 {
            body.set_top(s.bottom());
            ceiling = true;
        }
    }
    (landed, ceiling)
}

/// Solid directly under the body's feet
pub fn standing_on(body: &Rect, solids: &[Rect]) -> bool {
    let feet = Rect::new(body.x, body.bottom(), body.w, 1.0);
    solids.iter().any(|s| feet.intersects(s))
}

/// Full step: x then y
pub fn move_and_collide(body: &mut Rect, vel: Vec2, dt: f32, solids: &[Rect]) -> CollisionResult {
    let hit_wall = move_x(body, vel.x * dt, solids);
    let (grounded, hit_ceiling) = move_y(body, vel.y * dt, solids);
    CollisionResult { hit_wall, grounded, hit_ceiling }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Vec<Rect> {
        vec![Rect::new(0.0, 100.0, 200.0, 48.0)]
    }

    #[test]
    fn test_lands_on_floor() {
        let mut body = Rect::new(10.0, 50.0, 32.0, 44.0);
        let res = move_and_collide(&mut body, Vec2::new(0.0, 300.0), 0.05, &floor());
        assert!(res.grounded);
        assert!(!res.hit_wall);
        assert_eq!(body.bottom(), 100.0);
    }

    #[test]
    fn test_resting_on_floor_is_not_overlap() {
        let mut body = Rect::new(10.0, 56.0, 32.0, 44.0);
        let res = move_and_collide(&mut body, Vec2::new(100.0, 0.0), 0.1, &floor());
        assert_eq!(res, CollisionResult::default());
        assert_eq!(body.x, 20.0);
    }

    #[test]
    fn test_wall_snaps_to_edge() {
        let wall = vec![Rect::new(100.0, 0.0, 48.0, 48.0)];
        let mut body = Rect::new(60.0, 0.0, 32.0, 44.0);
        assert!(move_x(&mut body, 20.0, &wall));
        assert_eq!(body.right(), 100.0);

        let mut body = Rect::new(150.0, 0.0, 32.0, 44.0);
        assert!(move_x(&mut body, -10.0, &wall));
        assert_eq!(body.left(), 148.0);
    }

    #[test]
    fn test_ceiling_bump() {
        let ceiling = vec![Rect::new(0.0, 0.0, 200.0, 48.0)];
        let mut body = Rect::new(10.0, 52.0, 32.0, 44.0);
        let (landed, bumped) = move_y(&mut body, -10.0, &ceiling);
        assert!(!landed);
        assert!(bumped);
        assert_eq!(body.top(), 48.0);
    }

    #[test]
    fn test_standing_on_needs_support_under_feet() {
        let on_floor = Rect::new(10.0, 60.0, 20.0, 40.0);
        assert!(standing_on(&on_floor, &floor()));
        let past_edge = Rect::new(210.0, 60.0, 20.0, 40.0);
        assert!(!standing_on(&past_edge, &floor()));
        let hovering = Rect::new(10.0, 50.0, 20.0, 40.0);
        assert!(!standing_on(&hovering, &floor()));
    }
}
