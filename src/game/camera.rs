//! Follow camera
//!
//! Eases toward centering the target every frame. The lerp factor is applied
//! per frame, not per second, so it feels the same at any locked FPS.

use macroquad::prelude::Vec2;
use super::Rect;

#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    /// World position of the view's top-left corner
    pub pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    fn desired(target: &Rect, view_w: f32, view_h: f32) -> Vec2 {
        Vec2::new(target.center_x() - view_w * 0.5, target.center_y() - view_h * 0.5)
    }

    /// Move a fraction of the way toward centering on the target
    pub fn update(&mut self, target: &Rect, view_w: f32, view_h: f32, lerp: f32) {
        let desired = Self::desired(target, view_w, view_h);
        self.pos += (desired - self.pos) * lerp;
    }

    /// Center on the target immediately (level start, respawn)
    pub fn snap_to(&mut self, target: &Rect, view_w: f32, view_h: f32) {
        self.pos = Self::desired(target, view_w, view_h);
    }

    /// Whole-pixel offset used for drawing
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.pos.x.trunc(), self.pos.y.trunc())
    }

    /// World rect to screen rect
    pub fn apply(&self, rect: &Rect) -> Rect {
        let o = self.offset();
        rect.offset(-o.x, -o.y)
    }

    /// World point to screen point
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        p - self.offset()
    }

    /// Screen point to world point (mouse aiming)
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        p + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_moves_fraction_of_distance() {
        let mut cam = Camera::new();
        let target = Rect::new(1000.0, 500.0, 20.0, 20.0);
        cam.update(&target, 960.0, 540.0, 0.5);
        // desired = (530, 240), halfway there
        assert_eq!(cam.pos, Vec2::new(265.0, 120.0));
    }

    #[test]
    fn test_snap_and_apply() {
        let mut cam = Camera::new();
        let target = Rect::new(600.5, 400.0, 32.0, 44.0);
        cam.snap_to(&target, 960.0, 540.0);
        let screen = cam.apply(&target);
        // Truncated offset keeps the target within a pixel of screen center
        assert!((screen.center_x() - 480.0).abs() < 1.0);
        assert!((screen.center_y() - 270.0).abs() < 1.0);
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let cam = Camera { pos: Vec2::new(123.7, -40.2) };
        let p = Vec2::new(10.0, 20.0);
        assert_eq!(cam.to_screen(cam.to_world(p)), p);
    }
}
