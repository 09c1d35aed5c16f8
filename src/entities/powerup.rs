//! Powerup pickups

use macroquad::prelude::*;
use crate::game::{Camera, Rect};
use crate::ui::theme::{with_alpha, OUTLINE_DARK};
use crate::world::PowerupKind;

pub const POWERUP_RADIUS: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub alive: bool,
    /// Age in seconds, drives the bob
    t: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2) -> Self {
        Self { kind, pos, alive: true, t: 0.0 }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, POWERUP_RADIUS)
    }

    pub fn update(&mut self, dt: f32) {
        self.t += dt;
    }

    /// Vertical draw offset; collision ignores it
    pub fn bob(&self) -> f32 {
        (self.t * 3.5).sin() * 4.0
    }

    pub fn draw(&self, camera: &Camera) {
        if !self.alive {
            return;
        }

        let color = self.kind.color();
        let c = camera.to_screen(self.pos);
        let (cx, cy) = (c.x.trunc(), (c.y + self.bob()).trunc());
        let r = POWERUP_RADIUS;

        // Glow
        draw_circle(cx, cy, r + 8.0, with_alpha(color, 60.0 / 255.0));
        draw_circle(cx, cy, r + 4.0, with_alpha(color, 120.0 / 255.0));

        // Diamond
        let top = vec2(cx, cy - r);
        let right = vec2(cx + r, cy);
        let bottom = vec2(cx, cy + r);
        let left = vec2(cx - r, cy);
        draw_triangle(top, right, bottom, color);
        draw_triangle(top, bottom, left, color);
        for (a, b) in [(top, right), (right, bottom), (bottom, left), (left, top)] {
            draw_line(a.x, a.y, b.x, b.y, 2.0, OUTLINE_DARK);
        }
    }
}
