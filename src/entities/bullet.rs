//! Player bullets

use macroquad::prelude::*;
use crate::game::{Camera, Rect, TILE_SIZE};
use crate::ui::theme::BULLET_COLOR;

pub const BULLET_RADIUS: f32 = 4.0;
/// Seconds before a bullet fizzles
pub const BULLET_LIFE: f32 = 1.25;
/// Longest single move, so fast bullets can't skip through a tile
const MAX_STEP: f32 = TILE_SIZE / 2.0;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub alive: bool,
    life: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32) -> Self {
        Self { pos, vel, damage, alive: true, life: BULLET_LIFE }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, BULLET_RADIUS)
    }

    /// Area covered by this frame's move (for gathering nearby solids)
    pub fn sweep(&self, dt: f32) -> Rect {
        let a = self.rect();
        let b = a.offset(self.vel.x * dt, self.vel.y * dt);
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
    }

    pub fn update(&mut self, dt: f32, solids: &[Rect]) {
        if !self.alive {
            return;
        }

        self.life -= dt;
        if self.life <= 0.0 {
            self.alive = false;
            return;
        }

        let motion = self.vel * dt;
        let steps = (motion.length() / MAX_STEP).ceil().max(1.0) as u32;
        let step = motion / steps as f32;
        for _ in 0..steps {
            self.pos += step;
            let r = self.rect();
            if solids.iter().any(|s| r.intersects(s)) {
                self.alive = false;
                return;
            }
        }
    }

    pub fn draw(&self, camera: &Camera) {
        if !self.alive {
            return;
        }
        let p = camera.to_screen(self.pos);
        draw_circle(p.x.trunc(), p.y.trunc(), BULLET_RADIUS, BULLET_COLOR);
    }
}
