//! Player controller
//!
//! Platforming feel comes from a handful of small timers:
//! - jump buffer: a press shortly before landing still jumps
//! - coyote time: a jump shortly after walking off a ledge still counts as grounded
//! - jump cut: releasing jump while rising cuts the arc short
//!
//! All stats are read from `Abilities` every frame, so powerups take effect
//! immediately.

use macroquad::prelude::*;
use crate::config::PhysicsConfig;
use crate::game::{
    collision, Abilities, Camera, Rect, AIR_ACCEL, COYOTE_TIME, JUMP_BUFFER_TIME,
    JUMP_CUT_MULTIPLIER, PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::input::FrameInput;
use crate::ui::theme::{PLAYER_COLOR, PLAYER_DASH_COLOR};
use crate::world::PowerupKind;
use super::Bullet;

pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    /// -1 left, 1 right
    pub facing: f32,
    pub health: i32,
    pub abilities: Abilities,

    jumps_left: u32,
    was_on_ground: bool,
    coyote_timer: f32,
    jump_buffer_timer: f32,

    dash_timer: f32,
    dash_cd: f32,
    air_dashes_left: u32,

    invuln_timer: f32,
    fire_cd: f32,
    /// Fractional regen waiting to become a whole hit point
    regen_acc: f32,
}

impl Player {
    /// `pos` is the top-left of the body
    pub fn new(pos: Vec2, abilities: Abilities) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            on_ground: false,
            facing: 1.0,
            health: abilities.max_health(),
            jumps_left: abilities.max_jumps(),
            air_dashes_left: abilities.air_dashes_max(),
            abilities,
            was_on_ground: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            dash_timer: 0.0,
            dash_cd: 0.0,
            invuln_timer: 0.0,
            fire_cd: 0.0,
            regen_acc: 0.0,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.abilities.max_health()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn air_dashes_left(&self) -> u32 {
        self.air_dashes_left
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn update(&mut self, dt: f32, input: &FrameInput, physics: &PhysicsConfig, solids: &[Rect]) {
        let a = &self.abilities;

        // Horizontal input
        let move_dir = input.move_dir();
        if move_dir != 0.0 {
            self.facing = move_dir;
        }
        let target_vx = move_dir * a.run_speed();
        if self.on_ground {
            self.vel.x = target_vx;
        } else {
            let t = (a.air_control() * AIR_ACCEL * dt).min(1.0);
            self.vel.x += (target_vx - self.vel.x) * t;
        }

        // Track jump buffer (press slightly early)
        if input.jump_pressed {
            self.jump_buffer_timer = JUMP_BUFFER_TIME;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }

        // Dash
        if input.dash_pressed
            && self.dash_cd <= 0.0
            && !self.is_dashing()
            && (self.on_ground || self.air_dashes_left > 0)
        {
            if !self.on_ground {
                self.air_dashes_left -= 1;
            }
            self.dash_timer = a.dash_time();
            self.dash_cd = a.dash_cooldown();
        }

        let dashing = self.is_dashing();
        if dashing {
            self.vel = Vec2::new(self.facing * a.dash_speed(), 0.0);
            self.dash_timer = (self.dash_timer - dt).max(0.0);
        } else {
            // Gravity
            self.vel.y = (self.vel.y + physics.gravity * dt).min(physics.max_fall_speed);
        }

        // Move & collide (separate axis)
        let hit = collision::move_and_collide(&mut self.rect, self.vel, dt, solids);
        if hit.grounded || hit.hit_ceiling {
            self.vel.y = 0.0;
        }
        // A dash carries no vertical motion, so look for ground under the feet
        self.on_ground = hit.grounded || (dashing && collision::standing_on(&self.rect, solids));

        // Coyote timer (jump slightly after leaving ground)
        if self.on_ground {
            self.coyote_timer = COYOTE_TIME;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }

        // Reset jumps when landing
        let max_jumps = self.abilities.max_jumps();
        if self.on_ground && !self.was_on_ground {
            self.jumps_left = max_jumps;
            self.air_dashes_left = self.abilities.air_dashes_max();
        }
        self.jumps_left = self.jumps_left.min(max_jumps);

        // Attempt jump if buffered: ground/coyote jump, else air jump
        if self.jump_buffer_timer > 0.0 && self.jumps_left > 0 {
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            self.do_jump();
        }

        // Variable jump height: if released while rising, cut jump short
        if input.jump_released && self.vel.y < 0.0 {
            self.vel.y *= JUMP_CUT_MULTIPLIER;
        }

        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        self.fire_cd = (self.fire_cd - dt).max(0.0);
        self.dash_cd = (self.dash_cd - dt).max(0.0);

        self.regenerate(dt);

        self.was_on_ground = self.on_ground;
    }

    fn do_jump(&mut self) {
        self.vel.y = -self.abilities.jump_speed();
        self.on_ground = false;
        self.dash_timer = 0.0;
        self.jumps_left -= 1;
    }

    fn regenerate(&mut self, dt: f32) {
        let max = self.max_health();
        if self.is_dead() || self.health >= max {
            self.regen_acc = 0.0;
            return;
        }
        self.regen_acc += self.abilities.regen_per_sec() * dt;
        let whole = self.regen_acc.floor();
        if whole >= 1.0 {
            self.health = (self.health + whole as i32).min(max);
            self.regen_acc -= whole;
        }
    }

    /// Apply damage through armor and i-frames. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if self.is_invulnerable() || self.is_dead() {
            return 0;
        }
        let scaled = (amount as f32 * self.abilities.damage_taken_mult()).round() as i32;
        let dmg = scaled.max(1);
        self.health = (self.health - dmg).max(0);
        self.invuln_timer = self.abilities.i_frames();
        dmg
    }

    /// Fire toward `aim` (world space) or straight ahead. None while on cooldown.
    pub fn try_fire(&mut self, aim: Option<Vec2>) -> Option<Bullet> {
        if self.fire_cd > 0.0 || self.is_dead() {
            return None;
        }

        let origin = self.center();
        let dir = aim
            .map(|target| target - origin)
            .filter(|d| d.length_squared() > 1.0)
            .map(|d| d.normalize())
            .unwrap_or(Vec2::new(self.facing, 0.0));
        if dir.x != 0.0 {
            self.facing = dir.x.signum();
        }

        self.fire_cd = self.abilities.fire_rate();
        Some(Bullet::new(
            origin,
            dir * self.abilities.bullet_speed(),
            self.abilities.bullet_damage(),
        ))
    }

    /// Add a powerup stack. A max-HP increase heals by the same amount.
    /// Returns the new stack count.
    pub fn collect(&mut self, kind: PowerupKind) -> u32 {
        let old_max = self.max_health();
        let stacks = self.abilities.add_stack(kind, 1);
        let new_max = self.max_health();
        if new_max > old_max {
            self.health += new_max - old_max;
        }
        self.health = self.health.min(new_max);
        stacks
    }

    /// Teleport (top-left) and stop
    pub fn respawn_at(&mut self, pos: Vec2) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
        self.vel = Vec2::ZERO;
        self.dash_timer = 0.0;
    }

    pub fn draw(&self, camera: &Camera) {
        // Blink while invulnerable
        if self.is_invulnerable() && ((self.invuln_timer * 20.0) as i32) % 2 == 0 {
            return;
        }
        let r = camera.apply(&self.rect);
        let color = if self.is_dashing() { PLAYER_DASH_COLOR } else { PLAYER_COLOR };
        draw_rectangle(r.x, r.y, r.w, r.h, color);
    }
}
