//! Enemies
//!
//! Circle bodies that chase the player along the flow field, spread out
//! from each other, and hop over whatever is in the way (walls, other
//! enemies, a player standing on a ledge above).
//!
//! Neighbors are read from snapshots taken before the update pass, so every
//! enemy in a frame reacts to the same positions no matter the update order.

use macroquad::prelude::*;
use crate::config::PhysicsConfig;
use crate::game::{collision, Camera, Rect, TILE_SIZE};
use crate::ui::theme::{enemy_color, BAR_BG, ENEMY_BAR_BORDER, ENEMY_BAR_FILL};
use crate::world::EnemyKind;

/// How hard enemies push away from neighbors
const SEP_STRENGTH: f32 = 420.0;
/// Horizontal speed cap as a multiple of base speed
const SPEED_CAP: f32 = 1.35;
/// Seconds between jumps
const JUMP_COOLDOWN: f32 = 0.22;
/// Ignore the player's x offset inside this many pixels
const CHASE_DEAD_ZONE: f32 = 6.0;

/// Read-only view of an enemy for neighbor queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySnapshot {
    pub pos: Vec2,
    pub radius: f32,
    pub dead: bool,
}

impl EnemySnapshot {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.radius)
    }
}

/// Live neighbors other than `me`
fn others(neighbors: &[EnemySnapshot], me: usize) -> impl Iterator<Item = &EnemySnapshot> {
    neighbors
        .iter()
        .enumerate()
        .filter(move |(i, n)| *i != me && !n.dead)
        .map(|(_, n)| n)
}

/// What an enemy can see this frame
pub struct Surroundings<'a> {
    pub player: Rect,
    /// Flow field direction at the enemy (zero when unknown)
    pub flow_dir: Vec2,
    pub solids: &'a [Rect],
    pub neighbors: &'a [EnemySnapshot],
    /// This enemy's index in `neighbors`
    pub self_index: usize,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Center of the body
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub dead: bool,
    pub on_ground: bool,
    speed: f32,
    jump_speed: f32,
    jump_cd: f32,
    sep_range: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: stats.radius,
            health: stats.health,
            max_health: stats.health,
            dead: false,
            on_ground: false,
            speed: stats.speed,
            jump_speed: stats.jump_speed,
            jump_cd: 0.0,
            sep_range: stats.radius * 3.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.radius)
    }

    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot { pos: self.pos, radius: self.radius, dead: self.dead }
    }

    /// Returns true on the killing blow only
    pub fn take_damage(&mut self, dmg: i32) -> bool {
        if self.dead {
            return false;
        }
        self.health -= dmg;
        if self.health <= 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Sum of push-away vectors from neighbors inside `sep_range`
    fn separation(&self, env: &Surroundings<'_>) -> Vec2 {
        let mut sep = Vec2::ZERO;
        for other in others(env.neighbors, env.self_index) {
            let d = self.pos - other.pos;
            let dist = d.length();
            if dist <= 0.001 || dist >= self.sep_range {
                continue;
            }
            let strength = 1.0 - dist / self.sep_range;
            sep += d / dist * strength;
        }
        sep
    }

    fn chase_dir(&self, env: &Surroundings<'_>) -> f32 {
        if env.flow_dir.x.abs() > 1e-3 {
            return env.flow_dir.x.signum();
        }
        let dx = env.player.center_x() - self.pos.x;
        if dx.abs() > CHASE_DEAD_ZONE {
            dx.signum()
        } else {
            0.0
        }
    }

    /// Another enemy right in front at foot/chest height
    fn blocked_by_enemy(&self, move_dir: f32, env: &Surroundings<'_>) -> bool {
        if move_dir == 0.0 {
            return false;
        }
        let r = self.radius;
        let mut probe = self.rect().offset(move_dir * (r + 6.0), r * 0.35);
        probe.h = r * 0.9;
        others(env.neighbors, env.self_index).any(|other| probe.intersects(&other.rect()))
    }

    pub fn update(&mut self, dt: f32, env: &Surroundings<'_>, physics: &PhysicsConfig) {
        if self.dead {
            return;
        }

        self.jump_cd = (self.jump_cd - dt).max(0.0);

        // Chase plus separation
        let move_dir = self.chase_dir(env);
        let sep = self.separation(env);
        let desired_vx = move_dir * self.speed + sep.x * SEP_STRENGTH * dt;
        let cap = self.speed * SPEED_CAP;
        self.vel.x = desired_vx.clamp(-cap, cap);

        // Gravity
        self.vel.y = (self.vel.y + physics.gravity * dt).min(physics.max_fall_speed);

        // Move/collide with world
        let pre_vx = self.vel.x;
        let mut body = self.rect();
        let hit = collision::move_and_collide(&mut body, self.vel, dt, env.solids);
        self.pos = body.center();
        if hit.hit_wall {
            self.vel.x = 0.0;
        }
        if hit.grounded || hit.hit_ceiling {
            self.vel.y = 0.0;
        }
        self.on_ground = hit.grounded;

        // Climb: jump to get over obstacles, enemies, or up to the player
        let player = &env.player;
        let player_above = player.center_y() < self.pos.y - self.radius - TILE_SIZE / 2.0;
        let close_x = (player.center_x() - self.pos.x).abs() < TILE_SIZE * 4.0;
        let blocked_by_wall = pre_vx.abs() > 1.0 && self.vel.x.abs() < 1e-3;
        let flow_up = env.flow_dir.y < -0.5;

        if self.on_ground && self.jump_cd <= 0.0 {
            let want_jump = blocked_by_wall
                || self.blocked_by_enemy(move_dir, env)
                || (player_above && close_x)
                || flow_up;
            if want_jump {
                self.vel.y = -self.jump_speed;
                self.on_ground = false;
                self.jump_cd = JUMP_COOLDOWN;
            }
        }
    }

    pub fn draw(&self, camera: &Camera) {
        if self.dead {
            return;
        }

        let c = camera.to_screen(self.pos);
        let (cx, cy) = (c.x.trunc(), c.y.trunc());
        draw_circle(cx, cy, self.radius, enemy_color(self.kind));

        // Health bar
        let bar_w = 40.0;
        let bar_h = 6.0;
        let pct = (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0);
        let bx = cx - bar_w / 2.0;
        let by = cy - self.radius - 14.0;
        draw_rectangle(bx, by, bar_w, bar_h, BAR_BG);
        draw_rectangle(bx, by, (bar_w * pct).trunc(), bar_h, ENEMY_BAR_FILL);
        draw_rectangle_lines(bx, by, bar_w, bar_h, 1.0, ENEMY_BAR_BORDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const FLOOR_Y: f32 = 200.0;

    fn floor() -> Vec<Rect> {
        vec![Rect::new(-1000.0, FLOOR_Y, 3000.0, 48.0)]
    }

    fn on_floor(x: f32) -> Enemy {
        Enemy::new(EnemyKind::Basic, Vec2::new(x, FLOOR_Y - 16.0))
    }

    /// Player standing on the same floor
    fn player_at(x: f32) -> Rect {
        Rect::new(x - 16.0, FLOOR_Y - 44.0, 32.0, 44.0)
    }

    fn env<'a>(player: Rect, solids: &'a [Rect], neighbors: &'a [EnemySnapshot]) -> Surroundings<'a> {
        Surroundings { player, flow_dir: Vec2::ZERO, solids, neighbors, self_index: 0 }
    }

    #[test]
    fn test_chases_player() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let snaps = [e.snapshot()];
        e.update(DT, &env(player_at(400.0), &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.vel.x, 230.0);
        assert!(e.pos.x > 100.0);
        assert!(e.on_ground);
    }

    #[test]
    fn test_dead_zone() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let snaps = [e.snapshot()];
        e.update(DT, &env(player_at(104.0), &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.vel.x, 0.0);
    }

    #[test]
    fn test_flow_field_overrides_direct_chase() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let snaps = [e.snapshot()];
        let mut s = env(player_at(400.0), &solids, &snaps);
        s.flow_dir = Vec2::new(-1.0, 0.0);
        e.update(DT, &s, &PhysicsConfig::default());
        assert_eq!(e.vel.x, -230.0);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let other = on_floor(120.0);
        let snaps = [e.snapshot(), other.snapshot()];
        // Player straight above: no chase, only separation
        let player = Rect::new(84.0, -400.0, 32.0, 44.0);
        e.update(DT, &env(player, &solids, &snaps), &PhysicsConfig::default());
        assert!(e.vel.x < 0.0);
    }

    #[test]
    fn test_ignores_self_and_dead_neighbors() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let mut corpse = on_floor(110.0);
        corpse.dead = true;
        let snaps = [e.snapshot(), corpse.snapshot()];
        let player = Rect::new(84.0, -400.0, 32.0, 44.0);
        e.update(DT, &env(player, &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.vel.x, 0.0);
    }

    #[test]
    fn test_jumps_when_blocked_by_wall() {
        let mut solids = floor();
        solids.push(Rect::new(200.0, 0.0, 48.0, FLOOR_Y));
        let mut e = on_floor(184.0);
        let snaps = [e.snapshot()];
        e.update(DT, &env(player_at(600.0), &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.pos.x, 184.0);
        assert_eq!(e.vel.y, -780.0);
        assert!(!e.on_ground);
    }

    #[test]
    fn test_jumps_over_enemy_in_front() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let blocker = on_floor(150.0);
        let snaps = [e.snapshot(), blocker.snapshot()];
        e.update(DT, &env(player_at(600.0), &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.vel.y, -780.0);
    }

    #[test]
    fn test_jumps_toward_player_above() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let snaps = [e.snapshot()];
        let player = Rect::new(140.0, 0.0, 32.0, 44.0);
        e.update(DT, &env(player, &solids, &snaps), &PhysicsConfig::default());
        assert_eq!(e.vel.y, -780.0);
    }

    #[test]
    fn test_jumps_when_flow_points_up() {
        let solids = floor();
        let mut e = on_floor(100.0);
        let snaps = [e.snapshot()];
        let mut s = env(player_at(1000.0), &solids, &snaps);
        s.flow_dir = Vec2::new(0.0, -1.0);
        e.update(DT, &s, &PhysicsConfig::default());
        assert_eq!(e.vel.y, -780.0);

        // Cooldown stops an immediate second jump
        let mut e2 = e.clone();
        e2.on_ground = true;
        e2.jump_cd = JUMP_COOLDOWN;
        e2.vel.y = 0.0;
        e2.update(DT, &s, &PhysicsConfig::default());
        assert!(e2.vel.y > -780.0);
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut e = Enemy::new(EnemyKind::Basic, Vec2::ZERO);
        assert!(!e.take_damage(20));
        assert!(!e.take_damage(20));
        assert!(e.take_damage(20));
        assert!(e.dead);
        assert!(!e.take_damage(20));
    }
}
