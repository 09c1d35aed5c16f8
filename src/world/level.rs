//! Level - one run of the game on one map
//!
//! Owns the tilemap, the player, every enemy/bullet/pickup, the wave
//! timeline and the flow field, and steps them all in a fixed order each
//! frame. Anything the outside world cares about (damage, kills, pickups,
//! waves, death) is reported through `Events`.

use std::collections::BTreeMap;
use macroquad::prelude::*;
use ::rand::rngs::SmallRng;
use ::rand::seq::SliceRandom;
use ::rand::SeedableRng;

use crate::config::{GameConfig, PhysicsConfig};
use crate::entities::{Bullet, Enemy, EnemySnapshot, Player, Powerup, Surroundings};
use crate::game::{
    Abilities, Camera, DamageEvent, DamageSource, EnemyKilledEvent, Events, PlayerDiedEvent,
    PowerupCollectedEvent, Rect, RespawnEvent, WaveStartedEvent, ENEMY_SPAWN_MIN_DIST,
    FALL_MARGIN_TILES, FLOW_REBUILD_INTERVAL, POWERUP_SPAWN_MAX_DIST, POWERUP_SPAWN_MIN_DIST,
    STAR_COUNT, STAR_SEED, TILE_SIZE,
};
use crate::input::FrameInput;
use crate::ui::theme::{SPIKE_COLOR, STAR_COLOR, TILE_COLOR, TILE_EDGE, WORLD_BORDER};
use super::{FlowField, PowerupKind, Tilemap, WaveManager};

/// Pickups float this far above the tile center
const POWERUP_LIFT: f32 = 16.0;
/// Stars within this many pixels of the screen edge are still drawn
const STAR_CULL_MARGIN: f32 = 10.0;

/// How the run ended (if it has)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Defeat,
    Victory,
}

/// A background star. Positions are world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Parallax factor, 0.25..1.0
    pub layer: f32,
}

/// Deterministic starfield from a pair of LCGs
pub fn make_stars(seed: u64, count: usize, world_w: f32, world_h: f32) -> Vec<Star> {
    let w = (world_w as u64).max(1);
    let h = (world_h as u64).max(1);
    let mut x: u64 = 1_234_567 + seed * 97;
    let mut y: u64 = 7_654_321 + seed * 53;
    (0..count)
        .map(|_| {
            x = (1_103_515_245 * x + 12_345) & 0x7FFF_FFFF;
            y = (1_664_525 * y + 1_013_904_223) & 0x7FFF_FFFF;
            Star {
                x: (x % w) as f32,
                y: (y % h) as f32,
                size: (1 + x % 2) as f32,
                layer: 0.25 + (y % 75) as f32 / 100.0,
            }
        })
        .collect()
}

/// Grid position of the `P` tile, if any
fn find_spawn_tile(grid: &[String]) -> Option<(i32, i32)> {
    grid.iter().enumerate().find_map(|(y, row)| {
        row.chars().position(|c| c == 'P').map(|x| (x as i32, y as i32))
    })
}

fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

pub struct Level {
    pub name: String,
    pub seed: u64,
    pub tilemap: Tilemap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<Powerup>,
    pub waves: WaveManager,
    pub kills: u32,

    flow: FlowField,
    flow_timer: f32,
    wave_powerups: BTreeMap<u32, Vec<PowerupKind>>,
    physics: PhysicsConfig,
    contact_damage: i32,

    world_rect: Rect,
    stars: Vec<Star>,
    spawn_tile: (i32, i32),
    /// Top-left the player is put back at after falling out
    respawn_point: Vec2,
    fall_y: f32,
    /// Empty tiles with solid ground below, for spawning
    standable: Vec<(i32, i32)>,
    rng: SmallRng,
    outcome: Outcome,
}

impl Level {
    /// Build a level from a validated grid
    pub fn new(grid: &[String], name: impl Into<String>, config: &GameConfig, seed: u64) -> Self {
        let tilemap = Tilemap::new(grid);
        let world_rect = tilemap.world_rect();
        let stars = make_stars(STAR_SEED, STAR_COUNT, world_rect.w, world_rect.h);

        // A `P` tile centers the player on it; without one, tile (2,2) exactly
        let (spawn_tile, spawn) = match find_spawn_tile(grid) {
            Some((x, y)) => (
                (x, y),
                Vec2::new(x as f32 * TILE_SIZE + 8.0, y as f32 * TILE_SIZE + 2.0),
            ),
            None => ((2, 2), Vec2::new(2.0 * TILE_SIZE, 2.0 * TILE_SIZE)),
        };
        let player = Player::new(spawn, Abilities::new(config.abilities));

        let mut standable = Vec::new();
        for y in 0..tilemap.rows() as i32 {
            for x in 0..tilemap.cols() as i32 {
                if tilemap.is_standable(x, y) {
                    standable.push((x, y));
                }
            }
        }

        let flow = FlowField::new(&tilemap);
        let name = name.into();
        tracing::info!(
            name = %name,
            seed,
            cols = tilemap.cols(),
            rows = tilemap.rows(),
            "level ready"
        );

        Self {
            name,
            seed,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            waves: WaveManager::new(config.waves.clone(), config.wave_cooldown, config.first_wave_delay),
            kills: 0,
            flow,
            flow_timer: 0.0,
            wave_powerups: config.wave_powerups.clone(),
            physics: config.physics,
            contact_damage: config.enemy_contact_damage,
            fall_y: world_rect.bottom() + TILE_SIZE * FALL_MARGIN_TILES,
            world_rect,
            stars,
            spawn_tile,
            respawn_point: spawn,
            standable,
            rng: SmallRng::seed_from_u64(seed),
            outcome: Outcome::Playing,
            tilemap,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn world_rect(&self) -> Rect {
        self.world_rect
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn spawn_tile(&self) -> (i32, i32) {
        self.spawn_tile
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dead).count()
    }

    fn player_tile(&self) -> (i32, i32) {
        let c = self.player.center();
        Tilemap::tile_at(c.x, c.y)
    }

    pub fn update(&mut self, dt: f32, input: &FrameInput, events: &mut Events) {
        if self.outcome != Outcome::Playing {
            return;
        }

        // Player
        let solids = self.tilemap.solid_rects_near(&self.player.rect);
        self.player.update(dt, input, &self.physics, &solids);

        // Keep player within horizontal world bounds
        let world = self.world_rect;
        if self.player.rect.left() < world.left() {
            self.player.rect.set_left(world.left());
        }
        if self.player.rect.right() > world.right() {
            self.player.rect.set_right(world.right());
        }

        // Fell out of the world
        if self.player.rect.top() > self.fall_y {
            self.player.respawn_at(self.respawn_point);
            events.respawned.send(RespawnEvent { position: self.respawn_point });
            tracing::debug!(x = self.respawn_point.x, y = self.respawn_point.y, "player respawned");
        }

        // Standing on solid ground works as a checkpoint
        if self.player.on_ground {
            self.respawn_point = Vec2::new(self.player.rect.x, self.player.rect.y);
        }

        // Spikes
        if self.tilemap.spikes_touching(&self.player.rect) {
            let amount = self.player.abilities.spike_damage();
            self.hurt_player(amount, DamageSource::Spike, events);
        }

        // Shooting
        if input.shoot_held {
            if let Some(bullet) = self.player.try_fire(input.aim) {
                self.bullets.push(bullet);
            }
        }

        // Flow field toward the player, a few times per second
        self.flow_timer -= dt;
        if self.flow_timer <= 0.0 {
            self.flow_timer = FLOW_REBUILD_INTERVAL;
            self.flow.rebuild(self.player.center());
            if !self.flow.is_valid() {
                tracing::debug!("flow field has no open target, enemies fall back to direct chase");
            }
        }

        self.update_enemies(dt, events);
        self.update_bullets(dt, events);
        self.update_powerups(dt, events);

        // Waves
        if self.waves.update(dt, self.alive_enemies()) {
            self.spawn_wave(events);
        }

        // Outcome
        if self.player.is_dead() {
            self.outcome = Outcome::Defeat;
            events.player_died.send(PlayerDiedEvent {
                wave: self.waves.wave_number(),
                kills: self.kills,
            });
        } else if self.waves.is_finished() && self.alive_enemies() == 0 {
            self.outcome = Outcome::Victory;
        }
    }

    fn hurt_player(&mut self, amount: i32, source: DamageSource, events: &mut Events) {
        let dealt = self.player.take_damage(amount);
        if dealt > 0 {
            events.damage.send(DamageEvent {
                amount: dealt,
                source,
                remaining: self.player.health,
            });
        }
    }

    fn update_enemies(&mut self, dt: f32, events: &mut Events) {
        let snapshots: Vec<EnemySnapshot> = self.enemies.iter().map(Enemy::snapshot).collect();
        let mut contact = false;

        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            if enemy.dead {
                continue;
            }
            let solids = self.tilemap.solid_rects_near(&enemy.rect());
            let env = Surroundings {
                player: self.player.rect,
                flow_dir: self.flow.direction_at(enemy.pos),
                solids: &solids,
                neighbors: &snapshots,
                self_index: i,
            };
            enemy.update(dt, &env, &self.physics);

            if enemy.rect().intersects(&self.player.rect) {
                contact = true;
            }
        }

        // I-frames make repeated hits in one frame a no-op, so one check is enough
        if contact {
            self.hurt_player(self.contact_damage, DamageSource::Enemy, events);
        }
    }

    fn update_bullets(&mut self, dt: f32, events: &mut Events) {
        for bullet in self.bullets.iter_mut() {
            let solids = self.tilemap.solid_rects_near(&bullet.sweep(dt));
            bullet.update(dt, &solids);
            if !bullet.alive {
                continue;
            }

            let hit = bullet.rect();
            let Some(enemy) = self.enemies.iter_mut().find(|e| !e.dead && e.rect().intersects(&hit)) else {
                continue;
            };
            bullet.alive = false;
            if enemy.take_damage(bullet.damage) {
                self.kills += 1;
                events.enemy_killed.send(EnemyKilledEvent { kind: enemy.kind, position: enemy.pos });
                tracing::debug!(kind = enemy.kind.label(), kills = self.kills, "enemy killed");
            }
        }

        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| !e.dead);
    }

    fn update_powerups(&mut self, dt: f32, events: &mut Events) {
        for powerup in self.powerups.iter_mut() {
            powerup.update(dt);
            if powerup.alive && powerup.rect().intersects(&self.player.rect) {
                powerup.alive = false;
                let stacks = self.player.collect(powerup.kind);
                events.powerup_collected.send(PowerupCollectedEvent { kind: powerup.kind, stacks });
                tracing::debug!(kind = powerup.kind.name(), stacks, "powerup collected");
            }
        }
        self.powerups.retain(|p| p.alive);
    }

    /// Random standable tile whose distance from the player is in `range`.
    /// Falls back to any standable tile, then to the spawn tile.
    fn pick_spawn_tile(&mut self, min_dist: i32, max_dist: i32) -> (i32, i32) {
        let origin = self.player_tile();
        let candidates: Vec<(i32, i32)> = self
            .standable
            .iter()
            .copied()
            .filter(|&t| (min_dist..=max_dist).contains(&manhattan(t, origin)))
            .collect();

        candidates
            .choose(&mut self.rng)
            .or_else(|| self.standable.choose(&mut self.rng))
            .copied()
            .unwrap_or(self.spawn_tile)
    }

    fn spawn_wave(&mut self, events: &mut Events) {
        let Some(def) = self.waves.current_wave_def().cloned() else {
            return;
        };
        let number = self.waves.wave_number();

        for entry in &def.entries {
            for _ in 0..entry.count {
                let (tx, ty) = self.pick_spawn_tile(ENEMY_SPAWN_MIN_DIST, i32::MAX);
                let radius = entry.kind.stats().radius;
                // Standing on the solid below the tile
                let pos = Vec2::new(
                    tx as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                    (ty + 1) as f32 * TILE_SIZE - radius,
                );
                self.enemies.push(Enemy::new(entry.kind, pos));
            }
        }

        let drops = self.wave_powerups.get(&(number as u32)).cloned().unwrap_or_default();
        for kind in drops {
            let (tx, ty) = self.pick_spawn_tile(POWERUP_SPAWN_MIN_DIST, POWERUP_SPAWN_MAX_DIST);
            let pos = Vec2::new(
                tx as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                ty as f32 * TILE_SIZE + TILE_SIZE / 2.0 - POWERUP_LIFT,
            );
            self.powerups.push(Powerup::new(kind, pos));
        }

        let enemies = def.enemy_count();
        tracing::info!(wave = number, name = %def.name, enemies, "wave started");
        events.wave_started.send(WaveStartedEvent { number, name: def.name, enemies });
    }

    pub fn draw(&self, camera: &Camera) {
        let (sw, sh) = (screen_width(), screen_height());
        let cam = camera.pos;

        // Parallax starfield
        let (ww, wh) = (self.world_rect.w.max(1.0), self.world_rect.h.max(1.0));
        for star in &self.stars {
            let px = (star.x - (cam.x * star.layer).trunc()).rem_euclid(ww);
            let py = (star.y - (cam.y * star.layer).trunc()).rem_euclid(wh);
            let sx = px - cam.x;
            let sy = py - cam.y;
            if (-STAR_CULL_MARGIN..=sw + STAR_CULL_MARGIN).contains(&sx)
                && (-STAR_CULL_MARGIN..=sh + STAR_CULL_MARGIN).contains(&sy)
            {
                draw_rectangle(sx.trunc(), sy.trunc(), star.size, star.size, STAR_COLOR);
            }
        }

        // Tiles
        let screen = Rect::new(0.0, 0.0, sw, sh);
        for solid in self.tilemap.solids() {
            let r = camera.apply(solid);
            if !r.intersects(&screen) {
                continue;
            }
            draw_rectangle(r.x, r.y, r.w, r.h, TILE_COLOR);
            let (tx, ty) = Tilemap::tile_at(solid.x, solid.y);
            if !self.tilemap.is_solid(tx, ty - 1) {
                draw_line(r.x, r.y + 1.0, r.right(), r.y + 1.0, 2.0, TILE_EDGE);
            }
        }
        for spike in self.tilemap.spikes() {
            let r = camera.apply(spike);
            if !r.intersects(&screen) {
                continue;
            }
            draw_triangle(
                vec2(r.left(), r.bottom()),
                vec2(r.right(), r.bottom()),
                vec2(r.center_x(), r.top()),
                SPIKE_COLOR,
            );
        }

        for powerup in &self.powerups {
            powerup.draw(camera);
        }
        for enemy in &self.enemies {
            enemy.draw(camera);
        }
        for bullet in &self.bullets {
            bullet.draw(camera);
        }
        self.player.draw(camera);

        // World border
        let border = camera.apply(&self.world_rect);
        draw_rectangle_lines(border.x, border.y, border.w, border.h, 2.0, WORLD_BORDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{EnemyKind, WaveDef};

    const DT: f32 = 1.0 / 60.0;

    /// Flat corridor: spawn at (1,3), floor on row 4
    fn corridor() -> Vec<String> {
        [
            "##########################",
            "#........................#",
            "#........................#",
            "#P.......................#",
            "##########################",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Waves that never start on their own
    fn quiet_config() -> GameConfig {
        GameConfig { first_wave_delay: 1000.0, ..GameConfig::default() }
    }

    fn step(level: &mut Level, input: &FrameInput, events: &mut Events) {
        level.update(DT, input, events);
    }

    #[test]
    fn test_spawn_position_and_world() {
        let level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        assert_eq!(level.spawn_tile(), (1, 3));
        assert_eq!((level.player.rect.x, level.player.rect.y), (56.0, 146.0));
        assert_eq!(level.world_rect(), Rect::new(0.0, 0.0, 26.0 * 48.0, 5.0 * 48.0));
        assert_eq!(level.player.health, 100);
        assert_eq!(level.outcome(), Outcome::Playing);
    }

    #[test]
    fn test_missing_spawn_uses_fallback() {
        let mut grid = corridor();
        grid[3] = grid[3].replace('P', ".");
        let level = Level::new(&grid, "no spawn", &quiet_config(), 1);
        assert_eq!(level.spawn_tile(), (2, 2));
        assert_eq!((level.player.rect.x, level.player.rect.y), (96.0, 96.0));
    }

    #[test]
    fn test_stars_are_deterministic_and_in_world() {
        let a = make_stars(STAR_SEED, STAR_COUNT, 960.0, 480.0);
        let b = make_stars(STAR_SEED, STAR_COUNT, 960.0, 480.0);
        assert_eq!(a.len(), 140);
        assert_eq!(a, b);
        for s in &a {
            assert!(s.x >= 0.0 && s.x < 960.0);
            assert!(s.y >= 0.0 && s.y < 480.0);
            assert!(s.size == 1.0 || s.size == 2.0);
            assert!(s.layer >= 0.25 && s.layer < 1.0);
        }
    }

    #[test]
    fn test_falling_out_respawns() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        let start = Vec2::new(level.player.rect.x, level.player.rect.y);
        level.player.rect.y = level.fall_y + 100.0;
        step(&mut level, &FrameInput::default(), &mut events);
        assert_eq!(events.respawned.len(), 1);
        assert_eq!(level.player.rect.x, start.x);
    }

    #[test]
    fn test_dash_over_pit_keeps_checkpoint_on_ground() {
        // Floor gap at columns 5..=8 (x 240..432), open to the bottom
        let mut grid = corridor();
        grid[4] = "#####....#################".to_string();
        let mut level = Level::new(&grid, "pit", &quiet_config(), 1);
        let mut events = Events::new();
        let idle = FrameInput::default();

        level.player.rect.x = 190.0;
        for _ in 0..30 {
            step(&mut level, &idle, &mut events);
        }
        assert!(level.player.on_ground);

        let dash = FrameInput { dash_pressed: true, ..Default::default() };
        step(&mut level, &dash, &mut events);
        while level.player.is_dashing() {
            step(&mut level, &idle, &mut events);
        }
        assert!(level.respawn_point.x < 240.0, "checkpoint over the pit: {:?}", level.respawn_point);

        for _ in 0..600 {
            step(&mut level, &idle, &mut events);
        }
        assert_eq!(events.respawned.len(), 1);
        assert!(level.player.on_ground);
    }

    #[test]
    fn test_spikes_hurt() {
        let mut grid = corridor();
        grid[3] = "#P.^.....................#".to_string();
        let mut level = Level::new(&grid, "spiky", &quiet_config(), 1);
        let mut events = Events::new();
        // Stand on the spike tile
        level.player.rect.x = 3.0 * TILE_SIZE + 8.0;
        for _ in 0..5 {
            step(&mut level, &FrameInput::default(), &mut events);
        }
        let hits: Vec<_> = events.damage.drain().collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, DamageSource::Spike);
        assert_eq!(hits[0].amount, 30);
        assert_eq!(level.player.health, 70);
    }

    #[test]
    fn test_shooting_spawns_bullets() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        let shoot = FrameInput { shoot_held: true, ..Default::default() };
        step(&mut level, &shoot, &mut events);
        assert_eq!(level.bullets.len(), 1);
        // Still on cooldown next frame
        step(&mut level, &shoot, &mut events);
        assert_eq!(level.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::new(600.0, 176.0));
        enemy.health = 20;
        level.enemies.push(enemy);
        level.bullets.push(Bullet::new(Vec2::new(590.0, 176.0), Vec2::new(100.0, 0.0), 20));

        step(&mut level, &FrameInput::default(), &mut events);

        assert_eq!(level.kills, 1);
        assert!(level.enemies.is_empty());
        assert!(level.bullets.is_empty());
        let killed: Vec<_> = events.enemy_killed.drain().collect();
        assert_eq!(killed.len(), 1);
        assert_eq!(killed[0].kind, EnemyKind::Basic);
    }

    #[test]
    fn test_bullet_hits_only_one_enemy() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        level.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(600.0, 168.0)));
        level.enemies.push(Enemy::new(EnemyKind::Tank, Vec2::new(602.0, 168.0)));
        level.bullets.push(Bullet::new(Vec2::new(600.0, 168.0), Vec2::ZERO, 20));

        step(&mut level, &FrameInput::default(), &mut events);

        let damaged = level.enemies.iter().filter(|e| e.health < e.max_health).count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn test_powerup_pickup() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        level.player.health = 50;
        let at = level.player.center();
        level.powerups.push(Powerup::new(PowerupKind::HpUp, at));

        step(&mut level, &FrameInput::default(), &mut events);

        assert!(level.powerups.is_empty());
        assert_eq!(level.player.abilities.stack(PowerupKind::HpUp), 1);
        assert_eq!(level.player.health, 70);
        let got: Vec<_> = events.powerup_collected.drain().collect();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].stacks, 1);
    }

    #[test]
    fn test_wave_spawns_far_enemies_and_near_powerups() {
        let config = GameConfig {
            waves: vec![WaveDef::new("Test", &[(EnemyKind::Basic, 5)])],
            first_wave_delay: 0.0,
            ..GameConfig::default()
        };
        let mut level = Level::new(&corridor(), "corridor", &config, 7);
        let mut events = Events::new();

        step(&mut level, &FrameInput::default(), &mut events);

        let started: Vec<_> = events.wave_started.drain().collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].number, 1);
        assert_eq!(started[0].enemies, 5);
        assert_eq!(level.enemies.len(), 5);
        for e in &level.enemies {
            let (tx, ty) = Tilemap::tile_at(e.pos.x, e.pos.y);
            assert_eq!(ty, 3);
            assert!(tx >= 13, "enemy too close at tile {}", tx);
        }

        // Wave 1 drops one Sprint Core
        assert_eq!(level.powerups.len(), 1);
        let p = &level.powerups[0];
        assert_eq!(p.kind, PowerupKind::Speed);
        let (tx, _) = Tilemap::tile_at(p.pos.x, p.pos.y);
        assert!((4..=11).contains(&tx));
        assert_eq!(p.pos.y, 3.0 * TILE_SIZE + TILE_SIZE / 2.0 - POWERUP_LIFT);
    }

    #[test]
    fn test_contact_damage_and_defeat() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        level.player.health = 5;
        let at = level.player.center();
        level.enemies.push(Enemy::new(EnemyKind::Basic, at));

        step(&mut level, &FrameInput::default(), &mut events);

        assert_eq!(level.outcome(), Outcome::Defeat);
        assert_eq!(level.player.health, 0);
        let hits: Vec<_> = events.damage.drain().collect();
        assert_eq!(hits[0].source, DamageSource::Enemy);
        assert_eq!(events.player_died.len(), 1);

        // Frozen once decided
        let before = level.player.rect;
        step(&mut level, &FrameInput { right: true, ..Default::default() }, &mut events);
        assert_eq!(level.player.rect, before);
    }

    #[test]
    fn test_victory_after_last_wave_cleared() {
        let config = GameConfig {
            waves: vec![WaveDef::new("Only", &[(EnemyKind::Basic, 1)])],
            first_wave_delay: 0.0,
            ..GameConfig::default()
        };
        let mut level = Level::new(&corridor(), "corridor", &config, 3);
        let mut events = Events::new();

        step(&mut level, &FrameInput::default(), &mut events);
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.outcome(), Outcome::Playing);

        level.enemies.clear();
        step(&mut level, &FrameInput::default(), &mut events);
        assert!(level.waves.is_finished());
        assert_eq!(level.outcome(), Outcome::Victory);
    }

    #[test]
    fn test_player_clamped_to_world() {
        let mut level = Level::new(&corridor(), "corridor", &quiet_config(), 1);
        let mut events = Events::new();
        level.player.rect.x = -200.0;
        step(&mut level, &FrameInput::default(), &mut events);
        assert!(level.player.rect.left() >= 0.0);
    }
}
