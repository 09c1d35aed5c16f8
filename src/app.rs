//! Application state - one game session and the frame loop body
//!
//! `Game` owns everything that survives a restart (config, input, HUD,
//! camera) plus the current `Level`, which is rebuilt on restart.

use macroquad::prelude::*;

use crate::config::{GameConfig, LevelSource};
use crate::game::{Camera, DamageSource, Events, FpsLimit};
use crate::input::InputState;
use crate::ui::theme::{BG_COLOR, DEFEAT_COLOR, HUD_COLOR, VICTORY_COLOR};
use crate::ui::{Hud, Overlay};
use crate::world::{generate_level, load_level_file, Level, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    Defeat,
    Victory,
}

impl GameState {
    pub fn overlay(&self) -> Option<Overlay> {
        match self {
            GameState::Playing => None,
            GameState::Paused => Some(Overlay::Paused),
            GameState::Defeat => Some(Overlay::Defeat),
            GameState::Victory => Some(Overlay::Victory),
        }
    }

    /// Pause toggles only between Playing and Paused
    pub fn toggle_pause(self) -> Self {
        match self {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        }
    }

    pub fn can_restart(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// Seed from the config, otherwise from the clock
pub fn resolve_seed(config: &GameConfig) -> u64 {
    config
        .level
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64)
}

/// Build the configured level. Returns the level and whether it was
/// generated (only generated levels change with the seed).
pub fn build_level(config: &GameConfig, seed: u64) -> (Level, bool) {
    if let LevelSource::File(path) = &config.level.source {
        match load_level_file(path) {
            Ok(file) => return (Level::new(&file.rows, file.name, config, seed), false),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load level, generating one instead");
            }
        }
    }

    let (cols, rows) = config.generated_size();
    let grid = generate_level(seed, cols, rows);
    (Level::new(&grid, format!("cave-{}", seed), config, seed), true)
}

/// Level for a restart. A generated level moves on to the next seed,
/// a file level replays with the same one.
pub fn next_level(config: &GameConfig, seed: u64, generated: bool) -> (u64, Level, bool) {
    let seed = if generated { seed.wrapping_add(1) } else { seed };
    let (level, generated) = build_level(config, seed);
    (seed, level, generated)
}

pub struct Game {
    pub config: GameConfig,
    pub level: Level,
    pub camera: Camera,
    pub hud: Hud,
    pub input: InputState,
    pub events: Events,
    pub state: GameState,
    pub fps_limit: FpsLimit,
    seed: u64,
    generated: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed = resolve_seed(&config);
        let (level, generated) = build_level(&config, seed);

        let mut camera = Camera::new();
        camera.snap_to(&level.player.rect, config.window.width as f32, config.window.height as f32);

        let input = InputState::new();
        if input.has_gamepad() {
            tracing::info!("gamepad connected");
        }

        Self {
            fps_limit: config.window.fps_limit,
            config,
            level,
            camera,
            hud: Hud::new(),
            input,
            events: Events::new(),
            state: GameState::Playing,
            seed,
            generated,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn restart(&mut self) {
        let (seed, level, generated) = next_level(&self.config, self.seed, self.generated);
        self.seed = seed;
        self.level = level;
        self.generated = generated;
        self.state = GameState::Playing;
        self.events.clear_all();
        self.hud.clear();
        self.camera.snap_to(&self.level.player.rect, screen_width(), screen_height());
        tracing::info!(seed = self.seed, "restarted");
    }

    /// One frame: input, simulation, events, camera and drawing.
    /// Returns false when the player asked to quit.
    pub fn frame(&mut self) -> bool {
        let input = self.input.snapshot(&self.camera);

        if input.quit_pressed {
            tracing::info!("quit requested");
            return false;
        }
        if input.pause_pressed {
            self.state = self.state.toggle_pause();
        }
        if input.restart_pressed && self.state.can_restart() {
            self.restart();
        }

        let dt = get_frame_time().min(self.config.physics.max_dt);

        if self.state == GameState::Playing {
            self.level.update(dt, &input, &mut self.events);
            match self.level.outcome() {
                Outcome::Playing => {}
                Outcome::Defeat => self.state = GameState::Defeat,
                Outcome::Victory => {
                    self.state = GameState::Victory;
                    self.hud.toast("All waves cleared!", VICTORY_COLOR);
                    tracing::info!(kills = self.level.kills, "victory");
                }
            }
        }

        self.drain_events();
        self.hud.update(dt);

        self.camera.update(&self.level.player.rect, screen_width(), screen_height(), self.config.camera.lerp);

        clear_background(BG_COLOR);
        self.level.draw(&self.camera);
        self.hud.draw(&self.level, self.state.overlay());

        true
    }

    fn drain_events(&mut self) {
        for e in self.events.damage.drain() {
            let source = match e.source {
                DamageSource::Spike => "spike",
                DamageSource::Enemy => "enemy",
            };
            tracing::debug!(amount = e.amount, source, remaining = e.remaining, "player hit");
        }
        // Kills show in the HUD counter
        self.events.enemy_killed.clear();

        for e in self.events.powerup_collected.drain() {
            self.hud.toast(format!("+ {}  {}", e.kind.name(), e.kind.description()), e.kind.color());
        }
        for e in self.events.wave_started.drain() {
            self.hud.toast(format!("Wave {}: {}", e.number, e.name), HUD_COLOR);
        }
        if !self.events.respawned.is_empty() {
            self.events.respawned.clear();
            self.camera.snap_to(&self.level.player.rect, screen_width(), screen_height());
        }
        for e in self.events.player_died.drain() {
            tracing::info!(wave = e.wave, kills = e.kills, "player died");
            self.hud.toast("You died", DEFEAT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn small_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.level.source = LevelSource::Generated { cols: 24, rows: 16 };
        config.level.seed = Some(5);
        config
    }

    #[test]
    fn test_resolve_seed_prefers_config() {
        assert_eq!(resolve_seed(&small_config()), 5);
    }

    #[test]
    fn test_build_generated_level() {
        let (level, generated) = build_level(&small_config(), 5);
        assert!(generated);
        assert_eq!(level.name, "cave-5");
        assert_eq!(level.tilemap.cols(), 24);
        assert_eq!(level.tilemap.rows(), 16);
    }

    #[test]
    fn test_missing_file_falls_back_to_generated() {
        let mut config = small_config();
        config.level.source = LevelSource::File(PathBuf::from("/definitely/not/here.txt"));
        let (level, generated) = build_level(&config, 11);
        assert!(generated);
        assert_eq!(level.tilemap.cols(), crate::config::DEFAULT_COLS);
    }

    #[test]
    fn test_file_level_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.txt");
        std::fs::write(&path, "##########\n#P.......#\n##########\n").unwrap();
        let mut config = small_config();
        config.level.source = LevelSource::File(path);
        let (level, generated) = build_level(&config, 1);
        assert!(!generated);
        assert_eq!(level.name, "room");
        assert_eq!(level.spawn_tile(), (1, 1));
    }

    #[test]
    fn test_restart_advances_seed_only_for_generated() {
        let (seed, level, generated) = next_level(&small_config(), 5, true);
        assert_eq!(seed, 6);
        assert!(generated);
        assert_eq!(level.name, "cave-6");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.txt");
        std::fs::write(&path, "##########\n#P.......#\n##########\n").unwrap();
        let mut config = small_config();
        config.level.source = LevelSource::File(path);
        let (seed, level, generated) = next_level(&config, 5, false);
        assert_eq!(seed, 5);
        assert!(!generated);
        assert_eq!(level.name, "room");
    }

    #[test]
    fn test_pause_toggle_and_restart_rules() {
        assert_eq!(GameState::Playing.toggle_pause(), GameState::Paused);
        assert_eq!(GameState::Paused.toggle_pause(), GameState::Playing);
        assert_eq!(GameState::Defeat.toggle_pause(), GameState::Defeat);
        assert!(!GameState::Playing.can_restart());
        assert!(GameState::Victory.can_restart());
        assert_eq!(GameState::Playing.overlay(), None);
        assert_eq!(GameState::Defeat.overlay(), Some(Overlay::Defeat));
    }
}
