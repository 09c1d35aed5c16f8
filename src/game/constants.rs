//! Game constants
//!
//! Tile size and fixed tuning that isn't worth exposing in the config file.

/// Size of one grid cell in pixels
pub const TILE_SIZE: f32 = 48.0;

/// Player hitbox
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 44.0;

/// Seconds a jump press stays buffered before landing
pub const JUMP_BUFFER_TIME: f32 = 0.12;

/// Seconds after walking off a ledge that a ground jump is still allowed
pub const COYOTE_TIME: f32 = 0.10;

/// Upward velocity multiplier when jump is released early
pub const JUMP_CUT_MULTIPLIER: f32 = 0.45;

/// Air steering responsiveness (scaled by the air_control stat)
pub const AIR_ACCEL: f32 = 12.0;

/// How often the enemy flow field is rebuilt (seconds)
pub const FLOW_REBUILD_INTERVAL: f32 = 0.15;

/// Extra distance below the world before the player is respawned (tiles)
pub const FALL_MARGIN_TILES: f32 = 6.0;

/// Minimum Manhattan distance between player and a spawning enemy (tiles)
pub const ENEMY_SPAWN_MIN_DIST: i32 = 12;

/// Ring around the player where wave powerups drop (tiles)
pub const POWERUP_SPAWN_MIN_DIST: i32 = 3;
pub const POWERUP_SPAWN_MAX_DIST: i32 = 10;

/// Parallax starfield
pub const STAR_SEED: u64 = 1337;
pub const STAR_COUNT: usize = 140;
