//! World module - everything about the map and what lives on it
//!
//! - `tilemap`: static collision layer from a char grid
//! - `generator`: seeded cave generation
//! - `level_file`: loading/saving hand-made levels
//! - `pathfield`: BFS flow field enemies follow toward the player
//! - `waves` / `powerups`: the run's timeline and pickup catalogue
//! - `level`: one running game, tying all of the above together

mod generator;
mod level;
pub mod level_file;
mod pathfield;
mod powerups;
mod tilemap;
mod waves;

pub use generator::generate_level;
pub use level::{make_stars, Level, Outcome, Star};
pub use level_file::{load_level_file, save_level_file, LevelError, LevelFile, LevelFormat};
pub use pathfield::FlowField;
pub use powerups::{default_wave_powerups, PowerupKind};
pub use tilemap::{Tile, Tilemap};
pub use waves::{default_waves, EnemyKind, EnemyStats, WaveDef, WaveEntry, WaveManager};
