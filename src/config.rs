//! Game configuration
//!
//! Everything tunable lives in one RON file. Every field has a default, so
//! a config file only needs the values it changes:
//!
//! ```ron
//! (
//!     physics: (gravity: 2200.0),
//!     level: (seed: Some(42)),
//! )
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::game::{AbilityBase, FpsLimit};
use crate::world::level_file::limits::MAX_LEVEL_SIZE;
use crate::world::{default_wave_powerups, default_waves, PowerupKind, WaveDef};

/// Smallest generated level that still fits the generator's margins
pub const MIN_GENERATED_SIZE: usize = 8;

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "platformer";
const CONFIG_FILE_NAME: &str = "config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps_limit: FpsLimit,
    pub high_dpi: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Platformer".to_string(),
            width: 960,
            height: 540,
            fps_limit: FpsLimit::Fps60,
            high_dpi: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// px/s²
    pub gravity: f32,
    /// px/s
    pub max_fall_speed: f32,
    /// Frame time clamp in seconds
    pub max_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2600.0,
            max_fall_speed: 2400.0,
            max_dt: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 0..1, higher is snappier
    pub lerp: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { lerp: 0.18 }
    }
}

/// Where the level comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LevelSource {
    Generated { cols: usize, rows: usize },
    File(PathBuf),
}

pub const DEFAULT_COLS: usize = 60;
pub const DEFAULT_ROWS: usize = 34;

impl Default for LevelSource {
    fn default() -> Self {
        LevelSource::Generated { cols: DEFAULT_COLS, rows: DEFAULT_ROWS }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub source: LevelSource,
    /// None picks a seed from the clock
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub level: LevelConfig,
    pub abilities: AbilityBase,
    pub waves: Vec<WaveDef>,
    pub wave_cooldown: f32,
    pub first_wave_delay: f32,
    /// 1-based wave number to the powerups dropped when it starts
    pub wave_powerups: BTreeMap<u32, Vec<PowerupKind>>,
    pub enemy_contact_damage: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            level: LevelConfig::default(),
            abilities: AbilityBase::default(),
            waves: default_waves(),
            wave_cooldown: 1.2,
            first_wave_delay: 0.6,
            wave_powerups: default_wave_powerups(),
            enemy_contact_damage: 12,
        }
    }
}

/// Overrides from the command line, applied after the file is loaded
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub level: Option<PathBuf>,
    pub cols: Option<usize>,
    pub rows: Option<usize>,
    pub fps_limit: Option<FpsLimit>,
}

impl GameConfig {
    /// Default per-user config path (`<config_dir>/platformer/config.ron`)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn user_config_path() -> Option<PathBuf> {
        None
    }

    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("    ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_ron(&contents)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Resolve the config to use.
    ///
    /// An explicit path must load. The per-user file is optional: a missing
    /// file is silent, a broken one logs a warning and falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let Some(path) = Self::user_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring bad config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!("window size {}x{}", self.window.width, self.window.height));
        }

        if let LevelSource::Generated { cols, rows } = self.level.source {
            let ok = |n: usize| (MIN_GENERATED_SIZE..=MAX_LEVEL_SIZE).contains(&n);
            if !ok(cols) || !ok(rows) {
                return invalid(format!(
                    "generated level {}x{} outside {}..={}",
                    cols, rows, MIN_GENERATED_SIZE, MAX_LEVEL_SIZE
                ));
            }
        }

        if self.physics.gravity <= 0.0 {
            return invalid(format!("gravity must be positive (got {})", self.physics.gravity));
        }
        if self.physics.max_dt <= 0.0 {
            return invalid(format!("max_dt must be positive (got {})", self.physics.max_dt));
        }
        if !(self.camera.lerp > 0.0 && self.camera.lerp <= 1.0) {
            return invalid(format!("camera lerp must be in (0, 1] (got {})", self.camera.lerp));
        }

        if self.waves.is_empty() {
            return invalid("at least one wave is required".to_string());
        }
        for wave in &self.waves {
            if wave.entries.iter().any(|e| e.count == 0) {
                return invalid(format!("wave '{}' has an entry with count 0", wave.name));
            }
        }

        Ok(())
    }

    /// Apply command line overrides, then re-validate
    pub fn apply_overrides(&mut self, o: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(seed) = o.seed {
            self.level.seed = Some(seed);
        }
        if let Some(path) = &o.level {
            self.level.source = LevelSource::File(path.clone());
        } else if o.cols.is_some() || o.rows.is_some() {
            let (cur_cols, cur_rows) = self.generated_size();
            self.level.source = LevelSource::Generated {
                cols: o.cols.unwrap_or(cur_cols),
                rows: o.rows.unwrap_or(cur_rows),
            };
        }
        if let Some(fps) = o.fps_limit {
            self.window.fps_limit = fps;
        }
        self.validate()
    }

    /// Generated level size, falling back to the default size for file sources
    pub fn generated_size(&self) -> (usize, usize) {
        match self.level.source {
            LevelSource::Generated { cols, rows } => (cols, rows),
            LevelSource::File(_) => (DEFAULT_COLS, DEFAULT_ROWS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 960);
        assert_eq!(config.physics.gravity, 2600.0);
        assert_eq!(config.enemy_contact_damage, 12);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = GameConfig::from_ron("(physics: (gravity: 2000.0), level: (seed: Some(9)))").unwrap();
        assert_eq!(config.physics.gravity, 2000.0);
        assert_eq!(config.physics.max_dt, 0.05);
        assert_eq!(config.level.seed, Some(9));
        assert_eq!(config.waves.len(), 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let mut config = GameConfig::default();
        config.camera.lerp = 0.5;
        config.level.source = LevelSource::File(PathBuf::from("levels/arena.txt"));
        config.save_to(&path).unwrap();
        assert_eq!(GameConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let err = GameConfig::load(Some(&dir.path().join("missing.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut c = GameConfig::default();
        c.window.width = 0;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.level.source = LevelSource::Generated { cols: 4, rows: 30 };
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.physics.gravity = 0.0;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.camera.lerp = 1.5;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.waves.clear();
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.waves[0].entries[0].count = 0;
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let mut c = GameConfig::default();
        c.apply_overrides(&ConfigOverrides {
            seed: Some(5),
            cols: Some(40),
            fps_limit: Some(FpsLimit::Fps30),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.level.seed, Some(5));
        assert_eq!(c.level.source, LevelSource::Generated { cols: 40, rows: 34 });
        assert_eq!(c.window.fps_limit, FpsLimit::Fps30);

        c.apply_overrides(&ConfigOverrides {
            level: Some(PathBuf::from("a.csv")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.level.source, LevelSource::File(PathBuf::from("a.csv")));
        assert_eq!(c.generated_size(), (60, 34));
    }

    #[test]
    fn test_override_size_out_of_range_fails() {
        let mut c = GameConfig::default();
        let res = c.apply_overrides(&ConfigOverrides { rows: Some(2), ..Default::default() });
        assert!(res.is_err());
    }
}
