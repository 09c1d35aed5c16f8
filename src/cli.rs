//! Command line: config overrides plus a few headless level tools

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::app::resolve_seed;
use crate::config::{ConfigOverrides, GameConfig};
use crate::game::FpsLimit;
use crate::world::{generate_level, load_level_file, save_level_file, LevelFile};

#[derive(Debug, Parser)]
#[command(name = "platformer")]
#[command(about = "Tile-based wave-survival platformer", version)]
pub struct Cli {
    /// Config file (RON). Defaults to the per-user config if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for level generation and spawns
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play a level file (.txt, .csv, .json, .ron) instead of a generated cave
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Generated level width in tiles
    #[arg(long)]
    pub cols: Option<usize>,

    /// Generated level height in tiles
    #[arg(long)]
    pub rows: Option<usize>,

    /// Frame limit: 30, 60 or unlocked
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<FpsLimit>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a level and write it; format from the extension
    ExportLevel {
        out: PathBuf,
    },
    /// Load and validate a level file
    CheckLevel {
        path: PathBuf,
    },
    /// Print the default config as RON, or write it to a file
    DefaultConfig {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_fps(s: &str) -> Result<FpsLimit, String> {
    FpsLimit::parse(s).ok_or_else(|| format!("expected 30, 60 or unlocked, got '{}'", s))
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.seed,
            level: self.level.clone(),
            cols: self.cols,
            rows: self.rows,
            fps_limit: self.fps,
        }
    }

    /// Config lookup plus command line overrides
    pub fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::load(self.config.as_deref())
            .with_context(|| match &self.config {
                Some(p) => format!("Failed to load config {}", p.display()),
                None => "Failed to load config".to_string(),
            })?;
        config
            .apply_overrides(&self.overrides())
            .context("Invalid command line options")?;
        Ok(config)
    }
}

/// Run a headless subcommand
pub fn run(command: &Command, config: &GameConfig) -> Result<()> {
    match command {
        Command::ExportLevel { out } => export_level(config, out),
        Command::CheckLevel { path } => check_level(path).map(|_| ()),
        Command::DefaultConfig { out: Some(path) } => {
            GameConfig::default()
                .save_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
        Command::DefaultConfig { out: None } => {
            println!("{}", GameConfig::default().to_ron()?);
            Ok(())
        }
    }
}

pub fn export_level(config: &GameConfig, out: &Path) -> Result<()> {
    let seed = resolve_seed(config);
    let (cols, rows) = config.generated_size();
    let grid = generate_level(seed, cols, rows);
    let level = LevelFile::new(format!("cave-{}", seed), grid);
    save_level_file(&level, out).with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(seed, cols, rows, path = %out.display(), "level exported");
    println!("Wrote {}x{} level (seed {}) to {}", cols, rows, seed, out.display());
    Ok(())
}

pub fn check_level(path: &Path) -> Result<LevelFile> {
    let level = load_level_file(path).with_context(|| format!("Invalid level {}", path.display()))?;
    let (x, y) = level.spawn().unwrap_or_default();
    println!(
        "{}: {}x{} tiles, spawn at ({}, {})",
        path.display(),
        level.cols(),
        level.rows.len(),
        x,
        y
    );
    Ok(level)
}
