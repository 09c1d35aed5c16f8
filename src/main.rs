//! Platformer: a tile-based 2D wave-survival platformer
//!
//! Run, jump, dash and shoot through a cave while waves of enemies chase
//! you along a flow field. Powerups dropped between waves stack up into
//! stronger abilities.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod cli;
mod config;
mod entities;
mod game;
mod input;
mod logging;
mod ui;
mod world;

use clap::Parser;
use macroquad::prelude::*;
use app::Game;
use cli::Cli;
use config::GameConfig;
use game::limit_frame;

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: true,
        high_dpi: config.window.high_dpi,
        ..Default::default()
    }
}

async fn run(config: GameConfig) {
    let mut game = Game::new(config);
    tracing::info!(
        seed = game.seed(),
        level = %game.level.name,
        fps = game.fps_limit.label(),
        "=== PLATFORMER v{} ===",
        VERSION
    );

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        if !game.frame() {
            break;
        }

        limit_frame(game.fps_limit, frame_start);
        next_frame().await;
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {:#}", e);
    }

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if let Some(command) = &cli.command {
        return cli::run(command, &config);
    }

    macroquad::Window::from_config(window_conf(&config), run(config));
    Ok(())
}
