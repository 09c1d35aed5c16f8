//! Build automation tasks for the platformer
//!
//! Usage:
//!   cargo xtask build-web            # Build WASM plus web bundle into dist/web
//!   cargo xtask package              # Native release plus levels into dist/<platform>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BIN_NAME: &str = "platformer";
const MQ_JS_URL: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the platformer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and assemble a static web bundle
    BuildWeb {
        /// Mark as dev build (adds a DEV tag to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Build a native release with the bundled levels
    Package {
        /// Target platform label: windows, macos, linux
        #[arg(long)]
        platform: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::Package { platform } => package(platform),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Level files listed in levels/manifest.txt (written by build.rs)
fn bundled_levels(root: &Path) -> Result<Vec<String>> {
    let manifest = root.join("levels/manifest.txt");
    let contents = std::fs::read_to_string(&manifest)
        .with_context(|| format!("Missing {} (run a cargo build first)", manifest.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Copy the manifest and every level it lists into `dst/levels`
fn copy_levels(root: &Path, dst: &Path) -> Result<()> {
    let out = dst.join("levels");
    std::fs::create_dir_all(&out)?;
    std::fs::copy(root.join("levels/manifest.txt"), out.join("manifest.txt"))?;
    for name in bundled_levels(root)? {
        std::fs::copy(root.join("levels").join(&name), out.join(&name))
            .with_context(|| format!("Failed to copy level {}", name))?;
    }
    Ok(())
}

fn fresh_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

fn index_html(dev: bool) -> String {
    let title = if dev { "[DEV] Platformer" } else { "Platformer" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
html, body, canvas {{ margin: 0; padding: 0; width: 100%; height: 100%; overflow: hidden; background: #121218; }}
</style>
</head>
<body>
<canvas id="glcanvas" tabindex="1"></canvas>
<script src="mq_js_bundle.js"></script>
<script>load("{bin}.wasm");</script>
</body>
</html>
"#,
        title = title,
        bin = BIN_NAME
    )
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown", "--bin", BIN_NAME]),
    )?;

    fresh_dir(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", BIN_NAME);
    std::fs::copy(root.join("target/wasm32-unknown-unknown/release").join(&wasm), dist.join(&wasm))?;
    std::fs::write(dist.join("index.html"), index_html(dev))?;

    // Download macroquad JS bundle
    println!("Downloading {}...", MQ_JS_URL);
    run_cmd(
        Command::new("curl")
            .args(["-L", "-o"])
            .arg(dist.join("mq_js_bundle.js"))
            .arg(MQ_JS_URL),
    )?;

    copy_levels(&root, &dist)?;

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Build a native release package
fn package(platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "windows".to_string()
        } else if cfg!(target_os = "macos") {
            "macos".to_string()
        } else {
            "linux".to_string()
        }
    });

    let dist = root.join("dist").join(&platform);

    println!("Building native release for {}...", platform);
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BIN_NAME]),
    )?;

    fresh_dir(&dist)?;

    let binary_name = if platform == "windows" {
        format!("{}.exe", BIN_NAME)
    } else {
        BIN_NAME.to_string()
    };
    std::fs::copy(root.join("target/release").join(&binary_name), dist.join(&binary_name))?;

    copy_levels(&root, &dist)?;

    println!("Package complete: dist/{}/", platform);
    Ok(())
}
