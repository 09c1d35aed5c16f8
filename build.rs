//! Build script to generate the level manifest
//!
//! Scans levels/ and lists every level file, one per line, since WASM
//! can't enumerate directories at runtime.

use std::fs;
use std::path::Path;

const LEVEL_EXTENSIONS: [&str; 5] = ["txt", "lvl", "csv", "json", "ron"];

fn main() {
    println!("cargo:rerun-if-changed=levels");

    let levels_dir = Path::new("levels");
    let manifest_path = levels_dir.join("manifest.txt");

    let mut names: Vec<String> = match fs::read_dir(levels_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p != &manifest_path)
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| LEVEL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect(),
        Err(_) => return,
    };
    names.sort();

    let mut manifest = String::new();
    for name in names {
        manifest.push_str(&name);
        manifest.push('\n');
    }

    // Only touch the file when it changes, so rerun-if-changed settles
    if fs::read_to_string(&manifest_path).ok().as_deref() != Some(manifest.as_str()) {
        if let Err(e) = fs::write(&manifest_path, manifest) {
            println!("cargo:warning=failed to write level manifest: {}", e);
        }
    }
}
