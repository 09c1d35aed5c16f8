//! Level loading and saving
//!
//! A level on disk is just the char grid plus a name. Four encodings are
//! accepted, chosen by file extension:
//! - `.txt`: one grid row per line. `;` starts a comment line and a leading
//!   `; name` comment names the level
//! - `.csv`: one tile char per field, no header
//! - `.json`: `{ "name": ..., "rows": [...] }`
//! - `.ron`: `(name: ..., rows: [...])`
//!
//! Every load is validated before it reaches the game so a bad file can't
//! produce a grid the tilemap or flow field would choke on.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Smallest usable grid dimension
    pub const MIN_LEVEL_SIZE: usize = 3;
    /// Maximum grid dimension (width or height)
    pub const MAX_LEVEL_SIZE: usize = 512;
    /// Maximum length for the level name
    pub const MAX_NAME_LEN: usize = 256;
}

/// Characters a level grid may contain
pub const VALID_TILES: &[char] = &['#', '.', 'P', 'C', 'M', '^'];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    RonSerialize(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported level format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// On-disk level encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    Text,
    Csv,
    Json,
    Ron,
}

impl LevelFormat {
    pub fn from_path(path: &Path) -> Result<Self, LevelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "lvl" => Ok(LevelFormat::Text),
            "csv" => Ok(LevelFormat::Csv),
            "json" => Ok(LevelFormat::Json),
            "ron" => Ok(LevelFormat::Ron),
            _ => Err(LevelError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub name: String,
    pub rows: Vec<String>,
}

impl LevelFile {
    pub fn new(name: impl Into<String>, rows: Vec<String>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    /// Grid position of the `P` tile
    pub fn spawn(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(y, row)| {
            row.chars().position(|c| c == 'P').map(|x| (x, y))
        })
    }
}

/// Check a grid is rectangular, sized sanely and uses known tiles
pub fn validate_rows(rows: &[String]) -> Result<(), LevelError> {
    use limits::*;

    if rows.len() < MIN_LEVEL_SIZE || rows.len() > MAX_LEVEL_SIZE {
        return Err(LevelError::Validation(format!(
            "row count {} outside {}..={}", rows.len(), MIN_LEVEL_SIZE, MAX_LEVEL_SIZE
        )));
    }

    let cols = rows[0].chars().count();
    if cols < MIN_LEVEL_SIZE || cols > MAX_LEVEL_SIZE {
        return Err(LevelError::Validation(format!(
            "column count {} outside {}..={}", cols, MIN_LEVEL_SIZE, MAX_LEVEL_SIZE
        )));
    }

    let mut spawns = 0;
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != cols {
            return Err(LevelError::Validation(format!(
                "row {} has {} columns, expected {}", y, len, cols
            )));
        }
        for (x, ch) in row.chars().enumerate() {
            if !VALID_TILES.contains(&ch) {
                return Err(LevelError::Validation(format!(
                    "unknown tile {:?} at ({}, {})", ch, x, y
                )));
            }
            if ch == 'P' {
                spawns += 1;
            }
        }
    }

    if spawns > 1 {
        return Err(LevelError::Validation(format!("{} player spawns (at most 1)", spawns)));
    }

    Ok(())
}

/// Validate a whole level file
pub fn validate_level(level: &LevelFile) -> Result<(), LevelError> {
    if level.name.len() > limits::MAX_NAME_LEN {
        return Err(LevelError::Validation(format!(
            "level name too long ({} > {})", level.name.len(), limits::MAX_NAME_LEN
        )));
    }
    validate_rows(&level.rows)
}

/// Grid rows plus the name from a leading `; name` comment, if any
fn parse_text(contents: &str) -> (Option<String>, Vec<String>) {
    let mut name = None;
    let mut rows = Vec::new();
    for line in contents.lines().map(str::trim_end) {
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix(';') {
            let comment = comment.trim();
            if name.is_none() && rows.is_empty() && !comment.is_empty() {
                name = Some(comment.to_string());
            }
            continue;
        }
        rows.push(line.to_string());
    }
    (name, rows)
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<String>, LevelError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (y, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = String::with_capacity(record.len());
        for (x, field) in record.iter().enumerate() {
            let mut chars = field.chars();
            // An empty field reads as empty space
            let ch = chars.next().unwrap_or('.');
            if chars.next().is_some() {
                return Err(LevelError::Validation(format!(
                    "field {:?} at ({}, {}) is more than one tile", field, x, y
                )));
            }
            row.push(ch);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parse level data from bytes (for embedded levels and WASM loading)
pub fn parse_level_data(bytes: &[u8], format: LevelFormat, name: &str) -> Result<LevelFile, LevelError> {
    let level = match format {
        LevelFormat::Text => {
            let contents = String::from_utf8_lossy(bytes);
            let (header, rows) = parse_text(&contents);
            LevelFile::new(header.unwrap_or_else(|| name.to_string()), rows)
        }
        LevelFormat::Csv => LevelFile::new(name, parse_csv(bytes)?),
        LevelFormat::Json => serde_json::from_slice(bytes)?,
        LevelFormat::Ron => {
            let contents = String::from_utf8_lossy(bytes);
            ron::from_str(&contents)?
        }
    };

    validate_level(&level)?;
    Ok(level)
}

/// Load a level file, picking the decoder from its extension
pub fn load_level_file<P: AsRef<Path>>(path: P) -> Result<LevelFile, LevelError> {
    let path = path.as_ref();
    let format = LevelFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut level = parse_level_data(&bytes, format, &name)?;
    if level.name.is_empty() {
        level.name = name;
    }
    Ok(level)
}

/// Serialize a level for the given format
pub fn serialize_level(level: &LevelFile, format: LevelFormat) -> Result<Vec<u8>, LevelError> {
    validate_level(level)?;

    let data = match format {
        LevelFormat::Text => {
            let mut out = format!("; {}\n", level.name);
            for row in &level.rows {
                out.push_str(row);
                out.push('\n');
            }
            out.into_bytes()
        }
        LevelFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
            for row in &level.rows {
                let fields: Vec<String> = row.chars().map(String::from).collect();
                writer.write_record(&fields)?;
            }
            writer
                .into_inner()
                .map_err(|e| LevelError::Io(e.into_error()))?
        }
        LevelFormat::Json => serde_json::to_vec_pretty(level)?,
        LevelFormat::Ron => {
            let config = ron::ser::PrettyConfig::new()
                .depth_limit(2)
                .indentor("  ".to_string());
            ron::ser::to_string_pretty(level, config)?.into_bytes()
        }
    };
    Ok(data)
}

/// Save a level, picking the encoder from the extension
pub fn save_level_file<P: AsRef<Path>>(level: &LevelFile, path: P) -> Result<(), LevelError> {
    let path = path.as_ref();
    let format = LevelFormat::from_path(path)?;
    let data = serialize_level(level, format)?;
    fs::write(path, data)?;
    Ok(())
}
