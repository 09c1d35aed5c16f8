//! Tilemap - the static collision layer built from a char grid
//!
//! Grid chars:
//! - `#`, `C`, `M`: solid
//! - `^`: spikes (not solid, hurts on touch)
//! - `P`: player spawn (empty for collision)
//! - anything else: empty

use crate::game::{Rect, TILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
    Spike,
    Spawn,
}

impl Tile {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' | 'C' | 'M' => Tile::Solid,
            '^' => Tile::Spike,
            'P' => Tile::Spawn,
            _ => Tile::Empty,
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Tile::Solid)
    }
}

/// World rect of a grid cell
pub fn tile_rect(x: i32, y: i32) -> Rect {
    Rect::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, TILE_SIZE, TILE_SIZE)
}

/// Spikes only occupy the lower two thirds of their cell
pub fn spike_rect(x: i32, y: i32) -> Rect {
    let t = TILE_SIZE;
    let r = tile_rect(x, y);
    Rect::new(r.x + (t / 6.0).floor(), r.y + (t / 3.0).floor(), (t * 2.0 / 3.0).floor(), (t * 2.0 / 3.0).floor())
}

pub struct Tilemap {
    tiles: Vec<Tile>,
    cols: usize,
    rows: usize,
    /// Every solid tile, for drawing
    solids: Vec<Rect>,
    spikes: Vec<Rect>,
}

impl Tilemap {
    /// Build from rows of chars. Short rows are padded with empty tiles.
    pub fn new(grid: &[String]) -> Self {
        let rows = grid.len();
        let cols = grid.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut tiles = vec![Tile::Empty; cols * rows];
        let mut solids = Vec::new();
        let mut spikes = Vec::new();

        for (y, row) in grid.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::from_char(ch);
                tiles[y * cols + x] = tile;
                match tile {
                    Tile::Solid => solids.push(tile_rect(x as i32, y as i32)),
                    Tile::Spike => spikes.push(spike_rect(x as i32, y as i32)),
                    _ => {}
                }
            }
        }

        Self { tiles, cols, rows, solids, spikes }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tile at a grid cell; out of bounds reads as empty
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return Tile::Empty;
        }
        self.tiles[y as usize * self.cols + x as usize]
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_solid()
    }

    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    pub fn spikes(&self) -> &[Rect] {
        &self.spikes
    }

    pub fn world_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.cols as f32 * TILE_SIZE, self.rows as f32 * TILE_SIZE)
    }

    /// Grid cell containing a world point
    pub fn tile_at(p_x: f32, p_y: f32) -> (i32, i32) {
        ((p_x / TILE_SIZE).floor() as i32, (p_y / TILE_SIZE).floor() as i32)
    }

    /// Solid tile rects overlapping `rect` grown by one tile on every side.
    ///
    /// Anything that moves less than a tile per step can only touch these.
    pub fn solid_rects_near(&self, rect: &Rect) -> Vec<Rect> {
        let (x0, y0) = Self::tile_at(rect.left(), rect.top());
        let (x1, y1) = Self::tile_at(rect.right(), rect.bottom());
        let mut out = Vec::new();
        for y in (y0 - 1)..=(y1 + 1) {
            for x in (x0 - 1)..=(x1 + 1) {
                if self.is_solid(x, y) {
                    out.push(tile_rect(x, y));
                }
            }
        }
        out
    }

    /// Spike rects the given rect is touching
    pub fn spikes_touching(&self, rect: &Rect) -> bool {
        self.spikes.iter().any(|s| s.intersects(rect))
    }

    /// Empty cell with a solid directly below (somewhere to stand)
    pub fn is_standable(&self, x: i32, y: i32) -> bool {
        matches!(self.tile(x, y), Tile::Empty | Tile::Spawn) && self.is_solid(x, y + 1)
    }
}
