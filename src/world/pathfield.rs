//! Flow field for crowd pathing
//!
//! One BFS distance field from the target (the player) serves every enemy:
//! each enemy just looks at its neighbor cells and walks downhill. No
//! per-enemy A*. The field is rebuilt a few times per second, not per frame.

use std::collections::VecDeque;
use macroquad::prelude::Vec2;
use crate::game::TILE_SIZE;
use super::Tilemap;

/// How far (in tiles) to look for an open cell when the target is in a wall
const NEAREST_OPEN_RADIUS: i32 = 8;

const UNREACHED: i32 = -1;

pub struct FlowField {
    cols: i32,
    rows: i32,
    blocked: Vec<bool>,
    dist: Vec<i32>,
    target_tile: Option<(i32, i32)>,
    valid: bool,
}

impl FlowField {
    pub fn new(map: &Tilemap) -> Self {
        let cols = map.cols() as i32;
        let rows = map.rows() as i32;
        let mut blocked = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows {
            for x in 0..cols {
                blocked.push(map.is_solid(x, y));
            }
        }
        Self {
            cols,
            rows,
            blocked,
            dist: Vec::new(),
            target_tile: None,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn target_tile(&self) -> Option<(i32, i32)> {
        self.target_tile
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.cols + x) as usize
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.blocked[self.idx(x, y)]
    }

    /// BFS distance of a tile, None if unreachable or not built
    pub fn distance_at(&self, x: i32, y: i32) -> Option<i32> {
        if !self.valid || !self.in_bounds(x, y) {
            return None;
        }
        let d = self.dist[self.idx(x, y)];
        (d >= 0).then_some(d)
    }

    /// Rebuild the distance field toward a world position
    pub fn rebuild(&mut self, target: Vec2) {
        if self.rows == 0 || self.cols == 0 {
            self.valid = false;
            return;
        }

        let tx = ((target.x / TILE_SIZE).floor() as i32).clamp(0, self.cols - 1);
        let ty = ((target.y / TILE_SIZE).floor() as i32).clamp(0, self.rows - 1);

        let (tx, ty) = if self.is_blocked(tx, ty) {
            match self.find_nearest_open(tx, ty, NEAREST_OPEN_RADIUS) {
                Some(found) => found,
                None => {
                    self.valid = false;
                    return;
                }
            }
        } else {
            (tx, ty)
        };

        self.target_tile = Some((tx, ty));
        self.dist.clear();
        self.dist.resize((self.cols * self.rows) as usize, UNREACHED);

        let mut queue = VecDeque::new();
        let start = self.idx(tx, ty);
        self.dist[start] = 0;
        queue.push_back((tx, ty));

        while let Some((x, y)) = queue.pop_front() {
            let d = self.dist[self.idx(x, y)];
            for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if !self.in_bounds(nx, ny) || self.is_blocked(nx, ny) {
                    continue;
                }
                let ni = self.idx(nx, ny);
                if self.dist[ni] != UNREACHED {
                    continue;
                }
                self.dist[ni] = d + 1;
                queue.push_back((nx, ny));
            }
        }

        self.valid = true;
    }

    /// Unit vector pointing downhill from a world position, zero if there is
    /// nowhere better to go (or the field is invalid / unreachable)
    pub fn direction_at(&self, world: Vec2) -> Vec2 {
        if !self.valid {
            return Vec2::ZERO;
        }

        let x = (world.x / TILE_SIZE).floor() as i32;
        let y = (world.y / TILE_SIZE).floor() as i32;
        if !self.in_bounds(x, y) {
            return Vec2::ZERO;
        }

        let cur = self.dist[self.idx(x, y)];
        if cur < 0 {
            return Vec2::ZERO;
        }

        // Straight neighbors first so they win ties; diagonals only if strictly better
        const NEIGHBORS: [(i32, i32); 8] = [
            (1, 0), (-1, 0), (0, 1), (0, -1),
            (1, 1), (1, -1), (-1, 1), (-1, -1),
        ];

        let mut best = cur;
        let mut best_dir = Vec2::ZERO;
        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if !self.in_bounds(nx, ny) {
                continue;
            }
            let nd = self.dist[self.idx(nx, ny)];
            if nd >= 0 && nd < best {
                best = nd;
                best_dir = Vec2::new(dx as f32, dy as f32);
            }
        }

        if best_dir == Vec2::ZERO {
            return Vec2::ZERO;
        }
        best_dir.normalize()
    }

    /// Scan square rings of growing radius for a walkable cell
    fn find_nearest_open(&self, x: i32, y: i32, radius: i32) -> Option<(i32, i32)> {
        for r in 1..=radius {
            for oy in -r..=r {
                for ox in -r..=r {
                    let (nx, ny) = (x + ox, y + oy);
                    if self.in_bounds(nx, ny) && !self.is_blocked(nx, ny) {
                        return Some((nx, ny));
                    }
                }
            }
        }
        None
    }
}
