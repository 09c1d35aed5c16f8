//! Procedural cave generator
//!
//! Produces a connected, pocket-free map:
//! 1. Start fully solid
//! 2. Carve corridors with a random-walk digger (air is always connected)
//! 3. Lay a guaranteed ground band near the bottom
//! 4. Widen narrow chokepoints
//! 5. Place the player spawn on a safe open tile above solid ground
//! 6. Sprinkle spikes on platform tops away from the spawn
//! 7. Seal the border
//!
//! The same seed and size always produce the same grid.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const SOLID: char = '#';
pub const EMPTY: char = '.';
pub const SPAWN: char = 'P';
pub const SPIKE: char = '^';

/// Digger steps per cell (density control)
const STEPS_PER_CELL: usize = 8;
/// Digger re-rolls its brush size this often
const THICKNESS_PERIOD: usize = 250;
/// Attempts when searching for a spawn cell
const SPAWN_ATTEMPTS: usize = 5000;
/// Fraction of cells that get a spike attempt
const SPIKE_DENSITY: f64 = 0.008;
/// Spikes stay at least this far (Manhattan) from the spawn
const SPIKE_SPAWN_CLEARANCE: i32 = 10;

struct Grid {
    cells: Vec<Vec<char>>,
    cols: i32,
    rows: i32,
}

impl Grid {
    fn get(&self, x: i32, y: i32) -> char {
        self.cells[y as usize][x as usize]
    }

    fn set(&mut self, x: i32, y: i32, ch: char) {
        self.cells[y as usize][x as usize] = ch;
    }

    /// Interior cells only; the outer ring is never carved
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 1 && x < self.cols - 1 && y >= 1 && y < self.rows - 1
    }

    fn carve(&mut self, x: i32, y: i32, r: i32) {
        for yy in (y - r)..=(y + r) {
            for xx in (x - r)..=(x + r) {
                if self.in_bounds(xx, yy) {
                    self.set(xx, yy, EMPTY);
                }
            }
        }
    }
}

/// Generate a cave of `cols` x `rows` tiles.
///
/// Sizes below 8 in either dimension are not meaningful; callers validate.
pub fn generate_level(seed: u64, cols: usize, rows: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid {
        cells: vec![vec![SOLID; cols]; rows],
        cols: cols as i32,
        rows: rows as i32,
    };
    let (cols, rows) = (grid.cols, grid.rows);

    // --- random walk digger ---
    let mut x = cols / 2;
    let mut y = rows / 2;
    grid.carve(x, y, 1);

    let steps = (cols * rows) as usize * STEPS_PER_CELL;
    let mut thickness = 1;

    for i in 0..steps {
        if i % THICKNESS_PERIOD == 0 {
            thickness = if rng.gen::<f64>() < 0.75 { 1 } else { 2 };
        }

        grid.carve(x, y, thickness);

        let r: f64 = rng.gen();
        let (dx, dy) = if r < 0.25 {
            (1, 0)
        } else if r < 0.50 {
            (-1, 0)
        } else if r < 0.75 {
            (0, 1)
        } else {
            (0, -1)
        };

        // Mostly keep going straight, sometimes wiggle sideways
        let (x2, y2) = if rng.gen::<f64>() < 0.70 {
            (x + dx, y + dy)
        } else if dx != 0 {
            (x + dx, y + rng.gen_range(-1..=1))
        } else {
            (x + rng.gen_range(-1..=1), y + dy)
        };

        if grid.in_bounds(x2, y2) {
            x = x2;
            y = y2;
        }
    }

    // --- ground band with open space above it ---
    let ground_y = rows - 3;
    for xx in 1..cols - 1 {
        grid.set(xx, ground_y, SOLID);
        grid.set(xx, ground_y - 1, EMPTY);
        if rng.gen::<f64>() < 0.55 {
            grid.set(xx, ground_y - 2, EMPTY);
        }
    }

    // --- widen pass: open solid cells mostly surrounded by air ---
    for _ in 0..2 {
        for yy in 2..rows - 2 {
            for xx in 2..cols - 2 {
                if grid.get(xx, yy) != SOLID {
                    continue;
                }
                let air = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                    .iter()
                    .filter(|(dx, dy)| grid.get(xx + dx, yy + dy) == EMPTY)
                    .count();
                if air >= 3 && rng.gen::<f64>() < 0.6 {
                    grid.set(xx, yy, EMPTY);
                }
            }
        }
    }

    // --- player spawn ---
    let (sx, sy) = find_spawn(&grid, &mut rng);
    grid.set(sx, sy, SPAWN);

    // --- spikes on platform tops ---
    let spike_count = ((cols * rows) as f64 * SPIKE_DENSITY) as usize;
    for _ in 0..spike_count {
        let xx = rng.gen_range(2..cols - 2);
        let yy = rng.gen_range(2..rows - 3);
        if grid.get(xx, yy) == EMPTY
            && grid.get(xx, yy + 1) == SOLID
            && (xx - sx).abs() + (yy - sy).abs() > SPIKE_SPAWN_CLEARANCE
        {
            grid.set(xx, yy, SPIKE);
        }
    }

    // --- solid border ---
    for xx in 0..cols {
        grid.set(xx, 0, SOLID);
        grid.set(xx, rows - 1, SOLID);
    }
    for yy in 0..rows {
        grid.set(0, yy, SOLID);
        grid.set(cols - 1, yy, SOLID);
    }

    grid.cells.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Air with solid under it and a clear 3x3 around it, else the center
fn find_spawn(grid: &Grid, rng: &mut SmallRng) -> (i32, i32) {
    let (cols, rows) = (grid.cols, grid.rows);
    for _ in 0..SPAWN_ATTEMPTS {
        let x = rng.gen_range(2..cols - 2);
        let y = rng.gen_range(2..rows - 4);
        if grid.get(x, y) != EMPTY || grid.get(x, y + 1) != SOLID {
            continue;
        }
        let open = ((y - 1)..=(y + 1))
            .all(|yy| ((x - 1)..=(x + 1)).all(|xx| grid.get(xx, yy) != SOLID));
        if open {
            return (x, y);
        }
    }
    (cols / 2, rows / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &[String], ch: char) -> usize {
        grid.iter().map(|r| r.chars().filter(|&c| c == ch).count()).sum()
    }

    #[test]
    fn test_dimensions_and_border() {
        let g = generate_level(7, 60, 34);
        assert_eq!(g.len(), 34);
        assert!(g.iter().all(|r| r.chars().count() == 60));
        assert!(g[0].chars().all(|c| c == SOLID));
        assert!(g[33].chars().all(|c| c == SOLID));
        assert!(g.iter().all(|r| r.starts_with(SOLID) && r.ends_with(SOLID)));
    }

    #[test]
    fn test_deterministic_per_seed() {
        assert_eq!(generate_level(42, 40, 24), generate_level(42, 40, 24));
        assert_ne!(generate_level(42, 40, 24), generate_level(43, 40, 24));
    }

    #[test]
    fn test_exactly_one_spawn() {
        for seed in 0..5 {
            let g = generate_level(seed, 60, 34);
            assert_eq!(count(&g, SPAWN), 1, "seed {}", seed);
        }
    }

    #[test]
    fn test_ground_band() {
        let g = generate_level(3, 30, 20);
        let ground: Vec<char> = g[17].chars().collect();
        let above: Vec<char> = g[16].chars().collect();
        for x in 1..29 {
            assert_eq!(ground[x], SOLID);
            assert_ne!(above[x], SOLID);
        }
    }

    #[test]
    fn test_spikes_sit_on_solid() {
        let g = generate_level(11, 60, 34);
        let rows: Vec<Vec<char>> = g.iter().map(|r| r.chars().collect()).collect();
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == SPIKE {
                    assert_eq!(rows[y + 1][x], SOLID);
                }
            }
        }
    }
}
