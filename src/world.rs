//! Water query surface and a tile map implementation of it.
//!
//! The engine only ever asks one question of the world: is the tile under
//! this world-space point water? [`TileMap`] answers it with a single index
//! lookup.

use crate::core::Vec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Answers whether a world-space point lies on a water tile.
///
/// Called on every targeting sample and fight step, so implementations
/// should be O(1).
pub trait WaterQuery {
    fn is_water_tile(&self, x: f64, y: f64) -> bool;

    fn is_water_at(&self, pos: Vec2) -> bool {
        self.is_water_tile(pos.x, pos.y)
    }
}

impl<F> WaterQuery for F
where
    F: Fn(f64, f64) -> bool,
{
    fn is_water_tile(&self, x: f64, y: f64) -> bool {
        self(x, y)
    }
}

/// Terrain kind of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Land,
    Water,
}

/// Rectangular grid of tiles. Points outside the grid count as land.
#[derive(Debug, Clone)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    /// World units per tile edge.
    pub tile_size: f64,
    pub tiles: Vec<TileKind>,
}

impl TileMap {
    /// Creates a map filled with a single tile kind.
    pub fn filled(width: usize, height: usize, tile_size: f64, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![kind; width * height],
        }
    }

    /// Builds a map from text rows: `~` is water, anything else is land.
    pub fn from_rows(rows: &[&str], tile_size: f64) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut map = Self::filled(width, height, tile_size, TileKind::Land);
        for (ty, row) in rows.iter().enumerate() {
            for (tx, ch) in row.chars().enumerate() {
                if ch == '~' {
                    map.tiles[ty * width + tx] = TileKind::Water;
                }
            }
        }
        map
    }

    /// World-space size of the map.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f64 * self.tile_size,
            self.height as f64 * self.tile_size,
        )
    }

    /// Tile coordinates containing the world point, if inside the map.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let tx = (x / self.tile_size) as usize;
        let ty = (y / self.tile_size) as usize;
        if tx < self.width && ty < self.height {
            Some((tx, ty))
        } else {
            None
        }
    }

    pub fn kind(&self, tx: usize, ty: usize) -> TileKind {
        if tx < self.width && ty < self.height {
            self.tiles[ty * self.width + tx]
        } else {
            TileKind::Land
        }
    }

    /// World-space centre of a tile.
    pub fn tile_center(&self, tx: usize, ty: usize) -> Vec2 {
        Vec2::new(
            (tx as f64 + 0.5) * self.tile_size,
            (ty as f64 + 0.5) * self.tile_size,
        )
    }

    /// Generates a lake: an irregular water body centred on the map with a
    /// random-walk shoreline, surrounded by land.
    pub fn generate_lake<R: Rng>(width: usize, height: usize, tile_size: f64, rng: &mut R) -> Self {
        let mut map = Self::filled(width, height, tile_size, TileKind::Land);

        // Shoreline radius per angular bucket, as a fraction of the half-extent.
        const BUCKETS: usize = 72;
        let base = 0.72;
        let mut radii = vec![base; BUCKETS];
        let mut current: f64 = base + rng.gen_range(-0.05_f64..0.05);
        for r in radii.iter_mut() {
            let delta = rng.gen_range(-1.0_f64..1.0) * 0.04;
            let mean_revert = (base - current) * 0.15;
            current = (current + delta + mean_revert).clamp(0.5, 0.9);
            *r = current;
        }
        // Blend the seam so the shoreline closes smoothly.
        let first = radii[0];
        let last = radii[BUCKETS - 1];
        radii[0] = (first + last) / 2.0;

        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        for ty in 0..height {
            for tx in 0..width {
                let dx = (tx as f64 + 0.5 - cx) / cx;
                let dy = (ty as f64 + 0.5 - cy) / cy;
                let angle = dy.atan2(dx).rem_euclid(TAU);
                let bucket = ((angle / TAU) * BUCKETS as f64) as usize % BUCKETS;
                if dx.hypot(dy) < radii[bucket] {
                    map.tiles[ty * width + tx] = TileKind::Water;
                }
            }
        }
        map
    }

    /// Finds a land tile adjacent to water, scanning inward from the left
    /// edge along the middle row. Used to place the player on the shore.
    pub fn find_shore_spawn(&self) -> Option<Vec2> {
        let ty = self.height / 2;
        (1..self.width).find_map(|tx| {
            let here = self.kind(tx - 1, ty);
            let next = self.kind(tx, ty);
            (here == TileKind::Land && next == TileKind::Water).then(|| self.tile_center(tx - 1, ty))
        })
    }
}

impl WaterQuery for TileMap {
    fn is_water_tile(&self, x: f64, y: f64) -> bool {
        self.tile_at(x, y)
            .map(|(tx, ty)| self.kind(tx, ty) == TileKind::Water)
            .unwrap_or(false)
    }
}
