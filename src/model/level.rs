//! Tile grid

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Tile kinds the decision core distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Empty,
    Wall,
    Platform,
}

impl Default for Tile {
    fn default() -> Self {
        Self::Empty
    }
}

/// Column-major tile grid, addressed as `tiles[x][y]` with `y` growing upward
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub tiles: Vec<Vec<Tile>>,
}

impl Level {
    /// Grid filled with a single tile kind
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            tiles: vec![vec![tile; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.tiles.len()
    }

    pub fn height(&self) -> usize {
        self.tiles.first().map(Vec::len).unwrap_or(0)
    }

    /// Whether a world point falls inside the grid extent
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width() as f64
            && point.y < self.height() as f64
    }

    /// Tile under a world point, `None` outside the grid.
    ///
    /// Negative coordinates are rejected before truncation so that `-0.5`
    /// never aliases column 0.
    pub fn tile(&self, point: Vec2) -> Option<Tile> {
        if !self.contains(point) {
            return None;
        }
        self.tiles
            .get(point.x as usize)
            .and_then(|column| column.get(point.y as usize))
            .copied()
    }

    pub fn is_wall(&self, point: Vec2) -> bool {
        self.tile(point) == Some(Tile::Wall)
    }

    /// Overwrite one cell; out-of-range cells are ignored
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if let Some(cell) = self.tiles.get_mut(x).and_then(|column| column.get_mut(y)) {
            *cell = tile;
        }
    }
}
