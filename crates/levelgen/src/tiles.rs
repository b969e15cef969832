//! Tile map and the collision queries the rest of the game asks of it.

use serde::{Deserialize, Serialize};

use crate::atlas::BoundingBox;
use crate::matrix::Matrix;
use crate::physics::TILE_SIZE;
use crate::types::{Cell, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    tiles: Matrix<TileKind>,
}

impl TileMap {
    pub fn new(tiles: Matrix<TileKind>) -> Self {
        Self { tiles }
    }

    /// Parses rows of `#` (ground), `^` (spike) and anything else as empty.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let rows: Vec<Vec<TileKind>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => TileKind::Ground,
                        '^' => TileKind::Spike,
                        _ => TileKind::Empty,
                    })
                    .collect()
            })
            .collect();
        Self::new(Matrix::from_rows(&rows))
    }

    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    pub fn cols(&self) -> usize {
        self.tiles.cols()
    }

    pub fn tiles(&self) -> &Matrix<TileKind> {
        &self.tiles
    }

    pub fn tile_at(&self, cell: Cell) -> TileKind {
        self.tiles.get(cell)
    }

    /// Solid test on signed coordinates; anything outside the map is solid.
    pub fn is_solid_cell(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        self.tiles
            .checked_get(Cell::new(row as usize, col as usize))
            .is_none_or(TileKind::is_solid)
    }

    pub fn collides(&self, bbox: &BoundingBox) -> bool {
        (0..=bbox.row_height).any(|row| {
            (0..=bbox.col_width)
                .any(|col| self.is_solid_cell(bbox.row_top + row, bbox.col_left + col))
        })
    }

    pub fn collides_with_horizontal_segment(&self, y: f64, x1: f64, x2: f64) -> bool {
        let row = row_of(y);
        (col_of(x1)..=col_of(x2)).any(|col| self.is_solid_cell(row, col))
    }

    pub fn collides_with_vertical_segment(&self, x: f64, y1: f64, y2: f64) -> bool {
        let col = col_of(x);
        (row_of(y1)..=row_of(y2)).any(|row| self.is_solid_cell(row, col))
    }

    /// Turns an empty tile into a spike. Returns `false` when the tile was not empty.
    pub fn set_spike(&mut self, cell: Cell) -> bool {
        if self.tiles.checked_get(cell) != Some(TileKind::Empty) {
            return false;
        }
        self.tiles.set(cell, TileKind::Spike);
        true
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.values().iter().filter(|&&tile| tile == kind).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.values().len());
        bytes.extend((self.rows() as u32).to_le_bytes());
        bytes.extend((self.cols() as u32).to_le_bytes());
        bytes.extend(self.tiles.values().iter().map(|tile| tile.code()));
        bytes
    }
}

pub fn row_of(y: f64) -> i32 {
    (y / TILE_SIZE).floor() as i32
}

pub fn col_of(x: f64) -> i32 {
    (x / TILE_SIZE).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket() -> TileMap {
        TileMap::from_ascii(&["#####", "#...#", "#.^.#", "#####"])
    }

    #[test]
    fn outside_the_map_is_solid() {
        let map = pocket();
        assert!(map.is_solid_cell(-1, 2));
        assert!(map.is_solid_cell(2, 5));
        assert!(map.is_solid_cell(4, 0));
        assert!(!map.is_solid_cell(1, 1));
    }

    #[test]
    fn spikes_do_not_block_movement() {
        let map = pocket();
        assert_eq!(map.tile_at(Cell::new(2, 2)), TileKind::Spike);
        assert!(!map.is_solid_cell(2, 2));
    }

    #[test]
    fn box_collision_covers_full_footprint() {
        let map = pocket();
        let inside = BoundingBox { row_top: 1, row_height: 1, col_left: 1, col_width: 2 };
        let touching_wall = BoundingBox { row_top: 1, row_height: 1, col_left: 2, col_width: 2 };
        assert!(!map.collides(&inside));
        assert!(map.collides(&touching_wall));
    }

    #[test]
    fn segment_queries_use_world_coordinates() {
        let map = pocket();
        let floor_y = 3.0 * TILE_SIZE + 0.1;
        assert!(map.collides_with_horizontal_segment(floor_y, TILE_SIZE, 2.0 * TILE_SIZE));
        assert!(!map.collides_with_horizontal_segment(TILE_SIZE + 0.1, TILE_SIZE, 3.5 * TILE_SIZE));
        assert!(map.collides_with_vertical_segment(0.1, TILE_SIZE, 2.0 * TILE_SIZE));
    }

    #[test]
    fn set_spike_only_replaces_empty_tiles() {
        let mut map = pocket();
        assert!(map.set_spike(Cell::new(1, 1)));
        assert!(!map.set_spike(Cell::new(0, 0)));
        assert!(!map.set_spike(Cell::new(9, 9)));
        assert_eq!(map.count(TileKind::Spike), 2);
    }
}
