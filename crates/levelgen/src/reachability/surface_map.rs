//! Per-cell labels for surface extraction.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::atlas::BoundingBox;
use crate::matrix::Matrix;
use crate::tiles::TileMap;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SurfaceId(u32);

impl SurfaceId {
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SurfaceCell {
    /// The player footprint anchored here overlaps terrain.
    Solid,
    /// Open, but nothing to stand on. Movements may pass through; fills never claim it.
    Empty,
    /// Standable floor not yet claimed by a fill.
    Unknown,
    Surface(SurfaceId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceMap {
    cells: Matrix<SurfaceCell>,
    next_id: u32,
}

impl SurfaceMap {
    /// Classifies every cell by the footprint anchored on it and the footprint one row below.
    pub fn seed(map: &TileMap) -> Self {
        let cells = Matrix::from_fn(map.rows(), map.cols(), |cell| {
            if map.collides(&BoundingBox::standing(cell)) {
                SurfaceCell::Solid
            } else if map.collides(&BoundingBox::standing(Cell { row: cell.row + 1, ..cell })) {
                SurfaceCell::Unknown
            } else {
                SurfaceCell::Empty
            }
        });
        Self { cells, next_id: 0 }
    }

    pub fn cells(&self) -> &Matrix<SurfaceCell> {
        &self.cells
    }

    pub fn has(&self, cell: Cell) -> bool {
        self.cells.has(cell)
    }

    pub fn get(&self, cell: Cell) -> SurfaceCell {
        self.cells.get(cell)
    }

    pub(super) fn claim(&mut self, cell: Cell, id: SurfaceId) {
        self.cells.set(cell, SurfaceCell::Surface(id));
    }

    pub(super) fn allocate_id(&mut self) -> SurfaceId {
        self.next_id += 1;
        SurfaceId(self.next_id)
    }

    /// Folds `absorbed` into `survivor`, returning how many cells were relabelled.
    /// Merging an id into itself, or an id that no longer labels anything, changes nothing.
    pub fn merge(&mut self, survivor: SurfaceId, absorbed: SurfaceId) -> usize {
        if survivor == absorbed {
            return 0;
        }
        self.cells.replace(SurfaceCell::Surface(absorbed), SurfaceCell::Surface(survivor))
    }

    /// Live ids with their cells in row-major order, ordered by id.
    pub fn groups(&self) -> Vec<(SurfaceId, Vec<Cell>)> {
        let mut groups: BTreeMap<SurfaceId, Vec<Cell>> = BTreeMap::new();
        for (cell, value) in self.cells.iter() {
            if let SurfaceCell::Surface(id) = value {
                groups.entry(id).or_default().push(cell);
            }
        }
        groups.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::open_room_fixture;

    #[test]
    fn only_cells_above_ground_start_unknown() {
        let map = open_room_fixture(4, 4);
        let seeded = SurfaceMap::seed(&map);

        // Footprint is two by two, so row 3 stands on the floor at row 5.
        for col in 1..=3 {
            assert_eq!(seeded.get(Cell::new(3, col)), SurfaceCell::Unknown);
            assert_eq!(seeded.get(Cell::new(2, col)), SurfaceCell::Empty);
            assert_eq!(seeded.get(Cell::new(4, col)), SurfaceCell::Solid);
        }
        assert_eq!(seeded.get(Cell::new(3, 4)), SurfaceCell::Solid, "footprint overlaps right wall");
        assert_eq!(seeded.get(Cell::new(0, 2)), SurfaceCell::Solid);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut map = SurfaceMap::seed(&open_room_fixture(4, 4));
        let first = map.allocate_id();
        let second = map.allocate_id();
        map.claim(Cell::new(3, 1), first);
        map.claim(Cell::new(3, 2), second);
        map.claim(Cell::new(3, 3), second);

        assert_eq!(map.merge(first, second), 2);
        let merged = map.clone();
        assert_eq!(map.merge(first, second), 0);
        assert_eq!(map.merge(first, first), 0);
        assert_eq!(map, merged);
        assert_eq!(map.groups(), vec![(first, vec![Cell::new(3, 1), Cell::new(3, 2), Cell::new(3, 3)])]);
    }
}
