use serde::{Deserialize, Serialize};

/// A tile-grid coordinate. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shifts the cell by a signed offset, or `None` when it would leave the positive quadrant.
    pub fn offset(self, row: i32, col: i32) -> Option<Cell> {
        Some(Cell {
            row: self.row.checked_add_signed(row as isize)?,
            col: self.col.checked_add_signed(col as isize)?,
        })
    }

    pub fn distance2(self, other: Cell) -> usize {
        let dy = self.row.abs_diff(other.row);
        let dx = self.col.abs_diff(other.col);
        dy * dy + dx * dx
    }
}

/// A world-space point in metres. `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Ground,
    Spike,
}

impl TileKind {
    pub fn is_solid(self) -> bool {
        self == TileKind::Ground
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Ground => 1,
            TileKind::Spike => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_negative_coordinates() {
        let cell = Cell::new(1, 0);
        assert_eq!(cell.offset(-1, 0), Some(Cell::new(0, 0)));
        assert_eq!(cell.offset(0, -1), None);
        assert_eq!(cell.offset(-2, 3), None);
    }

    #[test]
    fn only_ground_is_solid() {
        assert!(TileKind::Ground.is_solid());
        assert!(!TileKind::Empty.is_solid());
        assert!(!TileKind::Spike.is_solid());
    }
}
