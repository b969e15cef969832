//! Player footprints in tile units.

use serde::{Deserialize, Serialize};

use crate::physics::{METERS_PER_PIXEL, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::tiles::{col_of, row_of};
use crate::types::{Cell, Vec2};

/// Extra rows covered by a tile-aligned player, beyond the top row.
pub const PLAYER_ROW_HEIGHT: i32 = 1;
/// Extra columns covered by a tile-aligned player, beyond the left column.
pub const PLAYER_COL_WIDTH: i32 = 1;

/// Tile rectangle covered by the player. Heights and widths are inclusive spans:
/// a box with `row_height == 1` covers two rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub row_top: i32,
    pub row_height: i32,
    pub col_left: i32,
    pub col_width: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub row: i32,
    pub col: i32,
}

impl BoundingBox {
    /// Footprint of a player whose top-left corner sits at `position`.
    pub fn at_position(position: Vec2) -> Self {
        let row_top = row_of(position.y);
        let col_left = col_of(position.x);
        Self {
            row_top,
            row_height: row_of(position.y + PLAYER_HEIGHT - METERS_PER_PIXEL) - row_top,
            col_left,
            col_width: col_of(position.x + PLAYER_WIDTH - METERS_PER_PIXEL) - col_left,
        }
    }

    /// Footprint of a player aligned to the top-left corner of `cell`.
    pub fn standing(cell: Cell) -> Self {
        Self {
            row_top: cell.row as i32,
            row_height: PLAYER_ROW_HEIGHT,
            col_left: cell.col as i32,
            col_width: PLAYER_COL_WIDTH,
        }
    }

    /// Reflects a box recorded relative to the origin footprint onto the other side of it.
    pub fn mirrored(self) -> Self {
        Self { col_left: PLAYER_COL_WIDTH - self.col_left - self.col_width, ..self }
    }

    /// Moves a relative box so that its origin sits on `cell`.
    pub fn translated(self, cell: Cell) -> Self {
        Self { row_top: self.row_top + cell.row as i32, col_left: self.col_left + cell.col as i32, ..self }
    }

    pub fn offset(self) -> Offset {
        Offset { row: self.row_top, col: self.col_left }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::TILE_SIZE;

    #[test]
    fn footprint_constants_match_player_size() {
        assert_eq!(row_of(PLAYER_HEIGHT - METERS_PER_PIXEL), PLAYER_ROW_HEIGHT);
        assert_eq!(col_of(PLAYER_WIDTH - METERS_PER_PIXEL), PLAYER_COL_WIDTH);
        assert_eq!(BoundingBox::at_position(Vec2::default()), BoundingBox::standing(Cell::new(0, 0)));
    }

    #[test]
    fn unaligned_positions_can_widen_the_footprint() {
        let bbox = BoundingBox::at_position(Vec2 { x: 0.8, y: 0.0 });
        assert_eq!(bbox, BoundingBox { row_top: 0, row_height: 1, col_left: 0, col_width: 2 });
    }

    #[test]
    fn one_tile_steps_keep_the_standard_footprint() {
        let right = BoundingBox::at_position(Vec2 { x: TILE_SIZE, y: 0.0 });
        let left = BoundingBox::at_position(Vec2 { x: -TILE_SIZE, y: 0.0 });
        assert_eq!(right, BoundingBox { row_top: 0, row_height: 1, col_left: 1, col_width: 1 });
        assert_eq!(left, BoundingBox { row_top: 0, row_height: 1, col_left: -1, col_width: 1 });
        assert_eq!(right.mirrored(), left);
    }

    #[test]
    fn mirroring_twice_is_identity() {
        let bbox = BoundingBox { row_top: -2, row_height: 2, col_left: 3, col_width: 2 };
        assert_eq!(bbox.mirrored().mirrored(), bbox);
        assert_eq!(bbox.mirrored().col_left, -4);
    }

    #[test]
    fn translation_moves_origin_only() {
        let bbox = BoundingBox { row_top: -1, row_height: 2, col_left: 2, col_width: 1 };
        let moved = bbox.translated(Cell::new(5, 7));
        assert_eq!(moved, BoundingBox { row_top: 4, row_height: 2, col_left: 9, col_width: 1 });
    }
}
