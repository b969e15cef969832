//! Spikes on ledges too small to host a tunnel.

use crate::atlas::{PLAYER_COL_WIDTH, PLAYER_ROW_HEIGHT};
use crate::tiles::TileMap;
use crate::types::Cell;

/// For every cell, stamps a spike on each tile directly above the ground the player footprint
/// would rest on. Returns how many tiles turned into spikes.
pub(super) fn stamp_spikes(map: &mut TileMap, surface: &[Cell]) -> usize {
    let mut stamped = 0;
    for cell in surface {
        let floor_row = cell.row + PLAYER_ROW_HEIGHT as usize + 1;
        for step in (0..=PLAYER_COL_WIDTH as usize).rev() {
            let col = cell.col + step;
            if map.is_solid_cell(floor_row as i32, col as i32)
                && map.set_spike(Cell::new(floor_row - 1, col))
            {
                stamped += 1;
            }
        }
    }
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    #[test]
    fn spikes_sit_on_the_ground_under_the_footprint() {
        let mut map = TileMap::from_ascii(&[
            "#####",
            "#...#",
            "#...#",
            "##..#",
            "#####",
        ]);
        let stamped = stamp_spikes(&mut map, &[Cell::new(1, 1)]);

        // Ground under the footprint only at column 1; column 2 drops further down.
        assert_eq!(stamped, 1);
        assert_eq!(map.tile_at(Cell::new(2, 1)), TileKind::Spike);
        assert_eq!(map.tile_at(Cell::new(2, 2)), TileKind::Empty);
        assert!(!map.is_solid_cell(2, 1), "spikes never block movement");
    }

    #[test]
    fn stamping_twice_changes_nothing() {
        let mut map = TileMap::from_ascii(&["####", "#..#", "#..#", "####"]);
        let surface = [Cell::new(1, 1)];
        assert_eq!(stamp_spikes(&mut map, &surface), 2);
        let once = map.clone();
        assert_eq!(stamp_spikes(&mut map, &surface), 0);
        assert_eq!(map, once);
    }

    #[test]
    fn map_edge_counts_as_ground() {
        let mut map = TileMap::from_ascii(&["...", "..."]);
        assert_eq!(stamp_spikes(&mut map, &[Cell::new(0, 2)]), 1);
        assert_eq!(map.tile_at(Cell::new(1, 2)), TileKind::Spike);
        assert_eq!(map.count(TileKind::Spike), 1);
    }
}
