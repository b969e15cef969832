//! Coarse regions: plain 4-neighbour connectivity of open tiles, ignoring player movement.

use serde::Serialize;

use crate::matrix::Matrix;
use crate::tiles::TileMap;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionId(u32);

impl RegionId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Region label per tile; `None` marks solid ground.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionMap {
    pub map: Matrix<Option<RegionId>>,
    /// The region with the largest area, lowest id on ties.
    pub biggest: Option<RegionId>,
    #[serde(skip)]
    areas: Vec<usize>,
}

impl RegionMap {
    pub fn compute(tiles: &TileMap) -> Self {
        let mut map = Matrix::filled(tiles.rows(), tiles.cols(), None);
        let mut areas = Vec::new();
        let mut boundary = Vec::new();

        for (start, tile) in tiles.tiles().iter() {
            if tile.is_solid() || map.get(start).is_some() {
                continue;
            }
            let id = RegionId(areas.len() as u32 + 1);
            let mut area = 1;
            map.set(start, Some(id));
            boundary.push(start);

            while let Some(current) = boundary.pop() {
                for (row, col) in [(-1, 0), (0, -1), (0, 1), (1, 0)] {
                    let Some(neighbor) = current.offset(row, col) else {
                        continue;
                    };
                    if !map.has(neighbor) || map.get(neighbor).is_some() {
                        continue;
                    }
                    if tiles.tile_at(neighbor).is_solid() {
                        continue;
                    }
                    map.set(neighbor, Some(id));
                    boundary.push(neighbor);
                    area += 1;
                }
            }
            areas.push(area);
        }

        let biggest = areas
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, area)| area)
            .map(|(index, _)| RegionId(index as u32 + 1));
        Self { map, biggest, areas }
    }

    pub fn region_at(&self, cell: Cell) -> Option<RegionId> {
        self.map.checked_get(cell).flatten()
    }

    pub fn area(&self, id: RegionId) -> usize {
        self.areas.get(id.0 as usize - 1).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub(super) fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.map.values().len() * 4);
        bytes.extend(self.biggest.map_or(0, RegionId::get).to_le_bytes());
        for value in self.map.values() {
            bytes.extend(value.map_or(0, RegionId::get).to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_split_regions_and_diagonals_do_not_connect() {
        let tiles = TileMap::from_ascii(&[
            "..#....",
            "..#....",
            "###.###",
            "...#...",
        ]);
        let regions = RegionMap::compute(&tiles);

        assert_eq!(regions.len(), 4);
        let left = regions.region_at(Cell::new(0, 0)).map(RegionId::get);
        let right = regions.region_at(Cell::new(0, 3)).map(RegionId::get);
        assert_eq!(left, Some(1));
        assert_eq!(right, Some(2));
        assert_eq!(regions.region_at(Cell::new(2, 3)).map(RegionId::get), Some(2));
        assert_eq!(regions.region_at(Cell::new(3, 0)).map(RegionId::get), Some(3));
        assert_eq!(regions.region_at(Cell::new(3, 4)).map(RegionId::get), Some(4));
        assert_eq!(regions.region_at(Cell::new(0, 2)), None);
        assert_eq!(regions.region_at(Cell::new(9, 9)), None);
    }

    #[test]
    fn biggest_prefers_the_larger_area_then_the_lower_id() {
        let tiles = TileMap::from_ascii(&["..#...", "..#...", "..#..."]);
        let regions = RegionMap::compute(&tiles);
        assert_eq!(regions.biggest.map(RegionId::get), Some(2));
        assert_eq!(regions.area(RegionId(2)), 9);

        let tied = RegionMap::compute(&TileMap::from_ascii(&["..#.."]));
        assert_eq!(tied.biggest.map(RegionId::get), Some(1));
    }

    #[test]
    fn spikes_are_open_ground_for_regions() {
        let regions = RegionMap::compute(&TileMap::from_ascii(&[".^."]));
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.area(RegionId(1)), 3);
    }

    #[test]
    fn solid_map_has_no_regions() {
        let regions = RegionMap::compute(&TileMap::from_ascii(&["##", "##"]));
        assert!(regions.is_empty());
        assert_eq!(regions.biggest, None);
    }
}
