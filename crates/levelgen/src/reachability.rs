//! Player reachability: partitions standable cells into surfaces, the maximal groups of floor
//! cells the player can travel between using atlas movements.

mod flood;
mod surface_map;

use log::debug;
use serde::Serialize;

use crate::atlas::MovementAtlas;
use crate::tiles::TileMap;
use crate::types::Cell;

pub use surface_map::{SurfaceCell, SurfaceId, SurfaceMap};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub id: SurfaceId,
    /// Row-major order.
    pub cells: Vec<Cell>,
}

impl Surface {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Runs the flood fill and returns the final per-cell labels.
pub fn label_surfaces(map: &TileMap, atlas: &MovementAtlas) -> SurfaceMap {
    flood::label(map, atlas)
}

/// Every surface of the map, largest first. Equal sizes keep id order.
pub fn find_surfaces(map: &TileMap, atlas: &MovementAtlas) -> Vec<Surface> {
    let labelled = label_surfaces(map, atlas);
    let mut surfaces: Vec<Surface> =
        labelled.groups().into_iter().map(|(id, cells)| Surface { id, cells }).collect();
    surfaces.sort_by(|a, b| b.len().cmp(&a.len()));
    debug!(
        "found {} surfaces, largest {} cells",
        surfaces.len(),
        surfaces.first().map_or(0, Surface::len)
    );
    surfaces
}

/// Cells of the largest surface, or nothing when the map has no floor at all.
pub fn find_biggest_region(map: &TileMap, atlas: &MovementAtlas) -> Vec<Cell> {
    find_surfaces(map, atlas).into_iter().next().map(|surface| surface.cells).unwrap_or_default()
}
