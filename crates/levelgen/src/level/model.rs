//! Public data models for assembled levels.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use super::items::Item;
use super::regions::RegionMap;
use crate::physics::TILE_SIZE;
use crate::tiles::TileMap;
use crate::types::{Cell, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DoorId(pub(super) usize);

impl DoorId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One end of a two-door link. `other` indexes the partner in [`Level::doors`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Door {
    pub position: Vec2,
    pub other: DoorId,
}

/// Entrance and exit picked on one accepted surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tunnel {
    pub entrance: Vec2,
    pub exit: Vec2,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Level {
    pub map: TileMap,
    pub player: Vec2,
    pub goal: Vec2,
    /// Sorted by `position.x`.
    pub items: Vec<Item>,
    pub doors: Vec<Door>,
    /// Every surface found on the map, largest first, including the ones too small to use.
    pub surfaces: Vec<Vec<Cell>>,
    pub regions: RegionMap,
}

impl Level {
    pub fn door(&self, id: DoorId) -> &Door {
        &self.doors[id.0]
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.map.canonical_bytes();
        push_point(&mut bytes, self.player);
        push_point(&mut bytes, self.goal);

        bytes.extend((self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            push_point(&mut bytes, item.position);
            bytes.push(item.sprite.code());
            bytes.extend(item.score.to_le_bytes());
        }

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for door in &self.doors {
            push_point(&mut bytes, door.position);
            bytes.extend((door.other.0 as u32).to_le_bytes());
        }

        bytes.extend((self.surfaces.len() as u32).to_le_bytes());
        for surface in &self.surfaces {
            bytes.extend((surface.len() as u32).to_le_bytes());
            for cell in surface {
                bytes.extend((cell.row as u32).to_le_bytes());
                bytes.extend((cell.col as u32).to_le_bytes());
            }
        }

        bytes.extend(self.regions.canonical_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_point(bytes: &mut Vec<u8>, point: Vec2) {
    bytes.extend(point.x.to_bits().to_le_bytes());
    bytes.extend(point.y.to_bits().to_le_bytes());
}

/// World position of a cell's top-left corner.
pub(super) fn cell_position(cell: Cell) -> Vec2 {
    Vec2 { x: cell.col as f64 * TILE_SIZE, y: cell.row as f64 * TILE_SIZE }
}

/// Chains consecutive tunnels: the exit of each is linked to the entrance of the next.
pub(super) fn link_doors(tunnels: &[Tunnel]) -> Vec<Door> {
    let mut doors = Vec::with_capacity(tunnels.len().saturating_sub(1) * 2);
    for pair in tunnels.windows(2) {
        let from = DoorId(doors.len());
        let to = DoorId(doors.len() + 1);
        doors.push(Door { position: pair[0].exit, other: to });
        doors.push(Door { position: pair[1].entrance, other: from });
    }
    doors
}
