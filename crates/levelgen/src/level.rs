//! Level assembly split into coherent submodules.

pub mod model;

mod generator;
mod hazards;
mod items;
mod regions;
mod tunnels;

use std::sync::Arc;

use crate::atlas::MovementAtlas;
use crate::error::GenerationError;

pub use generator::LevelGenerator;
pub use items::{Item, ItemKind};
pub use model::{Door, DoorId, Level, Tunnel};
pub use regions::{RegionId, RegionMap};

/// Largest level id front ends accept.
pub const MAX_LEVEL_ID: u32 = 999_999;

pub fn create_level(level_id: u32, atlas: Arc<MovementAtlas>) -> Result<Level, GenerationError> {
    LevelGenerator::new(atlas).generate(level_id)
}
