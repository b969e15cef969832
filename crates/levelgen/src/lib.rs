pub mod atlas;
pub mod config;
pub mod error;
pub mod level;
pub mod mapgen;
pub mod matrix;
pub mod physics;
pub mod random;
pub mod reachability;
pub mod tiles;
pub mod types;
pub mod worker;

#[cfg(test)]
mod test_support;

pub use atlas::{AtlasCache, BoundingBox, Movement, MovementAtlas, MovementId, Offset};
pub use config::{GeneratorSettings, LevelConfig, MapConfig};
pub use error::{GenerationError, WorkerError};
pub use level::{
    Door, DoorId, Item, ItemKind, Level, LevelGenerator, MAX_LEVEL_ID, RegionId, RegionMap, Tunnel,
    create_level,
};
pub use mapgen::random_tiles;
pub use matrix::Matrix;
pub use random::Randomizer;
pub use reachability::{
    Surface, SurfaceCell, SurfaceId, SurfaceMap, find_biggest_region, find_surfaces, label_surfaces,
};
pub use tiles::TileMap;
pub use types::*;
pub use worker::{Job, JobId, JobReply, JobResponse, Worker};
