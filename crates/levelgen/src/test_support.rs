//! Shared fixtures for unit tests across the crate.

use std::sync::{Arc, LazyLock};

use crate::atlas::{AtlasCache, MovementAtlas};
use crate::tiles::TileMap;

static ATLAS: LazyLock<Arc<AtlasCache>> = LazyLock::new(|| Arc::new(AtlasCache::new()));

/// The simulated atlas, built once per test binary.
pub(crate) fn shared_atlas() -> Arc<MovementAtlas> {
    ATLAS.get()
}

/// The cache behind [`shared_atlas`], for code that takes the cache itself.
pub(crate) fn shared_cache() -> Arc<AtlasCache> {
    Arc::clone(&*ATLAS)
}

/// Two-wide shaft dropping from a small chamber into a short corridor.
pub(crate) fn shaft_fixture() -> TileMap {
    TileMap::from_ascii(&[
        "#########",
        "#...#####",
        "#...#####",
        "#...#####",
        "##..#####",
        "##..#####",
        "##..#####",
        "##..#####",
        "##..#####",
        "##..#####",
        "##...####",
        "##...####",
        "#########",
    ])
}

/// A closed box with a flat floor, `width` tiles of open space wide and `height` tiles tall.
pub(crate) fn open_room_fixture(width: usize, height: usize) -> TileMap {
    let wall = "#".repeat(width + 2);
    let inner = format!("#{}#", ".".repeat(width));
    let mut rows = vec![wall.clone()];
    rows.extend((0..height).map(|_| inner.clone()));
    rows.push(wall);
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    TileMap::from_ascii(&rows)
}
