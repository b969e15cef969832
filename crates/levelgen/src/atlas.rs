//! Movement atlas: every footprint sequence the player can realise from a standing start.
//!
//! The atlas is built by simulating the real kinematics over a grid of key timings, folding the
//! resulting footprint sequences into a prefix tree, and flattening that tree so that every prefix
//! is a movement of its own. Left/right reflections are always present.
//!
//! Reachability uses it as an adjacency oracle: an offset is reachable from a floor cell when some
//! movement ending at that offset clears the terrain along its whole prefix.

mod bounding_box;
mod prefix_tree;
mod sweep;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use log::{debug, info};

use crate::physics::TILE_SIZE;
use crate::types::Vec2;

pub use bounding_box::{BoundingBox, Offset, PLAYER_COL_WIDTH, PLAYER_ROW_HEIGHT};

use prefix_tree::PrefixTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovementId(usize);

impl MovementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A footprint sequence relative to the origin footprint. `parent` is the same sequence minus
/// its last box, if that is non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub boxes: Vec<BoundingBox>,
    pub parent: Option<MovementId>,
}

impl Movement {
    pub fn last(&self) -> &BoundingBox {
        self.boxes.last().expect("movements always hold at least one box")
    }
}

#[derive(Debug)]
pub struct MovementAtlas {
    movements: Vec<Movement>,
    by_offset: BTreeMap<Offset, Vec<MovementId>>,
}

impl MovementAtlas {
    /// Runs the full sweep. Expensive: share the result through [`AtlasCache`].
    pub fn simulate() -> Self {
        let started = Instant::now();
        let mut tree = PrefixTree::default();
        for path in seeded_steps() {
            tree.insert_mirrored(&path);
        }

        let scenarios = sweep::scenarios();
        for scenario in &scenarios {
            let path = sweep::simulate(scenario);
            tree.insert_mirrored(&path);
        }
        debug!("swept {} input scenarios into {} movements", scenarios.len(), tree.len());

        let atlas = Self::from_tree(&tree);
        info!(
            "movement atlas ready: {} movements over {} offsets in {:?}",
            atlas.len(),
            atlas.by_offset.len(),
            started.elapsed()
        );
        atlas
    }

    /// Builds an atlas from explicit footprint sequences, adding their reflections.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a [BoundingBox]>) -> Self {
        let mut tree = PrefixTree::default();
        for path in paths {
            tree.insert_mirrored(path);
        }
        Self::from_tree(&tree)
    }

    fn from_tree(tree: &PrefixTree) -> Self {
        let movements = tree.flatten();
        let mut by_offset: BTreeMap<Offset, Vec<MovementId>> = BTreeMap::new();
        for (index, movement) in movements.iter().enumerate() {
            by_offset.entry(movement.last().offset()).or_default().push(MovementId(index));
        }
        Self { movements, by_offset }
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn movement(&self, id: MovementId) -> &Movement {
        &self.movements[id.0]
    }

    /// Candidate offsets with the movements that end on them. Any movement passing through an
    /// offset has a prefix that ends there, so this is also the set of movements through it.
    pub fn offsets(&self) -> impl Iterator<Item = (Offset, &[MovementId])> + '_ {
        self.by_offset.iter().map(|(&offset, ids)| (offset, ids.as_slice()))
    }

    pub fn movements_through(&self, offset: Offset) -> &[MovementId] {
        self.by_offset.get(&offset).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, boxes: &[BoundingBox]) -> bool {
        let Some(last) = boxes.last() else {
            return false;
        };
        self.movements_through(last.offset())
            .iter()
            .any(|&id| self.movement(id).boxes == boxes)
    }
}

/// One-tile walking steps and one-tile climbs, always available regardless of the sweep.
fn seeded_steps() -> Vec<Vec<BoundingBox>> {
    let at = |x: f64, y: f64| BoundingBox::at_position(Vec2 { x, y });
    vec![
        vec![at(TILE_SIZE, 0.0)],
        vec![at(-TILE_SIZE, 0.0)],
        vec![at(0.0, -TILE_SIZE), at(TILE_SIZE, -TILE_SIZE)],
        vec![at(0.0, -TILE_SIZE), at(-TILE_SIZE, -TILE_SIZE)],
    ]
}

/// Builds the atlas at most once. Concurrent callers block on the first build and share it.
#[derive(Debug, Default)]
pub struct AtlasCache {
    atlas: OnceLock<Arc<MovementAtlas>>,
}

impl AtlasCache {
    pub const fn new() -> Self {
        Self { atlas: OnceLock::new() }
    }

    pub fn get(&self) -> Arc<MovementAtlas> {
        self.get_or_build(MovementAtlas::simulate)
    }

    fn get_or_build(&self, build: impl FnOnce() -> MovementAtlas) -> Arc<MovementAtlas> {
        Arc::clone(self.atlas.get_or_init(|| Arc::new(build())))
    }

    pub fn is_ready(&self) -> bool {
        self.atlas.get().is_some()
    }
}
