//! Atlas-driven flood fill over standable cells.
//! A cell joins a fill when some atlas movement from an already-claimed cell ends on it without
//! touching terrain along the way. Fills that meet an older surface fold into it.

use log::trace;

use super::surface_map::{SurfaceCell, SurfaceId, SurfaceMap};
use crate::atlas::{MovementAtlas, MovementId};
use crate::tiles::TileMap;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clearance {
    Unchecked,
    Clear,
    Blocked,
}

/// Memoised prefix checks for a single origin. Movements share prefixes through `parent`, so each
/// box is tested against the terrain at most once per origin.
struct ClearanceProbe<'a> {
    map: &'a TileMap,
    atlas: &'a MovementAtlas,
    origin: Cell,
    memo: Vec<Clearance>,
    chain: Vec<MovementId>,
}

impl<'a> ClearanceProbe<'a> {
    fn new(map: &'a TileMap, atlas: &'a MovementAtlas) -> Self {
        Self {
            map,
            atlas,
            origin: Cell::new(0, 0),
            memo: vec![Clearance::Unchecked; atlas.len()],
            chain: Vec::new(),
        }
    }

    fn reset(&mut self, origin: Cell) {
        self.origin = origin;
        self.memo.fill(Clearance::Unchecked);
    }

    /// Whether every box of the movement, translated onto the origin, stays clear of terrain.
    /// Footprints outside the map count as blocked.
    fn is_clear(&mut self, id: MovementId) -> bool {
        self.chain.clear();
        let mut cursor = Some(id);
        let mut verdict = Clearance::Clear;
        while let Some(current) = cursor {
            match self.memo[current.index()] {
                Clearance::Unchecked => {
                    self.chain.push(current);
                    cursor = self.atlas.movement(current).parent;
                }
                known => {
                    verdict = known;
                    break;
                }
            }
        }

        // Resolve from the root end of the chain so a blocked prefix poisons its descendants.
        while let Some(current) = self.chain.pop() {
            if verdict == Clearance::Clear {
                let footprint = self.atlas.movement(current).last().translated(self.origin);
                if self.map.collides(&footprint) {
                    verdict = Clearance::Blocked;
                }
            }
            self.memo[current.index()] = verdict;
        }
        verdict == Clearance::Clear
    }
}

/// Labels every standable cell of `map` with the surface it belongs to.
pub(super) fn label(map: &TileMap, atlas: &MovementAtlas) -> SurfaceMap {
    let mut surfaces = SurfaceMap::seed(map);
    let mut probe = ClearanceProbe::new(map, atlas);
    for row in 0..map.rows() {
        for col in 0..map.cols() {
            let seed = Cell::new(row, col);
            if surfaces.get(seed) == SurfaceCell::Unknown {
                fill(&mut surfaces, &mut probe, seed);
            }
        }
    }
    surfaces
}

fn fill(surfaces: &mut SurfaceMap, probe: &mut ClearanceProbe<'_>, seed: Cell) {
    let atlas = probe.atlas;
    let mut current = surfaces.allocate_id();
    surfaces.claim(seed, current);
    let mut pending = vec![seed];

    while let Some(origin) = pending.pop() {
        probe.reset(origin);
        for (offset, candidates) in atlas.offsets() {
            let Some(target) = origin.offset(offset.row, offset.col) else {
                continue;
            };
            if !surfaces.has(target) {
                continue;
            }
            let value = surfaces.get(target);
            let needs_visit = match value {
                SurfaceCell::Unknown => true,
                SurfaceCell::Surface(id) => id != current,
                SurfaceCell::Solid | SurfaceCell::Empty => false,
            };
            if !needs_visit || !candidates.iter().any(|&id| probe.is_clear(id)) {
                continue;
            }

            match value {
                SurfaceCell::Surface(other) => {
                    let (survivor, absorbed) = ordered(current, other);
                    let relabelled = surfaces.merge(survivor, absorbed);
                    trace!(
                        "surface {} absorbed {} ({relabelled} cells)",
                        survivor.get(),
                        absorbed.get()
                    );
                    current = survivor;
                }
                _ => {
                    surfaces.claim(target, current);
                    pending.push(target);
                }
            }
        }
    }
}

/// The lower id survives a merge.
fn ordered(a: SurfaceId, b: SurfaceId) -> (SurfaceId, SurfaceId) {
    if a < b { (a, b) } else { (b, a) }
}
