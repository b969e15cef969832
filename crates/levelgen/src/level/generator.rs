//! Level assembly orchestration: map, surfaces, regions, tunnels, doors, hazards, and items.

use std::sync::Arc;

use log::{debug, info, warn};

use super::hazards::stamp_spikes;
use super::items::scatter_items;
use super::model::{Level, Tunnel, link_doors};
use super::regions::{RegionId, RegionMap};
use super::tunnels::place_tunnel;
use crate::atlas::MovementAtlas;
use crate::config::GeneratorSettings;
use crate::error::GenerationError;
use crate::mapgen::random_tiles;
use crate::physics::METERS_PER_PIXEL;
use crate::random::Randomizer;
use crate::reachability::{Surface, find_surfaces};
use crate::types::{Cell, TileKind, Vec2};

pub struct LevelGenerator {
    atlas: Arc<MovementAtlas>,
    settings: GeneratorSettings,
}

impl LevelGenerator {
    pub fn new(atlas: Arc<MovementAtlas>) -> Self {
        Self::with_settings(atlas, GeneratorSettings::default())
    }

    pub fn with_settings(atlas: Arc<MovementAtlas>, settings: GeneratorSettings) -> Self {
        Self { atlas, settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Builds the level for `level_id`. Every random decision draws from one stream seeded with
    /// the id, so the same id always yields the same level.
    pub fn generate(&self, level_id: u32) -> Result<Level, GenerationError> {
        info!("generating level {level_id}");
        let mut rng = Randomizer::new(level_id);
        let mut map = random_tiles(&mut rng, &self.settings.map);

        let ground_tiles = map.count(TileKind::Ground);
        let total_tiles = map.rows() * map.cols();
        if ground_tiles == 0 || ground_tiles == total_tiles {
            warn!("level {level_id}: degenerate map ({ground_tiles}/{total_tiles} ground)");
            return Err(GenerationError::DegenerateMap { level_id, ground_tiles, total_tiles });
        }

        let surfaces = find_surfaces(&map, &self.atlas);
        let regions = RegionMap::compute(&map);

        let min_surface_size = self.settings.level.min_surface_size;
        let (accepted, rejected): (Vec<&Surface>, Vec<&Surface>) =
            surfaces.iter().partition(|surface| surface.len() >= min_surface_size);
        debug!(
            "level {level_id}: {} surfaces accepted, {} rejected, {} regions",
            accepted.len(),
            rejected.len(),
            regions.len()
        );

        let tunnels: Vec<Tunnel> = group_by_region(&accepted, &regions)
            .into_iter()
            .flat_map(|(_, group)| group)
            .map(|surface| {
                place_tunnel(&surface.cells, &mut rng, self.settings.level.tunnel_attempts)
            })
            .collect();
        let (Some(first), Some(last)) = (tunnels.first(), tunnels.last()) else {
            warn!("level {level_id}: no surface with at least {min_surface_size} cells");
            return Err(GenerationError::NoAcceptedSurface { level_id, min_surface_size });
        };
        let player = first.entrance;
        let goal = Vec2 { y: last.exit.y + METERS_PER_PIXEL, ..last.exit };
        let doors = link_doors(&tunnels);

        let spikes: usize =
            rejected.iter().map(|surface| stamp_spikes(&mut map, &surface.cells)).sum();

        let walkable: Vec<Cell> =
            accepted.iter().flat_map(|surface| surface.cells.iter().copied()).collect();
        let items = scatter_items(&walkable, self.settings.level.item_stride, &mut rng);
        debug!(
            "level {level_id}: {} tunnels, {} doors, {spikes} spikes, {} items",
            tunnels.len(),
            doors.len(),
            items.len()
        );

        let level = Level {
            map,
            player,
            goal,
            items,
            doors,
            surfaces: surfaces.into_iter().map(|surface| surface.cells).collect(),
            regions,
        };
        info!("level {level_id} ready (fingerprint {:016x})", level.fingerprint());
        Ok(level)
    }
}

/// Buckets surfaces by the coarse region of their first cell, keeping first-seen order for both
/// the buckets and the surfaces inside them.
fn group_by_region<'a>(
    surfaces: &[&'a Surface],
    regions: &RegionMap,
) -> Vec<(Option<RegionId>, Vec<&'a Surface>)> {
    let mut groups: Vec<(Option<RegionId>, Vec<&'a Surface>)> = Vec::new();
    for &surface in surfaces {
        let region = surface.cells.first().and_then(|&cell| regions.region_at(cell));
        match groups.iter_mut().find(|(id, _)| *id == region) {
            Some((_, group)) => group.push(surface),
            None => groups.push((region, vec![surface])),
        }
    }
    groups
}
