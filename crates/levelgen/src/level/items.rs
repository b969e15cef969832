//! Collectible catalogue and scattering along accepted surfaces.

use serde::Serialize;

use super::model::cell_position;
use crate::physics::METERS_PER_PIXEL;
use crate::random::Randomizer;
use crate::types::{Cell, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Corn,
    Pepper,
    Cactus,
}

impl ItemKind {
    /// Rarest first, the order rolls are resolved in.
    const BY_RARITY: [ItemKind; 3] = [ItemKind::Cactus, ItemKind::Pepper, ItemKind::Corn];

    pub fn score(self) -> u32 {
        match self {
            ItemKind::Corn => 10,
            ItemKind::Pepper => 20,
            ItemKind::Cactus => 50,
        }
    }

    /// Relative weight in the drop table.
    pub fn frequency(self) -> u32 {
        match self {
            ItemKind::Corn => 70,
            ItemKind::Pepper => 18,
            ItemKind::Cactus => 12,
        }
    }

    /// Sprite width and height in pixels.
    pub fn sprite_size(self) -> (u32, u32) {
        match self {
            ItemKind::Corn => (6, 10),
            ItemKind::Pepper => (6, 8),
            ItemKind::Cactus => (8, 10),
        }
    }

    pub(super) fn code(self) -> u8 {
        match self {
            ItemKind::Corn => 0,
            ItemKind::Pepper => 1,
            ItemKind::Cactus => 2,
        }
    }

    /// One draw against the normalised drop table. Falls back to the most common kind when
    /// rounding leaves some mass unclaimed.
    pub fn roll(rng: &mut Randomizer) -> ItemKind {
        let total: u32 = Self::BY_RARITY.iter().map(|kind| kind.frequency()).sum();
        let mut remaining = rng.next_f64();
        for kind in Self::BY_RARITY {
            let share = f64::from(kind.frequency()) / f64::from(total);
            if share > remaining {
                return kind;
            }
            remaining -= share;
        }
        ItemKind::Corn
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Item {
    pub position: Vec2,
    pub sprite: ItemKind,
    pub width: f64,
    pub height: f64,
    pub score: u32,
}

impl Item {
    pub fn new(sprite: ItemKind, position: Vec2) -> Self {
        let (width, height) = sprite.sprite_size();
        Self {
            position,
            sprite,
            width: f64::from(width) * METERS_PER_PIXEL,
            height: f64::from(height) * METERS_PER_PIXEL,
            score: sprite.score(),
        }
    }
}

/// One item on every `stride`-th cell, sorted by x so gameplay can binary-search them.
pub(super) fn scatter_items(cells: &[Cell], stride: usize, rng: &mut Randomizer) -> Vec<Item> {
    let mut items: Vec<Item> = cells
        .iter()
        .step_by(stride.max(1))
        .map(|&cell| Item::new(ItemKind::roll(rng), cell_position(cell)))
        .collect();
    items.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
    items
}
