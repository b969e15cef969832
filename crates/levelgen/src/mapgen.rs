//! Cellular-automaton cave generator.

use std::mem;

use log::debug;

use crate::config::MapConfig;
use crate::matrix::Matrix;
use crate::random::Randomizer;
use crate::tiles::TileMap;
use crate::types::{Cell, TileKind};

/// Wide cross kernel: three columns either side on the centre row, one either side above and below.
const NEIGHBORHOOD: [(i32, i32); 12] = [
    (0, -3),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
    (0, 3),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn random_tiles(randomizer: &mut Randomizer, config: &MapConfig) -> TileMap {
    let mut current = Matrix::from_fn(config.rows, config.cols, |_| {
        if randomizer.next_f64() < config.ground_probability {
            TileKind::Ground
        } else {
            TileKind::Empty
        }
    });
    let mut next = current.clone();

    for _ in 0..config.steps {
        automaton_step(&current, &mut next, config);
        mem::swap(&mut current, &mut next);
    }

    let map = TileMap::new(current);
    debug!(
        "generated {}x{} map with {} ground tiles",
        config.rows,
        config.cols,
        map.count(TileKind::Ground)
    );
    map
}

fn automaton_step(current: &Matrix<TileKind>, next: &mut Matrix<TileKind>, config: &MapConfig) {
    for row in 0..current.rows() {
        for col in 0..current.cols() {
            let cell = Cell { row, col };
            let neighbors = solid_neighbors(current, cell);
            let solid = if current.get(cell).is_solid() {
                neighbors >= config.death_limit
            } else {
                neighbors > config.birth_limit
            };
            next.set(cell, if solid { TileKind::Ground } else { TileKind::Empty });
        }
    }
}

fn solid_neighbors(tiles: &Matrix<TileKind>, cell: Cell) -> usize {
    NEIGHBORHOOD
        .iter()
        .filter(|&&(row, col)| {
            cell.offset(row, col)
                .and_then(|neighbor| tiles.checked_get(neighbor))
                .is_none_or(TileKind::is_solid)
        })
        .count()
}
