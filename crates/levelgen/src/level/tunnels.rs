//! Entrance/exit placement on a single surface.

use super::model::{Tunnel, cell_position};
use crate::random::Randomizer;
use crate::types::Cell;

/// Splits the surface at its median column, sends the entrance to a random half and the exit to
/// the other, then keeps the farthest of `attempts` sampled pairs.
pub(super) fn place_tunnel(surface: &[Cell], rng: &mut Randomizer, attempts: usize) -> Tunnel {
    let (left, right) = split_at_median(surface);
    let (entrances, exits) = if rng.coin_flip() { (left, right) } else { (right, left) };

    let sample = |rng: &mut Randomizer| {
        let entrance = entrances[rng.next_index(entrances.len())];
        let exit = exits[rng.next_index(exits.len())];
        (entrance, exit, entrance.distance2(exit))
    };

    let (mut entrance, mut exit, mut farthest) = sample(rng);
    for _ in 1..attempts {
        let (candidate_entrance, candidate_exit, distance2) = sample(rng);
        if distance2 > farthest {
            (entrance, exit, farthest) = (candidate_entrance, candidate_exit, distance2);
        }
    }
    Tunnel { entrance: cell_position(entrance), exit: cell_position(exit) }
}

/// Cells left of the median column, and the rest. A half that comes out empty falls back to the
/// whole surface so both sides always have a candidate.
fn split_at_median(surface: &[Cell]) -> (Vec<Cell>, Vec<Cell>) {
    let mut cols: Vec<usize> = surface.iter().map(|cell| cell.col).collect();
    cols.sort_unstable();
    let median = cols[cols.len().div_ceil(2).min(cols.len() - 1)];

    let (left, right): (Vec<Cell>, Vec<Cell>) =
        surface.iter().partition(|cell| cell.col < median);
    let left = if left.is_empty() { surface.to_vec() } else { left };
    let right = if right.is_empty() { surface.to_vec() } else { right };
    (left, right)
}
