//! Brute-force sweep over key press timings from a standing start.

use std::iter;
use std::mem;

use crate::physics::{self, HORIZONTAL_ACCELERATION, Input, LONG_JUMP_EFFECT_TIME, PlayerState, TILE_SIZE};
use crate::types::Vec2;

use super::bounding_box::BoundingBox;

/// Granularity of every key press and release, 0.3 s.
pub(super) const REACTION_TIME: u32 = 36;
/// Longest simulated scenario, 5 s.
pub(super) const MAX_SIMULATION_TIME: u32 = 600;

/// One combination of key timings, all in simulation steps. Intervals are half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Scenario {
    pub(super) start_right: u32,
    pub(super) stop_right: u32,
    pub(super) start_left: u32,
    pub(super) stop_left: u32,
    pub(super) start_up: u32,
    pub(super) up_duration: u32,
}

impl Scenario {
    fn input_at(&self, t: u32) -> Input {
        Input {
            left: t >= self.start_left && t < self.stop_left,
            right: t >= self.start_right && t < self.stop_right,
            up: t >= self.start_up && t < self.start_up + self.up_duration,
        }
    }
}

/// Longest wait before jumping worth trying: the time a full-acceleration run needs to cross a tile.
fn max_up_delay() -> f64 {
    (2.0 * TILE_SIZE / HORIZONTAL_ACCELERATION).sqrt()
}

pub(super) fn scenarios() -> Vec<Scenario> {
    let horizon = MAX_SIMULATION_TIME + REACTION_TIME;
    let step = REACTION_TIME as usize;
    let up_delay_limit = max_up_delay() + f64::from(REACTION_TIME);
    let up_starts: Vec<u32> = (0..)
        .step_by(step)
        .take_while(|&start| f64::from(start) <= up_delay_limit)
        .collect();
    let up_durations: Vec<u32> = iter::successors(Some(1_u32), |duration| Some(duration * 2))
        .take_while(|&duration| duration <= LONG_JUMP_EFFECT_TIME * 2)
        .collect();

    let mut scenarios = Vec::new();
    for start_right in (0..horizon).step_by(step) {
        for stop_right in (start_right..=horizon).rev().step_by(step) {
            for start_left in (stop_right..horizon).step_by(step) {
                for stop_left in (start_left..horizon).step_by(step) {
                    for &start_up in &up_starts {
                        for &up_duration in &up_durations {
                            scenarios.push(Scenario {
                                start_right,
                                stop_right,
                                start_left,
                                stop_left,
                                start_up,
                                up_duration,
                            });
                        }
                    }
                }
            }
        }
    }
    scenarios
}

/// Runs one scenario from rest at the origin and records every footprint change.
///
/// Stops once the player is back at or below the start height after the jump, or at the horizon.
pub(super) fn simulate(scenario: &Scenario) -> Vec<BoundingBox> {
    let mut current = PlayerState::standing_at(Vec2::default());
    let mut next = current;
    let mut last = BoundingBox::at_position(current.position);
    let mut boxes = Vec::new();

    let mut t = 0;
    while t < MAX_SIMULATION_TIME && (t <= scenario.start_up + 1 || current.position.y < 0.0) {
        current.touching_floor = current.position.y >= 0.0;
        physics::step(scenario.input_at(t), &current, &mut next);
        mem::swap(&mut current, &mut next);

        let bbox = BoundingBox::at_position(current.position);
        if bbox != last {
            boxes.push(bbox);
            last = bbox;
        }
        t += 1;
    }
    boxes
}
