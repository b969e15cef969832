//! Player kinematics shared by gameplay and the offline movement sweep.
//!
//! Units are metres and simulation steps. The step function only integrates and accelerates;
//! floor and ceiling contact come in through [`PlayerState::touching_floor`] and friends.

use crate::types::Vec2;

pub const STEPS_PER_SECOND: f64 = 120.0;
pub const PIXELS_PER_METER: f64 = 12.0;
pub const METERS_PER_PIXEL: f64 = 1.0 / PIXELS_PER_METER;
pub const METERS_PER_SECOND: f64 = 1.0 / STEPS_PER_SECOND;
pub const METERS_PER_SECOND_PER_SECOND: f64 = METERS_PER_SECOND / STEPS_PER_SECOND;

pub const TILE_SIZE: f64 = 10.0 / 12.0;
pub const PLAYER_WIDTH: f64 = 1.0;
pub const PLAYER_HEIGHT: f64 = 1.5;

pub const MAX_HORIZONTAL_SPEED: f64 = 6.0 * METERS_PER_SECOND;
pub const HORIZONTAL_ACCELERATION: f64 = 20.0 * METERS_PER_SECOND_PER_SECOND;
pub const JUMP_POWER: f64 = 7.0 * METERS_PER_SECOND;
pub const GRAVITY: f64 = 20.0 * METERS_PER_SECOND_PER_SECOND;
pub const TERMINAL_VELOCITY: f64 = 8.0 * METERS_PER_SECOND;

/// Steps during which a held jump keeps its full upward speed.
pub const LONG_JUMP_EFFECT_TIME: u32 = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub speed: Vec2,
    pub facing_left: bool,
    /// Remaining long-jump steps; zero once the jump key is released.
    pub jumping: u32,
    pub touching_floor: bool,
    pub touching_ceiling: bool,
}

impl PlayerState {
    pub fn standing_at(position: Vec2) -> Self {
        Self { position, touching_floor: true, ..Self::default() }
    }
}

/// Advances `current` by one step into `next`.
///
/// Position moves by the current speed; speed then reacts to `input`. Contact flags are copied
/// through untouched, the collision pass owns them.
pub fn step(input: Input, current: &PlayerState, next: &mut PlayerState) {
    next.position.x = current.position.x + current.speed.x;
    next.position.y = current.position.y + current.speed.y;
    next.touching_floor = current.touching_floor;
    next.touching_ceiling = current.touching_ceiling;
    next.facing_left = current.facing_left;

    if input.left {
        next.speed.x = (current.speed.x - HORIZONTAL_ACCELERATION).max(-MAX_HORIZONTAL_SPEED);
        next.facing_left = true;
    } else if input.right {
        next.speed.x = (current.speed.x + HORIZONTAL_ACCELERATION).min(MAX_HORIZONTAL_SPEED);
        next.facing_left = false;
    } else if current.speed.x < 0.0 {
        next.speed.x = (current.speed.x + HORIZONTAL_ACCELERATION).min(0.0);
    } else {
        next.speed.x = (current.speed.x - HORIZONTAL_ACCELERATION).max(0.0);
    }

    if current.touching_floor && input.up {
        next.jumping = LONG_JUMP_EFFECT_TIME;
        next.speed.y = -JUMP_POWER;
    } else if current.jumping > 0 && input.up && !current.touching_ceiling {
        next.jumping = current.jumping - 1;
        next.speed.y = -JUMP_POWER;
    } else {
        next.jumping = 0;
        next.speed.y = if current.touching_floor {
            0.0
        } else {
            (current.speed.y + GRAVITY).min(TERMINAL_VELOCITY)
        };
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    fn run(input: impl Fn(u32) -> Input, steps: u32, airborne_after_start: bool) -> PlayerState {
        let mut current = PlayerState::standing_at(Vec2::default());
        let mut next = current;
        for t in 0..steps {
            if airborne_after_start {
                current.touching_floor = current.position.y >= 0.0;
            }
            step(input(t), &current, &mut next);
            mem::swap(&mut current, &mut next);
        }
        current
    }

    #[test]
    fn horizontal_speed_is_clamped() {
        let state = run(|_| Input { right: true, ..Input::default() }, 200, false);
        assert_eq!(state.speed.x, MAX_HORIZONTAL_SPEED);
        assert!(!state.facing_left);
    }

    #[test]
    fn friction_brings_player_to_rest() {
        let state = run(|t| Input { left: t < 30, ..Input::default() }, 200, false);
        assert_eq!(state.speed.x, 0.0);
        assert!(state.position.x < 0.0);
        assert!(state.facing_left);
    }

    #[test]
    fn holding_jump_reaches_higher_than_tapping() {
        let apex = |hold: u32| {
            let mut current = PlayerState::standing_at(Vec2::default());
            let mut next = current;
            let mut highest = 0.0_f64;
            for t in 0..400 {
                current.touching_floor = current.position.y >= 0.0 && current.speed.y >= 0.0;
                step(Input { up: t < hold, ..Input::default() }, &current, &mut next);
                mem::swap(&mut current, &mut next);
                highest = highest.min(current.position.y);
            }
            highest
        };

        let tap = apex(1);
        let hold = apex(LONG_JUMP_EFFECT_TIME * 2);
        assert!(tap < 0.0, "a tap still leaves the ground");
        assert!(hold < tap, "held jump apex {hold} should be above tapped apex {tap}");
    }

    #[test]
    fn falling_speed_never_exceeds_terminal_velocity() {
        let mut current = PlayerState::default();
        let mut next = current;
        for _ in 0..500 {
            step(Input::default(), &current, &mut next);
            mem::swap(&mut current, &mut next);
        }
        assert_eq!(current.speed.y, TERMINAL_VELOCITY);
    }
}
