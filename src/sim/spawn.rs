//! Spawn scheduling
//!
//! Cadence is a function of scroll speed: the faster the world scrolls, the
//! tighter the spawn interval, floored at [`SPAWN_FLOOR_TICKS`]. Lane and
//! archetype choices come from the run RNG only.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Collectible, Obstacle, RunState};
use crate::consts::*;
use crate::theme::Theme;

/// Ticks between spawn events at the given speed.
///
/// Computed in f64: the f32 quotient lands just under the tick boundary at
/// round speeds (60/(6/5) would floor to 49 instead of 50).
#[inline]
pub fn spawn_interval(speed: f32) -> u64 {
    ((60.0 / (speed as f64 / 5.0)).floor() as u64).max(SPAWN_FLOOR_TICKS)
}

/// Probability that a spawn event fills two lanes instead of one
const TWO_LANE_CHANCE: f64 = 0.25;
/// Per-lane probability of a collectible rather than an obstacle
const COLLECTIBLE_CHANCE: f64 = 0.2;

/// Run the scheduler for the current tick, spawning entities when due.
///
/// Precondition: the theme passed validation, so both archetype lists are
/// non-empty.
pub(crate) fn run_scheduler(state: &mut RunState, theme: &Theme) {
    if state.frame - state.last_spawn_frame <= spawn_interval(state.speed) {
        return;
    }
    state.last_spawn_frame = state.frame;

    let mut lanes = [0u8, 1, 2];
    lanes.shuffle(&mut state.rng);
    let filled = if state.rng.random_bool(TWO_LANE_CHANCE) {
        2
    } else {
        1
    };

    for i in 0..filled {
        let lane = lanes[i];
        if state.rng.random_bool(COLLECTIBLE_CHANCE) {
            let archetype = state.rng.random_range(0..theme.collectibles.len());
            let id = state.next_entity_id();
            state.collectibles.push(Collectible {
                id,
                lane,
                y: SPAWN_Y,
                archetype,
                collected: false,
            });
        } else {
            let archetype = state.rng.random_range(0..theme.obstacles.len());
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                lane,
                y: SPAWN_Y,
                archetype,
                resolved: false,
            });
        }
    }
}
