//! Collision resolution
//!
//! Proximity is a vertical window around the player line; resolution maps an
//! obstacle's avoidance kind and the player's stance to an outcome. Both are
//! pure so the rule set stays exhaustively checkable.

use super::state::Player;
use crate::consts::*;
use crate::theme::AvoidKind;

/// What an obstacle overlap means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Safe,
    Terminating,
}

/// True while an obstacle at `y` overlaps the player line
#[inline]
pub fn in_obstacle_window(y: f32) -> bool {
    (y - PLAYER_Y).abs() < OBSTACLE_WINDOW
}

/// True while a collectible at `y` is within pickup reach
#[inline]
pub fn in_collectible_window(y: f32) -> bool {
    (y - PLAYER_Y).abs() < COLLECTIBLE_WINDOW
}

/// Resolve an overlap between the player and an obstacle of the given kind.
///
/// - `Jump`: safe only while the jump arc lifts the player past the barrier
/// - `Slide`: safe only mid-slide
/// - `Dodge`: nothing helps; lane choice was the only defense
pub fn resolve_obstacle(kind: AvoidKind, player: &Player) -> Outcome {
    match kind {
        AvoidKind::Jump => {
            if player.jump_lift() >= JUMP_CLEAR_HEIGHT {
                Outcome::Safe
            } else {
                Outcome::Terminating
            }
        }
        AvoidKind::Slide => {
            if player.is_sliding() {
                Outcome::Safe
            } else {
                Outcome::Terminating
            }
        }
        AvoidKind::Dodge => Outcome::Terminating,
    }
}
