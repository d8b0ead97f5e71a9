//! World Runner - a themed lane-runner
//!
//! Core modules:
//! - `theme`: the generated world configuration (palette, character, archetypes)
//! - `provider`: theme payload parsing/validation and the generation endpoint client
//! - `sim`: deterministic simulation (spawning, player motion, collisions, scoring)
//! - `engine`: the run lifecycle facade the shell drives
//! - `render`: Canvas-2D drawing, strictly read-only over the simulation
//! - `highscore` / `settings`: LocalStorage-backed scalar state

pub mod engine;
pub mod highscore;
pub mod provider;
pub mod rank;
pub mod render;
pub mod settings;
pub mod sim;
pub mod theme;

pub use engine::Engine;
pub use highscore::HighScore;
pub use rank::Rank;
pub use settings::Settings;
pub use theme::Theme;

/// Game configuration constants
pub mod consts {
    /// Width of one lane in world units (world units == canvas pixels)
    pub const LANE_WIDTH: f32 = 120.0;
    /// Three lanes, side by side
    pub const LANE_COUNT: u8 = 3;
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = LANE_WIDTH * LANE_COUNT as f32;
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Fixed screen line the player runs on
    pub const PLAYER_Y: f32 = 500.0;

    /// Scroll speed at run start, in units per tick
    pub const INITIAL_SPEED: f32 = 6.0;
    /// Per-tick speed gain; strictly monotonic, never capped
    pub const SPEED_INCREMENT: f32 = 0.0005;

    /// Jump/slide arcs advance this much per tick (~25 ticks per arc)
    pub const STANCE_STEP: f32 = 0.04;
    /// Peak vertical lift of a full jump, in units
    pub const JUMP_LIFT: f32 = 100.0;
    /// Minimum lift that clears a `jump` obstacle
    pub const JUMP_CLEAR_HEIGHT: f32 = 40.0;

    /// Proximity windows around PLAYER_Y for collision checks
    pub const OBSTACLE_WINDOW: f32 = 40.0;
    pub const COLLECTIBLE_WINDOW: f32 = 50.0;

    /// Entities enter above the visible area
    pub const SPAWN_Y: f32 = -100.0;
    /// Hard floor on ticks between spawn events
    pub const SPAWN_FLOOR_TICKS: u64 = 25;
    /// Entities fully below this line are discarded
    pub const CULL_Y: f32 = GAME_HEIGHT + 120.0;

    /// Passive score lands every this many ticks
    pub const PASSIVE_SCORE_PERIOD: u64 = 10;
    /// Multiplier grows every this many ticks
    pub const MULTIPLIER_PERIOD: u64 = 1000;

    /// Particle life lost per tick (lives start at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Default particle budget; oldest are dropped beyond it
    pub const MAX_PARTICLES: usize = 256;
}

/// Horizontal center of a lane, clamped to the playfield
#[inline]
pub fn lane_center_x(lane: u8) -> f32 {
    use consts::{LANE_COUNT, LANE_WIDTH};
    let lane = lane.min(LANE_COUNT - 1);
    lane as f32 * LANE_WIDTH + LANE_WIDTH / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_centers_span_the_playfield() {
        assert_eq!(lane_center_x(0), 60.0);
        assert_eq!(lane_center_x(1), 180.0);
        assert_eq!(lane_center_x(2), 300.0);
        // Out-of-range lanes clamp rather than leave the canvas
        assert_eq!(lane_center_x(7), 300.0);
    }
}
