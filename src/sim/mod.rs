//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per host frame, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Outcome, in_collectible_window, in_obstacle_window, resolve_obstacle};
pub use spawn::spawn_interval;
pub use state::{
    Collectible, FxConfig, GameEvent, Intent, Obstacle, Particle, Player, RunState, Stance,
};
pub use tick::tick;
