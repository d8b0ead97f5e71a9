//! The per-frame simulation step
//!
//! One call advances the run by exactly one tick: scoring, spawning, motion,
//! stance arcs, then collision resolution. The first terminating collision
//! latches `over` and nothing mutates the run afterwards.

use glam::Vec2;

use super::collision::{self, Outcome};
use super::spawn;
use super::state::{GameEvent, RunState};
use crate::consts::*;
use crate::theme::Theme;
use crate::lane_center_x;

/// Advance the run by one tick.
///
/// No-op once the run is over; the host is expected to stop calling, but a
/// stale callback must not be able to do damage.
pub fn tick(state: &mut RunState, theme: &Theme) {
    if state.over {
        return;
    }

    state.frame += 1;
    state.speed += SPEED_INCREMENT;

    // Distance scoring: the multiplier lands on every 10-tick boundary
    if state.frame % PASSIVE_SCORE_PERIOD == 0 {
        state.score += state.multiplier as u64;
        state.events.push(GameEvent::ScoreChanged {
            score: state.score,
        });
    }

    // Multiplier steps up every 1000 ticks, for the rest of the run
    if state.frame % MULTIPLIER_PERIOD == 0 {
        state.multiplier += 1;
        state.events.push(GameEvent::MultiplierIncreased {
            multiplier: state.multiplier,
        });
        state.spawn_label(
            Vec2::new(GAME_WIDTH / 2.0, 100.0),
            "#ffffff".to_string(),
            format!("X{} BOOST!", state.multiplier),
        );
    }

    spawn::run_scheduler(state, theme);

    // Scroll the world
    let speed = state.speed;
    for o in &mut state.obstacles {
        o.y += speed;
    }
    for c in &mut state.collectibles {
        c.y += speed;
    }
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);
    state.obstacles.retain(|o| o.y <= CULL_Y);
    state.collectibles.retain(|c| c.y <= CULL_Y);

    state.player.advance_stance();

    // Obstacles first: a terminating hit ends the tick and the run
    let lane = state.player.lane;
    for i in 0..state.obstacles.len() {
        let o = &state.obstacles[i];
        if o.resolved || o.lane != lane || !collision::in_obstacle_window(o.y) {
            continue;
        }
        let kind = theme.obstacles[o.archetype].kind;
        match collision::resolve_obstacle(kind, &state.player) {
            // Stays live: the player must hold the evasion for the whole
            // overlap, and the window re-checks every tick
            Outcome::Safe => {}
            Outcome::Terminating => {
                state.obstacles[i].resolved = true;
                state.over = true;
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    coins: state.coins,
                });
                return;
            }
        }
    }

    // Pickups never end the run
    let player_x = lane_center_x(lane);
    for i in 0..state.collectibles.len() {
        let c = &state.collectibles[i];
        if c.collected || c.lane != lane || !collision::in_collectible_window(c.y) {
            continue;
        }
        let pickup_y = c.y;
        let points = theme.collectibles[c.archetype].points;
        let gained = (points * state.multiplier as f32).round() as u64;

        state.collectibles[i].collected = true;
        state.score += gained;
        state.coins += 1;
        state.events.push(GameEvent::ScoreChanged {
            score: state.score,
        });
        state.events.push(GameEvent::CoinCollected {
            coins: state.coins,
        });

        let accent = theme.colors.accent.clone();
        state.spawn_burst(Vec2::new(player_x, pickup_y), &accent, 8);
        state.spawn_label(Vec2::new(player_x, pickup_y), accent, format!("+{gained}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, Stance};
    use crate::theme::test_support::desert_theme;

    /// Tick once with the hazard lanes cleared afterwards, so long passive
    /// runs never end on a random spawn.
    fn tick_cleared(state: &mut RunState, theme: &Theme) {
        tick(state, theme);
        state.obstacles.clear();
        state.collectibles.clear();
    }

    #[test]
    fn speed_rises_every_tick() {
        let theme = desert_theme();
        let mut state = RunState::new(3);
        let mut prev = state.speed;
        for _ in 0..500 {
            tick_cleared(&mut state, &theme);
            assert!(state.speed > prev);
            prev = state.speed;
        }
    }

    #[test]
    fn multiplier_follows_the_thousand_tick_ladder() {
        let theme = desert_theme();
        let mut state = RunState::new(3);
        for _ in 0..2100 {
            tick_cleared(&mut state, &theme);
            assert_eq!(state.multiplier as u64, 1 + state.frame / MULTIPLIER_PERIOD);
        }
    }

    #[test]
    fn multiplier_boundaries_are_exact() {
        let theme = desert_theme();
        let mut state = RunState::new(3);
        let mut at = std::collections::HashMap::new();
        for _ in 0..2000 {
            tick_cleared(&mut state, &theme);
            if [999, 1000, 1999, 2000].contains(&state.frame) {
                at.insert(state.frame, state.multiplier);
            }
        }
        assert_eq!(at[&999], 1);
        assert_eq!(at[&1000], 2);
        assert_eq!(at[&1999], 2);
        assert_eq!(at[&2000], 3);
    }

    #[test]
    fn a_safe_overlap_keeps_the_obstacle_live() {
        let theme = desert_theme(); // its only obstacle is a `jump`
        let mut state = RunState::new(3);
        state.player.stance = Stance::Jumping { phase: 0.46 };
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane: 1,
            y: PLAYER_Y - state.speed - 10.0,
            archetype: 0,
            resolved: false,
        });
        tick(&mut state, &theme);
        assert!(!state.over);
        assert!(!state.obstacles[0].resolved);
    }

    #[test]
    fn ticking_after_game_over_changes_nothing() {
        let theme = desert_theme();
        let mut state = RunState::new(3);
        state.over = true;
        let frame = state.frame;
        let speed = state.speed;
        tick(&mut state, &theme);
        assert_eq!(state.frame, frame);
        assert_eq!(state.speed, speed);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn passed_entities_are_culled() {
        let theme = desert_theme();
        let mut state = RunState::new(3);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane: 0,
            y: CULL_Y + 1.0,
            archetype: 0,
            resolved: false,
        });
        tick(&mut state, &theme);
        assert!(state.obstacles.is_empty());
    }
}
