//! Run state and core simulation types
//!
//! One `RunState` is created when a run starts and dropped when it ends.
//! Everything random flows through its seeded RNG, so a run is reproducible
//! from `seed` alone.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// What the player's body is doing.
///
/// Jumping and sliding are mutually exclusive by construction; the only
/// cross-transition is the jump-bail in [`Player::slide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stance {
    Running,
    Jumping { phase: f32 },
    Sliding { phase: f32 },
}

/// A keyboard intent, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    LaneLeft,
    LaneRight,
    Jump,
    Slide,
}

/// The player: a lane index and a stance
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Current lane, 0..=2
    pub lane: u8,
    pub stance: Stance,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: 1,
            stance: Stance::Running,
        }
    }
}

impl Player {
    /// Current vertical lift in screen units: a half-sine over the jump
    /// phase, peaking at phase 0.5, zero while not jumping.
    pub fn jump_lift(&self) -> f32 {
        match self.stance {
            Stance::Jumping { phase } => (phase * std::f32::consts::PI).sin() * JUMP_LIFT,
            _ => 0.0,
        }
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.stance, Stance::Sliding { .. })
    }

    fn shift_lane(&mut self, delta: i8) {
        let lane = self.lane as i8 + delta;
        self.lane = lane.clamp(0, LANE_COUNT as i8 - 1) as u8;
    }

    fn jump(&mut self) {
        if matches!(self.stance, Stance::Running) {
            self.stance = Stance::Jumping { phase: 0.0 };
        }
    }

    fn slide(&mut self) {
        match self.stance {
            // A jump can be bailed into a slide; a slide cannot be re-armed
            Stance::Running | Stance::Jumping { .. } => {
                self.stance = Stance::Sliding { phase: 0.0 };
            }
            Stance::Sliding { .. } => {}
        }
    }

    /// Advance an active jump/slide arc by one tick
    pub(crate) fn advance_stance(&mut self) {
        match &mut self.stance {
            Stance::Running => {}
            Stance::Jumping { phase } | Stance::Sliding { phase } => {
                *phase += STANCE_STEP;
                if *phase >= 1.0 {
                    self.stance = Stance::Running;
                }
            }
        }
    }
}

/// A live obstacle instance
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    pub y: f32,
    /// Index into the theme's obstacle archetypes
    pub archetype: usize,
    /// Set by a terminating hit; never cleared
    pub resolved: bool,
}

/// A live collectible instance
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: u32,
    pub lane: u8,
    pub y: f32,
    /// Index into the theme's collectible archetypes
    pub archetype: usize,
    /// Set on pickup; a collected entity never scores again
    pub collected: bool,
}

/// Cosmetic feedback entity; no gameplay effect
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 down to 0.0, drained by [`PARTICLE_DECAY`] per tick
    pub life: f32,
    /// CSS color the renderer paints with
    pub color: String,
    /// Some = floating label, None = dot
    pub label: Option<String>,
}

/// Visual-feedback tuning, owned by the shell's settings
#[derive(Debug, Clone)]
pub struct FxConfig {
    pub particle_cap: usize,
    /// Dot bursts on pickups; labels always spawn
    pub bursts: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            particle_cap: MAX_PARTICLES,
            bursts: true,
        }
    }
}

/// Outbound engine signal, drained by the host once per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    CoinCollected { coins: u32 },
    MultiplierIncreased { multiplier: u32 },
    /// Emitted at most once per run, on the first terminating collision
    GameOver { score: u64, coins: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed this run's RNG was built from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Monotonic tick counter
    pub frame: u64,
    /// Scroll speed in units per tick
    pub speed: f32,
    pub last_spawn_frame: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub coins: u32,
    /// Starts at 1, grows every [`MULTIPLIER_PERIOD`] ticks, never shrinks
    pub multiplier: u32,
    /// Latched by the first terminating collision
    pub over: bool,
    pub fx: FxConfig,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl RunState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            speed: INITIAL_SPEED,
            last_spawn_frame: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            coins: 0,
            multiplier: 1,
            over: false,
            fx: FxConfig::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a keyboard intent. Inputs land between ticks; once the run is
    /// over every intent is a no-op.
    pub fn apply_intent(&mut self, intent: Intent) {
        if self.over {
            return;
        }
        match intent {
            Intent::LaneLeft => self.player.shift_lane(-1),
            Intent::LaneRight => self.player.shift_lane(1),
            Intent::Jump => self.player.jump(),
            Intent::Slide => self.player.slide(),
        }
    }

    /// Hand the queued events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push a particle, dropping the oldest when over budget
    pub(crate) fn push_particle(&mut self, particle: Particle) {
        if self.fx.particle_cap == 0 {
            return;
        }
        while self.particles.len() >= self.fx.particle_cap {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// A floating text label drifting upward
    pub(crate) fn spawn_label(&mut self, pos: Vec2, color: String, text: String) {
        self.push_particle(Particle {
            pos,
            vel: Vec2::new(0.0, -2.0),
            life: 1.0,
            color,
            label: Some(text),
        });
    }

    /// A burst of dots scattering from a point
    pub(crate) fn spawn_burst(&mut self, pos: Vec2, color: &str, count: usize) {
        use rand::Rng;
        if !self.fx.bursts {
            return;
        }
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 10.0,
                (self.rng.random::<f32>() - 0.5) * 10.0,
            );
            self.push_particle(Particle {
                pos,
                vel,
                life: 1.0,
                color: color.to_string(),
                label: None,
            });
        }
    }
}
