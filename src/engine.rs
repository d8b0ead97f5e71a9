//! Run lifecycle facade
//!
//! The shell owns the outer mode machine; the engine owns exactly one thing,
//! the live run. `start` builds fresh state, `step` advances it one tick and
//! hands back the frame's events, and the run is torn down the moment the
//! terminal collision fires, so nothing downstream can mutate a dead run.

use crate::sim::{FxConfig, GameEvent, Intent, RunState, tick};
use crate::theme::Theme;

#[derive(Debug, Default)]
pub struct Engine {
    run: Option<RunState>,
    theme: Option<Theme>,
    fx: FxConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visual-feedback tuning applied to subsequent runs
    pub fn set_fx(&mut self, fx: FxConfig) {
        self.fx = fx;
    }

    /// Begin a fresh run over the given theme.
    ///
    /// The theme must already have passed validation; the simulation indexes
    /// its archetype lists without further checks.
    pub fn start(&mut self, theme: Theme, seed: u64) {
        log::info!(
            "run started: world={:?} seed={}",
            theme.world_name,
            seed
        );
        let mut run = RunState::new(seed);
        run.fx = self.fx.clone();
        self.run = Some(run);
        self.theme = Some(theme);
    }

    /// Halt the loop without a game-over event
    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            log::info!("run stopped externally");
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Keyboard intent; ignored unless a run is live
    pub fn apply_intent(&mut self, intent: Intent) {
        if let Some(run) = &mut self.run {
            run.apply_intent(intent);
        }
    }

    /// Advance one tick and drain this frame's events.
    ///
    /// If the tick ended the run, the run state is dropped here and the
    /// returned events carry the final `GameOver`.
    pub fn step(&mut self) -> Vec<GameEvent> {
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let Some(theme) = self.theme.as_ref() else {
            return Vec::new();
        };
        tick(run, theme);
        let events = run.drain_events();
        let (over, score, coins) = (run.over, run.score, run.coins);
        if over {
            log::info!("game over: score={score} coins={coins}");
            self.run = None;
        }
        events
    }

    /// Live run state for the renderer; `None` between runs
    pub fn state(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }
}
