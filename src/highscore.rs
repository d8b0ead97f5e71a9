//! High score persistence
//!
//! Exactly one durable scalar: the best score across runs. Read once at
//! startup, written whenever a run ends with a new maximum.

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "world_runner_highscore";

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Fold a finished run into the record.
    ///
    /// The stored value is the running maximum; returns true when the run
    /// set a new best (which also persists it).
    pub fn record(&mut self, run_score: u64) -> bool {
        if run_score > self.best {
            self.best = run_score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.parse::<u64>() {
                    log::info!("Loaded high score: {best}");
                    return Self { best };
                }
                log::warn!("Stored high score {raw:?} is not a number, resetting");
            }
        }

        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved: {}", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // No-op for native
    }
}
