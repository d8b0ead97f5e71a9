//! Score ladder shown on the result screen

/// Title earned by a run's final score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Novice,
    Racer,
    Elite,
    Master,
    Legendary,
}

impl Rank {
    /// Ladder thresholds, exclusive lower bounds
    pub fn for_score(score: u64) -> Self {
        if score > 5000 {
            Rank::Legendary
        } else if score > 2000 {
            Rank::Master
        } else if score > 1000 {
            Rank::Elite
        } else if score > 300 {
            Rank::Racer
        } else {
            Rank::Novice
        }
    }

    /// Score needed for the next rung; the top rung reports its own floor
    pub fn next_threshold(score: u64) -> u64 {
        if score <= 300 {
            300
        } else if score <= 1000 {
            1000
        } else if score <= 2000 {
            2000
        } else {
            5000
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Novice => "NOVICE",
            Rank::Racer => "RACER",
            Rank::Elite => "ELITE",
            Rank::Master => "MASTER",
            Rank::Legendary => "LEGENDARY",
        }
    }

    /// Percent progress toward the next rung, clamped to 100
    pub fn progress_percent(score: u64) -> u32 {
        let threshold = Self::next_threshold(score).max(1);
        (score * 100 / threshold).min(100) as u32
    }
}
