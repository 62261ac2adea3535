//! Configuration types for bracket simulation
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Rating bonus applied after every match
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Added to the winner's rating
    pub winner_bonus: f64,
    /// Added to the loser's rating
    pub loser_bonus: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            winner_bonus: 0.7,
            loser_bonus: 0.5,
        }
    }
}

impl MatchConfig {
    /// Total rating handed out by one match
    pub fn total_bonus(&self) -> f64 {
        self.winner_bonus + self.loser_bonus
    }
}

/// Tournament configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Rating bonuses per match
    pub match_config: MatchConfig,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl TournamentConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set custom rating bonuses
    pub fn with_match_config(mut self, match_config: MatchConfig) -> Self {
        self.match_config = match_config;
        self
    }
}
