//! Game configuration types.
//!
//! A `GameConfig` value is passed explicitly to the `StateFactory`; nothing in
//! the engine reads process-wide settings.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::state::GameMode;

/// Highest score three darts can make.
pub const MAX_THROW: i64 = 180;

/// Score every High-Low player starts (and resets) at.
pub const HIGH_LOW_BASELINE_SCORE: i64 = 40;

/// Default Countdown starting score.
pub const DEFAULT_STARTING_SCORE: i64 = 501;

/// Default High-Low life count.
pub const DEFAULT_STARTING_LIVES: u32 = 5;

/// Countdown checkout house rule.
///
/// The bust logic for each variant lives in `rules::finish`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishRule {
    /// Any throw that reaches exactly zero wins.
    #[default]
    Straight,
    /// The game must be finished on a double.
    Double,
}

/// Parameters for a new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    /// Countdown starting score (ignored in High-Low).
    pub starting_score: i64,

    /// High-Low starting lives (ignored in Countdown).
    pub starting_lives: u32,

    pub finish_rule: FinishRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Countdown,
            starting_score: DEFAULT_STARTING_SCORE,
            starting_lives: DEFAULT_STARTING_LIVES,
            finish_rule: FinishRule::Straight,
        }
    }
}

impl GameConfig {
    /// Countdown from the given score.
    pub fn countdown(starting_score: i64) -> Self {
        Self {
            mode: GameMode::Countdown,
            starting_score,
            ..Self::default()
        }
    }

    /// High-Low with the given number of lives.
    pub fn high_low(starting_lives: u32) -> Self {
        Self {
            mode: GameMode::HighLow,
            starting_lives,
            ..Self::default()
        }
    }

    /// Set the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the Countdown starting score.
    #[must_use]
    pub fn with_starting_score(mut self, score: i64) -> Self {
        self.starting_score = score;
        self
    }

    /// Set the High-Low starting lives.
    #[must_use]
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Require a double to finish.
    #[must_use]
    pub fn double_out(mut self) -> Self {
        self.finish_rule = FinishRule::Double;
        self
    }

    /// Check the starting parameters before any player is built.
    ///
    /// The starting score may not be negative in either mode, since it is
    /// stored on the state and reused by a later reset. A High-Low game
    /// needs at least one life.
    pub fn validate(&self) -> EngineResult<()> {
        if self.starting_score < 0 {
            return Err(EngineError::InvalidStartingScore(self.starting_score));
        }
        if self.mode == GameMode::HighLow && self.starting_lives == 0 {
            return Err(EngineError::InvalidStartingLives);
        }
        Ok(())
    }
}
