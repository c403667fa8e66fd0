//! Core engine types: players, state, actions, configuration, errors.
//!
//! Everything here is plain data. The transitions that move a `GameState`
//! forward live in `rules`; the values that start a game come from `factory`.

pub mod player;
pub mod rng;
pub mod clock;
pub mod config;
pub mod action;
pub mod state;
pub mod stats;
pub mod error;

pub use player::{Player, PlayerId, ScoreHistoryEntry};
pub use rng::{IdRng, IdRngState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    FinishRule, GameConfig, DEFAULT_STARTING_LIVES, DEFAULT_STARTING_SCORE,
    HIGH_LOW_BASELINE_SCORE, MAX_THROW,
};
pub use action::Action;
pub use state::{ChallengeDirection, GameMode, GameState, HighLowChallenge, InvariantViolation};
pub use stats::PlayerStats;
pub use error::{EngineError, EngineResult};
