//! Engine error taxonomy.
//!
//! Every transition either returns a complete new state or fails with one of
//! these conditions. A failed call never changes the caller's state, so the
//! previous value stays usable and the caller can retry with corrected input.

use thiserror::Error;

use super::player::PlayerId;
use super::state::{GameMode, InvariantViolation};

/// Result alias for engine transitions.
pub type EngineResult<T> = Result<T, EngineError>;

/// Local, synchronous failures raised by the factory and the turn engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Thrown value (or challenge target) outside `0..=180`.
    #[error("invalid score {value}: must be between 0 and {max}")]
    InvalidScore { value: i64, max: i64 },

    /// No player with this id in the roster.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// A mode-specific operation was invoked against the other mode.
    #[error("operation requires {expected} mode, game is {actual}")]
    WrongMode { expected: GameMode, actual: GameMode },

    /// Challenge resolution attempted with no challenge set.
    #[error("no active high-low challenge")]
    NoActiveChallenge,

    /// Challenge resolution attempted by or for someone other than its target.
    #[error("challenge belongs to {expected}, not {actual}")]
    WrongPlayer { expected: PlayerId, actual: PlayerId },

    /// Fewer than two players supplied to the factory.
    #[error("at least 2 players are required, got {0}")]
    NotEnoughPlayers(usize),

    /// Scoring or challenge transition on a game that already has a result.
    #[error("game is already finished")]
    GameFinished,

    /// High-Low player with no lives left named as a challenge target.
    #[error("player {0} is eliminated")]
    PlayerEliminated(PlayerId),

    /// Countdown starting score below zero.
    #[error("invalid starting score {0}: must not be negative")]
    InvalidStartingScore(i64),

    /// High-Low game configured with no lives.
    #[error("high-low needs at least 1 starting life")]
    InvalidStartingLives,

    /// The state handed to the engine is structurally broken.
    #[error("inconsistent game state: {0}")]
    Inconsistent(#[from] InvariantViolation),
}
