//! Players and their append-only score history.
//!
//! ## PlayerId
//!
//! Opaque string identifier, unique within a game. Generated by the
//! `StateFactory`; never reinterpreted by the engine.
//!
//! ## Player
//!
//! Score, optional lives (High-Low only), the turn-start snapshot used as the
//! bust-revert target, and the ordered `score_history`. History is an
//! `im::Vector` so cloning a player for the next state shares the log.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::ChallengeDirection;

/// Unique player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One recorded throw.
///
/// Entries are immutable once appended. `turn_number` is the count of prior
/// entries plus one, so it is strictly increasing per player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    /// Points thrown.
    pub score: i64,

    /// Player score before this throw was applied.
    pub previous_score: i64,

    /// Player's turn-start score when the throw was made. A bust reverts to
    /// this value, undoing every throw of the turn.
    pub turn_start_score: i64,

    pub timestamp: DateTime<Utc>,

    /// 1-based position in the player's history.
    pub turn_number: u32,

    /// Countdown throw that busted and was reverted.
    pub bust: bool,

    // === High-Low outcome ===
    pub challenge_direction: Option<ChallengeDirection>,
    pub challenge_target: Option<i64>,
    pub challenger_id: Option<PlayerId>,
    pub passed_challenge: Option<bool>,
    pub lives_before: Option<u32>,
    pub lives_after: Option<u32>,
}

impl ScoreHistoryEntry {
    /// Create a plain throw record with no challenge outcome.
    ///
    /// The turn-start score defaults to `previous_score`, i.e. the first
    /// throw of a turn; see `in_turn_from`.
    #[must_use]
    pub fn throw(score: i64, previous_score: i64, timestamp: DateTime<Utc>, turn_number: u32) -> Self {
        Self {
            score,
            previous_score,
            turn_start_score: previous_score,
            timestamp,
            turn_number,
            bust: false,
            challenge_direction: None,
            challenge_target: None,
            challenger_id: None,
            passed_challenge: None,
            lives_before: None,
            lives_after: None,
        }
    }

    /// Set the turn-start score the throw was made against.
    #[must_use]
    pub fn in_turn_from(mut self, turn_start_score: i64) -> Self {
        self.turn_start_score = turn_start_score;
        self
    }

    /// Mark the throw as busted.
    #[must_use]
    pub fn busted(mut self) -> Self {
        self.bust = true;
        self
    }

    /// Attach the outcome of a resolved High-Low challenge.
    #[must_use]
    pub fn with_challenge(
        mut self,
        direction: ChallengeDirection,
        target: i64,
        challenger: Option<PlayerId>,
        passed: bool,
        lives_before: u32,
        lives_after: u32,
    ) -> Self {
        self.challenge_direction = Some(direction);
        self.challenge_target = Some(target);
        self.challenger_id = challenger;
        self.passed_challenge = Some(passed);
        self.lives_before = Some(lives_before);
        self.lives_after = Some(lives_after);
        self
    }
}

/// A player in a Countdown or High-Low game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name, trimmed by the factory.
    pub name: String,

    /// Remaining points (Countdown) or last thrown score (High-Low).
    /// Never negative at rest.
    pub score: i64,

    /// Remaining lives. `None` in Countdown.
    pub lives: Option<u32>,

    pub is_winner: bool,

    /// Score at the start of this player's current turn; bust-revert target.
    pub turn_start_score: i64,

    pub score_history: Vector<ScoreHistoryEntry>,
}

impl Player {
    /// Whether the player can still take turns.
    ///
    /// Countdown players (no lives) are always active.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.lives.map_or(true, |lives| lives > 0)
    }

    /// Turn number the next history entry will carry.
    #[must_use]
    pub fn next_turn_number(&self) -> u32 {
        self.score_history.len() as u32 + 1
    }

    /// Append a history entry.
    pub fn record(&mut self, entry: ScoreHistoryEntry) {
        self.score_history.push_back(entry);
    }

    /// The most recent history entry, if any.
    #[must_use]
    pub fn last_entry(&self) -> Option<&ScoreHistoryEntry> {
        self.score_history.last()
    }
}
