//! Game state value.
//!
//! ## GameState
//!
//! Complete, self-contained snapshot of one game:
//! - Roster (fixed length once the game starts)
//! - Whose turn it is
//! - Result (`game_finished`, `winner`)
//! - Mode parameters (starting score, starting lives, finish rule)
//! - The active High-Low challenge, if any
//!
//! Uses `im` persistent vectors so every transition can return a fresh value
//! while sharing untouched players and history with the previous one.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::FinishRule;
use super::player::{Player, PlayerId};

/// Game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Count down from a starting score to exactly zero.
    Countdown,
    /// Beat the challenge or lose a life.
    HighLow,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Countdown => f.write_str("countdown"),
            GameMode::HighLow => f.write_str("high-low"),
        }
    }
}

/// Which side of the target a High-Low throw must land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeDirection {
    Higher,
    Lower,
}

impl ChallengeDirection {
    /// Whether `thrown` beats `target`. Equality never does.
    #[must_use]
    pub fn is_beaten_by(self, target: i64, thrown: i64) -> bool {
        match self {
            ChallengeDirection::Higher => thrown > target,
            ChallengeDirection::Lower => thrown < target,
        }
    }
}

impl std::fmt::Display for ChallengeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeDirection::Higher => f.write_str("higher"),
            ChallengeDirection::Lower => f.write_str("lower"),
        }
    }
}

/// A pending High-Low challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighLowChallenge {
    /// The player who must beat it.
    pub player_id: PlayerId,

    pub direction: ChallengeDirection,

    pub target_score: i64,

    /// The player who set it, when known.
    pub challenger_id: Option<PlayerId>,
}

impl HighLowChallenge {
    /// Whether `thrown` beats this challenge.
    #[must_use]
    pub fn is_beaten_by(&self, thrown: i64) -> bool {
        self.direction.is_beaten_by(self.target_score, thrown)
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Ordered roster. Length is fixed for the life of the game.
    pub players: Vector<Player>,

    pub current_player_index: usize,

    pub game_finished: bool,

    /// Winning player. Absent while playing, and when a High-Low game ends
    /// with no survivors.
    pub winner: Option<PlayerId>,

    /// Set by a busting Countdown throw, cleared by the next throw or advance.
    pub last_throw_was_bust: bool,

    pub game_mode: GameMode,

    /// Countdown starting score.
    pub starting_score: i64,

    /// High-Low starting lives.
    pub starting_lives: u32,

    /// Countdown checkout rule.
    pub finish_rule: FinishRule,

    pub high_low_challenge: Option<HighLowChallenge>,

    /// Player entitled to set the next High-Low challenge.
    pub pending_challenge_setter: Option<PlayerId>,
}

impl GameState {
    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Roster position of a player.
    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// The winning player, resolved against the roster.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref().and_then(|id| self.player(id))
    }

    /// Players who can still take turns.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Number of players who can still take turns.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    /// Validate the structural invariants of a state.
    ///
    /// Transitions preserve these; the check exists for states that arrive
    /// from outside the engine (persistence, hand-built fixtures).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.players.len() < 2 {
            return Err(InvariantViolation::TooFewPlayers(self.players.len()));
        }
        if self.current_player_index >= self.players.len() {
            return Err(InvariantViolation::IndexOutOfRange {
                index: self.current_player_index,
                players: self.players.len(),
            });
        }

        for player in &self.players {
            if player.score < 0 {
                return Err(InvariantViolation::NegativeScore(player.id.clone()));
            }
            let ordered = player
                .score_history
                .iter()
                .enumerate()
                .all(|(i, entry)| entry.turn_number as usize == i + 1);
            if !ordered {
                return Err(InvariantViolation::HistoryOutOfOrder(player.id.clone()));
            }
        }

        if self.game_mode == GameMode::HighLow
            && !self.game_finished
            && !self.players[self.current_player_index].is_alive()
        {
            return Err(InvariantViolation::CurrentPlayerEliminated);
        }

        if let Some(id) = &self.winner {
            match self.player(id) {
                Some(p) if p.is_winner && self.game_finished => {}
                _ => return Err(InvariantViolation::WinnerMismatch),
            }
        } else if self.game_finished && self.game_mode == GameMode::Countdown {
            return Err(InvariantViolation::WinnerMismatch);
        }

        if let Some(challenge) = &self.high_low_challenge {
            if self.player(&challenge.player_id).is_none() {
                return Err(InvariantViolation::UnknownChallengeTarget(challenge.player_id.clone()));
            }
        }

        Ok(())
    }
}

/// A broken structural invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("game needs at least 2 players, has {0}")]
    TooFewPlayers(usize),

    #[error("current player index {index} out of range for {players} players")]
    IndexOutOfRange { index: usize, players: usize },

    #[error("player {0} has a negative score")]
    NegativeScore(PlayerId),

    #[error("player {0} has out-of-order history")]
    HistoryOutOfOrder(PlayerId),

    #[error("current player is eliminated in an unfinished high-low game")]
    CurrentPlayerEliminated,

    #[error("winner and finished flags disagree")]
    WinnerMismatch,

    #[error("challenge targets unknown player {0}")]
    UnknownChallengeTarget(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, lives: Option<u32>) -> Player {
        Player {
            id: PlayerId::new(id),
            name: id.to_uppercase(),
            score: 40,
            lives,
            is_winner: false,
            turn_start_score: 40,
            score_history: Vector::new(),
        }
    }

    fn high_low_state() -> GameState {
        GameState {
            players: Vector::from(vec![
                player("a", Some(5)),
                player("b", Some(5)),
                player("c", Some(5)),
            ]),
            current_player_index: 0,
            game_finished: false,
            winner: None,
            last_throw_was_bust: false,
            game_mode: GameMode::HighLow,
            starting_score: 501,
            starting_lives: 5,
            finish_rule: FinishRule::Straight,
            high_low_challenge: None,
            pending_challenge_setter: None,
        }
    }

    #[test]
    fn test_direction_equality_never_beats() {
        assert!(ChallengeDirection::Higher.is_beaten_by(40, 41));
        assert!(!ChallengeDirection::Higher.is_beaten_by(40, 40));
        assert!(!ChallengeDirection::Higher.is_beaten_by(40, 39));

        assert!(ChallengeDirection::Lower.is_beaten_by(40, 39));
        assert!(!ChallengeDirection::Lower.is_beaten_by(40, 40));
        assert!(!ChallengeDirection::Lower.is_beaten_by(40, 41));
    }

    #[test]
    fn test_lookups() {
        let state = high_low_state();
        let b = PlayerId::new("b");

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.player_index(&b), Some(1));
        assert_eq!(state.player(&b).map(|p| p.name.as_str()), Some("B"));
        assert_eq!(state.current_player().map(|p| p.id.as_str()), Some("a"));
        assert!(state.player(&PlayerId::new("zz")).is_none());
        assert!(state.winner().is_none());
    }

    #[test]
    fn test_alive_count() {
        let mut state = high_low_state();
        assert_eq!(state.alive_count(), 3);

        state.players[1].lives = Some(0);
        assert_eq!(state.alive_count(), 2);
    }

    #[test]
    fn test_invariants_hold_for_fresh_state() {
        assert_eq!(high_low_state().check_invariants(), Ok(()));
    }

    #[test]
    fn test_invariant_eliminated_current_player() {
        let mut state = high_low_state();
        state.players[0].lives = Some(0);
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::CurrentPlayerEliminated)
        );
    }

    #[test]
    fn test_invariant_winner_mismatch() {
        let mut state = high_low_state();
        state.game_finished = true;
        state.winner = Some(PlayerId::new("a"));
        assert_eq!(state.check_invariants(), Err(InvariantViolation::WinnerMismatch));

        state.players[0].is_winner = true;
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn test_invariant_index_range() {
        let mut state = high_low_state();
        state.current_player_index = 3;
        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::IndexOutOfRange { index: 3, players: 3 })
        ));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&GameMode::HighLow).unwrap(), "\"high-low\"");
        assert_eq!(serde_json::to_string(&ChallengeDirection::Lower).unwrap(), "\"lower\"");
    }
}
