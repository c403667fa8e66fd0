//! Restarting a game with the same roster.

use tracing::{debug, instrument};

use crate::core::{EngineResult, GameConfig, GameState};
use crate::factory::restore_player;

use super::engine::TurnEngine;

impl TurnEngine {
    /// Return every player to the mode baseline and clear all progress.
    ///
    /// Overrides replace the game's stored `starting_lives` and
    /// `starting_score`. Mode, ids, names and finish rule are kept. Applying
    /// a reset twice gives the same state as applying it once.
    ///
    /// # Errors
    ///
    /// Overrides are checked like a new game's `GameConfig`: a negative
    /// score fails with `InvalidStartingScore`, zero High-Low lives with
    /// `InvalidStartingLives`.
    #[instrument(skip(self, state))]
    pub fn reset_game(
        &self,
        state: &GameState,
        starting_lives: Option<u32>,
        starting_score: Option<i64>,
    ) -> EngineResult<GameState> {
        let lives = starting_lives.unwrap_or(state.starting_lives);
        let score = starting_score.unwrap_or(state.starting_score);
        GameConfig {
            mode: state.game_mode,
            starting_score: score,
            starting_lives: lives,
            finish_rule: state.finish_rule,
        }
        .validate()?;

        let players = state
            .players
            .iter()
            .map(|p| restore_player(p, state.game_mode, score, lives))
            .collect();

        debug!(players = state.player_count(), "game reset");

        Ok(GameState {
            players,
            current_player_index: 0,
            game_finished: false,
            winner: None,
            last_throw_was_bust: false,
            game_mode: state.game_mode,
            starting_score: score,
            starting_lives: lives,
            finish_rule: state.finish_rule,
            high_low_challenge: None,
            pending_challenge_setter: None,
        })
    }
}
