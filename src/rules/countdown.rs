//! Countdown scoring.
//!
//! A throw is subtracted from the player's score. If the policy says the
//! result busts, the score reverts to the turn-start snapshot (not the score
//! before this throw) and the attempt is still logged. Reaching exactly zero
//! wins and finishes the game.

use tracing::{debug, info, instrument};

use crate::core::{EngineError, EngineResult, GameMode, GameState, PlayerId, ScoreHistoryEntry};

use super::engine::{require_mode, require_unfinished, validate_score, TurnEngine};
use super::finish::FinishPolicy;

impl TurnEngine {
    /// Apply a Countdown throw using the engine's finish policy, or the
    /// game's own `finish_rule` when the engine has none.
    ///
    /// Does not advance the turn; a turn may span several recorded throws.
    ///
    /// # Errors
    ///
    /// - `WrongMode` outside Countdown
    /// - `GameFinished` after a win
    /// - `InvalidScore` unless `0 <= thrown <= 180`
    /// - `PlayerNotFound` for an unknown id
    pub fn apply_countdown_score(
        &self,
        state: &GameState,
        player_id: &PlayerId,
        thrown: i64,
    ) -> EngineResult<GameState> {
        match &self.finish_policy {
            Some(policy) => self.apply_countdown_score_with(state, player_id, thrown, policy.as_ref()),
            None => self.apply_countdown_score_with(state, player_id, thrown, &state.finish_rule),
        }
    }

    /// Apply a Countdown throw under an explicit finish policy.
    #[instrument(skip(self, state, player_id, policy), fields(player = %player_id))]
    pub fn apply_countdown_score_with(
        &self,
        state: &GameState,
        player_id: &PlayerId,
        thrown: i64,
        policy: &dyn FinishPolicy,
    ) -> EngineResult<GameState> {
        require_mode(state, GameMode::Countdown)?;
        require_unfinished(state)?;
        validate_score(thrown)?;
        let index = state
            .player_index(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))?;

        let mut next = state.clone();
        let timestamp = self.clock.now();

        let player = &mut next.players[index];
        let previous = player.score;
        let remaining = previous - thrown;
        let entry = ScoreHistoryEntry::throw(thrown, previous, timestamp, player.next_turn_number())
            .in_turn_from(player.turn_start_score);

        if policy.is_bust(remaining, thrown) {
            player.score = player.turn_start_score;
            player.record(entry.busted());
            debug!(thrown, remaining, reverted_to = player.score, "bust");
            next.last_throw_was_bust = true;
            return Ok(next);
        }

        player.score = remaining;
        player.is_winner = remaining == 0;
        player.record(entry);
        let won = player.is_winner;

        next.last_throw_was_bust = false;
        if won {
            next.game_finished = true;
            next.winner = Some(player_id.clone());
            info!(winner = %player_id, "game finished");
        } else {
            debug!(thrown, remaining, "scored");
        }

        Ok(next)
    }
}
