//! High-Low challenges.
//!
//! A challenge names the player who must beat it, a direction and a target.
//! Resolving it either keeps the player's lives (and records the throw as
//! their score) or costs one life. When one player or fewer still has lives
//! the game is over. Resolution always passes the turn on.
//!
//! A player who beats a challenge and the game goes on becomes the game's
//! `pending_challenge_setter`: the one expected to set the next challenge.
//! A failed challenge leaves nobody pending. Setting a challenge consumes
//! that entitlement.

use tracing::{debug, info, instrument};

use crate::core::{
    ChallengeDirection, EngineError, EngineResult, GameMode, GameState, HighLowChallenge,
    InvariantViolation, PlayerId, ScoreHistoryEntry,
};

use super::engine::{require_mode, require_unfinished, validate_score, TurnEngine};

impl TurnEngine {
    /// Set a challenge for the current player.
    ///
    /// The challenger defaults to the game's `pending_challenge_setter`.
    ///
    /// # Errors
    ///
    /// - `WrongMode` outside High-Low
    /// - `GameFinished` once the game has a result
    /// - `InvalidScore` unless `0 <= target_score <= 180`
    /// - `Inconsistent` when `current_player_index` is out of range
    pub fn set_challenge(
        &self,
        state: &GameState,
        direction: ChallengeDirection,
        target_score: i64,
        challenger: Option<&PlayerId>,
    ) -> EngineResult<GameState> {
        require_mode(state, GameMode::HighLow)?;
        let target = state.current_player().map(|p| p.id.clone()).ok_or(
            InvariantViolation::IndexOutOfRange {
                index: state.current_player_index,
                players: state.player_count(),
            },
        )?;
        self.set_challenge_for(state, &target, direction, target_score, challenger)
    }

    /// Set a challenge that `player_id` must beat.
    ///
    /// Replaces any active challenge. Fails with `PlayerEliminated` when
    /// `player_id` has no lives left.
    #[instrument(skip(self, state, player_id, challenger), fields(player = %player_id))]
    pub fn set_challenge_for(
        &self,
        state: &GameState,
        player_id: &PlayerId,
        direction: ChallengeDirection,
        target_score: i64,
        challenger: Option<&PlayerId>,
    ) -> EngineResult<GameState> {
        require_mode(state, GameMode::HighLow)?;
        require_unfinished(state)?;
        validate_score(target_score)?;
        match state.player(player_id) {
            None => return Err(EngineError::PlayerNotFound(player_id.clone())),
            Some(p) if !p.is_alive() => {
                return Err(EngineError::PlayerEliminated(player_id.clone()))
            }
            Some(_) => {}
        }
        if let Some(challenger) = challenger {
            if state.player(challenger).is_none() {
                return Err(EngineError::PlayerNotFound(challenger.clone()));
            }
        }

        if state.high_low_challenge.is_some() {
            debug!("replacing active challenge");
        }

        let mut next = state.clone();
        let challenger_id = challenger
            .cloned()
            .or_else(|| state.pending_challenge_setter.clone());
        next.high_low_challenge = Some(HighLowChallenge {
            player_id: player_id.clone(),
            direction,
            target_score,
            challenger_id,
        });
        next.pending_challenge_setter = None;

        debug!(%direction, target_score, "challenge set");
        Ok(next)
    }

    /// Resolve the active challenge with `player_id`'s throw, then advance
    /// the turn.
    ///
    /// # Errors
    ///
    /// - `WrongMode` outside High-Low
    /// - `GameFinished` once the game has a result
    /// - `NoActiveChallenge` when no challenge is set
    /// - `WrongPlayer` when `player_id` is not the challenge's target
    /// - `InvalidScore` unless `0 <= thrown <= 180`
    #[instrument(skip(self, state, player_id), fields(player = %player_id))]
    pub fn resolve_challenge(
        &self,
        state: &GameState,
        player_id: &PlayerId,
        thrown: i64,
    ) -> EngineResult<GameState> {
        require_mode(state, GameMode::HighLow)?;
        require_unfinished(state)?;
        let challenge = state
            .high_low_challenge
            .as_ref()
            .ok_or(EngineError::NoActiveChallenge)?;
        if &challenge.player_id != player_id {
            return Err(EngineError::WrongPlayer {
                expected: challenge.player_id.clone(),
                actual: player_id.clone(),
            });
        }
        validate_score(thrown)?;
        let index = state
            .player_index(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))?;

        let mut next = state.clone();
        next.high_low_challenge = None;
        let timestamp = self.clock.now();

        let player = &mut next.players[index];
        let passed = challenge.is_beaten_by(thrown);
        let lives_before = player.lives.unwrap_or(0);
        let lives_after = if passed {
            lives_before
        } else {
            lives_before.saturating_sub(1)
        };

        let entry = ScoreHistoryEntry::throw(thrown, player.score, timestamp, player.next_turn_number())
            .in_turn_from(player.turn_start_score)
            .with_challenge(
                challenge.direction,
                challenge.target_score,
                challenge.challenger_id.clone(),
                passed,
                lives_before,
                lives_after,
            );
        if passed {
            player.score = thrown;
        }
        player.lives = Some(lives_after);
        player.record(entry);

        debug!(thrown, passed, lives_before, lives_after, "challenge resolved");

        if !passed && next.alive_count() <= 1 {
            finish_high_low(&mut next);
        } else if passed {
            next.pending_challenge_setter = Some(player_id.clone());
        } else {
            next.pending_challenge_setter = None;
        }

        Ok(self.advance_turn(&next))
    }
}

/// End the game, crowning the sole survivor if there is one.
fn finish_high_low(state: &mut GameState) {
    let survivor = state.players.iter().position(|p| p.is_alive());

    state.game_finished = true;
    state.pending_challenge_setter = None;
    state.winner = match survivor {
        Some(index) => {
            let winner = &mut state.players[index];
            winner.is_winner = true;
            Some(winner.id.clone())
        }
        None => None,
    };

    match &state.winner {
        Some(winner) => info!(%winner, "game finished"),
        None => info!("game finished with no survivors"),
    }
}
