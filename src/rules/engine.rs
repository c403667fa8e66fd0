//! The turn engine.
//!
//! `TurnEngine` owns the non-state inputs of a transition (the clock that
//! stamps history entries and an optional finish-policy override) and exposes
//! every transition as a method taking `&GameState` and returning a new
//! `GameState`. The transitions themselves live in sibling modules:
//! - `countdown`: score submission and busts
//! - `high_low`: challenge setting and resolution
//! - `turn`: rotation
//! - `reset`: restart with the same roster

use tracing::instrument;

use crate::core::{
    Action, Clock, EngineError, EngineResult, GameMode, GameState, SystemClock, MAX_THROW,
};

use super::finish::FinishPolicy;

/// Computes game state transitions.
///
/// Holds no game state. One engine can drive any number of games.
pub struct TurnEngine {
    /// Timestamp source for history entries.
    pub(super) clock: Box<dyn Clock>,

    /// Replaces each game's own `finish_rule` when set.
    pub(super) finish_policy: Option<Box<dyn FinishPolicy>>,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("custom_finish_policy", &self.finish_policy.is_some())
            .finish()
    }
}

impl TurnEngine {
    /// Create an engine using wall-clock timestamps and each game's finish rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Box::new(SystemClock),
            finish_policy: None,
        }
    }

    /// Set a custom timestamp source.
    #[must_use]
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Override every game's finish rule with a custom policy.
    #[must_use]
    pub fn with_finish_policy<P: FinishPolicy + 'static>(mut self, policy: P) -> Self {
        self.finish_policy = Some(Box::new(policy));
        self
    }

    /// Apply any caller action.
    ///
    /// `SubmitScore` dispatches on the game mode: Countdown subtracts the
    /// throw, High-Low resolves the active challenge with it.
    #[instrument(skip(self, state))]
    pub fn apply(&self, state: &GameState, action: &Action) -> EngineResult<GameState> {
        match action {
            Action::SubmitScore { player, thrown } => match state.game_mode {
                GameMode::Countdown => self.apply_countdown_score(state, player, *thrown),
                GameMode::HighLow => self.resolve_challenge(state, player, *thrown),
            },
            Action::SetChallenge {
                player,
                direction,
                target_score,
                challenger,
            } => match player {
                Some(player) => self.set_challenge_for(
                    state,
                    player,
                    *direction,
                    *target_score,
                    challenger.as_ref(),
                ),
                None => self.set_challenge(state, *direction, *target_score, challenger.as_ref()),
            },
            Action::AdvanceTurn => Ok(self.advance_turn(state)),
            Action::Reset {
                starting_lives,
                starting_score,
            } => self.reset_game(state, *starting_lives, *starting_score),
        }
    }
}

// === Shared preconditions ===

/// Thrown values and challenge targets must be in `0..=MAX_THROW`.
pub(super) fn validate_score(value: i64) -> EngineResult<()> {
    if (0..=MAX_THROW).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidScore {
            value,
            max: MAX_THROW,
        })
    }
}

pub(super) fn require_mode(state: &GameState, expected: GameMode) -> EngineResult<()> {
    if state.game_mode == expected {
        Ok(())
    } else {
        Err(EngineError::WrongMode {
            expected,
            actual: state.game_mode,
        })
    }
}

pub(super) fn require_unfinished(state: &GameState) -> EngineResult<()> {
    if state.game_finished {
        Err(EngineError::GameFinished)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChallengeDirection, GameConfig, PlayerId};
    use crate::factory::StateFactory;

    fn countdown() -> GameState {
        StateFactory::new(3)
            .create_game_state(&["A", "B"], &GameConfig::countdown(301))
            .unwrap()
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(180).is_ok());
        assert_eq!(
            validate_score(-1),
            Err(EngineError::InvalidScore { value: -1, max: 180 })
        );
        assert!(validate_score(181).is_err());
    }

    #[test]
    fn test_apply_dispatches_countdown() {
        let engine = TurnEngine::new();
        let state = countdown();
        let a = state.players[0].id.clone();

        let next = engine.apply(&state, &Action::submit(a.clone(), 60)).unwrap();
        assert_eq!(next.player(&a).unwrap().score, 241);

        let next = engine.apply(&next, &Action::AdvanceTurn).unwrap();
        assert_eq!(next.current_player_index, 1);

        let next = engine.apply(&next, &Action::reset()).unwrap();
        assert_eq!(next.player(&a).unwrap().score, 301);
        assert_eq!(next.current_player_index, 0);
    }

    #[test]
    fn test_apply_dispatches_high_low() {
        let engine = TurnEngine::new();
        let state = StateFactory::new(3)
            .create_game_state(&["A", "B"], &GameConfig::high_low(5))
            .unwrap();
        let a = state.players[0].id.clone();

        let next = engine
            .apply(&state, &Action::challenge(ChallengeDirection::Higher, 40))
            .unwrap();
        let next = engine.apply(&next, &Action::submit(a.clone(), 30)).unwrap();

        assert_eq!(next.player(&a).unwrap().lives, Some(4));
        assert_eq!(next.current_player_index, 1);
    }

    #[test]
    fn test_apply_challenge_in_countdown_is_wrong_mode() {
        let engine = TurnEngine::new();
        let err = engine
            .apply(&countdown(), &Action::challenge(ChallengeDirection::Lower, 20))
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::WrongMode {
                expected: GameMode::HighLow,
                actual: GameMode::Countdown
            }
        );
    }

    #[test]
    fn test_apply_unknown_player() {
        let engine = TurnEngine::new();
        let ghost = PlayerId::new("ghost");
        let err = engine
            .apply(&countdown(), &Action::submit(ghost.clone(), 10))
            .unwrap_err();
        assert_eq!(err, EngineError::PlayerNotFound(ghost));
    }
}
