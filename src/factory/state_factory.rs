//! Initial player and game state construction.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{
    EngineError, EngineResult, GameConfig, GameMode, GameState, IdRng, IdRngState, Player, PlayerId,
    DEFAULT_STARTING_LIVES, HIGH_LOW_BASELINE_SCORE,
};

/// Builds players and games.
///
/// Owns the RNG used for player ids. A seeded factory produces the same ids
/// in the same order every time; ids are unique within one factory.
#[derive(Clone, Debug)]
pub struct StateFactory {
    rng: IdRng,
    issued: u32,
}

/// Where a factory is in its id sequence.
///
/// Saving this next to a game lets a later factory keep issuing ids that do
/// not collide with the ones already in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryCheckpoint {
    pub rng: IdRngState,
    pub issued: u32,
}

impl StateFactory {
    /// Create a factory with a deterministic id sequence.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: IdRng::new(seed),
            issued: 0,
        }
    }

    /// Create a factory with an unpredictable id sequence.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: IdRng::from_entropy(),
            issued: 0,
        }
    }

    /// Continue the id sequence of an earlier factory.
    #[must_use]
    pub fn resume(checkpoint: &FactoryCheckpoint) -> Self {
        Self {
            rng: IdRng::resume(&checkpoint.rng),
            issued: checkpoint.issued,
        }
    }

    #[must_use]
    pub fn checkpoint(&self) -> FactoryCheckpoint {
        FactoryCheckpoint {
            rng: self.rng.checkpoint(),
            issued: self.issued,
        }
    }

    fn next_id(&mut self) -> PlayerId {
        self.issued += 1;
        PlayerId::new(format!("p{}-{:012x}", self.issued, self.rng.next_salt()))
    }

    /// Create one player.
    ///
    /// High-Low ignores `starting_score` and starts everyone at the challenge
    /// baseline of 40, with `lives` (default 5). Countdown starts at
    /// `starting_score` and ignores `lives`.
    pub fn create_player(
        &mut self,
        name: &str,
        starting_score: i64,
        mode: GameMode,
        lives: Option<u32>,
    ) -> Player {
        let id = self.next_id();
        baseline_player(id, name.trim().to_string(), mode, starting_score, lives)
    }

    /// Create a game for the given roster.
    ///
    /// # Errors
    ///
    /// - `NotEnoughPlayers` for fewer than two names
    /// - `InvalidStartingScore` / `InvalidStartingLives` from
    ///   `GameConfig::validate`
    #[instrument(skip(self, names), fields(players = names.len(), mode = %config.mode))]
    pub fn create_game_state<S: AsRef<str>>(
        &mut self,
        names: &[S],
        config: &GameConfig,
    ) -> EngineResult<GameState> {
        if names.len() < 2 {
            return Err(EngineError::NotEnoughPlayers(names.len()));
        }
        config.validate()?;

        let players: Vector<Player> = names
            .iter()
            .map(|name| {
                self.create_player(
                    name.as_ref(),
                    config.starting_score,
                    config.mode,
                    Some(config.starting_lives),
                )
            })
            .collect();

        debug!("created game");

        Ok(GameState {
            players,
            current_player_index: 0,
            game_finished: false,
            winner: None,
            last_throw_was_bust: false,
            game_mode: config.mode,
            starting_score: config.starting_score,
            starting_lives: config.starting_lives,
            finish_rule: config.finish_rule,
            high_low_challenge: None,
            pending_challenge_setter: None,
        })
    }
}

/// A player at the mode's starting baseline with empty history.
pub(crate) fn baseline_player(
    id: PlayerId,
    name: String,
    mode: GameMode,
    starting_score: i64,
    lives: Option<u32>,
) -> Player {
    let (score, lives) = match mode {
        GameMode::HighLow => (
            HIGH_LOW_BASELINE_SCORE,
            Some(lives.unwrap_or(DEFAULT_STARTING_LIVES)),
        ),
        GameMode::Countdown => (starting_score, None),
    };

    Player {
        id,
        name,
        score,
        lives,
        is_winner: false,
        turn_start_score: score,
        score_history: Vector::new(),
    }
}

/// Return an existing player to the mode baseline, keeping id and name.
pub(crate) fn restore_player(
    player: &Player,
    mode: GameMode,
    starting_score: i64,
    lives: u32,
) -> Player {
    baseline_player(
        player.id.clone(),
        player.name.clone(),
        mode,
        starting_score,
        Some(lives),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FinishRule;

    #[test]
    fn test_create_countdown_player() {
        let mut factory = StateFactory::new(42);
        let player = factory.create_player("  Alice ", 501, GameMode::Countdown, Some(5));

        assert_eq!(player.name, "Alice");
        assert_eq!(player.score, 501);
        assert_eq!(player.turn_start_score, 501);
        assert_eq!(player.lives, None);
        assert!(!player.is_winner);
        assert!(player.score_history.is_empty());
    }

    #[test]
    fn test_create_high_low_player_forces_baseline() {
        let mut factory = StateFactory::new(42);
        let player = factory.create_player("Bob", 501, GameMode::HighLow, Some(3));

        assert_eq!(player.score, 40);
        assert_eq!(player.turn_start_score, 40);
        assert_eq!(player.lives, Some(3));

        let player = factory.create_player("Cat", 301, GameMode::HighLow, None);
        assert_eq!(player.lives, Some(5));
    }

    #[test]
    fn test_ids_unique_and_deterministic() {
        let mut f1 = StateFactory::new(7);
        let mut f2 = StateFactory::new(7);

        let ids1: Vec<_> = (0..10)
            .map(|_| f1.create_player("x", 501, GameMode::Countdown, None).id)
            .collect();
        let ids2: Vec<_> = (0..10)
            .map(|_| f2.create_player("x", 501, GameMode::Countdown, None).id)
            .collect();

        assert_eq!(ids1, ids2);
        let mut deduped = ids1.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids1.len());
    }

    #[test]
    fn test_resume_keeps_ids_fresh() {
        let mut original = StateFactory::new(3);
        let first = original.create_player("A", 501, GameMode::Countdown, None).id;

        let checkpoint = original.checkpoint();
        assert_eq!(checkpoint.issued, 1);
        let next = original.create_player("B", 501, GameMode::Countdown, None).id;

        let mut resumed = StateFactory::resume(&checkpoint);
        let replayed = resumed.create_player("B", 501, GameMode::Countdown, None).id;
        assert_eq!(replayed, next);
        assert_ne!(replayed, first);
        assert!(replayed.as_str().starts_with("p2-"));
    }

    #[test]
    fn test_create_game_state() {
        let mut factory = StateFactory::new(42);
        let config = GameConfig::countdown(301).double_out();
        let state = factory.create_game_state(&["A", "B", "C"], &config).unwrap();

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current_player_index, 0);
        assert!(!state.game_finished);
        assert!(state.winner.is_none());
        assert!(state.high_low_challenge.is_none());
        assert_eq!(state.finish_rule, FinishRule::Double);
        assert!(state.players.iter().all(|p| p.score == 301));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn test_create_game_state_needs_two_players() {
        let mut factory = StateFactory::new(42);
        let config = GameConfig::default();

        assert_eq!(
            factory.create_game_state(&["Solo"], &config),
            Err(EngineError::NotEnoughPlayers(1))
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            factory.create_game_state(&empty, &config),
            Err(EngineError::NotEnoughPlayers(0))
        );
    }

    #[test]
    fn test_create_game_state_rejects_bad_config() {
        let mut factory = StateFactory::new(42);

        assert_eq!(
            factory.create_game_state(&["A", "B"], &GameConfig::countdown(-10)),
            Err(EngineError::InvalidStartingScore(-10))
        );
        assert_eq!(
            factory.create_game_state(&["A", "B"], &GameConfig::high_low(0)),
            Err(EngineError::InvalidStartingLives)
        );
    }

    #[test]
    fn test_many_players() {
        let mut factory = StateFactory::new(42);
        let names: Vec<String> = (0..20).map(|i| format!("Player {}", i)).collect();
        let state = factory
            .create_game_state(&names, &GameConfig::high_low(2))
            .unwrap();

        assert_eq!(state.player_count(), 20);
        assert!(state.players.iter().all(|p| p.lives == Some(2) && p.score == 40));
    }

    #[test]
    fn test_restore_player() {
        let mut factory = StateFactory::new(1);
        let mut player = factory.create_player("Dee", 501, GameMode::HighLow, Some(5));
        player.lives = Some(1);
        player.score = 99;
        player.is_winner = true;

        let restored = restore_player(&player, GameMode::HighLow, 501, 4);
        assert_eq!(restored.id, player.id);
        assert_eq!(restored.name, "Dee");
        assert_eq!(restored.score, 40);
        assert_eq!(restored.lives, Some(4));
        assert!(!restored.is_winner);
    }
}
