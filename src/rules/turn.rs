//! Turn rotation.

use tracing::{debug, instrument};

use crate::core::{GameMode, GameState};

use super::engine::TurnEngine;

impl TurnEngine {
    /// Pass the turn to the next eligible player.
    ///
    /// - Finished games are returned unchanged.
    /// - Countdown moves to the next seat and snapshots that player's score
    ///   as their turn-start (bust-revert) score.
    /// - High-Low moves to the next seat whose player still has lives,
    ///   probing at most one full lap. With nobody eligible the index stays
    ///   put; callers should treat that game as over.
    ///
    /// `last_throw_was_bust` is cleared whenever the turn actually moves.
    #[instrument(skip(self, state), fields(from = state.current_player_index))]
    pub fn advance_turn(&self, state: &GameState) -> GameState {
        if state.game_finished || state.players.is_empty() {
            return state.clone();
        }

        let mut next = state.clone();
        match state.game_mode {
            GameMode::Countdown => {
                let index = (state.current_player_index + 1) % state.player_count();
                let player = &mut next.players[index];
                player.turn_start_score = player.score;
                next.current_player_index = index;
            }
            GameMode::HighLow => match next_alive_index(state) {
                Some(index) => next.current_player_index = index,
                None => {
                    debug!("no eligible player");
                    return next;
                }
            },
        }

        next.last_throw_was_bust = false;
        debug!(to = next.current_player_index, "turn advanced");
        next
    }
}

/// First seat after the current one whose player still has lives.
///
/// Wraps around, so the current player is found last.
fn next_alive_index(state: &GameState) -> Option<usize> {
    let count = state.player_count();
    (1..=count)
        .map(|step| (state.current_player_index + step) % count)
        .find(|&index| state.players[index].is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::factory::StateFactory;

    fn game(config: GameConfig, players: usize) -> GameState {
        let names: Vec<String> = (0..players).map(|i| format!("P{}", i)).collect();
        StateFactory::new(9).create_game_state(&names, &config).unwrap()
    }

    #[test]
    fn test_countdown_rotation_wraps() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::countdown(501), 3);

        for expected in [1, 2, 0, 1] {
            state = engine.advance_turn(&state);
            assert_eq!(state.current_player_index, expected);
        }
    }

    #[test]
    fn test_countdown_snapshots_turn_start() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::countdown(501), 2);
        state.players[1].score = 321;

        let next = engine.advance_turn(&state);
        assert_eq!(next.players[1].turn_start_score, 321);
        assert_eq!(next.players[0].turn_start_score, 501);
    }

    #[test]
    fn test_advance_clears_bust_flag() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::countdown(501), 2);
        state.last_throw_was_bust = true;

        assert!(!engine.advance_turn(&state).last_throw_was_bust);
    }

    #[test]
    fn test_finished_game_is_noop() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::countdown(501), 2);
        state.game_finished = true;
        state.last_throw_was_bust = true;

        assert_eq!(engine.advance_turn(&state), state);
    }

    #[test]
    fn test_high_low_skips_eliminated() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::high_low(3), 4);
        state.players[1].lives = Some(0);
        state.players[2].lives = Some(0);

        let next = engine.advance_turn(&state);
        assert_eq!(next.current_player_index, 3);

        let next = engine.advance_turn(&next);
        assert_eq!(next.current_player_index, 0);
    }

    #[test]
    fn test_high_low_all_eliminated_keeps_index() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::high_low(3), 3);
        state.current_player_index = 1;
        state.last_throw_was_bust = true;
        for player in state.players.iter_mut() {
            player.lives = Some(0);
        }

        let next = engine.advance_turn(&state);
        assert_eq!(next.current_player_index, 1);
        assert!(next.last_throw_was_bust);
    }

    #[test]
    fn test_high_low_sole_survivor_stays_current() {
        let engine = TurnEngine::new();
        let mut state = game(GameConfig::high_low(3), 3);
        state.players[1].lives = Some(0);
        state.players[2].lives = Some(0);

        assert_eq!(engine.advance_turn(&state).current_player_index, 0);
    }
}
