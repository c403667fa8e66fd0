//! Per-player statistics derived from score history.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Summary of one player's history. Derived, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Recorded throws of any kind.
    pub throws: u32,

    /// Countdown throws that busted.
    pub busts: u32,

    /// Points that stayed off the score. A bust undoes its whole turn, so
    /// the turn's earlier throws do not count either.
    pub points_scored: i64,

    /// Points scored per Countdown turn, busts counting as zero.
    pub three_dart_average: f64,

    /// Highest single throw, bust or not.
    pub best_throw: Option<i64>,

    pub challenges_passed: u32,
    pub challenges_failed: u32,
}

impl PlayerStats {
    /// Summarise a player's history.
    #[must_use]
    pub fn from_player(player: &Player) -> Self {
        let mut stats = Self::default();
        let mut countdown_throws = 0u32;
        // (turn-start score, points thrown so far in that turn)
        let mut open_turn: Option<(i64, i64)> = None;

        for entry in &player.score_history {
            stats.throws += 1;
            stats.best_throw = Some(stats.best_throw.map_or(entry.score, |b| b.max(entry.score)));

            match entry.passed_challenge {
                Some(true) => stats.challenges_passed += 1,
                Some(false) => stats.challenges_failed += 1,
                None => {
                    countdown_throws += 1;
                    // Turns that start from the same score can only be
                    // separated by zero-point throws, so merging them is exact.
                    if entry.bust {
                        stats.busts += 1;
                        if let Some((start, points)) = open_turn.take() {
                            if start != entry.turn_start_score {
                                stats.points_scored += points;
                            }
                        }
                        continue;
                    }
                    match open_turn.as_mut() {
                        Some((start, points)) if *start == entry.turn_start_score => {
                            *points += entry.score;
                        }
                        _ => {
                            let turn = (entry.turn_start_score, entry.score);
                            if let Some((_, points)) = open_turn.replace(turn) {
                                stats.points_scored += points;
                            }
                        }
                    }
                }
            }
        }

        if let Some((_, points)) = open_turn {
            stats.points_scored += points;
        }

        if countdown_throws > 0 {
            stats.three_dart_average = stats.points_scored as f64 / f64::from(countdown_throws);
        }

        stats
    }
}
