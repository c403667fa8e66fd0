//! Player actions.
//!
//! Every way a caller can move a game forward, as one value. The
//! `TurnEngine::apply` entry point dispatches these to the individual
//! transitions, so a UI layer or replay log only deals in `Action`s.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::ChallengeDirection;

/// A complete caller action.
///
/// ## Example
///
/// ```
/// use rust_darts::core::{Action, ChallengeDirection, PlayerId};
///
/// let throw = Action::submit(PlayerId::new("p1"), 60);
/// let challenge = Action::challenge(ChallengeDirection::Higher, 40);
/// assert!(throw.is_scoring());
/// assert!(!challenge.is_scoring());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A thrown score. Countdown subtracts it; High-Low resolves the active
    /// challenge with it.
    SubmitScore { player: PlayerId, thrown: i64 },

    /// Set a High-Low challenge for `player` (the current player if absent).
    SetChallenge {
        player: Option<PlayerId>,
        direction: ChallengeDirection,
        target_score: i64,
        challenger: Option<PlayerId>,
    },

    /// Pass the turn to the next eligible player.
    AdvanceTurn,

    /// Restart with the same roster.
    Reset {
        starting_lives: Option<u32>,
        starting_score: Option<i64>,
    },
}

impl Action {
    /// Score submission.
    #[must_use]
    pub fn submit(player: PlayerId, thrown: i64) -> Self {
        Action::SubmitScore { player, thrown }
    }

    /// Challenge for the current player, challenger taken from the game.
    #[must_use]
    pub fn challenge(direction: ChallengeDirection, target_score: i64) -> Self {
        Action::SetChallenge {
            player: None,
            direction,
            target_score,
            challenger: None,
        }
    }

    /// Reset keeping the game's starting parameters.
    #[must_use]
    pub fn reset() -> Self {
        Action::Reset {
            starting_lives: None,
            starting_score: None,
        }
    }

    /// Whether this action records a throw.
    #[must_use]
    pub fn is_scoring(&self) -> bool {
        matches!(self, Action::SubmitScore { .. })
    }
}
