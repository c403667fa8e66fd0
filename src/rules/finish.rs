//! Countdown bust policies.
//!
//! Checkout rules vary between house rules, so the bust decision is a trait.
//! `FinishRule` covers the two common variants; callers with other rules pass
//! their own `FinishPolicy` to `TurnEngine::with_finish_policy` or
//! `TurnEngine::apply_countdown_score_with`.

use crate::core::FinishRule;

/// Decides whether a Countdown throw busts.
pub trait FinishPolicy: Send + Sync {
    /// `remaining` is the score the throw would leave (may be negative).
    fn is_bust(&self, remaining: i64, thrown: i64) -> bool;
}

/// Three-dart totals that cannot end on a double.
const IMPOSSIBLE_CHECKOUTS: [i64; 7] = [159, 162, 163, 165, 166, 168, 169];

/// Highest three-dart double-out checkout (T20, T20, bull).
pub const MAX_CHECKOUT: i64 = 170;

/// Whether three darts totalling `thrown` can finish on a double.
#[must_use]
pub fn is_double_out_checkout(thrown: i64) -> bool {
    (2..=MAX_CHECKOUT).contains(&thrown) && !IMPOSSIBLE_CHECKOUTS.contains(&thrown)
}

impl FinishPolicy for FinishRule {
    fn is_bust(&self, remaining: i64, thrown: i64) -> bool {
        // A remainder of 1 can never be finished.
        if remaining < 0 || remaining == 1 {
            return true;
        }
        match self {
            FinishRule::Straight => false,
            FinishRule::Double => {
                remaining % 2 != 0 || (remaining == 0 && !is_double_out_checkout(thrown))
            }
        }
    }
}
