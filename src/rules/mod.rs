//! Turn engine: every state transition of a game.
//!
//! `TurnEngine` exposes:
//! - Countdown score submission with pluggable bust policy
//! - High-Low challenge setting and resolution
//! - Turn rotation
//! - Reset
//!
//! Each transition borrows the current `GameState` and returns a new one, or
//! fails without touching anything.

mod countdown;
mod engine;
pub mod finish;
mod high_low;
mod reset;
mod turn;

pub use engine::TurnEngine;
pub use finish::{is_double_out_checkout, FinishPolicy, MAX_CHECKOUT};
