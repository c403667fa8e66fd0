//! State factory: builds the initial `Player` and `GameState` values.
//!
//! The factory is a leaf. The turn engine borrows its baseline logic only to
//! reset a game in place.

mod state_factory;

pub use state_factory::{FactoryCheckpoint, StateFactory};
pub(crate) use state_factory::restore_player;
