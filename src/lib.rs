//! # rust-darts
//!
//! A pure state-transition engine for two dart scoring games.
//!
//! ## Games
//!
//! - **Countdown**: start at a fixed score (501, 301, ...) and subtract every
//!   throw until reaching exactly zero. Busting reverts to the score the
//!   player had at the start of their turn.
//! - **High-Low**: everyone starts with a number of lives. Each throw must
//!   beat a challenge (higher or lower than a target) or cost a life. The
//!   last player with lives wins.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every operation borrows a `GameState` and returns
//!    a new one. A failed operation returns an `EngineError` and leaves the
//!    caller's state usable.
//!
//! 2. **Persistent Data Structures**: players and histories are `im`
//!    vectors, so snapshots share everything a transition did not touch.
//!
//! 3. **Explicit context**: game parameters travel in `GameConfig`; the clock
//!    and bust policy are fields of `TurnEngine`. Nothing is process-global.
//!
//! ## Modules
//!
//! - `core`: players, state, actions, configuration, errors, statistics
//! - `factory`: initial player and game construction
//! - `rules`: the turn engine (scoring, challenges, rotation, reset)
//! - `persistence`: best-effort save/load adapter
//!
//! ## Example
//!
//! ```
//! use rust_darts::{GameConfig, StateFactory, TurnEngine};
//!
//! let mut factory = StateFactory::new(42);
//! let engine = TurnEngine::new();
//!
//! let state = factory
//!     .create_game_state(&["Ann", "Ben"], &GameConfig::countdown(501))
//!     .unwrap();
//! let ann = state.players[0].id.clone();
//!
//! let state = engine.apply_countdown_score(&state, &ann, 180).unwrap();
//! let state = engine.advance_turn(&state);
//!
//! assert_eq!(state.player(&ann).unwrap().score, 321);
//! assert_eq!(state.current_player_index, 1);
//! ```

pub mod core;
pub mod factory;
pub mod rules;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    Action, ChallengeDirection, Clock, EngineError, EngineResult, FinishRule, FixedClock,
    GameConfig, GameMode, GameState, HighLowChallenge, Player, PlayerId, PlayerStats,
    ScoreHistoryEntry, SystemClock,
};

pub use crate::factory::{FactoryCheckpoint, StateFactory};

pub use crate::rules::{FinishPolicy, TurnEngine};

pub use crate::persistence::{
    BincodeCodec, FileStore, JsonCodec, MemoryStore, Persistence, StateCodec, StateStore,
    StoreError,
};
