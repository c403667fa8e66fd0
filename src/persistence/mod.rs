//! Save/load adapter.
//!
//! The engine never does I/O. Callers wrap transitions with a
//! `Persistence` value:
//!
//! ```
//! use rust_darts::core::GameConfig;
//! use rust_darts::factory::StateFactory;
//! use rust_darts::persistence::{MemoryStore, Persistence};
//!
//! let state = StateFactory::new(1)
//!     .create_game_state(&["Ann", "Ben"], &GameConfig::default())
//!     .unwrap();
//!
//! let persistence = Persistence::new(MemoryStore::new());
//! persistence.save(&state);
//! assert_eq!(persistence.load(), Some(state));
//!
//! persistence.clear();
//! assert_eq!(persistence.load(), None);
//! ```
//!
//! `save`, `load` and `clear` are best-effort: failures are logged and
//! degrade to "nothing saved", never to an error the game has to handle.
//! `try_save` and `try_load` expose the underlying `StoreError` for callers
//! that want it.

mod codec;
mod store;

pub use codec::{BincodeCodec, JsonCodec, StateCodec};
pub use store::{FileStore, MemoryStore, StateStore};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::{GameState, InvariantViolation};

/// Storage or encoding failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode encoding failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("saved state is inconsistent: {0}")]
    Invalid(#[from] InvariantViolation),
}

/// Best-effort persistence of one game.
#[derive(Debug)]
pub struct Persistence<S: StateStore, C: StateCodec = JsonCodec> {
    store: S,
    codec: C,
}

impl<S: StateStore> Persistence<S, JsonCodec> {
    /// JSON persistence over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            codec: JsonCodec,
        }
    }
}

impl<S: StateStore, C: StateCodec> Persistence<S, C> {
    /// Persistence over the given store and codec.
    pub fn with_codec(store: S, codec: C) -> Self {
        Self { store, codec }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save the state. Failures are logged, never returned.
    pub fn save(&self, state: &GameState) {
        if let Err(e) = self.try_save(state) {
            warn!(error = %e, "failed to save game state");
        }
    }

    /// Load the last saved state.
    ///
    /// Missing, unreadable, undecodable and inconsistent saves all come back
    /// as `None`.
    pub fn load(&self) -> Option<GameState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "failed to load game state");
                None
            }
        }
    }

    /// Forget the saved state. Failures are logged, never returned.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove() {
            warn!(error = %e, "failed to clear game state");
        }
    }

    /// Save the state, reporting failures.
    pub fn try_save(&self, state: &GameState) -> Result<(), StoreError> {
        let bytes = self.codec.encode(state)?;
        self.store.write(&bytes)?;
        debug!(bytes = bytes.len(), "game state saved");
        Ok(())
    }

    /// Load the last saved state, reporting failures.
    ///
    /// A decoded state must pass `GameState::check_invariants`.
    pub fn try_load(&self) -> Result<Option<GameState>, StoreError> {
        let Some(bytes) = self.store.read()? else {
            return Ok(None);
        };
        let state = self.codec.decode(&bytes)?;
        state.check_invariants()?;
        Ok(Some(state))
    }
}
