//! Game state encodings.
//!
//! Both codecs round-trip every field, including history timestamps (RFC 3339
//! with nanoseconds) and history order.

use crate::core::GameState;

use super::StoreError;

/// Turns a `GameState` into bytes and back.
pub trait StateCodec {
    fn encode(&self, state: &GameState) -> Result<Vec<u8>, StoreError>;
    fn decode(&self, bytes: &[u8]) -> Result<GameState, StoreError>;
}

/// Human-readable JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl StateCodec for JsonCodec {
    fn encode(&self, state: &GameState) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(state)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameState, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Compact binary encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl StateCodec for BincodeCodec {
    fn encode(&self, state: &GameState) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(state)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameState, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
