//! Compact snapshot encoding.
//!
//! Transports replicate whole `GameState` snapshots rather than diffs;
//! bincode keeps them small and fast to decode. The RNG state rides along,
//! so a decoded game shuffles identically to the original.

use bincode::Error as CodecError;

use crate::core::GameState;

/// Serialize a snapshot.
pub fn encode(state: &GameState) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(state)
}

/// Deserialize a snapshot.
pub fn decode(bytes: &[u8]) -> Result<GameState, CodecError> {
    bincode::deserialize(bytes)
}
