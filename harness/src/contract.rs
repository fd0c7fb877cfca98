//! World contract: the minimal surface a world exposes beyond the engine
//! state traits.
//!
//! Worlds implement the `coppice_search` state contracts for the engines;
//! this crate's runner additionally needs to identify a world and to read
//! its fingerprint at rest, so a returned path can be replayed on a fresh
//! state and checked against the leaf the search claims to have reached.

use coppice_search::contract::SearchStateV1;

/// A state whose fingerprint can be read at any point, for replay checks.
pub trait AuditStateV1: SearchStateV1 {
    /// Stable world identifier (e.g., `"ladder:v1:h6"`).
    fn world_id(&self) -> String;

    /// Fingerprint of the current position. Must agree with the
    /// fingerprints the world reports to the selector during expansion.
    fn state_fingerprint(&self) -> u64;
}
