//! Domain-separated fingerprint derivation for worlds.
//!
//! The engines consume unsigned fingerprints and never hash anything
//! themselves; worlds derive theirs here. SHA-256 under a null-terminated
//! domain prefix, truncated to the first eight little-endian bytes — wide
//! enough that the probe table sees effectively random keys, and
//! domain-separated so two worlds never collide on identical payloads.

use sha2::{Digest, Sha256};

/// Domain prefix for the countdown ladder world.
pub const DOMAIN_LADDER: &[u8] = b"COPPICE::WORLD_LADDER::V1\0";

/// Domain prefix for the slot lattice world.
pub const DOMAIN_LATTICE: &[u8] = b"COPPICE::WORLD_LATTICE::V1\0";

/// Domain prefix for the relay world.
pub const DOMAIN_RELAY: &[u8] = b"COPPICE::WORLD_RELAY::V1\0";

/// Hash `payload` under `domain` and truncate to a `u64` fingerprint.
#[must_use]
pub fn domain_fingerprint(domain: &[u8], payload: &[u8]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(payload);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
