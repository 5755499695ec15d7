//! Core domain types shared across the ledger.
//!
//! This module defines the strongly-typed content hash, the peer
//! identifier, and the ledger entities (transactions and blocks). The goal
//! is to avoid "naked" byte buffers and strings in public APIs and instead
//! use domain-specific newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Block entity and chain-linkage helpers.
pub mod block;
/// Opaque transaction payloads.
pub mod payload;
/// Signed authorization-update transactions.
pub mod transaction;

pub(crate) mod encoding;

pub use block::Block;
pub use payload::Payload;
pub use transaction::Transaction;

/// Length in bytes of the 256-bit content hashes used by the ledger.
pub const HASH_LEN: usize = 32;

/// Sentinel `prev_hash` value carried by the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Fixed genesis timestamp, 2000-01-01T00:00:00Z, shared by every peer.
///
/// Leader election measures its one-second time slots from this instant,
/// so it must be identical across the whole mesh.
pub const GENESIS_TIMESTAMP: u64 = 946_684_800;

/// Strongly-typed 256-bit content hash (BLAKE3-256).
///
/// Used for transaction digests and block hashes. Linkage fields carry the
/// lowercase hex encoding of this value; the genesis block's parent field
/// carries the [`GENESIS_PREV_HASH`] sentinel instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; HASH_LEN]);

impl Hash256 {
    /// Computes a new [`Hash256`] as the BLAKE3-256 hash of `data`.
    pub fn compute(data: &[u8]) -> Self {
        let h = blake3::hash(data);
        Hash256(*h.as_bytes())
    }

    /// Returns the underlying 32-byte hash as a borrowed array.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Lowercase hex encoding, as used in block linkage fields.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Durable peer identity: the canonical string encoding of a public key.
///
/// The encoding is the pipe-separated decimal modulus and exponent produced
/// by [`PublicKey::encode`](crate::identity::PublicKey::encode). It doubles
/// as the reputation-table key and as a wire value, so it must stay stable
/// for the lifetime of the key.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub String);

impl PeerId {
    /// Returns the encoded identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened prefix for log output; full identities run to hundreds of
    /// digits.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_content_sensitive() {
        let a = Hash256::compute(b"zone update");
        let b = Hash256::compute(b"zone update");
        let c = Hash256::compute(b"zone update!");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_hex().len(), 2 * HASH_LEN);
    }

    #[test]
    fn peer_id_short_never_panics() {
        let tiny = PeerId("42".to_string());
        assert_eq!(tiny.short(), "42");

        let long = PeerId("1234567890123456".to_string());
        assert_eq!(long.short(), "123456789012");
    }

    #[test]
    fn peer_ids_sort_lexicographically() {
        let mut ids = vec![
            PeerId("b".to_string()),
            PeerId("a".to_string()),
            PeerId("ab".to_string()),
        ];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(PeerId::as_str).collect();
        assert_eq!(sorted, ["a", "ab", "b"]);
    }
}
