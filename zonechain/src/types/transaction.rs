//! Signed authorization-update transactions.
//!
//! A transaction is created by a submitting client, signed exactly once,
//! queued on a peer, and consumed into exactly one committed block (or
//! discarded if found invalid). It is never mutated after signing.

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityError, KeyPair, PublicKey, Signature};

use super::encoding;
use super::{Hash256, Payload, PeerId};

/// A single signed authorization update.
///
/// The serde shape is the wire contract: the author key travels as its
/// canonical string encoding under `public_key`, the payload as embedded
/// JSON text, and the signature as hex (or null before signing).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Author identity; the signature must verify against this key.
    #[serde(rename = "public_key", with = "encoding::pubkey")]
    pub author: PublicKey,

    /// Opaque application payload.
    #[serde(with = "encoding::payload_text")]
    pub payload: Payload,

    /// Detached PSS signature over [`Transaction::canonical_bytes`].
    /// Absent until the author signs.
    #[serde(default, with = "encoding::sig_hex")]
    pub signature: Option<Signature>,

    /// Creation time, seconds since Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

impl Transaction {
    /// Creates an unsigned transaction.
    pub fn new(author: PublicKey, payload: Payload, created_at: u64) -> Self {
        Self {
            author,
            payload,
            signature: None,
            created_at,
        }
    }

    /// Canonical byte representation: encoded author key, canonical
    /// payload JSON, and the creation timestamp, in that order. This is
    /// the exact input to both hashing and signing.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut text = self.author.encode();
        text.push_str(&self.payload.canonical_json());
        text.push_str(&self.created_at.to_string());
        text.into_bytes()
    }

    /// Content digest of this transaction. Signature bytes are excluded.
    pub fn digest(&self) -> Hash256 {
        Hash256::compute(&self.canonical_bytes())
    }

    /// Hex form of [`Transaction::digest`].
    pub fn digest_hex(&self) -> String {
        self.digest().to_hex()
    }

    /// The peer identifier of the claimed author.
    pub fn author_id(&self) -> PeerId {
        self.author.peer_id()
    }

    /// Signs the canonical representation with `keys`, replacing any
    /// previous signature.
    pub fn sign(&mut self, keys: &KeyPair) -> Result<(), IdentityError> {
        self.signature = Some(keys.sign(&self.canonical_bytes())?);
        Ok(())
    }

    /// True if the signature verifies against the author key over the
    /// canonical representation. Unsigned transactions never verify.
    pub fn verify(&self) -> bool {
        match &self.signature {
            Some(sig) => self.author.verify(&self.canonical_bytes(), sig),
            None => false,
        }
    }
}

/// Duplicate detection compares the author identity and the payload only.
/// Signature bytes are non-deterministic and timestamps get re-stamped on
/// re-send, so neither participates.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.payload == other.payload
    }
}
