//! Blocks and chain linkage.
//!
//! A block bundles the transactions sealed in one leadership slot. Its
//! content hash is computed over a canonical representation built from the
//! block id, the contained transaction digests (not the full transaction
//! bodies, which keeps the representation compact and stable), the
//! timestamp, the parent hash, and the encoded signer key. The same
//! representation is what the leader signs.

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityError, KeyPair, PublicKey, Signature};

use super::encoding;
use super::{Hash256, PeerId, Transaction, GENESIS_PREV_HASH, GENESIS_TIMESTAMP};

/// One committed (or candidate) unit of the ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    /// Strictly increasing block number; genesis is 0.
    pub block_id: u64,

    /// Transactions sealed into this block, in admission order.
    pub transactions: Vec<Transaction>,

    /// Seal time, seconds since Unix epoch. Genesis carries the fixed
    /// [`GENESIS_TIMESTAMP`].
    pub created_at: u64,

    /// Hex content hash of the previous block; [`GENESIS_PREV_HASH`] on
    /// genesis.
    pub prev_hash: String,

    /// The leader that sealed this block; genesis has none.
    #[serde(rename = "signer_public_key", default, with = "encoding::pubkey_opt")]
    pub signer: Option<PublicKey>,

    /// Leader signature over [`Block::canonical_bytes`]; absent until
    /// signed, always absent on genesis.
    #[serde(default, with = "encoding::sig_hex")]
    pub signature: Option<Signature>,
}

impl Block {
    /// The fixed genesis block shared by every peer: id 0, no
    /// transactions, sentinel parent hash, no signer, fixed timestamp.
    /// It is never mined and never re-validated.
    pub fn genesis() -> Self {
        Self {
            block_id: 0,
            transactions: Vec::new(),
            created_at: GENESIS_TIMESTAMP,
            prev_hash: GENESIS_PREV_HASH.to_string(),
            signer: None,
            signature: None,
        }
    }

    /// Creates an unsigned block sealed by `signer`.
    pub fn new(
        block_id: u64,
        transactions: Vec<Transaction>,
        created_at: u64,
        prev_hash: String,
        signer: PublicKey,
    ) -> Self {
        Self {
            block_id,
            transactions,
            created_at,
            prev_hash,
            signer: Some(signer),
            signature: None,
        }
    }

    /// True for the block every chain starts with.
    pub fn is_genesis(&self) -> bool {
        self.block_id == 0
    }

    /// Canonical byte representation used for hashing and signing.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut text = self.block_id.to_string();
        for tx in &self.transactions {
            text.push('|');
            text.push_str(&tx.digest_hex());
        }
        text.push('|');
        text.push_str(&self.created_at.to_string());
        text.push('|');
        text.push_str(&self.prev_hash);
        text.push('|');
        if let Some(signer) = &self.signer {
            text.push_str(&signer.encode());
        }
        text.into_bytes()
    }

    /// Content hash of this block.
    pub fn compute_hash(&self) -> Hash256 {
        Hash256::compute(&self.canonical_bytes())
    }

    /// Hex form of [`Block::compute_hash`], as carried by the next
    /// block's `prev_hash` field.
    pub fn hash_hex(&self) -> String {
        self.compute_hash().to_hex()
    }

    /// The peer identifier of the declared signer, if any.
    pub fn signer_id(&self) -> Option<PeerId> {
        self.signer.as_ref().map(PublicKey::peer_id)
    }

    /// Signs the canonical representation with `keys`, replacing any
    /// previous signature.
    pub fn sign(&mut self, keys: &KeyPair) -> Result<(), IdentityError> {
        self.signature = Some(keys.sign(&self.canonical_bytes())?);
        Ok(())
    }

    /// True if the block signature verifies against the declared signer.
    /// Unsigned blocks (genesis included) never verify.
    pub fn verify_signature(&self) -> bool {
        match (&self.signer, &self.signature) {
            (Some(signer), Some(sig)) => signer.verify(&self.canonical_bytes(), sig),
            _ => false,
        }
    }

    /// True if the block signature verifies and every contained
    /// transaction independently verifies.
    pub fn verify(&self) -> bool {
        self.verify_signature() && self.transactions.iter().all(Transaction::verify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Payload;

    fn signed_tx(keys: &KeyPair) -> Transaction {
        let mut tx = Transaction::new(
            keys.public().clone(),
            Payload::grant("u1", &["door1"]),
            1_700_000_000,
        );
        tx.sign(keys).expect("sign");
        tx
    }

    fn sealed_block(keys: &KeyPair, prev: &Block, created_at: u64) -> Block {
        let mut block = Block::new(
            prev.block_id + 1,
            vec![signed_tx(keys)],
            created_at,
            prev.hash_hex(),
            keys.public().clone(),
        );
        block.sign(keys).expect("sign");
        block
    }

    #[test]
    fn genesis_is_fixed_and_unsigned() {
        let genesis = Block::genesis();
        assert_eq!(genesis.block_id, 0);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.prev_hash, GENESIS_PREV_HASH);
        assert_eq!(genesis.created_at, GENESIS_TIMESTAMP);
        assert!(genesis.signer.is_none());
        assert!(!genesis.verify_signature());

        // Every peer derives the same genesis hash.
        assert_eq!(genesis.hash_hex(), Block::genesis().hash_hex());
    }

    #[test]
    fn hash_changes_with_linkage_fields() {
        let keys = KeyPair::generate().expect("keygen");
        let block = sealed_block(&keys, &Block::genesis(), 1_700_000_005);

        let mut relinked = block.clone();
        relinked.prev_hash = "deadbeef".to_string();
        assert_ne!(block.compute_hash(), relinked.compute_hash());

        let mut renumbered = block.clone();
        renumbered.block_id += 1;
        assert_ne!(block.compute_hash(), renumbered.compute_hash());
    }

    #[test]
    fn sealed_block_verifies_until_tampered() {
        let keys = KeyPair::generate().expect("keygen");
        let block = sealed_block(&keys, &Block::genesis(), 1_700_000_005);
        assert!(block.verify());

        let mut tampered = block.clone();
        tampered.created_at += 1;
        assert!(!tampered.verify());
    }

    #[test]
    fn block_with_forged_transaction_fails_verification() {
        let keys = KeyPair::generate().expect("keygen");
        let imposter = KeyPair::generate().expect("keygen");

        let mut forged = Transaction::new(
            keys.public().clone(),
            Payload::grant("u9", &["vault"]),
            1_700_000_001,
        );
        forged.signature = Some(imposter.sign(&forged.canonical_bytes()).expect("sign"));

        let mut block = Block::new(
            1,
            vec![forged],
            1_700_000_005,
            Block::genesis().hash_hex(),
            keys.public().clone(),
        );
        block.sign(&keys).expect("sign");

        // The block signature itself is fine; the transaction is not.
        assert!(block.verify_signature());
        assert!(!block.verify());
    }

    #[test]
    fn wire_roundtrip_preserves_hash_and_verification() {
        let keys = KeyPair::generate().expect("keygen");
        let block = sealed_block(&keys, &Block::genesis(), 1_700_000_005);

        let json = serde_json::to_string(&block).expect("encode");
        let decoded: Block = serde_json::from_str(&json).expect("decode");

        assert_eq!(decoded.hash_hex(), block.hash_hex());
        assert!(decoded.verify());
    }

    #[test]
    fn genesis_wire_shape_carries_nulls() {
        let json = serde_json::to_string(&Block::genesis()).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["block_id"], 0);
        assert_eq!(value["prev_hash"], "0");
        assert!(value["signer_public_key"].is_null());
        assert!(value["signature"].is_null());
    }
}
