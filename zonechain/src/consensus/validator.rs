//! Chain validation rules.
//!
//! Validation re-derives and checks linkage, numbering, and signatures.
//! It is deterministic and side-effect free; reputation consequences are
//! applied by the engine based on the outcome.

use crate::types::{Block, Transaction};

use super::error::ValidationError;

/// Validates chain linkage, block numbering, and signatures.
///
/// The genesis block is exempt from every check; a single-block chain is
/// trivially valid. Checks short-circuit on the first violation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainValidator;

impl ChainValidator {
    /// Validates an entire chain. Reserved for reconciliation after
    /// adopting a foreign chain; block receipt uses [`validate_tip`].
    ///
    /// [`validate_tip`]: ChainValidator::validate_tip
    pub fn validate(&self, chain: &[Block]) -> Result<(), ValidationError> {
        for window in chain.windows(2) {
            self.check_link(&window[0], &window[1])?;
        }
        Ok(())
    }

    /// Cheap incremental check: validates only the last block against its
    /// predecessor.
    pub fn validate_tip(&self, chain: &[Block]) -> Result<(), ValidationError> {
        match chain {
            [.., prev, last] => self.check_link(prev, last),
            _ => Ok(()),
        }
    }

    fn check_link(&self, prev: &Block, block: &Block) -> Result<(), ValidationError> {
        if block.prev_hash != prev.hash_hex() {
            return Err(ValidationError::BrokenLink {
                block_id: block.block_id,
            });
        }
        if block.block_id != prev.block_id + 1 {
            return Err(ValidationError::NonSequentialId {
                expected: prev.block_id + 1,
                found: block.block_id,
            });
        }
        if !block.verify_signature() {
            return Err(ValidationError::BadBlockSignature {
                block_id: block.block_id,
            });
        }
        if !block.transactions.iter().all(Transaction::verify) {
            return Err(ValidationError::BadTransactionSignature {
                block_id: block.block_id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::KeyPair;
    use crate::types::Payload;

    fn sealed_block(keys: &KeyPair, prev: &Block, created_at: u64) -> Block {
        let mut tx = Transaction::new(
            keys.public().clone(),
            Payload::grant("u1", &["door1"]),
            created_at,
        );
        tx.sign(keys).expect("sign tx");

        let mut block = Block::new(
            prev.block_id + 1,
            vec![tx],
            created_at,
            prev.hash_hex(),
            keys.public().clone(),
        );
        block.sign(keys).expect("sign block");
        block
    }

    fn chain_of(keys: &KeyPair, blocks: usize) -> Vec<Block> {
        let mut chain = vec![Block::genesis()];
        for i in 0..blocks {
            let next = sealed_block(keys, chain.last().expect("non-empty"), 1_700_000_000 + i as u64);
            chain.push(next);
        }
        chain
    }

    #[test]
    fn single_block_chain_is_trivially_valid() {
        let v = ChainValidator;
        assert!(v.validate(&[Block::genesis()]).is_ok());
        assert!(v.validate_tip(&[Block::genesis()]).is_ok());
    }

    #[test]
    fn well_formed_chain_validates() {
        let keys = KeyPair::generate().expect("keygen");
        let chain = chain_of(&keys, 3);
        assert!(ChainValidator.validate(&chain).is_ok());
        assert!(ChainValidator.validate_tip(&chain).is_ok());
    }

    #[test]
    fn broken_link_in_the_middle_fails_full_validation() {
        let keys = KeyPair::generate().expect("keygen");
        let mut chain = chain_of(&keys, 3);
        chain[2].prev_hash = "deadbeef".to_string();

        assert_eq!(
            ChainValidator.validate(&chain),
            Err(ValidationError::BrokenLink { block_id: 2 })
        );
        // The tip link itself is broken too, because block 2's canonical
        // bytes changed with its prev_hash.
        assert!(ChainValidator.validate_tip(&chain).is_err());
    }

    #[test]
    fn non_sequential_id_is_reported() {
        let keys = KeyPair::generate().expect("keygen");
        let genesis = Block::genesis();
        let mut skipped = sealed_block(&keys, &genesis, 1_700_000_000);
        skipped.block_id = 5;
        skipped.prev_hash = genesis.hash_hex();
        skipped.sign(&keys).expect("re-sign");

        assert_eq!(
            ChainValidator.validate(&[genesis, skipped]),
            Err(ValidationError::NonSequentialId {
                expected: 1,
                found: 5
            })
        );
    }

    #[test]
    fn unsigned_tip_fails() {
        let keys = KeyPair::generate().expect("keygen");
        let genesis = Block::genesis();
        let mut block = sealed_block(&keys, &genesis, 1_700_000_000);
        block.signature = None;

        assert_eq!(
            ChainValidator.validate_tip(&[genesis, block]),
            Err(ValidationError::BadBlockSignature { block_id: 1 })
        );
    }

    #[test]
    fn forged_contained_transaction_fails() {
        let keys = KeyPair::generate().expect("keygen");
        let imposter = KeyPair::generate().expect("keygen");
        let genesis = Block::genesis();

        let mut forged = Transaction::new(
            keys.public().clone(),
            Payload::grant("u9", &["vault"]),
            1_700_000_000,
        );
        forged.signature = Some(imposter.sign(&forged.canonical_bytes()).expect("sign"));

        let mut block = Block::new(
            1,
            vec![forged],
            1_700_000_000,
            genesis.hash_hex(),
            keys.public().clone(),
        );
        block.sign(&keys).expect("sign");

        assert_eq!(
            ChainValidator.validate(&[genesis, block]),
            Err(ValidationError::BadTransactionSignature { block_id: 1 })
        );
    }
}
