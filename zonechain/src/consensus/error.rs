use std::fmt;

use crate::identity::IdentityError;

/// Error type returned when chain validation fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// `prev_hash` does not match the computed hash of the previous block.
    BrokenLink { block_id: u64 },
    /// Block numbering is not strictly sequential.
    NonSequentialId { expected: u64, found: u64 },
    /// The block signature is missing or does not verify against the
    /// declared signer.
    BadBlockSignature { block_id: u64 },
    /// A contained transaction signature does not verify.
    BadTransactionSignature { block_id: u64 },
}

/// High-level errors surfaced by the consensus engine.
///
/// Signature and linkage failures are not errors at this level: they are
/// expected outcomes with reputation consequences. Only local identity
/// problems (failure to sign with our own key) surface here.
#[derive(Debug)]
pub enum EngineError {
    /// Signing or key handling failed for the local identity.
    Identity(IdentityError),
}

impl From<IdentityError> for EngineError {
    fn from(err: IdentityError) -> Self {
        EngineError::Identity(err)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BrokenLink { block_id } => {
                write!(f, "block {block_id}: prev_hash does not match parent")
            }
            ValidationError::NonSequentialId { expected, found } => {
                write!(f, "expected block id {expected}, found {found}")
            }
            ValidationError::BadBlockSignature { block_id } => {
                write!(f, "block {block_id}: signer signature failed")
            }
            ValidationError::BadTransactionSignature { block_id } => {
                write!(f, "block {block_id}: contained transaction signature failed")
            }
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Identity(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ValidationError {}
impl std::error::Error for EngineError {}
