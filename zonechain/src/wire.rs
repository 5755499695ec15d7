//! Transport boundary: message kinds, envelopes, and broadcast values.
//!
//! The transport owns framing and delivery; this module only fixes the
//! message kinds and the canonical JSON payload shapes. Inbound payloads
//! are decoded and checked here, so malformed input is rejected before any
//! engine state is touched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Block, PeerId, Transaction};

/// Message kinds carried by the mesh transport.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A freshly signed transaction for the pending queues.
    NewTransaction,
    /// A sealed block from the current slot leader.
    NewBlock,
    /// A pre-announced candidate block from a peer that did not hold the
    /// slot.
    CandidateBlock,
    /// Digest of a pending transaction evicted for a bad signature.
    InvalidTransaction,
    /// Asks every peer to run the mining procedure for the current slot.
    MineRequest,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            MessageKind::NewTransaction => "new_transaction",
            MessageKind::NewBlock => "new_block",
            MessageKind::CandidateBlock => "candidate_block",
            MessageKind::InvalidTransaction => "invalid_transaction",
            MessageKind::MineRequest => "mine_request",
        };
        f.write_str(tag)
    }
}

/// An inbound message: kind tag, sender identity, raw payload text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    /// What the payload claims to be.
    pub kind: MessageKind,
    /// Identity of the sending peer, as reported by the transport.
    pub sender: PeerId,
    /// Undecoded payload text; empty for payload-free kinds.
    pub payload: String,
}

/// Outbound broadcast value produced by the node orchestrator.
///
/// Broadcasts are fire-and-forget: the engine never waits for delivery and
/// tolerates loss.
#[derive(Clone, Debug)]
pub enum Broadcast {
    /// Fan out a newly admitted transaction.
    NewTransaction(Transaction),
    /// Fan out a sealed block.
    NewBlock(Block),
    /// Pre-announce a candidate block.
    CandidateBlock(Block),
    /// Announce an evicted transaction by digest (hex).
    InvalidTransaction(String),
    /// Trigger the shared mining procedure.
    MineRequest,
}

impl Broadcast {
    /// The wire kind this broadcast travels under.
    pub fn kind(&self) -> MessageKind {
        match self {
            Broadcast::NewTransaction(_) => MessageKind::NewTransaction,
            Broadcast::NewBlock(_) => MessageKind::NewBlock,
            Broadcast::CandidateBlock(_) => MessageKind::CandidateBlock,
            Broadcast::InvalidTransaction(_) => MessageKind::InvalidTransaction,
            Broadcast::MineRequest => MessageKind::MineRequest,
        }
    }

    /// Canonical JSON payload text for the transport.
    pub fn encode_payload(&self) -> Result<String, WireError> {
        match self {
            Broadcast::NewTransaction(tx) => serde_json::to_string(tx).map_err(WireError::from),
            Broadcast::NewBlock(block) | Broadcast::CandidateBlock(block) => {
                serde_json::to_string(block).map_err(WireError::from)
            }
            Broadcast::InvalidTransaction(digest) => Ok(digest.clone()),
            Broadcast::MineRequest => Ok(String::new()),
        }
    }
}

/// Decodes a transaction payload.
pub fn decode_transaction(payload: &str) -> Result<Transaction, WireError> {
    serde_json::from_str(payload).map_err(WireError::from)
}

/// Decodes a block payload.
pub fn decode_block(payload: &str) -> Result<Block, WireError> {
    serde_json::from_str(payload).map_err(WireError::from)
}

/// Error for undecodable boundary input.
#[derive(Debug)]
pub enum WireError {
    /// Payload was not valid JSON for the expected shape.
    Malformed(String),
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        WireError::Malformed(err.to_string())
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Malformed(msg) => write!(f, "malformed payload: {msg}"),
        }
    }
}

impl std::error::Error for WireError {}
