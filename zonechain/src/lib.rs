//! Zonechain library crate.
//!
//! Building blocks for a permissioned, append-only ledger that distributes
//! signed zone-access updates across mutually distrusting peers with no
//! central coordinator:
//!
//! - cryptographic identities and signing (`identity`),
//! - ledger entities with canonical representations (`types`),
//! - the consensus engine with reputation-gated, time-sliced
//!   proof-of-authentication leader election (`consensus`),
//! - the transport boundary contracts (`wire`),
//! - and a transport-free node orchestrator (`node`).
//!
//! Higher-level binaries compose these pieces with a mesh transport, a
//! front-end, and durable storage of their choice.

pub mod config;
pub mod consensus;
pub mod identity;
pub mod node;
pub mod types;
pub mod wire;

// Re-export top-level configuration.
pub use config::NodeConfig;

// Re-export "core" consensus types and traits.
pub use consensus::{
    BlockOutcome, BlockSink, ChainValidator, ConsensusConfig, ConsensusEngine, ElectionStrategy,
    EngineError, MemorySink, MineOutcome, NullSink, ReputationConfig, ReputationTracker,
    SinkError, TimeSlicedPoah, TxOutcome, ValidationError,
};

// Re-export identity primitives.
pub use identity::{IdentityError, KeyPair, PublicKey, Signature};

// Re-export the orchestrator.
pub use node::Node;

// Re-export domain types at the crate root for convenience.
pub use types::{Block, Hash256, Payload, PeerId, Transaction};

// Re-export the wire boundary.
pub use wire::{Broadcast, Envelope, MessageKind, WireError};

/// Type alias for the default engine stack used by a "typical" node.
///
/// This composes:
///
/// - [`TimeSlicedPoah`] leader election, and
/// - [`NullSink`] (no persistence hook attached).
pub type DefaultConsensusEngine = ConsensusEngine<TimeSlicedPoah, NullSink>;

/// Type alias for the default node orchestrator.
pub type DefaultNode = Node<TimeSlicedPoah, NullSink>;
