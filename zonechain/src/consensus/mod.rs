//! Consensus engine and related abstractions.
//!
//! This module provides a modular, testable consensus layer consisting of:
//!
//! - configuration parameters ([`config::ConsensusConfig`],
//!   [`config::ReputationConfig`]),
//! - peer reputation bookkeeping ([`reputation::ReputationTracker`]),
//! - pluggable leader election ([`election::ElectionStrategy`]),
//! - chain validation rules ([`validator::ChainValidator`]),
//! - the persistence seam ([`sink::BlockSink`]), and
//! - the engine tying them together ([`engine::ConsensusEngine`]).

pub mod config;
pub mod election;
pub mod engine;
pub mod error;
pub mod reputation;
pub mod sink;
pub mod validator;

pub use config::{ConsensusConfig, ReputationConfig};
pub use election::{ElectionStrategy, TimeSlicedPoah};
pub use engine::{BlockOutcome, ConsensusEngine, MineOutcome, TxOutcome};
pub use error::{EngineError, ValidationError};
pub use reputation::ReputationTracker;
pub use sink::{BlockSink, MemorySink, NullSink, SinkError};
pub use validator::ChainValidator;
