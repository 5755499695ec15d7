//! Node orchestrator: wires the consensus engine to a message boundary
//! without owning a transport.
//!
//! Every method returns the [`Broadcast`]s the transport should fan out.
//! Delivery is fire-and-forget; the orchestrator never waits on the
//! network and never holds engine state across a network call.

use tracing::{debug, warn};

use crate::consensus::{
    BlockOutcome, BlockSink, ConsensusEngine, ElectionStrategy, EngineError, MineOutcome,
    TxOutcome,
};
use crate::types::{Payload, Transaction};
use crate::wire::{self, Broadcast, Envelope, MessageKind, WireError};

/// A ledger peer: the consensus engine plus inbound message routing.
pub struct Node<E, S> {
    engine: ConsensusEngine<E, S>,
}

impl<E, S> Node<E, S>
where
    E: ElectionStrategy,
    S: BlockSink,
{
    /// Wraps an engine.
    pub fn new(engine: ConsensusEngine<E, S>) -> Self {
        Self { engine }
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &ConsensusEngine<E, S> {
        &self.engine
    }

    /// Mutable access to the engine, for administrative actions and tests.
    pub fn engine_mut(&mut self) -> &mut ConsensusEngine<E, S> {
        &mut self.engine
    }

    /// Authors, signs, and admits a transaction from the local identity.
    pub fn submit(&mut self, payload: Payload, now: u64) -> Result<Vec<Broadcast>, EngineError> {
        let tx = self.engine.create_transaction(payload, now)?;
        let mut out = Vec::new();
        if self.engine.submit(tx.clone()) {
            out.push(Broadcast::NewTransaction(tx));
        }
        Ok(out)
    }

    /// Local mining trigger: fans the request out to the mesh, then runs
    /// the shared mining procedure locally.
    pub fn trigger_mine(&mut self, now: u64) -> Result<Vec<Broadcast>, EngineError> {
        let mut out = vec![Broadcast::MineRequest];
        out.extend(self.mine_locally(now)?);
        Ok(out)
    }

    /// Routes one inbound envelope. Malformed payloads are rejected here
    /// and never reach engine state.
    pub fn handle(&mut self, envelope: &Envelope, now: u64) -> Result<Vec<Broadcast>, WireError> {
        self.engine.observe_peer(&envelope.sender);

        match envelope.kind {
            MessageKind::NewTransaction => {
                let tx = wire::decode_transaction(&envelope.payload)?;
                match self.engine.receive_transaction(tx) {
                    TxOutcome::Queued => debug!("queued transaction from the mesh"),
                    TxOutcome::Duplicate => debug!("dropped duplicate transaction"),
                    TxOutcome::Rejected => {}
                }
                Ok(Vec::new())
            }
            MessageKind::NewBlock => {
                let block = wire::decode_block(&envelope.payload)?;
                match self.engine.receive_block(block) {
                    BlockOutcome::Adopted | BlockOutcome::Rejected(_) => {}
                    BlockOutcome::Ignored => debug!("ignored stale block"),
                }
                Ok(Vec::new())
            }
            MessageKind::CandidateBlock => {
                let block = wire::decode_block(&envelope.payload)?;
                self.engine.receive_candidate(block);
                Ok(Vec::new())
            }
            MessageKind::InvalidTransaction => {
                // Advisory only: eviction decisions are always local.
                debug!(
                    sender = envelope.sender.short(),
                    "peer reported an invalid transaction"
                );
                Ok(Vec::new())
            }
            MessageKind::MineRequest => match self.mine_locally(now) {
                Ok(out) => Ok(out),
                Err(err) => {
                    warn!(error = %err, "mining on remote trigger failed");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn mine_locally(&mut self, now: u64) -> Result<Vec<Broadcast>, EngineError> {
        let mut out = Vec::new();
        match self.engine.mine(now)? {
            MineOutcome::NoPending => {}
            MineOutcome::Drained { evicted }
            | MineOutcome::NotLeader { evicted, .. } => {
                announce_evicted(&mut out, &evicted);
            }
            MineOutcome::Sealed { block, evicted } => {
                announce_evicted(&mut out, &evicted);
                out.push(Broadcast::NewBlock(block));
            }
        }
        Ok(out)
    }
}

fn announce_evicted(out: &mut Vec<Broadcast>, evicted: &[Transaction]) {
    for tx in evicted {
        out.push(Broadcast::InvalidTransaction(tx.digest_hex()));
    }
}
