//! High-level consensus engine orchestration.
//!
//! The consensus engine owns one chain and one pending-transaction queue
//! and wires together:
//!
//! - the local [`KeyPair`] for authoring and sealing,
//! - a [`ReputationTracker`] feeding (and fed by) validation outcomes,
//! - an [`ElectionStrategy`] deciding who may seal the current slot,
//! - the [`ChainValidator`] gate for incoming blocks, and
//! - a [`BlockSink`] persistence hook.
//!
//! The engine never references a transport. Every operation returns plain
//! values (blocks to broadcast, evicted transactions to announce) and an
//! outer orchestrator decides whether and how to fan them out. All
//! mutating methods take `&mut self`, are short and CPU-bound, and never
//! block on I/O, so a single mutex around the engine serializes local
//! calls against inbound network events; in particular, mining and block
//! receipt are mutually exclusive, which keeps "append to chain, truncate
//! pending" atomic as a unit.

use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::identity::KeyPair;
use crate::types::{Block, Payload, PeerId, Transaction};

use super::config::ConsensusConfig;
use super::election::ElectionStrategy;
use super::error::{EngineError, ValidationError};
use super::reputation::ReputationTracker;
use super::sink::BlockSink;
use super::validator::ChainValidator;

/// Result of a shared mining trigger.
#[derive(Debug)]
pub enum MineOutcome {
    /// The pending queue was empty; mining is a no-op.
    NoPending,
    /// Every pending transaction was evicted during re-verification;
    /// nothing was left to seal.
    Drained { evicted: Vec<Transaction> },
    /// Another peer holds the current slot; no block was constructed.
    NotLeader {
        leader: PeerId,
        evicted: Vec<Transaction>,
    },
    /// The local peer sealed and adopted a new block.
    Sealed {
        block: Block,
        evicted: Vec<Transaction>,
    },
}

/// Result of receiving a foreign block.
#[derive(Debug, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Already present or superseded; dropped without consequences.
    Ignored,
    /// Failed validation; removed again and the signer penalized.
    Rejected(ValidationError),
    /// Appended to the local chain.
    Adopted,
}

/// Result of receiving a foreign transaction.
#[derive(Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// Newly queued.
    Queued,
    /// An equal transaction is already pending; dropped silently.
    Duplicate,
    /// Signature failure; the claimed author was penalized.
    Rejected,
}

/// Consensus engine: one chain and pending queue per peer process.
pub struct ConsensusEngine<E, S> {
    config: ConsensusConfig,
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    candidates: Vec<Block>,
    keys: KeyPair,
    reputation: ReputationTracker,
    validator: ChainValidator,
    election: E,
    sink: S,
}

impl<E, S> ConsensusEngine<E, S>
where
    E: ElectionStrategy,
    S: BlockSink,
{
    /// Creates an engine holding only the genesis block, with the local
    /// peer registered in the reputation table.
    pub fn new(config: NodeConfig, keys: KeyPair, election: E, sink: S) -> Self {
        let mut reputation = ReputationTracker::new(config.reputation);
        reputation.observe(&keys.peer_id());

        Self {
            config: config.consensus,
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            candidates: Vec::new(),
            keys,
            reputation,
            validator: ChainValidator,
            election,
            sink,
        }
    }

    /// Read-only snapshot of the committed chain.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Read-only snapshot of the pending queue.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Read access to the reputation table.
    pub fn reputation(&self) -> &ReputationTracker {
        &self.reputation
    }

    /// Mutable access to the reputation table, for administrative actions.
    pub fn reputation_mut(&mut self) -> &mut ReputationTracker {
        &mut self.reputation
    }

    /// The local peer identifier.
    pub fn local_id(&self) -> PeerId {
        self.keys.peer_id()
    }

    /// The chain tip.
    pub fn last_block(&self) -> &Block {
        self.chain.last().expect("chain always contains genesis")
    }

    /// The election epoch: the genesis block's timestamp.
    pub fn genesis_time(&self) -> u64 {
        self.chain
            .first()
            .expect("chain always contains genesis")
            .created_at
    }

    /// Registers a peer discovered by the transport at the default score.
    pub fn observe_peer(&mut self, peer: &PeerId) {
        self.reputation.observe(peer);
    }

    /// Full-chain validation, for reconciliation after adopting a foreign
    /// chain. Block receipt uses the cheaper tip check internally.
    pub fn validate_chain(&self) -> Result<(), ValidationError> {
        self.validator.validate(&self.chain)
    }

    /// Authors and signs a transaction from the local identity.
    pub fn create_transaction(
        &self,
        payload: Payload,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        let mut tx = Transaction::new(self.keys.public().clone(), payload, now);
        tx.sign(&self.keys)?;
        Ok(tx)
    }

    /// Admits a locally submitted transaction.
    ///
    /// Returns `true` when the transaction is admitted and the caller
    /// should broadcast it; `false` when its signature fails verification.
    /// Re-submitting an equal transaction leaves exactly one pending
    /// entry.
    pub fn submit(&mut self, transaction: Transaction) -> bool {
        if !transaction.verify() {
            return false;
        }
        self.reputation.observe(&transaction.author_id());
        if !self.pending.contains(&transaction) {
            self.pending.push(transaction);
        }
        true
    }

    /// Network counterpart of [`submit`](ConsensusEngine::submit):
    /// duplicates are dropped silently, signature failures penalize the
    /// purported author.
    pub fn receive_transaction(&mut self, transaction: Transaction) -> TxOutcome {
        if self.pending.contains(&transaction) {
            return TxOutcome::Duplicate;
        }
        if !transaction.verify() {
            let author = transaction.author_id();
            let penalty = self.reputation.config().invalid_tx_penalty;
            self.reputation.observe(&author);
            self.reputation.punish(&author, penalty);
            warn!(
                author = author.short(),
                "received transaction with bad signature"
            );
            return TxOutcome::Rejected;
        }
        self.reputation.observe(&transaction.author_id());
        self.pending.push(transaction);
        TxOutcome::Queued
    }

    /// Runs the shared mining procedure for the slot containing `now`.
    ///
    /// Every peer runs this on the same trigger; the leadership check
    /// decides whether this call constructs a block. The pending queue is
    /// re-verified first, evicting and penalizing anything whose signature
    /// no longer holds.
    pub fn mine(&mut self, now: u64) -> Result<MineOutcome, EngineError> {
        if self.pending.is_empty() {
            return Ok(MineOutcome::NoPending);
        }
        debug!(pending = self.pending.len(), "mining triggered");

        let evicted = self.evict_invalid_pending();
        if self.pending.is_empty() {
            return Ok(MineOutcome::Drained { evicted });
        }

        let local = self.keys.peer_id();
        self.reputation.observe(&local);
        let genesis_time = self.genesis_time();
        let leader = self
            .election
            .elect(&mut self.reputation, genesis_time, now)
            .expect("electorate contains the local peer");

        if leader != local {
            debug!(leader = leader.short(), "not the slot leader");
            return Ok(MineOutcome::NotLeader { leader, evicted });
        }
        debug!("local peer elected leader");

        let take = self.pending.len().min(self.config.max_block_txs);
        let consumed = self.pending[..take].to_vec();
        let mut block = Block::new(
            self.last_block().block_id + 1,
            consumed,
            now,
            self.last_block().hash_hex(),
            self.keys.public().clone(),
        );
        block.sign(&self.keys)?;

        // Appending and truncating together is the atomic unit other
        // peers' receive paths race against.
        self.pending.drain(..take);
        self.chain.push(block.clone());
        self.save_adopted(&block);

        info!(
            block_id = block.block_id,
            txs = block.transactions.len(),
            "sealed block"
        );
        Ok(MineOutcome::Sealed { block, evicted })
    }

    /// Handles a block received from the network.
    ///
    /// The block is speculatively appended, checked with the incremental
    /// tip validation, and rolled back (with a penalty for its signer) if
    /// the check fails. On adoption, committed transactions leave the
    /// pending queue and superseded candidate proposers are rewarded.
    pub fn receive_block(&mut self, block: Block) -> BlockOutcome {
        if block.block_id <= self.last_block().block_id {
            // Already present or superseded.
            return BlockOutcome::Ignored;
        }

        self.chain.push(block);
        if let Err(err) = self.validator.validate_tip(&self.chain) {
            let block = self.chain.pop().expect("block was just appended");
            if let Some(signer) = block.signer_id() {
                let penalty = self.reputation.config().invalid_block_penalty;
                self.reputation.observe(&signer);
                self.reputation.punish(&signer, penalty);
            }
            warn!(block_id = block.block_id, error = %err, "rejected incoming block");
            return BlockOutcome::Rejected(err);
        }

        let adopted = self.last_block().clone();
        if let Some(signer) = adopted.signer_id() {
            self.reputation.observe(&signer);
        }
        self.pending
            .retain(|tx| !adopted.transactions.contains(tx));
        self.reward_superseded_candidates(&adopted);
        self.save_adopted(&adopted);

        info!(
            block_id = adopted.block_id,
            txs = adopted.transactions.len(),
            "adopted block"
        );
        BlockOutcome::Adopted
    }

    /// Records a pre-announced candidate block.
    ///
    /// Candidates never enter the chain; they only queue their signer for
    /// a reward once a canonical block supersedes them. Candidates that do
    /// not verify are dropped, and the drop is reported to the caller.
    pub fn receive_candidate(&mut self, block: Block) -> bool {
        if !block.verify() {
            debug!(block_id = block.block_id, "dropped unverifiable candidate");
            return false;
        }
        if let Some(signer) = block.signer_id() {
            self.reputation.observe(&signer);
        }
        self.candidates.push(block);
        true
    }

    fn evict_invalid_pending(&mut self) -> Vec<Transaction> {
        let penalty = self.reputation.config().invalid_tx_penalty;
        let mut evicted = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());

        for tx in std::mem::take(&mut self.pending) {
            if tx.verify() {
                kept.push(tx);
            } else {
                let author = tx.author_id();
                warn!(author = author.short(), "evicting invalid pending transaction");
                self.reputation.observe(&author);
                self.reputation.punish(&author, penalty);
                evicted.push(tx);
            }
        }

        self.pending = kept;
        evicted
    }

    /// Rewards candidates the adopted block supersedes and retires them,
    /// so a later adoption cannot pay the same proposal twice.
    fn reward_superseded_candidates(&mut self, adopted: &Block) {
        let reward = self.reputation.config().candidate_reward;
        let mut remaining = Vec::with_capacity(self.candidates.len());

        for candidate in std::mem::take(&mut self.candidates) {
            if candidate.created_at < adopted.created_at {
                if let Some(signer) = candidate.signer_id() {
                    self.reputation.reward(&signer, reward);
                }
            } else {
                remaining.push(candidate);
            }
        }

        self.candidates = remaining;
    }

    fn save_adopted(&mut self, block: &Block) {
        if let Err(err) = self.sink.save(block) {
            warn!(block_id = block.block_id, error = %err, "persistence hook failed");
        }
    }
}
