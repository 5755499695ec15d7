/// Consensus engine parameters.
#[derive(Clone, Debug)]
pub struct ConsensusConfig {
    /// Target interval between shared mining triggers, in seconds.
    pub block_time_secs: u64,
    /// Soft cap on the number of pending transactions consumed per block.
    pub max_block_txs: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            block_time_secs: 5,
            max_block_txs: 10_000,
        }
    }
}

/// Reputation bookkeeping parameters.
///
/// Thresholds, caps, and amounts are configuration rather than protocol
/// constants; all peers in a deployment must agree on them for elections
/// to line up.
#[derive(Clone, Debug)]
pub struct ReputationConfig {
    /// Score assigned when a peer is first observed.
    pub initial_score: u32,
    /// Minimum score required for leadership eligibility.
    pub eligibility_threshold: u32,
    /// Upper clamp applied by rewards.
    pub score_cap: u32,
    /// Penalty for a transaction whose signature fails verification.
    pub invalid_tx_penalty: u32,
    /// Penalty for an invalid or rejected block.
    pub invalid_block_penalty: u32,
    /// Reward for a pre-announced candidate block superseded by an
    /// adopted canonical block.
    pub candidate_reward: u32,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            initial_score: 0,
            eligibility_threshold: 15,
            score_cap: 30,
            invalid_tx_penalty: 2,
            invalid_block_penalty: 5,
            candidate_reward: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internally_consistent() {
        let cfg = ReputationConfig::default();
        assert!(cfg.eligibility_threshold <= cfg.score_cap);
        assert!(cfg.initial_score <= cfg.score_cap);
    }
}
