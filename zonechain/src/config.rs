//! Top-level configuration for a ledger node.
//!
//! This aggregates the sub-configs a typical node needs. Higher-level
//! binaries can construct it from defaults, config files, or environment
//! variables as needed; every peer in a deployment must share the same
//! consensus and reputation parameters for elections to line up.

use crate::consensus::{ConsensusConfig, ReputationConfig};

/// Aggregated configuration for a ledger node.
#[derive(Clone, Debug, Default)]
pub struct NodeConfig {
    /// Consensus tuning: trigger cadence and block limits.
    pub consensus: ConsensusConfig,
    /// Reputation thresholds, caps, and reward/penalty amounts.
    pub reputation: ReputationConfig,
}
