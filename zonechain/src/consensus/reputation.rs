//! Peer reputation bookkeeping.
//!
//! Every peer keeps a local, in-memory score per known peer identity.
//! Scores gate leadership eligibility and absorb the consequences of
//! observed behavior: invalid transactions and rejected blocks push a
//! score down, honest proposals push it up. Nothing here is consensus
//! state; two peers' tables converge only through observing the same
//! events.

use std::collections::HashMap;

use tracing::debug;

use crate::types::PeerId;

use super::config::ReputationConfig;

/// Bounded per-peer score table.
///
/// Scores are clamped into `[0, score_cap]`. Entries are created lazily at
/// the configured initial score the first time a peer is observed, and are
/// removed only by explicit administrative action.
#[derive(Clone, Debug)]
pub struct ReputationTracker {
    config: ReputationConfig,
    scores: HashMap<PeerId, u32>,
}

impl ReputationTracker {
    /// Creates an empty tracker.
    pub fn new(config: ReputationConfig) -> Self {
        Self {
            config,
            scores: HashMap::new(),
        }
    }

    /// Returns the tracker configuration.
    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Ensures `peer` has an entry, creating it at the initial score.
    pub fn observe(&mut self, peer: &PeerId) {
        self.scores
            .entry(peer.clone())
            .or_insert(self.config.initial_score);
    }

    /// Current score of `peer`, if it has ever been observed.
    pub fn get(&self, peer: &PeerId) -> Option<u32> {
        self.scores.get(peer).copied()
    }

    /// True if `peer` meets the leadership eligibility threshold.
    pub fn is_eligible(&self, peer: &PeerId) -> bool {
        self.get(peer)
            .is_some_and(|score| score >= self.config.eligibility_threshold)
    }

    /// Adds `amount` to the peer's score, clamped to the cap. A zero
    /// amount is a no-op.
    pub fn reward(&mut self, peer: &PeerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let initial = self.config.initial_score;
        let entry = self.scores.entry(peer.clone()).or_insert(initial);
        *entry = entry.saturating_add(amount).min(self.config.score_cap);
        debug!(peer = peer.short(), score = *entry, "REWARD");
    }

    /// Subtracts `amount` from the peer's score, clamped to zero. A zero
    /// amount is a no-op.
    pub fn punish(&mut self, peer: &PeerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let initial = self.config.initial_score;
        let entry = self.scores.entry(peer.clone()).or_insert(initial);
        *entry = entry.saturating_sub(amount);
        debug!(peer = peer.short(), score = *entry, "PUNISH");
    }

    /// Bootstrap support: lifts `peer` to the eligibility threshold if it
    /// is currently below it.
    pub fn grant_eligibility(&mut self, peer: &PeerId) {
        let initial = self.config.initial_score;
        let threshold = self.config.eligibility_threshold;
        let entry = self.scores.entry(peer.clone()).or_insert(initial);
        if *entry < threshold {
            *entry = threshold;
        }
    }

    /// Known peers, in unspecified order.
    pub fn peers(&self) -> impl Iterator<Item = &PeerId> {
        self.scores.keys()
    }

    /// Number of known peers.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if no peer has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Administrative removal of a peer. Returns its last score.
    pub fn remove(&mut self, peer: &PeerId) -> Option<u32> {
        self.scores.remove(peer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(name: &str) -> PeerId {
        PeerId(name.to_string())
    }

    fn tracker() -> ReputationTracker {
        ReputationTracker::new(ReputationConfig::default())
    }

    #[test]
    fn observation_is_lazy_and_idempotent() {
        let mut t = tracker();
        assert_eq!(t.get(&peer("a")), None);

        t.observe(&peer("a"));
        assert_eq!(t.get(&peer("a")), Some(0));

        t.reward(&peer("a"), 3);
        t.observe(&peer("a"));
        assert_eq!(t.get(&peer("a")), Some(3));
    }

    #[test]
    fn reward_clamps_to_cap() {
        let mut t = tracker();
        for _ in 0..100 {
            t.reward(&peer("a"), 7);
        }
        assert_eq!(t.get(&peer("a")), Some(t.config().score_cap));
    }

    #[test]
    fn punish_clamps_to_zero() {
        let mut t = tracker();
        t.reward(&peer("a"), 4);
        for _ in 0..100 {
            t.punish(&peer("a"), 3);
        }
        assert_eq!(t.get(&peer("a")), Some(0));
    }

    #[test]
    fn zero_amounts_are_no_ops() {
        let mut t = tracker();
        t.reward(&peer("a"), 0);
        t.punish(&peer("a"), 0);
        // No entry was even created.
        assert_eq!(t.get(&peer("a")), None);
    }

    #[test]
    fn eligibility_follows_threshold() {
        let mut t = tracker();
        let threshold = t.config().eligibility_threshold;

        assert!(!t.is_eligible(&peer("a")));
        t.reward(&peer("a"), threshold - 1);
        assert!(!t.is_eligible(&peer("a")));
        t.reward(&peer("a"), 1);
        assert!(t.is_eligible(&peer("a")));
    }

    #[test]
    fn grant_eligibility_never_lowers_a_score() {
        let mut t = tracker();
        let threshold = t.config().eligibility_threshold;

        t.grant_eligibility(&peer("cold"));
        assert_eq!(t.get(&peer("cold")), Some(threshold));

        t.reward(&peer("hot"), threshold + 5);
        t.grant_eligibility(&peer("hot"));
        assert_eq!(t.get(&peer("hot")), Some(threshold + 5));
    }
}
