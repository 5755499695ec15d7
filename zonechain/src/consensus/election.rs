//! Leader election strategies.
//!
//! Proof-of-authentication rotates leadership between reputation-eligible
//! peers on one-second time slots measured from the shared genesis
//! timestamp. Election is best-effort: peer views can diverge transiently,
//! and the chain validator — not the election — is the final authority on
//! which blocks are accepted.

use crate::types::PeerId;

use super::reputation::ReputationTracker;

/// Pluggable leader-election seam.
///
/// Implementations must be deterministic: two peers holding the same peer
/// set and score snapshot, evaluating within the same one-second window,
/// must elect the same leader.
pub trait ElectionStrategy {
    /// Elects a leader for the slot containing `now`.
    ///
    /// May mutate the tracker: the bootstrap rule lifts a peer to the
    /// eligibility threshold when nobody qualifies. Returns `None` only
    /// when no peers are known at all.
    fn elect(
        &self,
        reputation: &mut ReputationTracker,
        genesis_time: u64,
        now: u64,
    ) -> Option<PeerId>;
}

/// Time-sliced proof-of-authentication.
///
/// Eligible peers are sorted lexicographically and the slot index
/// `floor(now - genesis_time) mod n` picks the leader. When no peer meets
/// the threshold, the lexicographically smallest known peer is promoted to
/// the threshold and elected, which guarantees liveness from a cold or
/// under-trusted start.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeSlicedPoah;

impl ElectionStrategy for TimeSlicedPoah {
    fn elect(
        &self,
        reputation: &mut ReputationTracker,
        genesis_time: u64,
        now: u64,
    ) -> Option<PeerId> {
        let mut eligible: Vec<PeerId> = reputation
            .peers()
            .filter(|&peer| reputation.is_eligible(peer))
            .cloned()
            .collect();

        if eligible.is_empty() {
            let mut known: Vec<PeerId> = reputation.peers().cloned().collect();
            known.sort();
            let first = known.into_iter().next()?;
            reputation.grant_eligibility(&first);
            return Some(first);
        }

        eligible.sort();
        let slot = now.saturating_sub(genesis_time) as usize % eligible.len();
        Some(eligible.swap_remove(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::config::ReputationConfig;

    const GENESIS: u64 = 1_000;

    fn peer(name: &str) -> PeerId {
        PeerId(name.to_string())
    }

    fn tracker_with(eligible: &[&str], cold: &[&str]) -> ReputationTracker {
        let config = ReputationConfig::default();
        let threshold = config.eligibility_threshold;
        let mut t = ReputationTracker::new(config);
        for name in eligible {
            t.reward(&peer(name), threshold);
        }
        for name in cold {
            t.observe(&peer(name));
        }
        t
    }

    #[test]
    fn same_snapshot_same_slot_same_leader() {
        let strategy = TimeSlicedPoah;
        let mut first = tracker_with(&["b", "a", "c"], &[]);
        let mut second = first.clone();

        let now = GENESIS + 7;
        assert_eq!(
            strategy.elect(&mut first, GENESIS, now),
            strategy.elect(&mut second, GENESIS, now)
        );
    }

    #[test]
    fn leadership_rotates_across_slots() {
        let strategy = TimeSlicedPoah;
        let mut t = tracker_with(&["a", "b", "c"], &[]);

        let leaders: Vec<PeerId> = (0..3)
            .map(|slot| strategy.elect(&mut t, GENESIS, GENESIS + slot).expect("leader"))
            .collect();

        assert_eq!(leaders, vec![peer("a"), peer("b"), peer("c")]);
        // One full rotation later the cycle repeats.
        assert_eq!(
            strategy.elect(&mut t, GENESIS, GENESIS + 3),
            Some(peer("a"))
        );
    }

    #[test]
    fn ineligible_peers_are_never_elected() {
        let strategy = TimeSlicedPoah;
        let mut t = tracker_with(&["b"], &["a", "z"]);

        for slot in 0..10 {
            let leader = strategy.elect(&mut t, GENESIS, GENESIS + slot).expect("leader");
            assert_eq!(leader, peer("b"));
        }
    }

    #[test]
    fn bootstrap_promotes_smallest_known_peer() {
        let strategy = TimeSlicedPoah;
        let mut t = tracker_with(&[], &["m", "b", "x"]);

        let leader = strategy.elect(&mut t, GENESIS, GENESIS + 4).expect("leader");
        assert_eq!(leader, peer("b"));
        assert!(t.is_eligible(&peer("b")));

        // With an eligible peer in place, the bootstrap rule stops firing.
        let again = strategy.elect(&mut t, GENESIS, GENESIS + 5).expect("leader");
        assert_eq!(again, peer("b"));
    }

    #[test]
    fn empty_tracker_elects_nobody() {
        let strategy = TimeSlicedPoah;
        let mut t = ReputationTracker::new(ReputationConfig::default());
        assert_eq!(strategy.elect(&mut t, GENESIS, GENESIS), None);
    }
}
