//! Weighted quorum thresholds over a roster transition
//!
//! During an epoch change two rosters matter at once: the outgoing
//! ("source") roster whose strong minority can still block unsafe progress,
//! and the incoming ("target") roster whose supermajority must ratify the
//! change. `TransitionWeights` snapshots both weight distributions and
//! derives the two thresholds with pure integer arithmetic.

use shared_types::{NodeId, Roster};
use std::collections::{BTreeSet, HashMap};

/// One node's voting weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeWeight {
    pub node_id: NodeId,
    pub weight: u64,
}

/// Smallest weight `k` with `3k >= total_weight`: the strong-minority
/// bound. Any group holding at least this much weight can block progress.
///
/// Holds for all inputs including zero, where the bound degenerates to zero.
pub fn at_least_one_third_of_total(total_weight: u64) -> u64 {
    total_weight.div_ceil(3)
}

/// Smallest weight `k` with `3k > 2 * total_weight`: the supermajority
/// bound required to ratify a transition.
///
/// A total of zero yields zero; a roster with no weight has no
/// supermajority to speak of.
pub fn more_than_two_thirds_of_total(total_weight: u64) -> u64 {
    if total_weight == 0 {
        return 0;
    }
    total_weight
        .checked_mul(2)
        .map(|doubled| doubled / 3 + 1)
        .unwrap_or_else(|| (total_weight / 3).saturating_mul(2).saturating_add(1))
}

/// Immutable snapshot of the source and target weight distributions of a
/// roster transition, plus the derived quorum thresholds.
///
/// Only constructible from two fully resolved rosters; it never holds a
/// partial view. Entry order of each roster is preserved for the `ordered_*`
/// accessors, while the keyed maps serve point lookups.
#[derive(Clone, Debug)]
pub struct TransitionWeights {
    source_weights: HashMap<NodeId, u64>,
    target_weights: HashMap<NodeId, u64>,
    ordered_source_weights: Vec<NodeWeight>,
    ordered_target_weights: Vec<NodeWeight>,
    total_source_weight: u64,
    total_target_weight: u64,
}

impl TransitionWeights {
    /// Snapshot the weight distributions of `source` and `target`.
    ///
    /// For a bootstrap self-transition, pass the same roster twice.
    pub fn from_rosters(source: &Roster, target: &Roster) -> Self {
        let ordered_source_weights: Vec<NodeWeight> = source
            .entries
            .iter()
            .map(|e| NodeWeight {
                node_id: e.node_id,
                weight: e.weight,
            })
            .collect();
        let ordered_target_weights: Vec<NodeWeight> = target
            .entries
            .iter()
            .map(|e| NodeWeight {
                node_id: e.node_id,
                weight: e.weight,
            })
            .collect();
        let source_weights = ordered_source_weights
            .iter()
            .map(|w| (w.node_id, w.weight))
            .collect();
        let target_weights = ordered_target_weights
            .iter()
            .map(|w| (w.node_id, w.weight))
            .collect();
        Self {
            source_weights,
            target_weights,
            total_source_weight: source.total_weight(),
            total_target_weight: target.total_weight(),
            ordered_source_weights,
            ordered_target_weights,
        }
    }

    /// Weight of `node_id` in the source roster; zero if not a member.
    pub fn source_weight_of(&self, node_id: NodeId) -> u64 {
        self.source_weights.get(&node_id).copied().unwrap_or(0)
    }

    /// Weight of `node_id` in the target roster; zero if not a member.
    pub fn target_weight_of(&self, node_id: NodeId) -> u64 {
        self.target_weights.get(&node_id).copied().unwrap_or(0)
    }

    /// Whether `node_id` is a member of the target roster.
    pub fn target_includes(&self, node_id: NodeId) -> bool {
        self.target_weights.contains_key(&node_id)
    }

    /// Size of the intersection between `node_ids` and the target roster's
    /// membership.
    pub fn num_target_nodes_in(&self, node_ids: &BTreeSet<NodeId>) -> usize {
        node_ids
            .iter()
            .filter(|id| self.target_weights.contains_key(id))
            .count()
    }

    /// Strong-minority threshold of the source roster.
    pub fn source_weight_threshold(&self) -> u64 {
        at_least_one_third_of_total(self.total_source_weight)
    }

    /// Supermajority threshold of the target roster.
    pub fn target_weight_threshold(&self) -> u64 {
        more_than_two_thirds_of_total(self.total_target_weight)
    }

    /// Source weights keyed by node id.
    pub fn source_node_weights(&self) -> &HashMap<NodeId, u64> {
        &self.source_weights
    }

    /// Target weights keyed by node id.
    pub fn target_node_weights(&self) -> &HashMap<NodeId, u64> {
        &self.target_weights
    }

    /// Source weights in original roster entry order.
    pub fn ordered_source_weights(&self) -> &[NodeWeight] {
        &self.ordered_source_weights
    }

    /// Target weights in original roster entry order.
    pub fn ordered_target_weights(&self) -> &[NodeWeight] {
        &self.ordered_target_weights
    }
}
