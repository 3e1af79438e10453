//! Proportional TSS share allocation
//!
//! A fixed per-node cap (`max_shares_per_node`) anchors the allocation: the
//! heaviest roster member receives exactly the cap, and every other member
//! receives a proportionally scaled count. Share counts then become
//! contiguous blocks of share ids, assigned in roster entry order, and the
//! blocks plus a strict-majority signing threshold form the participant
//! directory.

use crate::domain::directory::{
    ParticipantDirectory, PrivateShareKey, PublicShareKey, ShareId, SignatureSchema,
};
use crate::error::RosterResult;
use shared_types::{NodeId, Roster, RosterEntry};

/// Number of shares allocated to one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeShareCount {
    pub node_id: NodeId,
    pub shares: u32,
}

/// Scale every member's weight onto `0..=max_shares_per_node`, anchored at
/// the heaviest member. Counts are rounded up, so any member with positive
/// weight holds at least one share. Preserves entry order.
///
/// An empty roster yields an empty allocation, and a roster whose members
/// all weigh zero yields all-zero counts; neither case is an error.
pub fn compute_node_shares(entries: &[RosterEntry], max_shares_per_node: u32) -> Vec<NodeShareCount> {
    let max_weight = entries.iter().map(|e| e.weight).max().unwrap_or(0);
    if max_weight == 0 {
        return entries
            .iter()
            .map(|e| NodeShareCount {
                node_id: e.node_id,
                shares: 0,
            })
            .collect();
    }
    entries
        .iter()
        .map(|e| {
            let scaled = u128::from(e.weight) * u128::from(max_shares_per_node);
            // weight <= max_weight, so the quotient fits in u32.
            let shares = scaled.div_ceil(u128::from(max_weight)) as u32;
            NodeShareCount {
                node_id: e.node_id,
                shares,
            }
        })
        .collect()
}

/// Strict majority of `total_shares`: the smallest count greater than half.
/// Zero shares degenerate to a zero threshold.
pub fn tss_message_threshold(total_shares: u32) -> u32 {
    if total_shares == 0 {
        0
    } else {
        total_shares / 2 + 1
    }
}

/// Build the participant directory for `roster`.
///
/// Each member's shares occupy one contiguous block of ids, blocks laid out
/// in roster entry order starting at zero. Every share carries the owning
/// member's TSS encryption key as public material; the block belonging to
/// `self_node_id` is additionally marked owned and carries
/// `self_encryption_key` as private material. A `self_node_id` absent from
/// the roster yields a directory with no owned shares.
pub fn compute_participant_directory(
    roster: &Roster,
    max_shares_per_node: u32,
    self_node_id: NodeId,
    self_encryption_key: &PrivateShareKey,
) -> RosterResult<ParticipantDirectory> {
    let counts = compute_node_shares(&roster.entries, max_shares_per_node);
    let total_shares: u32 = counts.iter().map(|c| c.shares).sum();

    let mut builder =
        ParticipantDirectory::builder().with_threshold(tss_message_threshold(total_shares));
    let mut next_share_id = 0u32;
    for (entry, count) in roster.entries.iter().zip(&counts) {
        for offset in 0..count.shares {
            let share_id = ShareId(next_share_id + offset);
            builder = builder.with_participant(
                share_id,
                entry.node_id,
                PublicShareKey::new(entry.tss_encryption_key.clone()),
            );
            if entry.node_id == self_node_id {
                builder = builder.with_self(share_id, self_encryption_key.clone());
            }
        }
        next_share_id += count.shares;
    }
    builder.build(SignatureSchema::default())
}
