//! Transaction bodies submitted during roster keying
//!
//! Two kinds of transaction flow through the submission machinery: a TSS
//! message (one node's contribution of encrypted share material toward
//! keying the target roster) and a TSS vote (a node's attestation of which
//! message set yields the ledger id). Both are built identically apart from
//! the payload; identity and dedup are carried entirely by the
//! `(payer, valid_start)` transaction id.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, RosterHash, Timestamp};
use std::time::Duration;

/// Unique identity of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub payer: AccountId,
    pub valid_start: Timestamp,
}

/// Encrypted share material contributed toward keying the target roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TssMessageBody {
    pub source_roster_hash: RosterHash,
    pub target_roster_hash: RosterHash,
    /// Index of the private share this message was generated from.
    pub share_index: u32,
    /// Opaque payload produced by the TSS library.
    pub message: Vec<u8>,
}

/// A node's vote on the message set that keys the target roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TssVoteBody {
    pub source_roster_hash: RosterHash,
    pub target_roster_hash: RosterHash,
    /// Ledger id recoverable from the voted-for message set.
    pub ledger_id: Vec<u8>,
    /// The voting node's signature over the ledger id.
    pub node_signature: Vec<u8>,
    /// Bit set selecting the threshold message set.
    pub vote: Vec<u8>,
}

/// The two payload kinds the submission machinery carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPayload {
    TssMessage(TssMessageBody),
    TssVote(TssVoteBody),
}

impl TransactionPayload {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransactionPayload::TssMessage(_) => "tss_message",
            TransactionPayload::TssVote(_) => "tss_vote",
        }
    }
}

/// A fully-built transaction ready for the gossip channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub id: TransactionId,
    /// How long past `valid_start` the platform may still accept this
    /// transaction.
    pub valid_duration: Duration,
    pub payload: TransactionPayload,
}
