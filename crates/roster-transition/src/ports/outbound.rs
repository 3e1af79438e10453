//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::TransactionBody;
use async_trait::async_trait;
use shared_types::{AccountId, Roster, RosterHash, Timestamp};
use std::time::Duration;
use thiserror::Error;

/// Read side of the roster store.
///
/// The store hands back point-in-time-consistent snapshots per call; this
/// subsystem never writes through it. A current roster always exists once
/// the node has a state, so `current_hash` is not optional.
pub trait RosterStore: Send + Sync {
    /// Hash of the roster currently governing consensus.
    fn current_hash(&self) -> RosterHash;

    /// Hash of the roster still retiring after an adoption, while one is.
    fn previous_hash(&self) -> Option<RosterHash>;

    /// Hash of the candidate roster being keyed toward, while one is set.
    fn candidate_hash(&self) -> Option<RosterHash>;

    /// Resolve any hash to its roster. `None` means definitely absent;
    /// callers decide whether absence is tolerable.
    fn lookup(&self, hash: &RosterHash) -> Option<Roster>;
}

/// How the platform classified a rejected submission.
///
/// The classification drives the retry policy: duplicates get a fresh
/// transaction id, invalid transactions are terminal, and a not-ready
/// platform is worth waiting out.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GossipError {
    /// A transaction with the same id was already submitted
    #[error("transaction id already submitted")]
    DuplicateTransaction,

    /// The transaction itself is malformed or unacceptable
    #[error("transaction rejected: {reason}")]
    InvalidTransaction { reason: String },

    /// The local platform cannot accept submissions right now
    #[error("platform not ready: {reason}")]
    PlatformNotReady { reason: String },
}

/// Submission channel into the gossip layer.
#[async_trait]
pub trait GossipChannel: Send + Sync {
    /// Hand one transaction to the platform for gossip and consensus.
    async fn submit(&self, transaction: &TransactionBody) -> Result<(), GossipError>;
}

/// Ambient facts a submission is built from.
pub trait SubmissionContext: Send + Sync {
    /// The latest consensus time known to this node.
    fn consensus_now(&self) -> Timestamp;

    /// The account this node pays transaction fees from.
    fn self_node_account_id(&self) -> AccountId;

    /// The configured upper bound on a transaction's validity window.
    fn max_valid_duration(&self) -> Duration;
}
