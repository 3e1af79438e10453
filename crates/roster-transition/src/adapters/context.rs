//! Submission context adapter
//!
//! Implements the `SubmissionContext` port from the node's static identity
//! plus a consensus clock the platform advances as rounds reach consensus.

use crate::ports::outbound::SubmissionContext;
use parking_lot::RwLock;
use shared_types::{AccountId, Timestamp};
use std::time::Duration;

/// Context fed by the platform's consensus clock.
pub struct LedgerSubmissionContext {
    account_id: AccountId,
    max_valid_duration: Duration,
    consensus_clock: RwLock<Timestamp>,
}

impl LedgerSubmissionContext {
    pub fn new(account_id: AccountId, max_valid_duration: Duration, now: Timestamp) -> Self {
        Self {
            account_id,
            max_valid_duration,
            consensus_clock: RwLock::new(now),
        }
    }

    /// Advance the consensus clock. Consensus time never runs backwards, so
    /// an older timestamp is ignored.
    pub fn advance_consensus_time(&self, now: Timestamp) {
        let mut clock = self.consensus_clock.write();
        if now > *clock {
            *clock = now;
        }
    }
}

impl SubmissionContext for LedgerSubmissionContext {
    fn consensus_now(&self) -> Timestamp {
        *self.consensus_clock.read()
    }

    fn self_node_account_id(&self) -> AccountId {
        self.account_id
    }

    fn max_valid_duration(&self) -> Duration {
        self.max_valid_duration
    }
}
