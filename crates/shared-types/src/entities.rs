//! # Core Domain Entities
//!
//! Identity and time primitives used across all subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `NodeId`, `AccountId`
//! - **Time**: `Timestamp` (consensus time), measured in seconds + nanos

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a consensus node within a roster.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Ledger account identifier, used as the payer of submitted transactions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account{}", self.0)
    }
}

/// A point in consensus time.
///
/// Consensus time is assigned by the platform, is strictly monotonic per
/// round, and is the basis of transaction-id uniqueness: two transactions
/// from the same payer with the same `valid_start` are duplicates.
///
/// `nanos` is always normalized to `0..1_000_000_000`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Nanosecond remainder, `< 1_000_000_000`.
    pub nanos: u32,
}

const NANOS_PER_SECOND: u64 = 1_000_000_000;

impl Timestamp {
    /// Create a timestamp, carrying any nanosecond overflow into seconds.
    pub fn new(seconds: i64, nanos: u64) -> Self {
        Self {
            seconds: seconds.saturating_add((nanos / NANOS_PER_SECOND) as i64),
            nanos: (nanos % NANOS_PER_SECOND) as u32,
        }
    }

    /// This timestamp shifted forward by `nanos` nanoseconds.
    pub fn plus_nanos(self, nanos: u64) -> Self {
        Self::new(self.seconds, u64::from(self.nanos) + nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}
