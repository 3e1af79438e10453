//! Gossip channel adapter over the platform ingest queue
//!
//! Implements the `GossipChannel` port by handing transactions to the
//! platform's bounded ingest queue. Classification mirrors the platform's
//! behavior: a transaction id seen before is a duplicate, and a full or
//! closed queue means the platform cannot accept submissions right now.

use crate::domain::{TransactionBody, TransactionId};
use crate::ports::outbound::{GossipChannel, GossipError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::trace;

/// Submission channel backed by a `tokio::sync::mpsc` ingest queue.
pub struct QueuedGossipChannel {
    queue: mpsc::Sender<TransactionBody>,
    seen_ids: Mutex<HashSet<TransactionId>>,
}

impl QueuedGossipChannel {
    pub fn new(queue: mpsc::Sender<TransactionBody>) -> Self {
        Self {
            queue,
            seen_ids: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl GossipChannel for QueuedGossipChannel {
    async fn submit(&self, transaction: &TransactionBody) -> Result<(), GossipError> {
        if transaction.valid_duration.is_zero() {
            return Err(GossipError::InvalidTransaction {
                reason: "valid duration must be positive".to_string(),
            });
        }
        if self.seen_ids.lock().contains(&transaction.id) {
            return Err(GossipError::DuplicateTransaction);
        }
        match self.queue.try_send(transaction.clone()) {
            Ok(()) => {
                // Only an accepted transaction reserves its id.
                self.seen_ids.lock().insert(transaction.id);
                trace!(
                    "[roster] {} accepted by ingest queue",
                    transaction.payload.kind()
                );
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(GossipError::PlatformNotReady {
                reason: "ingest queue full".to_string(),
            }),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(GossipError::PlatformNotReady {
                reason: "ingest queue closed".to_string(),
            }),
        }
    }
}
