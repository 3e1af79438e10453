//! Transaction submission with classified retries
//!
//! Keying a roster floods the network with TSS messages and votes, and the
//! platform pushes back in three distinct ways: a transaction id collision,
//! a transaction it will never accept, and a platform that simply is not
//! ready yet. Each classification gets its own recovery:
//!
//! ```text
//! submit ──→ [attempt at nano_offset]
//!                │
//!                ├── accepted ─────────────→ resolve Ok
//!                ├── duplicate id ─────────→ nano_offset += skip, retry now
//!                │                           (up to distinct_txn_ids_to_try offsets)
//!                ├── invalid ──────────────→ resolve Err immediately
//!                └── not ready ────────────→ sleep(retry_delay), same offset
//!                                            (up to times_to_try_submission attempts)
//! ```
//!
//! The retry loop runs on a caller-supplied runtime handle, never on the
//! calling thread, and the delay between not-ready retries is a scheduled
//! timer rather than a blocking sleep, so concurrent submissions cannot
//! starve the pool. Aborting the returned handle stops scheduling further
//! attempts; an attempt already on the wire is not recalled.

use crate::domain::{
    TransactionBody, TransactionId, TransactionPayload, TssMessageBody, TssVoteBody,
};
use crate::error::SubmissionError;
use crate::metrics;
use crate::ports::inbound::TssSubmissionApi;
use crate::ports::outbound::{GossipChannel, GossipError, SubmissionContext};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Retry policy knobs.
#[derive(Clone, Debug)]
pub struct SubmissionConfig {
    /// Attempts allowed at one transaction id while the platform is not
    /// ready, including the first.
    pub times_to_try_submission: u32,
    /// Distinct transaction ids to try against duplicate collisions,
    /// including the first.
    pub distinct_txn_ids_to_try: u32,
    /// Pause between not-ready retries.
    pub retry_delay: Duration,
    /// Valid-start shift applied per duplicate collision.
    pub nanos_to_skip_on_duplicate: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            times_to_try_submission: 10,
            distinct_txn_ids_to_try: 10,
            retry_delay: Duration::from_secs(1),
            nanos_to_skip_on_duplicate: 1_000,
        }
    }
}

/// The pending outcome of one submission. Aborting it cancels any attempts
/// not yet started.
pub type SubmissionHandle = JoinHandle<Result<(), SubmissionError>>;

/// Submits TSS transactions through the gossip channel, absorbing duplicate
/// and transient failures per [`SubmissionConfig`].
pub struct SubmissionRetrier<G, C>
where
    G: GossipChannel + 'static,
    C: SubmissionContext + 'static,
{
    gossip: Arc<G>,
    context: Arc<C>,
    config: SubmissionConfig,
    runtime: Handle,
}

impl<G, C> SubmissionRetrier<G, C>
where
    G: GossipChannel + 'static,
    C: SubmissionContext + 'static,
{
    pub fn new(gossip: Arc<G>, context: Arc<C>, config: SubmissionConfig, runtime: Handle) -> Self {
        Self {
            gossip,
            context,
            config,
            runtime,
        }
    }

    /// Submit one TSS message. Returns immediately; the retry loop runs on
    /// the worker pool.
    pub fn submit_tss_message(&self, body: TssMessageBody) -> SubmissionHandle {
        self.spawn(TransactionPayload::TssMessage(body))
    }

    /// Submit one TSS vote. Returns immediately; the retry loop runs on
    /// the worker pool.
    pub fn submit_tss_vote(&self, body: TssVoteBody) -> SubmissionHandle {
        self.spawn(TransactionPayload::TssVote(body))
    }

    fn spawn(&self, payload: TransactionPayload) -> SubmissionHandle {
        let gossip = Arc::clone(&self.gossip);
        let context = Arc::clone(&self.context);
        let config = self.config.clone();
        self.runtime
            .spawn(async move { drive_submission(gossip, context, config, payload).await })
    }
}

#[async_trait]
impl<G, C> TssSubmissionApi for SubmissionRetrier<G, C>
where
    G: GossipChannel + 'static,
    C: SubmissionContext + 'static,
{
    async fn submit_message(&self, body: TssMessageBody) -> Result<(), SubmissionError> {
        match self.submit_tss_message(body).await {
            Ok(outcome) => outcome,
            Err(_join) => Err(SubmissionError::Cancelled),
        }
    }

    async fn submit_vote(&self, body: TssVoteBody) -> Result<(), SubmissionError> {
        match self.submit_tss_vote(body).await {
            Ok(outcome) => outcome,
            Err(_join) => Err(SubmissionError::Cancelled),
        }
    }
}

async fn drive_submission<G: GossipChannel, C: SubmissionContext>(
    gossip: Arc<G>,
    context: Arc<C>,
    config: SubmissionConfig,
    payload: TransactionPayload,
) -> Result<(), SubmissionError> {
    let submission = Uuid::new_v4();
    let kind = payload.kind();
    let payer = context.self_node_account_id();
    let valid_duration = context.max_valid_duration();
    // Captured once: not-ready retries must reuse the identical id, so the
    // base never tracks a consensus clock that keeps moving.
    let base_valid_start = context.consensus_now();

    let mut nano_offset: u64 = 0;
    let mut offsets_tried: u32 = 1;
    let mut attempts_at_offset: u32 = 0;
    loop {
        let transaction = TransactionBody {
            id: TransactionId {
                payer,
                valid_start: base_valid_start.plus_nanos(nano_offset),
            },
            valid_duration,
            payload: payload.clone(),
        };
        attempts_at_offset += 1;
        metrics::record_submission_attempt();

        match gossip.submit(&transaction).await {
            Ok(()) => {
                debug!("[roster] submission {submission}: {kind} accepted at offset {nano_offset}");
                metrics::record_submission_success();
                return Ok(());
            }
            Err(GossipError::DuplicateTransaction) => {
                if offsets_tried >= config.distinct_txn_ids_to_try {
                    warn!(
                        "[roster] submission {submission}: no unused {kind} transaction id \
                         after {offsets_tried} tries"
                    );
                    metrics::record_submission_failure("duplicate_ids_exhausted");
                    return Err(SubmissionError::DuplicateIdsExhausted {
                        attempts: offsets_tried,
                    });
                }
                offsets_tried += 1;
                attempts_at_offset = 0;
                nano_offset += config.nanos_to_skip_on_duplicate;
                debug!(
                    "[roster] submission {submission}: duplicate {kind} id, \
                     shifting valid-start to offset {nano_offset}"
                );
            }
            Err(error @ GossipError::InvalidTransaction { .. }) => {
                warn!("[roster] submission {submission}: {kind} rejected: {error}");
                metrics::record_submission_failure("rejected");
                return Err(SubmissionError::Rejected(error));
            }
            Err(GossipError::PlatformNotReady { reason }) => {
                if attempts_at_offset >= config.times_to_try_submission {
                    warn!(
                        "[roster] submission {submission}: platform still not ready \
                         after {attempts_at_offset} attempts ({reason})"
                    );
                    metrics::record_submission_failure("retries_exhausted");
                    return Err(SubmissionError::RetriesExhausted {
                        attempts: attempts_at_offset,
                    });
                }
                debug!(
                    "[roster] submission {submission}: platform not ready ({reason}), \
                     retrying in {:?}",
                    config.retry_delay
                );
                tokio::time::sleep(config.retry_delay).await;
            }
        }
    }
}
