//! # Submission Retry Integration Flows
//!
//! Pushes TSS messages and votes through the retry machinery, both against
//! the real queue-backed gossip adapter and against scripted failure
//! sequences, and checks every branch of the retry policy: success,
//! duplicate-id shifting, terminal rejection, not-ready backoff, and
//! cancellation.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use roster_transition::{
        GossipChannel, GossipError, LedgerSubmissionContext, QueuedGossipChannel,
        SubmissionConfig, SubmissionError, SubmissionRetrier, TransactionBody, TransactionId,
        TssMessageBody, TssSubmissionApi, TssVoteBody,
    };
    use shared_types::{AccountId, RosterHash, Timestamp};
    use tokio::runtime::Handle;
    use tokio::sync::mpsc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Gossip double that replays a scripted outcome per attempt and records
    /// every transaction it saw.
    struct ScriptedGossip {
        outcomes: Mutex<VecDeque<Result<(), GossipError>>>,
        attempts: Mutex<Vec<TransactionBody>>,
    }

    impl ScriptedGossip {
        fn new(outcomes: Vec<Result<(), GossipError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                attempts: Mutex::new(Vec::new()),
            })
        }

        fn not_ready() -> Result<(), GossipError> {
            Err(GossipError::PlatformNotReady {
                reason: "local node is still syncing".to_string(),
            })
        }

        fn attempt_count(&self) -> usize {
            self.attempts.lock().len()
        }

        fn attempt_ids(&self) -> Vec<TransactionId> {
            self.attempts.lock().iter().map(|t| t.id).collect()
        }
    }

    #[async_trait::async_trait]
    impl GossipChannel for ScriptedGossip {
        async fn submit(&self, transaction: &TransactionBody) -> Result<(), GossipError> {
            self.attempts.lock().push(transaction.clone());
            match self.outcomes.lock().pop_front() {
                Some(outcome) => outcome,
                None => Self::not_ready(),
            }
        }
    }

    fn context() -> Arc<LedgerSubmissionContext> {
        Arc::new(LedgerSubmissionContext::new(
            AccountId(3),
            Duration::from_secs(120),
            Timestamp::new(1_000, 0),
        ))
    }

    fn config() -> SubmissionConfig {
        SubmissionConfig {
            times_to_try_submission: 4,
            distinct_txn_ids_to_try: 2,
            retry_delay: Duration::from_millis(250),
            nanos_to_skip_on_duplicate: 1_000,
        }
    }

    fn message_body() -> TssMessageBody {
        TssMessageBody {
            source_roster_hash: RosterHash::default(),
            target_roster_hash: RosterHash::default(),
            share_index: 2,
            message: vec![0xAB; 16],
        }
    }

    fn vote_body() -> TssVoteBody {
        TssVoteBody {
            source_roster_hash: RosterHash::default(),
            target_roster_hash: RosterHash::default(),
            ledger_id: vec![0x1D; 48],
            node_signature: vec![0x51; 64],
            vote: vec![0b0000_0111],
        }
    }

    // =============================================================================
    // FLOWS AGAINST THE QUEUE-BACKED ADAPTER
    // =============================================================================

    #[tokio::test]
    async fn test_message_flows_into_the_ingest_queue_with_context_identity() {
        let (tx, mut rx) = mpsc::channel(16);
        let gossip = Arc::new(QueuedGossipChannel::new(tx));
        let retrier = SubmissionRetrier::new(gossip, context(), config(), Handle::current());

        retrier
            .submit_tss_message(message_body())
            .await
            .unwrap()
            .unwrap();

        let landed = rx.recv().await.unwrap();
        assert_eq!(landed.id.payer, AccountId(3));
        assert_eq!(landed.id.valid_start, Timestamp::new(1_000, 0));
        assert_eq!(landed.valid_duration, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_colliding_resubmission_lands_under_a_shifted_id() {
        let (tx, mut rx) = mpsc::channel(16);
        let gossip = Arc::new(QueuedGossipChannel::new(tx));
        let retrier = SubmissionRetrier::new(gossip, context(), config(), Handle::current());

        // Same consensus time, same payer: the second submission collides
        // with the first id and must land under a shifted valid-start.
        retrier
            .submit_tss_message(message_body())
            .await
            .unwrap()
            .unwrap();
        retrier
            .submit_tss_message(message_body())
            .await
            .unwrap()
            .unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.id.valid_start, Timestamp::new(1_000, 0));
        assert_eq!(second.id.valid_start, Timestamp::new(1_000, 1_000));
    }

    // =============================================================================
    // SCRIPTED RETRY BRANCHES
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_persistent_not_ready_fails_after_exactly_the_configured_attempts() {
        let gossip = ScriptedGossip::new(vec![]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        let outcome = retrier.submit_tss_vote(vote_body()).await.unwrap();
        assert_eq!(
            outcome,
            Err(SubmissionError::RetriesExhausted { attempts: 4 })
        );

        // Every attempt reused the identical transaction id.
        let ids = gossip.attempt_ids();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|id| *id == ids[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_then_invalid_stops_after_two_attempts() {
        let gossip = ScriptedGossip::new(vec![
            Err(GossipError::DuplicateTransaction),
            Err(GossipError::InvalidTransaction {
                reason: "insufficient payer balance".to_string(),
            }),
        ]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        let outcome = retrier.submit_tss_message(message_body()).await.unwrap();
        assert!(matches!(outcome, Err(SubmissionError::Rejected(_))));

        // Two attempts: the first id and one shifted id. The distinct-id
        // allowance had room for more, but rejection is terminal.
        let ids = gossip.attempt_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(
            ids[1].valid_start,
            Timestamp::new(1_000, 0).plus_nanos(1_000)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_ready_then_accepted_succeeds_without_a_new_id() {
        let gossip = ScriptedGossip::new(vec![ScriptedGossip::not_ready(), Ok(())]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        let outcome = retrier.submit_tss_vote(vote_body()).await.unwrap();
        assert_eq!(outcome, Ok(()));
        let ids = gossip.attempt_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_are_sequential_within_one_call() {
        // A duplicate storm must produce strictly increasing valid-starts,
        // never interleaved or reordered attempts.
        let gossip = ScriptedGossip::new(vec![
            Err(GossipError::DuplicateTransaction),
            Err(GossipError::DuplicateTransaction),
        ]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        let outcome = retrier.submit_tss_message(message_body()).await.unwrap();
        assert_eq!(
            outcome,
            Err(SubmissionError::DuplicateIdsExhausted { attempts: 2 })
        );
        let ids = gossip.attempt_ids();
        assert!(ids.windows(2).all(|w| w[0].valid_start < w[1].valid_start));
    }

    #[tokio::test]
    async fn test_inbound_api_awaits_the_terminal_outcome() {
        let gossip = ScriptedGossip::new(vec![Ok(()), Ok(())]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        let api: &dyn TssSubmissionApi = &retrier;
        api.submit_message(message_body()).await.unwrap();
        api.submit_vote(vote_body()).await.unwrap();
        assert_eq!(gossip.attempt_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborting_the_pending_result_stops_future_attempts() {
        let gossip = ScriptedGossip::new(vec![]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            SubmissionConfig {
                times_to_try_submission: 50,
                ..config()
            },
            Handle::current(),
        );

        let handle = retrier.submit_tss_message(message_body());
        while gossip.attempt_count() == 0 {
            tokio::task::yield_now().await;
        }
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        // Long after many retry delays would have elapsed, no further
        // attempt was scheduled.
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(gossip.attempt_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_calls_do_not_share_retry_state() {
        let gossip = ScriptedGossip::new(vec![
            Err(GossipError::DuplicateTransaction),
            Ok(()),
            Ok(()),
        ]);
        let retrier = SubmissionRetrier::new(
            Arc::clone(&gossip),
            context(),
            config(),
            Handle::current(),
        );

        retrier
            .submit_tss_message(message_body())
            .await
            .unwrap()
            .unwrap();
        retrier.submit_tss_vote(vote_body()).await.unwrap().unwrap();

        // The second call starts back at offset zero; the duplicate shift
        // from the first call does not leak across calls.
        let ids = gossip.attempt_ids();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0].valid_start, Timestamp::new(1_000, 0));
        assert_eq!(ids[2].valid_start, Timestamp::new(1_000, 0));
    }
}
