//! Driving Ports (API - Inbound)

use crate::domain::{TssMessageBody, TssVoteBody};
use crate::error::SubmissionError;
use async_trait::async_trait;

/// Submission surface offered to transaction-handling code.
///
/// Both operations resolve once the underlying retry loop reaches a
/// terminal outcome; they do not return after the first attempt.
#[async_trait]
pub trait TssSubmissionApi: Send + Sync {
    /// Submit one TSS message transaction, retrying per policy.
    async fn submit_message(&self, body: TssMessageBody) -> Result<(), SubmissionError>;

    /// Submit one TSS vote transaction, retrying per policy.
    async fn submit_vote(&self, body: TssVoteBody) -> Result<(), SubmissionError>;
}
