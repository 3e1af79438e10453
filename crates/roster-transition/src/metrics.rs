//! # Roster Transition Metrics
//!
//! Prometheus metrics for monitoring roster resolution and TSS submission
//! health.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! roster-transition = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `roster_phases_resolved_total` - Counter of phase resolutions (by phase)
//! - `roster_submission_attempts_total` - Counter of gossip submission attempts
//! - `roster_submissions_succeeded_total` - Counter of submissions accepted
//! - `roster_submissions_failed_total` - Counter of terminal failures (by reason)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_int_counter, CounterVec, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Phase resolutions, labeled by resolved phase
    pub static ref PHASES_RESOLVED: CounterVec = register_counter_vec!(
        "roster_phases_resolved_total",
        "Total number of roster phase resolutions",
        &["phase"]
    )
    .expect("Failed to create PHASES_RESOLVED metric");

    /// Gossip submission attempts, including retries
    pub static ref SUBMISSION_ATTEMPTS: IntCounter = register_int_counter!(
        "roster_submission_attempts_total",
        "Total number of gossip submission attempts"
    )
    .expect("Failed to create SUBMISSION_ATTEMPTS metric");

    /// Submissions accepted by the platform
    pub static ref SUBMISSIONS_SUCCEEDED: IntCounter = register_int_counter!(
        "roster_submissions_succeeded_total",
        "Total number of submissions accepted by the platform"
    )
    .expect("Failed to create SUBMISSIONS_SUCCEEDED metric");

    /// Terminal submission failures, labeled by reason
    pub static ref SUBMISSIONS_FAILED: CounterVec = register_counter_vec!(
        "roster_submissions_failed_total",
        "Total number of submissions that failed terminally",
        &["reason"]
    )
    .expect("Failed to create SUBMISSIONS_FAILED metric");
}

/// Record a phase resolution
#[cfg(feature = "metrics")]
pub fn record_phase_resolved(phase: &str) {
    PHASES_RESOLVED.with_label_values(&[phase]).inc();
}

/// Record one gossip submission attempt
#[cfg(feature = "metrics")]
pub fn record_submission_attempt() {
    SUBMISSION_ATTEMPTS.inc();
}

/// Record a submission accepted by the platform
#[cfg(feature = "metrics")]
pub fn record_submission_success() {
    SUBMISSIONS_SUCCEEDED.inc();
}

/// Record a terminal submission failure with reason
#[cfg(feature = "metrics")]
pub fn record_submission_failure(reason: &str) {
    SUBMISSIONS_FAILED.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_phase_resolved(_phase: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_submission_attempt() {}

#[cfg(not(feature = "metrics"))]
pub fn record_submission_success() {}

#[cfg(not(feature = "metrics"))]
pub fn record_submission_failure(_reason: &str) {}
