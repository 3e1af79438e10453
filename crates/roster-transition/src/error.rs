//! Error types for the roster-transition subsystem

use crate::domain::RosterPhase;
use crate::ports::outbound::GossipError;
use shared_types::RosterHash;
use thiserror::Error;

/// Synchronous roster-coordination errors
#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    /// The requested operation has no meaning in the resolved phase
    #[error("{operation} is undefined in the {phase} phase")]
    InvalidPhase {
        phase: RosterPhase,
        operation: &'static str,
    },

    /// A roster required by the operation is not present in the store
    #[error("roster {hash} is not present in the store")]
    UnknownRoster { hash: RosterHash },

    /// A candidate roster was required but none has been set
    #[error("no candidate roster has been set")]
    NoCandidateRoster,

    /// Participant directory construction rejected its inputs
    #[error("participant directory rejected: {reason}")]
    InvalidDirectory { reason: String },
}

/// Result type for roster-coordination operations
pub type RosterResult<T> = Result<T, RosterError>;

/// Terminal outcome of a failed transaction submission.
///
/// Only ever surfaced through the async result of a submission; the retry
/// loop never raises these synchronously.
#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    /// Every distinct transaction id the retry policy allows collided with
    /// an already-submitted transaction
    #[error("gave up after {attempts} duplicate transaction ids")]
    DuplicateIdsExhausted { attempts: u32 },

    /// The platform classified the transaction as invalid; retrying cannot help
    #[error("transaction rejected by the platform")]
    Rejected(#[source] GossipError),

    /// The platform stayed unavailable through every allowed retry
    #[error("platform still not ready after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// The pending submission was abandoned before it completed
    #[error("submission task was cancelled before completion")]
    Cancelled,
}
