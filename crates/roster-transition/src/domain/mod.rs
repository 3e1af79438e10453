//! Domain module for the roster-transition subsystem
//!
//! ## Core Modules
//! - phase: Roster lifecycle phases
//! - weights: Weighted quorum thresholds over a roster transition
//! - shares: Proportional TSS share allocation
//! - directory: Participant directory construction
//! - transaction: Transaction bodies submitted during keying

pub mod directory;
pub mod phase;
pub mod shares;
pub mod transaction;
pub mod weights;

pub use directory::{
    ParticipantDirectory, ParticipantDirectoryBuilder, PrivateShareKey, PublicShareKey, ShareId,
    SignatureSchema,
};
pub use phase::RosterPhase;
pub use shares::{
    compute_node_shares, compute_participant_directory, tss_message_threshold, NodeShareCount,
};
pub use transaction::{
    TransactionBody, TransactionId, TransactionPayload, TssMessageBody, TssVoteBody,
};
pub use weights::{
    at_least_one_third_of_total, more_than_two_thirds_of_total, NodeWeight, TransitionWeights,
};
