//! # roster-transition
//!
//! Roster lifecycle coordination for the Meridian ledger: which validator
//! roster governs consensus, what quorum thresholds apply while a
//! transition is underway, and how the TSS key-share traffic that keys a
//! new roster gets submitted into the network.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Phase resolution**: bootstrap / transition / handoff, derived fresh
//!   from the roster store on every call
//! - **Weighted quorums**: strong-minority (≥1/3) and supermajority (>2/3)
//!   thresholds over the outgoing and incoming rosters
//! - **Share allocation**: proportional TSS share counts and the
//!   participant directory handed to the threshold-signature library
//! - **Submission retries**: duplicate-id, invalid, and not-ready failures
//!   each handled by their own policy
//!
//! ## Architecture
//!
//! ```text
//! Roster Store ──resolve──→ RosterPhaseResolver ──→ TransitionWeights
//!                                                        │
//! Roster ──computeParticipantDirectory──→ ParticipantDirectory ──→ TSS library
//!                                                        │
//! TSS messages / votes ──→ SubmissionRetrier ──→ Gossip Channel
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use roster_transition::adapters::InMemoryRosterStore;
//! use roster_transition::service::RosterPhaseResolver;
//!
//! let resolver = RosterPhaseResolver::new(store);
//! let resolved = resolver.resolve();
//! if resolved.phase() == RosterPhase::Transition {
//!     let weights = resolved.transition_weights()?;
//!     let quorum = weights.target_weight_threshold();
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryRosterStore, LedgerSubmissionContext, QueuedGossipChannel};
pub use domain::{
    at_least_one_third_of_total, compute_node_shares, compute_participant_directory,
    more_than_two_thirds_of_total, tss_message_threshold, NodeShareCount, NodeWeight,
    ParticipantDirectory, ParticipantDirectoryBuilder, PrivateShareKey, PublicShareKey,
    RosterPhase, ShareId, SignatureSchema, TransactionBody, TransactionId, TransactionPayload,
    TransitionWeights, TssMessageBody, TssVoteBody,
};
pub use error::{RosterError, RosterResult, SubmissionError};
pub use ports::inbound::TssSubmissionApi;
pub use ports::outbound::{GossipChannel, GossipError, RosterStore, SubmissionContext};
pub use service::{ResolvedRosters, RosterPhaseResolver, SubmissionConfig, SubmissionHandle, SubmissionRetrier};
