//! Service layer: orchestration over the ports
//!
//! - `resolver`: phase resolution snapshots over the roster store
//! - `submissions`: the transaction submission retry machinery

pub mod resolver;
pub mod submissions;

pub use resolver::{ResolvedRosters, RosterPhaseResolver};
pub use submissions::{SubmissionConfig, SubmissionHandle, SubmissionRetrier};
