//! Adapters implementing the outbound ports
//!
//! - `roster_store`: hash-keyed roster store held in memory
//! - `gossip`: submission channel backed by the platform ingest queue
//! - `context`: submission context fed by the platform's consensus clock

pub mod context;
pub mod gossip;
pub mod roster_store;

pub use context::LedgerSubmissionContext;
pub use gossip::QueuedGossipChannel;
pub use roster_store::InMemoryRosterStore;
