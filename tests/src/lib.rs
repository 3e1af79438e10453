//! # Meridian Test Suite
//!
//! Unified test crate containing cross-module flows that exercise the
//! roster-transition subsystem the way transaction-handling code does:
//! resolve a phase, derive quorums and share allocations, then push TSS
//! traffic through the submission machinery.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── roster_lifecycle.rs   # bootstrap → transition → handoff flows
//!     └── submission_flows.rs   # retry policy against real and scripted gossip
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p meridian-tests
//! cargo test -p meridian-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
