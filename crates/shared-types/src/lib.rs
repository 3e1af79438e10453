//! # Shared Types Crate
//!
//! Domain entities shared across Meridian subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types (rosters, node and
//!   account identities, consensus time) are defined here and nowhere else.
//! - **Content-addressed rosters**: a roster is identified by the SHA-384
//!   digest of its canonical encoding, never by position or storage key.
//! - **Immutability**: entities are plain values; mutation happens by
//!   constructing new values, not in place.

pub mod entities;
pub mod roster;

pub use entities::*;
pub use roster::*;
