//! # Roster Entities
//!
//! A roster is the ordered set of validator identities and weights that
//! governs one epoch of consensus. Entry order is significant: downstream
//! share allocation assigns share-id blocks by entry position, so rosters
//! are never re-sorted after construction.
//!
//! Rosters are content-addressed: identity is the SHA-384 digest of the
//! canonical encoding, so two stores that hold the same roster agree on its
//! hash without coordination.

use crate::entities::NodeId;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha384};
use std::fmt;

/// SHA-384 content digest identifying a roster.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterHash(#[serde_as(as = "Bytes")] pub [u8; 48]);

impl RosterHash {
    pub fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }
}

impl Default for RosterHash {
    fn default() -> Self {
        Self([0u8; 48])
    }
}

impl fmt::Display for RosterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for RosterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full digests are unreadable in logs; eight hex chars disambiguate.
        write!(
            f,
            "RosterHash({:02x}{:02x}{:02x}{:02x}..)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// A network endpoint at which a roster member can be reached.
///
/// Opaque to roster-transition logic; carried through for the gossip layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceEndpoint {
    pub address: String,
    pub port: u16,
}

/// One validator's membership in a roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RosterEntry {
    /// Unique within the roster.
    pub node_id: NodeId,
    /// Stake-equivalent voting power. Zero-weight members are carried but
    /// contribute nothing to quorum thresholds.
    pub weight: u64,
    /// DER-encoded certificate the node gossips under. Opaque to this core.
    pub gossip_ca_certificate: Vec<u8>,
    /// Public half of the node's TSS encryption key pair; becomes the
    /// public key material of every share allocated to this node.
    pub tss_encryption_key: Vec<u8>,
    /// Endpoints the node listens on. Opaque to this core.
    pub endpoints: Vec<ServiceEndpoint>,
}

/// Ordered sequence of roster entries governing one consensus epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `node_id` is a member.
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.entries.iter().any(|e| e.node_id == node_id)
    }

    /// The member's weight, or `None` if not a member.
    pub fn weight_of(&self, node_id: NodeId) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.node_id == node_id)
            .map(|e| e.weight)
    }

    /// Sum of all member weights.
    pub fn total_weight(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.weight))
    }

    /// Canonical byte encoding: every field length-prefixed, little-endian,
    /// in entry order. Any two structurally equal rosters encode identically.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        fn put_slice(out: &mut Vec<u8>, bytes: &[u8]) {
            out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
            out.extend_from_slice(bytes);
        }

        let mut out = Vec::new();
        out.extend_from_slice(&(self.entries.len() as u64).to_le_bytes());
        for entry in &self.entries {
            out.extend_from_slice(&entry.node_id.0.to_le_bytes());
            out.extend_from_slice(&entry.weight.to_le_bytes());
            put_slice(&mut out, &entry.gossip_ca_certificate);
            put_slice(&mut out, &entry.tss_encryption_key);
            out.extend_from_slice(&(entry.endpoints.len() as u64).to_le_bytes());
            for endpoint in &entry.endpoints {
                put_slice(&mut out, endpoint.address.as_bytes());
                out.extend_from_slice(&endpoint.port.to_le_bytes());
            }
        }
        out
    }

    /// Content hash over the canonical encoding.
    pub fn hash(&self) -> RosterHash {
        let digest = Sha384::digest(self.canonical_bytes());
        let mut hash = [0u8; 48];
        hash.copy_from_slice(&digest);
        RosterHash(hash)
    }
}
