//! Participant directory construction
//!
//! The participant directory is the bookkeeping handed to the external
//! threshold-signature library: which share ids exist, which node owns each,
//! the public key material per share, the private material for the shares
//! owned by the local node, and the signing threshold. This module only
//! builds and validates the directory; all signing and verification lives
//! with the cryptography collaborator.

use crate::error::{RosterError, RosterResult};
use shared_types::NodeId;
use std::collections::HashMap;
use std::fmt;

/// Identifier of one share in the threshold scheme.
///
/// Share ids are dense: a directory over `n` shares uses exactly `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareId(pub u32);

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "share{}", self.0)
    }
}

/// Public key material attached to a share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicShareKey(Vec<u8>);

impl PublicShareKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Private key material for a locally-owned share.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateShareKey(Vec<u8>);

impl PrivateShareKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PrivateShareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret bytes, even at debug level.
        write!(f, "PrivateShareKey(<{} bytes>)", self.0.len())
    }
}

/// Which pairing group layout the external TSS library should use for the
/// key material in a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SignatureSchema {
    /// Signatures in G1, public keys in G2 (48-byte signatures).
    #[default]
    Bls12_381G1,
    /// Signatures in G2, public keys in G1 (96-byte signatures).
    Bls12_381G2,
}

/// Immutable registry of share ownership and key material.
#[derive(Clone, Debug)]
pub struct ParticipantDirectory {
    schema: SignatureSchema,
    threshold: u32,
    /// Owner of each share; index is the share id.
    owners: Vec<NodeId>,
    /// Public material of each share; index is the share id.
    public_material: Vec<PublicShareKey>,
    /// Share ids owned by the local node, ascending.
    owned_ids: Vec<ShareId>,
    private_material: HashMap<ShareId, PrivateShareKey>,
}

impl ParticipantDirectory {
    pub fn builder() -> ParticipantDirectoryBuilder {
        ParticipantDirectoryBuilder::default()
    }

    /// Total number of allocated share ids.
    pub fn total_shares(&self) -> u32 {
        self.owners.len() as u32
    }

    /// Minimum number of valid shares required for a joint signature.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn schema(&self) -> SignatureSchema {
        self.schema
    }

    /// Owner of `share_id`, if allocated.
    pub fn node_of(&self, share_id: ShareId) -> Option<NodeId> {
        self.owners.get(share_id.0 as usize).copied()
    }

    /// Public key material of `share_id`, if allocated.
    pub fn public_material(&self, share_id: ShareId) -> Option<&PublicShareKey> {
        self.public_material.get(share_id.0 as usize)
    }

    /// Private key material of `share_id`; present only for locally-owned
    /// shares.
    pub fn private_material(&self, share_id: ShareId) -> Option<&PrivateShareKey> {
        self.private_material.get(&share_id)
    }

    /// Share ids owned by the local node, ascending.
    pub fn owned_share_ids(&self) -> &[ShareId] {
        &self.owned_ids
    }

    /// All share ids owned by `node_id`, ascending.
    pub fn shares_of(&self, node_id: NodeId) -> Vec<ShareId> {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| **owner == node_id)
            .map(|(id, _)| ShareId(id as u32))
            .collect()
    }
}

/// Accumulates share registrations before validation freezes them into a
/// [`ParticipantDirectory`].
#[derive(Debug, Default)]
pub struct ParticipantDirectoryBuilder {
    threshold: u32,
    participants: Vec<(ShareId, NodeId, PublicShareKey)>,
    owned: Vec<(ShareId, PrivateShareKey)>,
}

impl ParticipantDirectoryBuilder {
    /// Set the signing threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Register one share: its id, owning node, and public key material.
    pub fn with_participant(
        mut self,
        share_id: ShareId,
        node_id: NodeId,
        public_key: PublicShareKey,
    ) -> Self {
        self.participants.push((share_id, node_id, public_key));
        self
    }

    /// Mark one share as owned by the local node and attach its private key
    /// material. The share must also be registered via
    /// [`with_participant`](Self::with_participant).
    pub fn with_self(mut self, share_id: ShareId, private_key: PrivateShareKey) -> Self {
        self.owned.push((share_id, private_key));
        self
    }

    /// Validate the accumulated registrations and freeze the directory.
    ///
    /// Rejects duplicate or non-dense share ids, locally-owned shares that
    /// were never registered, and a threshold outside `1..=total` (an empty
    /// directory takes threshold zero).
    pub fn build(self, schema: SignatureSchema) -> RosterResult<ParticipantDirectory> {
        let total = self.participants.len() as u32;

        let mut slots: Vec<Option<(NodeId, PublicShareKey)>> = vec![None; total as usize];
        for (share_id, node_id, public_key) in self.participants {
            let slot = slots
                .get_mut(share_id.0 as usize)
                .ok_or_else(|| RosterError::InvalidDirectory {
                    reason: format!("{share_id} is out of range for {total} shares"),
                })?;
            if slot.is_some() {
                return Err(RosterError::InvalidDirectory {
                    reason: format!("{share_id} registered twice"),
                });
            }
            *slot = Some((node_id, public_key));
        }
        // Dense ids: every slot below `total` must now be filled.
        let mut owners = Vec::with_capacity(total as usize);
        let mut public_material = Vec::with_capacity(total as usize);
        for (id, slot) in slots.into_iter().enumerate() {
            let (node_id, public_key) = slot.ok_or_else(|| RosterError::InvalidDirectory {
                reason: format!("share ids have a gap at share{id}"),
            })?;
            owners.push(node_id);
            public_material.push(public_key);
        }

        let mut owned_ids = Vec::with_capacity(self.owned.len());
        let mut private_material = HashMap::with_capacity(self.owned.len());
        for (share_id, private_key) in self.owned {
            if share_id.0 >= total {
                return Err(RosterError::InvalidDirectory {
                    reason: format!("locally-owned {share_id} was never registered"),
                });
            }
            if private_material.insert(share_id, private_key).is_some() {
                return Err(RosterError::InvalidDirectory {
                    reason: format!("locally-owned {share_id} attached twice"),
                });
            }
            owned_ids.push(share_id);
        }
        owned_ids.sort_unstable();

        if self.threshold > total {
            return Err(RosterError::InvalidDirectory {
                reason: format!(
                    "threshold {} exceeds the {total} allocated shares",
                    self.threshold
                ),
            });
        }
        if total > 0 && self.threshold == 0 {
            return Err(RosterError::InvalidDirectory {
                reason: "a positive signing threshold is required".to_string(),
            });
        }

        Ok(ParticipantDirectory {
            schema,
            threshold: self.threshold,
            owners,
            public_material,
            owned_ids,
            private_material,
        })
    }
}
