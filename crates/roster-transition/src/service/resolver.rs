//! Roster phase resolution
//!
//! Every resolution re-reads the store and freezes what it found into an
//! immutable [`ResolvedRosters`] snapshot, so callers reason about one
//! consistent view no matter how the store moves underneath them. The
//! resolver never writes through the store.
//!
//! Phase decision, in order:
//! 1. a previous roster is present → `Handoff`
//! 2. else a candidate roster is present → `Transition`
//! 3. else → `Bootstrap`

use crate::domain::{RosterPhase, TransitionWeights};
use crate::error::{RosterError, RosterResult};
use crate::metrics;
use crate::ports::outbound::RosterStore;
use shared_types::{NodeId, Roster, RosterHash};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves the current roster phase from the store on demand.
pub struct RosterPhaseResolver<S: RosterStore> {
    store: Arc<S>,
}

impl<S: RosterStore> RosterPhaseResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Re-read the store and snapshot the lifecycle state it describes.
    pub fn resolve(&self) -> ResolvedRosters<S> {
        let current = self.store.current_hash();
        let kind = if let Some(retiring) = self.store.previous_hash() {
            PhaseKind::Handoff { retiring }
        } else if let Some(candidate) = self.store.candidate_hash() {
            PhaseKind::Transition { candidate }
        } else {
            PhaseKind::Bootstrap
        };
        let snapshot = ResolvedRosters {
            store: Arc::clone(&self.store),
            current,
            kind,
        };
        debug!(
            "[roster] resolved {} phase for current roster {:?}",
            snapshot.phase(),
            current
        );
        metrics::record_phase_resolved(&snapshot.phase().to_string());
        snapshot
    }
}

/// Phase plus the hash that makes it what it is, so an impossible
/// combination (a transition without a candidate, say) cannot be built.
#[derive(Clone, Copy)]
enum PhaseKind {
    Bootstrap,
    Handoff { retiring: RosterHash },
    Transition { candidate: RosterHash },
}

/// One immutable view of the roster lifecycle.
///
/// Operations that have no meaning in the snapshot's phase fail with
/// [`RosterError::InvalidPhase`] rather than guessing.
pub struct ResolvedRosters<S: RosterStore> {
    store: Arc<S>,
    current: RosterHash,
    kind: PhaseKind,
}

impl<S: RosterStore> ResolvedRosters<S> {
    pub fn phase(&self) -> RosterPhase {
        match self.kind {
            PhaseKind::Bootstrap => RosterPhase::Bootstrap,
            PhaseKind::Handoff { .. } => RosterPhase::Handoff,
            PhaseKind::Transition { .. } => RosterPhase::Transition,
        }
    }

    /// Hash of the roster governing consensus right now. Defined in every
    /// phase.
    pub fn current_roster_hash(&self) -> RosterHash {
        self.current
    }

    /// Hash of the roster retiring through the handoff window, if any.
    pub fn retiring_roster_hash(&self) -> Option<RosterHash> {
        match self.kind {
            PhaseKind::Handoff { retiring } => Some(retiring),
            _ => None,
        }
    }

    /// Hash of the roster whose key material signs during this transition.
    ///
    /// There is no well-defined source while handing off.
    pub fn source_roster_hash(&self) -> RosterResult<RosterHash> {
        match self.kind {
            PhaseKind::Bootstrap | PhaseKind::Transition { .. } => Ok(self.current),
            PhaseKind::Handoff { .. } => Err(RosterError::InvalidPhase {
                phase: RosterPhase::Handoff,
                operation: "source_roster_hash",
            }),
        }
    }

    /// Hash of the roster being keyed toward: the candidate during a
    /// transition, the current roster itself at bootstrap.
    pub fn target_roster_hash(&self) -> RosterResult<RosterHash> {
        match self.kind {
            PhaseKind::Bootstrap => Ok(self.current),
            PhaseKind::Transition { candidate } => Ok(candidate),
            PhaseKind::Handoff { .. } => Err(RosterError::InvalidPhase {
                phase: RosterPhase::Handoff,
                operation: "target_roster_hash",
            }),
        }
    }

    /// The target roster itself, or `Ok(None)` if the store no longer holds
    /// it. Phase restrictions are those of [`target_roster_hash`](Self::target_roster_hash).
    pub fn target_roster(&self) -> RosterResult<Option<Roster>> {
        let hash = self.target_roster_hash()?;
        Ok(self.store.lookup(&hash))
    }

    /// Resolve any hash against the store, regardless of phase. Useful for
    /// fetching the retiring roster by its own hash during handoff.
    pub fn find_related_roster(&self, hash: &RosterHash) -> Option<Roster> {
        self.store.lookup(hash)
    }

    /// Node ids leaving the roster in this transition: members of the
    /// source roster that the target roster drops. Defined only in the
    /// transition phase.
    pub fn removed_node_ids(&self) -> RosterResult<BTreeSet<NodeId>> {
        match self.kind {
            PhaseKind::Transition { .. } => {
                let weights = self.transition_weights()?;
                Ok(weights
                    .ordered_source_weights()
                    .iter()
                    .map(|w| w.node_id)
                    .filter(|id| !weights.target_includes(*id))
                    .collect())
            }
            _ => Err(RosterError::InvalidPhase {
                phase: self.phase(),
                operation: "removed_node_ids",
            }),
        }
    }

    /// Weighted-quorum snapshot for the active transition.
    ///
    /// At bootstrap the current roster self-transitions, so source and
    /// target distributions are identical. Fails during handoff, and fails
    /// with [`RosterError::UnknownRoster`] if either roster cannot be
    /// resolved; the snapshot is never partially built.
    pub fn transition_weights(&self) -> RosterResult<TransitionWeights> {
        match self.kind {
            PhaseKind::Bootstrap => {
                let current = self.require_roster(self.current)?;
                Ok(TransitionWeights::from_rosters(&current, &current))
            }
            PhaseKind::Transition { candidate } => {
                let source = self.require_roster(self.current)?;
                let target = self.require_roster(candidate)?;
                Ok(TransitionWeights::from_rosters(&source, &target))
            }
            PhaseKind::Handoff { .. } => Err(RosterError::InvalidPhase {
                phase: RosterPhase::Handoff,
                operation: "transition_weights",
            }),
        }
    }

    fn require_roster(&self, hash: RosterHash) -> RosterResult<Roster> {
        self.store
            .lookup(&hash)
            .ok_or(RosterError::UnknownRoster { hash })
    }
}
