//! In-memory roster store adapter
//!
//! Implements the `RosterStore` port over a hash-keyed map. Durable roster
//! state belongs to the state-management subsystem; this adapter stands in
//! for it wherever a process-local store is enough, and doubles as the
//! store used throughout the test suites.
//!
//! Writes model the roster lifecycle: `set_candidate_roster` opens a
//! transition, `adopt_candidate_roster` promotes the candidate (entering
//! the handoff window), and `conclude_handoff` retires the previous roster.

use crate::error::{RosterError, RosterResult};
use crate::ports::outbound::RosterStore;
use parking_lot::RwLock;
use shared_types::{Roster, RosterHash};
use std::collections::HashMap;
use tracing::{debug, info};

struct StoreState {
    rosters: HashMap<RosterHash, Roster>,
    current: RosterHash,
    previous: Option<RosterHash>,
    candidate: Option<RosterHash>,
}

/// Hash-keyed roster store with interior mutability.
pub struct InMemoryRosterStore {
    state: RwLock<StoreState>,
}

impl InMemoryRosterStore {
    /// Create a store whose current roster is the genesis roster.
    pub fn genesis(roster: Roster) -> Self {
        let hash = roster.hash();
        let mut rosters = HashMap::new();
        rosters.insert(hash, roster);
        Self {
            state: RwLock::new(StoreState {
                rosters,
                current: hash,
                previous: None,
                candidate: None,
            }),
        }
    }

    /// Insert a roster without changing any lifecycle pointer.
    pub fn put_roster(&self, roster: Roster) -> RosterHash {
        let hash = roster.hash();
        self.state.write().rosters.insert(hash, roster);
        hash
    }

    /// Insert `roster` and mark it as the candidate being keyed toward.
    pub fn set_candidate_roster(&self, roster: Roster) -> RosterHash {
        let hash = roster.hash();
        let mut state = self.state.write();
        state.rosters.insert(hash, roster);
        state.candidate = Some(hash);
        debug!("[roster] candidate roster set to {:?}", hash);
        hash
    }

    /// Promote the candidate to current. The outgoing roster becomes the
    /// previous roster until `conclude_handoff` retires it.
    pub fn adopt_candidate_roster(&self) -> RosterResult<RosterHash> {
        let mut state = self.state.write();
        let candidate = state.candidate.take().ok_or(RosterError::NoCandidateRoster)?;
        state.previous = Some(state.current);
        state.current = candidate;
        info!("[roster] adopted candidate roster {:?}", candidate);
        Ok(candidate)
    }

    /// Retire the previous roster, ending the handoff window.
    pub fn conclude_handoff(&self) {
        let mut state = self.state.write();
        if let Some(retired) = state.previous.take() {
            debug!("[roster] previous roster {:?} retired", retired);
        }
    }
}

impl RosterStore for InMemoryRosterStore {
    fn current_hash(&self) -> RosterHash {
        self.state.read().current
    }

    fn previous_hash(&self) -> Option<RosterHash> {
        self.state.read().previous
    }

    fn candidate_hash(&self) -> Option<RosterHash> {
        self.state.read().candidate
    }

    fn lookup(&self, hash: &RosterHash) -> Option<Roster> {
        self.state.read().rosters.get(hash).cloned()
    }
}
