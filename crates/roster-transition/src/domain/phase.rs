//! Roster lifecycle phase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the network currently stands in the roster lifecycle.
///
/// The phase is derived fresh from the store on every resolution and is
/// never persisted; it is a view, not a state machine.
///
/// ```text
/// [BOOTSTRAP] ──candidate set──→ [TRANSITION] ──candidate adopted──→ [HANDOFF]
///      ↑                                                                 │
///      └───────────────── previous roster retired ──────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosterPhase {
    /// A single roster is in force; no transition is underway.
    Bootstrap,
    /// The previous roster is still retiring; there is no stable
    /// source/target pair to reason about.
    Handoff,
    /// A candidate roster is known and keying toward it is in progress.
    Transition,
}

impl fmt::Display for RosterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterPhase::Bootstrap => write!(f, "bootstrap"),
            RosterPhase::Handoff => write!(f, "handoff"),
            RosterPhase::Transition => write!(f, "transition"),
        }
    }
}
