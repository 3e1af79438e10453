//! Cross-module integration flows

pub mod roster_lifecycle;
pub mod submission_flows;
