//! Round coordinator state
//!
//! ```text
//! Open(N) ──complete, no consensus──▶ Open(N+1)
//!    │                                   │
//!    ├──unanimous approval──▶ Resolved   │
//!    └──no viable place left──▶ Exhausted
//! ```
//!
//! The required-vote set of each member is captured once per round (at round
//! open, or at the member's first interaction in that round) so that
//! preference edits made mid-round only take effect from the next round.

use super::ledger::VoteLedger;
use crate::core::ids::{MemberId, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Lifecycle of a meal's decision process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoundState {
    /// Voting is open in this round
    Open { round: u32 },
    /// Every active member approved `place` (terminal)
    Resolved { round: u32, place: PlaceId },
    /// No restaurant can still reach unanimity (terminal)
    ///
    /// `round` is the round that completed without a viable place; no
    /// further round is opened, so the counter is not incremented.
    Exhausted { round: u32 },
}

impl Default for RoundState {
    fn default() -> Self {
        RoundState::Open { round: 0 }
    }
}

impl RoundState {
    pub fn round(&self) -> u32 {
        match self {
            RoundState::Open { round }
            | RoundState::Resolved { round, .. }
            | RoundState::Exhausted { round } => *round,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundState::Open { .. })
    }

    pub fn chosen(&self) -> Option<&PlaceId> {
        match self {
            RoundState::Resolved { place, .. } => Some(place),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundState::Open { round } => write!(f, "Open (round {})", round),
            RoundState::Resolved { place, .. } => write!(f, "Resolved ({})", place),
            RoundState::Exhausted { round } => write!(f, "Exhausted (round {})", round),
        }
    }
}

/// A state change produced by evaluating a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundTransition {
    Resolved { round: u32, place: PlaceId },
    Advanced { from: u32, to: u32 },
    Exhausted { round: u32 },
}

/// Required-vote sets for the current round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    round: u32,
    required: BTreeMap<MemberId, BTreeSet<PlaceId>>,
}

impl RoundSnapshot {
    pub fn open(round: u32) -> Self {
        Self {
            round,
            required: BTreeMap::new(),
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn has(&self, member: &MemberId) -> bool {
        self.required.contains_key(member)
    }

    /// Capture a member's required set; an existing capture is kept
    pub fn capture(&mut self, member: &MemberId, places: BTreeSet<PlaceId>) {
        self.required.entry(member.clone()).or_insert(places);
    }

    pub fn required_for(&self, member: &MemberId) -> Option<&BTreeSet<PlaceId>> {
        self.required.get(member)
    }

    /// Places the member still has to decide on in this round
    pub fn outstanding(&self, member: &MemberId, ledger: &VoteLedger) -> BTreeSet<PlaceId> {
        let decided = ledger.decided_in_round(member, self.round);
        self.required
            .get(member)
            .map(|required| required.difference(&decided).cloned().collect())
            .unwrap_or_default()
    }

    /// Every active member has decided every place in their required set.
    ///
    /// An empty required set is vacuously complete. Members without a
    /// capture are treated as outstanding.
    pub fn is_complete(&self, active: &BTreeSet<MemberId>, ledger: &VoteLedger) -> bool {
        active
            .iter()
            .all(|member| self.has(member) && self.outstanding(member, ledger).is_empty())
    }
}
