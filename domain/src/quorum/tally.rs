//! Restaurant scores
//!
//! Per-restaurant approval counts among the active members, used to show
//! the group how close each candidate is to consensus.

use super::ledger::VoteLedger;
use crate::core::ids::{MemberId, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Approval standing of one restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceScore {
    pub place: PlaceId,
    pub approvals: usize,
    pub disapprovals: usize,
}

impl PlaceScore {
    /// Generate a visual vote summary (e.g., "[●●○]")
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.approvals));
        summary.extend(std::iter::repeat_n('○', self.disapprovals));
        summary.push(']');
        summary
    }
}

/// Score every voted place still on offer by effective decisions as of
/// `round`.
///
/// Sorted by approvals (descending), then place id.
pub fn tally(
    ledger: &VoteLedger,
    offered: &BTreeSet<PlaceId>,
    active: &BTreeSet<MemberId>,
    round: u32,
) -> Vec<PlaceScore> {
    let mut scores: Vec<PlaceScore> = ledger
        .voted_places()
        .into_iter()
        .filter(|place| offered.contains(place))
        .map(|place| {
            let (approvals, disapprovals) = active.iter().fold((0, 0), |(yes, no), member| {
                match ledger.effective(member, &place, round) {
                    Some(d) if d.is_approve() => (yes + 1, no),
                    Some(_) => (yes, no + 1),
                    None => (yes, no),
                }
            });
            PlaceScore {
                place,
                approvals,
                disapprovals,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.approvals
            .cmp(&a.approvals)
            .then_with(|| a.place.cmp(&b.place))
    });
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quorum::vote::Decision;

    #[test]
    fn test_tally_orders_by_approvals() {
        let a = MemberId::from("a");
        let b = MemberId::from("b");
        let active: BTreeSet<_> = [a.clone(), b.clone()].into_iter().collect();

        let mut ledger = VoteLedger::new();
        ledger.cast(&a, &PlaceId::from("resA"), 0, Decision::Approve);
        ledger.cast(&b, &PlaceId::from("resA"), 0, Decision::Disapprove);
        ledger.cast(&a, &PlaceId::from("resB"), 0, Decision::Approve);
        ledger.cast(&b, &PlaceId::from("resB"), 0, Decision::Approve);

        let offered: BTreeSet<_> = ["resA", "resB"].into_iter().map(PlaceId::from).collect();
        let scores = tally(&ledger, &offered, &active, 0);
        assert_eq!(scores[0].place.as_str(), "resB");
        assert_eq!(scores[0].approvals, 2);
        assert_eq!(scores[1].vote_summary(), "[●○]");
    }

    #[test]
    fn test_inactive_members_ignored() {
        let a = MemberId::from("a");
        let active: BTreeSet<_> = [a.clone()].into_iter().collect();

        let mut ledger = VoteLedger::new();
        ledger.cast(&MemberId::from("left"), &PlaceId::from("r1"), 0, Decision::Approve);

        let offered: BTreeSet<_> = [PlaceId::from("r1")].into_iter().collect();
        let scores = tally(&ledger, &offered, &active, 0);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].approvals, 0);
        assert_eq!(scores[0].vote_summary(), "[]");
    }

    #[test]
    fn test_withdrawn_places_are_not_scored() {
        let a = MemberId::from("a");
        let active: BTreeSet<_> = [a.clone()].into_iter().collect();

        let mut ledger = VoteLedger::new();
        ledger.cast(&a, &PlaceId::from("old"), 0, Decision::Approve);
        ledger.cast(&a, &PlaceId::from("r1"), 0, Decision::Disapprove);

        let offered: BTreeSet<_> = [PlaceId::from("r1")].into_iter().collect();
        let scores = tally(&ledger, &offered, &active, 0);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].place.as_str(), "r1");
        assert_eq!(scores[0].disapprovals, 1);
    }
}
