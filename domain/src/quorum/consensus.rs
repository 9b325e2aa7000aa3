//! Consensus resolver
//!
//! A restaurant reaches consensus when every active member's most recent
//! decision on it (at or before the evaluated round) is an approval.
//! Approvals carry over between rounds until the member overrides them.
//! Only restaurants still on offer can win; votes on places dropped by a
//! catalog refresh stay in the ledger but are never chosen.

use super::ledger::VoteLedger;
use crate::core::ids::{MemberId, PlaceId};
use std::collections::BTreeSet;

/// All `offered` places unanimously approved by `active` as of `round`, in
/// place order
pub fn unanimous_candidates(
    ledger: &VoteLedger,
    offered: &BTreeSet<PlaceId>,
    active: &BTreeSet<MemberId>,
    round: u32,
) -> Vec<PlaceId> {
    if active.is_empty() {
        return Vec::new();
    }

    ledger
        .voted_places()
        .into_iter()
        .filter(|place| offered.contains(place))
        .filter(|place| {
            active.iter().all(|member| {
                ledger
                    .effective(member, place, round)
                    .is_some_and(|d| d.is_approve())
            })
        })
        .collect()
}

/// Pick the consensus restaurant, if any.
///
/// When several places qualify at once the lowest place id wins, so the
/// result never depends on storage order. An empty member set never
/// resolves.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use tablevote_domain::{Decision, MemberId, PlaceId, VoteLedger};
/// use tablevote_domain::quorum::resolve;
///
/// let a = MemberId::from("a");
/// let b = MemberId::from("b");
/// let active: BTreeSet<_> = [a.clone(), b.clone()].into_iter().collect();
/// let offered: BTreeSet<_> = [PlaceId::from("r1")].into_iter().collect();
///
/// let mut ledger = VoteLedger::new();
/// ledger.cast(&a, &PlaceId::from("r1"), 0, Decision::Approve);
/// assert_eq!(resolve(&ledger, &offered, &active, 0), None);
///
/// ledger.cast(&b, &PlaceId::from("r1"), 0, Decision::Approve);
/// assert_eq!(resolve(&ledger, &offered, &active, 0), Some(PlaceId::from("r1")));
/// ```
pub fn resolve(
    ledger: &VoteLedger,
    offered: &BTreeSet<PlaceId>,
    active: &BTreeSet<MemberId>,
    round: u32,
) -> Option<PlaceId> {
    unanimous_candidates(ledger, offered, active, round)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quorum::vote::Decision;

    fn m(id: &str) -> MemberId {
        MemberId::from(id)
    }

    fn p(id: &str) -> PlaceId {
        PlaceId::from(id)
    }

    fn active(ids: &[&str]) -> BTreeSet<MemberId> {
        ids.iter().map(|s| m(s)).collect()
    }

    fn offered(ids: &[&str]) -> BTreeSet<PlaceId> {
        ids.iter().map(|s| p(s)).collect()
    }

    fn all() -> BTreeSet<PlaceId> {
        offered(&["alpha", "r1", "r2", "r5", "zeta"])
    }

    #[test]
    fn test_single_member_any_approval() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("solo"), &p("r2"), 0, Decision::Disapprove);
        assert_eq!(resolve(&ledger, &all(), &active(&["solo"]), 0), None);

        ledger.cast(&m("solo"), &p("r5"), 0, Decision::Approve);
        assert_eq!(resolve(&ledger, &all(), &active(&["solo"]), 0), Some(p("r5")));
    }

    #[test]
    fn test_tie_break_lowest_place_id() {
        let mut ledger = VoteLedger::new();
        for member in ["a", "b"] {
            ledger.cast(&m(member), &p("zeta"), 0, Decision::Approve);
            ledger.cast(&m(member), &p("alpha"), 0, Decision::Approve);
        }
        assert_eq!(
            unanimous_candidates(&ledger, &all(), &active(&["a", "b"]), 0),
            vec![p("alpha"), p("zeta")]
        );
        assert_eq!(resolve(&ledger, &all(), &active(&["a", "b"]), 0), Some(p("alpha")));
    }

    #[test]
    fn test_prior_round_approvals_count() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("a"), &p("r1"), 0, Decision::Approve);
        ledger.cast(&m("b"), &p("r1"), 1, Decision::Approve);
        assert_eq!(resolve(&ledger, &all(), &active(&["a", "b"]), 1), Some(p("r1")));
    }

    #[test]
    fn test_later_disapproval_overrides_approval() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("a"), &p("r1"), 0, Decision::Approve);
        ledger.cast(&m("a"), &p("r1"), 1, Decision::Disapprove);
        ledger.cast(&m("b"), &p("r1"), 1, Decision::Approve);
        assert_eq!(resolve(&ledger, &all(), &active(&["a", "b"]), 1), None);
    }

    #[test]
    fn test_removed_member_no_longer_required() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("a"), &p("r1"), 0, Decision::Approve);
        ledger.cast(&m("gone"), &p("r1"), 0, Decision::Disapprove);
        assert_eq!(resolve(&ledger, &all(), &active(&["a", "gone"]), 0), None);
        assert_eq!(resolve(&ledger, &all(), &active(&["a"]), 0), Some(p("r1")));
    }

    #[test]
    fn test_no_members_never_resolves() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("a"), &p("r1"), 0, Decision::Approve);
        assert_eq!(resolve(&ledger, &all(), &BTreeSet::new(), 0), None);
    }

    #[test]
    fn test_withdrawn_place_never_wins() {
        let mut ledger = VoteLedger::new();
        ledger.cast(&m("a"), &p("old"), 0, Decision::Approve);
        ledger.cast(&m("a"), &p("r1"), 0, Decision::Approve);

        assert_eq!(
            resolve(&ledger, &offered(&["old", "r1"]), &active(&["a"]), 0),
            Some(p("old"))
        );
        assert_eq!(
            resolve(&ledger, &offered(&["r1"]), &active(&["a"]), 0),
            Some(p("r1"))
        );
        assert_eq!(resolve(&ledger, &offered(&["new"]), &active(&["a"]), 0), None);
    }
}
