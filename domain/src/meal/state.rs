//! Meal aggregate
//!
//! [`MealState`] owns everything the consensus engine needs for one meal:
//! metadata, candidate catalog, member preferences, vote ledger and the
//! round coordinator state. Active membership is owned by a collaborator and
//! passed in on every call, so a member removed mid-round simply stops
//! counting towards completeness and unanimity.
//!
//! Every round either resolves or strictly shrinks the set of restaurants
//! still eligible for all active members, so a meal can never loop through
//! rounds forever: it ends `Resolved` or `Exhausted`.

use super::entities::{CastOutcome, Meal, RoundStatus};
use crate::catalog::{CandidateCatalog, CandidateEntry};
use crate::core::error::MealError;
use crate::core::ids::{MemberId, PlaceId};
use crate::eligibility;
use crate::preference::Preferences;
use crate::quorum::{
    Decision, PlaceScore, RoundSnapshot, RoundState, RoundTransition, VoteLedger, resolve, tally,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Consensus state of one meal (Aggregate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealState {
    meal: Meal,
    catalog: CandidateCatalog,
    preferences: BTreeMap<MemberId, Preferences>,
    /// Applied to members who never stored their own preferences
    #[serde(default)]
    default_preferences: Preferences,
    ledger: VoteLedger,
    state: RoundState,
    snapshot: RoundSnapshot,
    revision: u64,
}

impl MealState {
    pub fn new(meal: Meal) -> Self {
        Self {
            meal,
            catalog: CandidateCatalog::default(),
            preferences: BTreeMap::new(),
            default_preferences: Preferences::default(),
            ledger: VoteLedger::new(),
            state: RoundState::default(),
            snapshot: RoundSnapshot::open(0),
            revision: 0,
        }
    }

    pub fn with_catalog(mut self, entries: impl IntoIterator<Item = CandidateEntry>) -> Self {
        self.catalog = CandidateCatalog::new(entries);
        self
    }

    pub fn with_default_preferences(mut self, preferences: Preferences) -> Self {
        self.default_preferences = preferences;
        self
    }

    pub fn meal(&self) -> &Meal {
        &self.meal
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn current_round(&self) -> u32 {
        self.state.round()
    }

    /// Monotonic counter bumped by every state-changing operation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Stored preferences of the member, or the meal-wide defaults
    pub fn preferences_of(&self, member: &MemberId) -> &Preferences {
        self.preferences
            .get(member)
            .unwrap_or(&self.default_preferences)
    }

    // ==================== Queries ====================

    /// Restaurants the member may vote on right now, in catalog order.
    ///
    /// Reflects the member's stored preferences as of this call.
    pub fn eligible_for(
        &self,
        active: &BTreeSet<MemberId>,
        member: &MemberId,
    ) -> Result<Vec<&CandidateEntry>, MealError> {
        ensure_member(active, member)?;
        Ok(eligibility::eligible(
            &self.catalog,
            Some(self.preferences_of(member)),
            &self.ledger.rejected_by(member),
        ))
    }

    /// Places the member still has to decide on before the round can close
    pub fn outstanding_for(&self, member: &MemberId) -> BTreeSet<PlaceId> {
        if self.state.is_terminal() {
            return BTreeSet::new();
        }
        if self.snapshot.has(member) {
            self.snapshot.outstanding(member, &self.ledger)
        } else {
            let decided = self.ledger.decided_in_round(member, self.current_round());
            self.live_eligible_ids(member)
                .difference(&decided)
                .cloned()
                .collect()
        }
    }

    pub fn status(&self) -> RoundStatus {
        RoundStatus {
            round: self.state.round(),
            is_resolved: matches!(self.state, RoundState::Resolved { .. }),
            is_exhausted: matches!(self.state, RoundState::Exhausted { .. }),
            chosen_restaurant: self.state.chosen().cloned(),
        }
    }

    /// Approval standing of every voted restaurant still in the catalog
    pub fn tally(&self, active: &BTreeSet<MemberId>) -> Vec<PlaceScore> {
        tally(
            &self.ledger,
            &self.catalog.place_ids(),
            active,
            self.current_round(),
        )
    }

    // ==================== Commands ====================

    /// Record a member's decision and re-evaluate the round.
    ///
    /// Rejections leave the state untouched. Votes arriving after the meal
    /// reached a terminal state are acknowledged without being recorded.
    pub fn cast_vote(
        &mut self,
        active: &BTreeSet<MemberId>,
        member: &MemberId,
        place: &PlaceId,
        round: u32,
        decision: Decision,
    ) -> Result<CastOutcome, MealError> {
        ensure_member(active, member)?;

        let current = match &self.state {
            RoundState::Resolved { place, .. } => {
                return Ok(CastOutcome::AlreadyResolved {
                    place: place.clone(),
                });
            }
            RoundState::Exhausted { round } => {
                return Ok(CastOutcome::Exhausted { round: *round });
            }
            RoundState::Open { round } => *round,
        };

        if round != current {
            return Err(MealError::StaleRound {
                submitted: round,
                current,
            });
        }

        if !self.may_vote_on(member, place) {
            return Err(MealError::NotEligible {
                member: member.clone(),
                place: place.clone(),
            });
        }

        self.capture(member);
        self.ledger.cast(member, place, round, decision);
        self.revision += 1;

        let transition = self.evaluate(active);
        Ok(CastOutcome::Accepted { round, transition })
    }

    /// Check unanimity and round completeness, applying at most one transition.
    ///
    /// Terminal meals are left untouched, so calling this repeatedly is safe.
    pub fn evaluate(&mut self, active: &BTreeSet<MemberId>) -> Option<RoundTransition> {
        let RoundState::Open { round } = self.state else {
            return None;
        };

        for member in active {
            self.capture(member);
        }

        if let Some(place) = resolve(&self.ledger, &self.catalog.place_ids(), active, round) {
            self.state = RoundState::Resolved {
                round,
                place: place.clone(),
            };
            self.revision += 1;
            return Some(RoundTransition::Resolved { round, place });
        }

        if active.is_empty() || !self.snapshot.is_complete(active, &self.ledger) {
            return None;
        }

        if self.viable_places(active).is_empty() {
            self.state = RoundState::Exhausted { round };
            self.revision += 1;
            return Some(RoundTransition::Exhausted { round });
        }

        let next = round + 1;
        self.state = RoundState::Open { round: next };
        self.snapshot = RoundSnapshot::open(next);
        for member in active {
            self.capture(member);
        }
        self.revision += 1;
        Some(RoundTransition::Advanced {
            from: round,
            to: next,
        })
    }

    /// Store new preferences for a member.
    ///
    /// The member's required-vote set for the current round is not changed
    /// once captured; the new filters apply from the next round.
    pub fn update_preferences<I, S>(
        &mut self,
        active: &BTreeSet<MemberId>,
        member: &MemberId,
        unwanted_tags: I,
        min_rating: f64,
    ) -> Result<&Preferences, MealError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ensure_member(active, member)?;
        let preferences = Preferences::new(unwanted_tags, min_rating)?;
        self.revision += 1;
        let slot = self.preferences.entry(member.clone()).or_default();
        *slot = preferences;
        Ok(slot)
    }

    /// Swap in a freshly fetched catalog.
    ///
    /// Required-vote sets of the current round are recaptured against the
    /// new catalog.
    pub fn replace_catalog(&mut self, entries: impl IntoIterator<Item = CandidateEntry>) -> usize {
        let count = self.catalog.replace(entries);
        if let RoundState::Open { round } = self.state {
            self.snapshot = RoundSnapshot::open(round);
        }
        self.revision += 1;
        count
    }

    /// Record whether the group enjoyed the chosen restaurant
    pub fn record_liked(
        &mut self,
        active: &BTreeSet<MemberId>,
        member: &MemberId,
        liked: Option<bool>,
    ) -> Result<(), MealError> {
        ensure_member(active, member)?;
        if self.state.chosen().is_none() {
            return Err(MealError::NotResolved);
        }
        self.meal.liked = liked;
        self.revision += 1;
        Ok(())
    }

    // ==================== Internals ====================

    fn live_eligible_ids(&self, member: &MemberId) -> BTreeSet<PlaceId> {
        eligibility::eligible_ids(
            &self.catalog,
            Some(self.preferences_of(member)),
            &self.ledger.rejected_by(member),
        )
    }

    /// Live eligibility, widened by the member's captured set so that
    /// mid-round preference edits never block the round from closing.
    fn may_vote_on(&self, member: &MemberId, place: &PlaceId) -> bool {
        if self.ledger.rejected_by(member).contains(place) {
            return false;
        }
        let admitted = self
            .catalog
            .get(place)
            .is_some_and(|entry| self.preferences_of(member).admits(entry));
        admitted
            || self
                .snapshot
                .required_for(member)
                .is_some_and(|required| required.contains(place))
    }

    fn capture(&mut self, member: &MemberId) {
        if !self.snapshot.has(member) {
            let required = self.live_eligible_ids(member);
            self.snapshot.capture(member, required);
        }
    }

    /// Places still eligible for every active member next round
    fn viable_places(&self, active: &BTreeSet<MemberId>) -> BTreeSet<PlaceId> {
        let mut sets = active.iter().map(|member| self.live_eligible_ids(member));
        let Some(first) = sets.next() else {
            return BTreeSet::new();
        };
        sets.fold(first, |acc, set| acc.intersection(&set).cloned().collect())
    }
}

fn ensure_member(active: &BTreeSet<MemberId>, member: &MemberId) -> Result<(), MealError> {
    if active.contains(member) {
        Ok(())
    } else {
        Err(MealError::NotAMember(member.clone()))
    }
}
