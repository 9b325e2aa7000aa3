//! Vote ledger
//!
//! Append/overwrite record of every decision, keyed by
//! (member, place, round). Votes from earlier rounds are kept for history;
//! the only mutation path is [`VoteLedger::cast`].

use super::vote::{Decision, VoteRecord};
use crate::core::ids::{MemberId, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

type RoundVotes = BTreeMap<u32, Decision>;

/// All votes cast in a meal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: BTreeMap<MemberId, BTreeMap<PlaceId, RoundVotes>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a decision, returning the one it replaced (same round only)
    pub fn cast(
        &mut self,
        member: &MemberId,
        place: &PlaceId,
        round: u32,
        decision: Decision,
    ) -> Option<Decision> {
        self.votes
            .entry(member.clone())
            .or_default()
            .entry(place.clone())
            .or_default()
            .insert(round, decision)
    }

    /// Decision recorded for exactly this (member, place, round)
    pub fn decision(&self, member: &MemberId, place: &PlaceId, round: u32) -> Option<Decision> {
        self.rounds_for(member, place)?.get(&round).copied()
    }

    /// Latest decision the member made on the place at or before `up_to`
    pub fn effective(&self, member: &MemberId, place: &PlaceId, up_to: u32) -> Option<Decision> {
        self.rounds_for(member, place)?
            .range(..=up_to)
            .next_back()
            .map(|(_, decision)| *decision)
    }

    /// Places the member has disapproved in any round
    pub fn rejected_by(&self, member: &MemberId) -> BTreeSet<PlaceId> {
        self.votes
            .get(member)
            .map(|places| {
                places
                    .iter()
                    .filter(|(_, rounds)| rounds.values().any(|d| !d.is_approve()))
                    .map(|(place, _)| place.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Places the member has decided on in the given round
    pub fn decided_in_round(&self, member: &MemberId, round: u32) -> BTreeSet<PlaceId> {
        self.votes
            .get(member)
            .map(|places| {
                places
                    .iter()
                    .filter(|(_, rounds)| rounds.contains_key(&round))
                    .map(|(place, _)| place.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every place that has received at least one vote
    pub fn voted_places(&self) -> BTreeSet<PlaceId> {
        self.votes
            .values()
            .flat_map(|places| places.keys().cloned())
            .collect()
    }

    /// Votes cast in one round: place -> member -> decision
    pub fn votes_for_round(&self, round: u32) -> BTreeMap<PlaceId, BTreeMap<MemberId, Decision>> {
        let mut result: BTreeMap<PlaceId, BTreeMap<MemberId, Decision>> = BTreeMap::new();
        for (member, places) in &self.votes {
            for (place, rounds) in places {
                if let Some(decision) = rounds.get(&round) {
                    result
                        .entry(place.clone())
                        .or_default()
                        .insert(member.clone(), *decision);
                }
            }
        }
        result
    }

    /// Full voting history of one member, ordered by place then round
    pub fn history(&self, member: &MemberId) -> Vec<VoteRecord> {
        let Some(places) = self.votes.get(member) else {
            return Vec::new();
        };
        places
            .iter()
            .flat_map(|(place, rounds)| {
                rounds.iter().map(move |(round, decision)| VoteRecord {
                    member: member.clone(),
                    place: place.clone(),
                    round: *round,
                    decision: *decision,
                })
            })
            .collect()
    }

    /// Total number of stored (member, place, round) records
    pub fn len(&self) -> usize {
        self.votes
            .values()
            .flat_map(|places| places.values())
            .map(|rounds| rounds.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rounds_for(&self, member: &MemberId, place: &PlaceId) -> Option<&RoundVotes> {
        self.votes.get(member)?.get(place)
    }
}
