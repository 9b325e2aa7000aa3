//! Candidate catalog
//!
//! The universe of restaurants a meal can choose from. Entries are sourced
//! once from the place-search provider and treated as an immutable snapshot;
//! a refresh replaces the whole catalog.

pub mod entities;

pub use entities::{Budget, CandidateEntry, PriceLevel, SearchArea};

use crate::core::ids::PlaceId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Ordered set of candidate restaurants, unique by place id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateCatalog {
    entries: Vec<CandidateEntry>,
}

impl CandidateCatalog {
    /// Build a catalog from a provider batch
    ///
    /// Provider order is kept. When a place id appears more than once the
    /// first occurrence wins.
    pub fn new(entries: impl IntoIterator<Item = CandidateEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.place_id.clone()))
            .collect();
        Self { entries }
    }

    /// Replace the whole catalog, returning the new entry count
    pub fn replace(&mut self, entries: impl IntoIterator<Item = CandidateEntry>) -> usize {
        *self = Self::new(entries);
        self.entries.len()
    }

    pub fn get(&self, place_id: &PlaceId) -> Option<&CandidateEntry> {
        self.entries.iter().find(|e| &e.place_id == place_id)
    }

    pub fn contains(&self, place_id: &PlaceId) -> bool {
        self.get(place_id).is_some()
    }

    /// Place ids currently on offer
    pub fn place_ids(&self) -> BTreeSet<PlaceId> {
        self.entries.iter().map(|e| e.place_id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
