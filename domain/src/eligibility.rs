//! Eligibility filter
//!
//! Derives the restaurants a member may currently vote on: the catalog,
//! minus anything their preferences exclude, minus anything they have
//! already disapproved in any round.

use crate::catalog::{CandidateCatalog, CandidateEntry};
use crate::core::ids::PlaceId;
use crate::preference::Preferences;
use std::collections::BTreeSet;

/// Compute the eligible entries in catalog order.
///
/// A missing preference entry means no filtering. The result is a pure
/// function of its inputs.
pub fn eligible<'a>(
    catalog: &'a CandidateCatalog,
    preferences: Option<&Preferences>,
    rejected: &BTreeSet<PlaceId>,
) -> Vec<&'a CandidateEntry> {
    catalog
        .iter()
        .filter(|entry| !rejected.contains(&entry.place_id))
        .filter(|entry| preferences.is_none_or(|p| p.admits(entry)))
        .collect()
}

/// Same as [`eligible`] but only the place ids
pub fn eligible_ids(
    catalog: &CandidateCatalog,
    preferences: Option<&Preferences>,
    rejected: &BTreeSet<PlaceId>,
) -> BTreeSet<PlaceId> {
    eligible(catalog, preferences, rejected)
        .into_iter()
        .map(|entry| entry.place_id.clone())
        .collect()
}
