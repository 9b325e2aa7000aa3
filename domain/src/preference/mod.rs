//! Member preference store
//!
//! Each member keeps one [`Preferences`] entry per meal. It is only ever
//! written by its owner and only ever read by the eligibility filter.

use crate::catalog::CandidateEntry;
use crate::core::error::MealError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Highest rating the place-search provider reports
pub const MAX_RATING: f64 = 5.0;

/// Per-member filter settings
///
/// # Example
///
/// ```
/// use tablevote_domain::{CandidateEntry, Preferences};
///
/// let prefs = Preferences::new(["Sushi_Restaurant "], 3.5).unwrap();
/// let pizza = CandidateEntry::new("r1", 4.0).with_tags(["pizza_restaurant"]);
/// let sushi = CandidateEntry::new("r2", 4.8).with_tags(["sushi_restaurant"]);
///
/// assert!(prefs.admits(&pizza));
/// assert!(!prefs.admits(&sushi));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Normalized (trimmed, lowercase) cuisine tags the member does not want
    pub unwanted_tags: BTreeSet<String>,
    /// Restaurants rated strictly below this are filtered out
    pub min_rating: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            unwanted_tags: BTreeSet::new(),
            min_rating: 0.0,
        }
    }
}

impl Preferences {
    /// Create validated preferences
    pub fn new<I, S>(unwanted_tags: I, min_rating: f64) -> Result<Self, MealError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !min_rating.is_finite() || !(0.0..=MAX_RATING).contains(&min_rating) {
            return Err(MealError::InvalidRating(min_rating));
        }

        Ok(Self {
            unwanted_tags: unwanted_tags
                .into_iter()
                .map(|t| normalize_tag(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
            min_rating,
        })
    }

    /// Whether the entry passes both the tag and rating filters
    pub fn admits(&self, entry: &CandidateEntry) -> bool {
        if entry.rating < self.min_rating {
            return false;
        }
        !entry
            .tags
            .iter()
            .any(|tag| self.unwanted_tags.contains(&normalize_tag(tag)))
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
