//! Catalog entities

use crate::core::ids::PlaceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Price level as reported by the place-search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceLevel {
    #[serde(alias = "PRICE_LEVEL_INEXPENSIVE", rename = "inexpensive")]
    Inexpensive,
    #[serde(alias = "PRICE_LEVEL_MODERATE", rename = "moderate")]
    Moderate,
    #[serde(alias = "PRICE_LEVEL_EXPENSIVE", rename = "expensive")]
    Expensive,
    #[serde(alias = "PRICE_LEVEL_VERY_EXPENSIVE", rename = "very_expensive")]
    VeryExpensive,
}

impl PriceLevel {
    /// Dollar-sign rendering used on restaurant cards
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceLevel::Inexpensive => "$",
            PriceLevel::Moderate => "$$",
            PriceLevel::Expensive => "$$$",
            PriceLevel::VeryExpensive => "$$$$",
        }
    }
}

/// A restaurant the group can vote on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub place_id: PlaceId,
    /// Display name (empty when the provider omits it)
    #[serde(default)]
    pub name: String,
    /// Average rating, 0.0 to 5.0
    pub rating: f64,
    /// Cuisine tags such as "pizza_restaurant"
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub price_level: Option<PriceLevel>,
}

impl CandidateEntry {
    pub fn new(place_id: impl Into<PlaceId>, rating: f64) -> Self {
        Self {
            place_id: place_id.into(),
            name: String::new(),
            rating,
            tags: BTreeSet::new(),
            price_level: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price_level(mut self, level: PriceLevel) -> Self {
        self.price_level = Some(level);
        self
    }

    /// Name for display, falling back to the place id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.place_id.as_str()
        } else {
            &self.name
        }
    }
}

/// Inclusive per-person budget range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub min: u32,
    pub max: u32,
}

/// Where the place-search provider should look for candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArea {
    /// Free-form location (address or provider location id)
    pub location: Option<String>,
    /// Latitude/longitude pair when known
    pub coords: Option<(f64, f64)>,
    pub radius_meters: u32,
    pub budget: Option<Budget>,
}
