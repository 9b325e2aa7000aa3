//! Meal domain entities

use crate::catalog::{Budget, SearchArea};
use crate::core::ids::{MealId, PlaceId};
use crate::quorum::RoundTransition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a member within a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the meal; may remove other members
    Admin,
    #[default]
    Guest,
}

impl MemberRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, MemberRole::Admin)
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(MemberRole::Admin),
            "guest" => Ok(MemberRole::Guest),
            _ => Err(format!("Unknown member role: {}. Valid: admin, guest", s)),
        }
    }
}

/// Scheduling and search metadata of a meal (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub coords: Option<(f64, f64)>,
    pub radius_meters: u32,
    pub budget: Option<Budget>,
    /// Post-meal feedback: unset, liked, or disliked
    pub liked: Option<bool>,
}

impl Meal {
    pub fn new(id: impl Into<MealId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
            scheduled_at: None,
            location: None,
            coords: None,
            radius_meters: 1_000,
            budget: None,
            liked: None,
        }
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn at_location(mut self, location: impl Into<String>, radius_meters: u32) -> Self {
        self.location = Some(location.into());
        self.radius_meters = radius_meters;
        self
    }

    pub fn with_budget(mut self, min: u32, max: u32) -> Self {
        self.budget = Some(Budget { min, max });
        self
    }

    /// Parameters for the place-search provider
    pub fn search_area(&self) -> SearchArea {
        SearchArea {
            location: self.location.clone(),
            coords: self.coords,
            radius_meters: self.radius_meters,
            budget: self.budget,
        }
    }
}

/// Point-in-time view of where a meal stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub round: u32,
    pub is_resolved: bool,
    pub is_exhausted: bool,
    pub chosen_restaurant: Option<PlaceId>,
}

/// Result of a vote that was not rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CastOutcome {
    /// Recorded; `transition` is set when the vote closed the round or
    /// completed consensus
    Accepted {
        round: u32,
        transition: Option<RoundTransition>,
    },
    /// The meal already chose a restaurant; nothing was recorded
    AlreadyResolved { place: PlaceId },
    /// No restaurant can reach consensus any more; nothing was recorded
    Exhausted { round: u32 },
}

impl CastOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CastOutcome::Accepted { .. })
    }

    pub fn transition(&self) -> Option<&RoundTransition> {
        match self {
            CastOutcome::Accepted { transition, .. } => transition.as_ref(),
            _ => None,
        }
    }
}
