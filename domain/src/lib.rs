//! Domain layer for tablevote
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Meal
//!
//! A meal is one group decision about where to eat. Members filter a
//! candidate catalog through their own [`Preferences`] and vote
//! approve/disapprove on what remains.
//!
//! ## Quorum
//!
//! - **Unanimity**: a restaurant is chosen once every active member approves it
//! - **Rounds**: when everyone has voted without agreement, a new round opens
//!   with the restaurants still acceptable to all
//! - **Exhaustion**: when no restaurant can reach unanimity any more, the meal
//!   ends without a choice

pub mod catalog;
pub mod config;
pub mod core;
pub mod eligibility;
pub mod meal;
pub mod preference;
pub mod quorum;

// Re-export commonly used types
pub use catalog::{Budget, CandidateCatalog, CandidateEntry, PriceLevel, SearchArea};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::MealError,
    ids::{MealId, MemberId, PlaceId},
};
pub use meal::{CastOutcome, Meal, MealState, MemberRole, RoundStatus};
pub use preference::Preferences;

// Re-export quorum types
pub use quorum::{
    Decision, PlaceScore, RoundSnapshot, RoundState, RoundTransition, VoteLedger, VoteRecord,
};
