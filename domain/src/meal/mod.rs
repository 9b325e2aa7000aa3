//! Meal (session) aggregate
//!
//! - [`entities`]: meal metadata, member roles, status value objects
//! - [`state::MealState`]: the aggregate that enforces every consensus invariant

pub mod entities;
pub mod state;

pub use entities::{CastOutcome, Meal, MemberRole, RoundStatus};
pub use state::MealState;
