//! Application layer for tablevote
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    candidate_source::{CandidateSource, CandidateSourceError},
    event_logger::{MealEvent, MealEventLogger, NoMealEventLogger},
    meal_store::{MealStore, StoreError},
    membership::{MembershipError, MembershipPort},
};
pub use use_cases::meal_service::{MealService, MealServiceError};
