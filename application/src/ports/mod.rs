//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod candidate_source;
pub mod event_logger;
pub mod meal_store;
pub mod membership;
