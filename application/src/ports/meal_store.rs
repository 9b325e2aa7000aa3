//! Meal store port
//!
//! Persists the [`MealState`] aggregate between operations.

use async_trait::async_trait;
use tablevote_domain::{MealId, MealState};
use thiserror::Error;

/// Errors that can occur while persisting meal state
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt meal state for {meal}: {reason}")]
    Corrupt { meal: MealId, reason: String },

    #[error("Revision conflict for {meal}: stored {stored}, attempted {attempted}")]
    Conflict {
        meal: MealId,
        stored: u64,
        attempted: u64,
    },
}

/// Persistence for meal aggregates
///
/// `save` must refuse a state whose revision is older than the stored one,
/// so a stale writer can never roll a meal back.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn load(&self, meal: &MealId) -> Result<Option<MealState>, StoreError>;

    async fn save(&self, state: &MealState) -> Result<(), StoreError>;

    /// Returns `true` if something was deleted
    async fn delete(&self, meal: &MealId) -> Result<bool, StoreError>;
}
