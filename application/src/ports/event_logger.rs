//! Port for the meal audit trail.
//!
//! Every state change the [`MealService`](crate::MealService) applies is
//! reported as a [`MealEvent`] scoped to one meal. This is separate from
//! `tracing` diagnostics: events are meant to be replayed or inspected by
//! tools, so their shape is fixed.

use serde_json::Value;
use tablevote_domain::MealId;

/// Something that happened to one meal
#[derive(Debug, Clone, PartialEq)]
pub struct MealEvent {
    /// Event kind, e.g. "vote_cast" or "round_advanced"
    pub kind: &'static str,
    pub meal: MealId,
    /// Kind-specific fields; `Value::Null` when there are none
    pub details: Value,
}

impl MealEvent {
    pub fn new(kind: &'static str, meal: &MealId, details: Value) -> Self {
        Self {
            kind,
            meal: meal.clone(),
            details,
        }
    }
}

/// Sink for meal events.
///
/// `log` is synchronous and infallible; a failing sink never affects the
/// operation being recorded.
pub trait MealEventLogger: Send + Sync {
    fn log(&self, event: MealEvent);
}

/// Discards every event
pub struct NoMealEventLogger;

impl MealEventLogger for NoMealEventLogger {
    fn log(&self, _event: MealEvent) {}
}
