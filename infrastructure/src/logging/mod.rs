//! Logging infrastructure: structured meal event logging.
//!
//! Provides [`JsonlMealEventLogger`], a JSONL file writer that implements
//! the [`MealEventLogger`](tablevote_application::MealEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlMealEventLogger;
