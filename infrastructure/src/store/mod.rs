//! Meal state persistence adapters
//!
//! - [`InMemoryMealStore`]: process-local map, the default
//! - [`JsonFileMealStore`]: one pretty-printed JSON document per meal

mod json_file;
mod memory;

pub use json_file::JsonFileMealStore;
pub use memory::InMemoryMealStore;

use std::str::FromStr;

/// Which [`MealStore`](tablevote_application::MealStore) implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Json,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "json" | "file" => Ok(StoreBackend::Json),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}
