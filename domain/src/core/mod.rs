//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifier newtypes for meals, members and places
//! - [`error::MealError`]: recoverable rejections raised by the consensus engine

pub mod error;
pub mod ids;
