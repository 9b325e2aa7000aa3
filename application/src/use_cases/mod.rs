//! Use cases (application services)

pub mod meal_service;
