//! Data models
//!
//! Rust structs for the food database and the daily log.

mod food;
mod log;

pub use food::{FoodDatabase, FoodDatabaseError, NutrientProfile};
pub use log::{DailyLog, LogEntry, LogError};
