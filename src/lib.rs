//! Macrotrack Library
//!
//! Core functionality for daily nutrition logging and macronutrient analysis.

pub mod analysis;
pub mod models;
pub mod report;
pub mod session;
pub mod store;
