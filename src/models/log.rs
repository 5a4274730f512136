//! Daily log model
//!
//! One day's food entries, accumulated by food name.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use super::FoodDatabase;

/// Daily log error types
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Food '{0}' not found in the database")]
    UnknownFood(String),

    #[error("Invalid quantity {0}: must be a positive number of grams")]
    InvalidQuantity(f64),
}

/// A single logged food with its cumulative quantity for the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    pub quantity_grams: f64,
}

/// One day's food log
///
/// Entries keep insertion order; repeated additions of the same food
/// accumulate into one entry. Each DailyLog belongs to a single calendar
/// date, keyed externally by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    entries: Vec<LogEntry>,
}

impl DailyLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quantity of a food, accumulating into any existing entry
    ///
    /// Validates fully before mutating: an error leaves the log unchanged.
    /// Returns the entry's new cumulative quantity.
    pub fn add(
        &mut self,
        db: &FoodDatabase,
        name: &str,
        quantity_grams: f64,
    ) -> Result<f64, LogError> {
        let normalized = name.trim().to_lowercase();

        if !quantity_grams.is_finite() || quantity_grams <= 0.0 {
            return Err(LogError::InvalidQuantity(quantity_grams));
        }
        if !db.contains(&normalized) {
            return Err(LogError::UnknownFood(normalized));
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == normalized) {
            entry.quantity_grams += quantity_grams;
            return Ok(entry.quantity_grams);
        }

        self.entries.push(LogEntry {
            name: normalized,
            quantity_grams,
        });
        Ok(quantity_grams)
    }

    /// Remove a food's entry entirely
    ///
    /// Idempotent: returns false when the food was not logged.
    pub fn remove(&mut self, name: &str) -> bool {
        let normalized = name.trim().to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.name != normalized);
        self.entries.len() < before
    }

    /// Logged entries in insertion order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize to the persisted document shape:
    /// `{"rice": {"quantity": 200.0}, ...}`
    pub fn to_document(&self) -> Value {
        let mut doc = serde_json::Map::new();
        for entry in &self.entries {
            doc.insert(
                entry.name.clone(),
                json!({ "quantity": entry.quantity_grams }),
            );
        }
        Value::Object(doc)
    }

    /// Parse from the persisted document shape
    ///
    /// Malformed entries (missing or non-positive quantities) are dropped
    /// with a warning rather than failing the whole load.
    pub fn from_document(doc: &Value) -> Self {
        let mut log = Self::new();

        let Some(map) = doc.as_object() else {
            tracing::warn!("Daily log document is not a JSON object; starting empty");
            return log;
        };

        for (name, info) in map {
            let quantity = info.get("quantity").and_then(Value::as_f64);
            match quantity {
                Some(q) if q.is_finite() && q > 0.0 => {
                    log.entries.push(LogEntry {
                        name: name.trim().to_lowercase(),
                        quantity_grams: q,
                    });
                }
                _ => {
                    tracing::warn!(food = %name, "Dropping malformed log entry");
                }
            }
        }

        log
    }
}
