//! Food database model
//!
//! Immutable lookup table from food name to per-100g nutrient profile.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Atwater energy factors (kcal per gram)
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Food database error types
#[derive(Debug, Error)]
pub enum FoodDatabaseError {
    #[error("Failed to read food database file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse food database: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid nutrient profile for '{food}': values must be non-negative and finite")]
    InvalidProfile { food: String },
}

/// Per-100g nutrient content of a food
///
/// Field aliases unify the two source schemas: the English one
/// (`Carbohydrates`/`Proteins`/`Fats`) and the Italian one
/// (`carboidrati`/`proteine`/`grassi`/`calorie`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(alias = "Carbohydrates", alias = "carbs", alias = "carboidrati")]
    pub carbohydrates: f64,
    #[serde(alias = "Proteins", alias = "protein", alias = "proteine")]
    pub proteins: f64,
    #[serde(alias = "Fats", alias = "fat", alias = "grassi")]
    pub fats: f64,
    /// kcal per 100g; derived from the macros when the source omits it
    #[serde(default, alias = "Calories", alias = "calorie")]
    pub calories: Option<f64>,
}

impl NutrientProfile {
    /// Check that all present fields are non-negative finite numbers
    pub fn is_valid(&self) -> bool {
        let fields_ok = [self.carbohydrates, self.proteins, self.fats]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        let calories_ok = self.calories.map_or(true, |c| c.is_finite() && c >= 0.0);
        fields_ok && calories_ok
    }

    /// kcal per 100g, falling back to the 4/4/9 rule when not stored
    pub fn calories_per_100g(&self) -> f64 {
        self.calories.unwrap_or_else(|| {
            self.carbohydrates * KCAL_PER_G_CARB
                + self.proteins * KCAL_PER_G_PROTEIN
                + self.fats * KCAL_PER_G_FAT
        })
    }
}

/// Immutable food lookup table, keyed by lowercase food name
#[derive(Debug, Clone, Default)]
pub struct FoodDatabase {
    foods: HashMap<String, NutrientProfile>,
}

impl FoodDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile under a lowercase-normalized name
    pub fn insert(&mut self, name: &str, profile: NutrientProfile) {
        self.foods.insert(name.trim().to_lowercase(), profile);
    }

    /// Parse a database from a JSON object of `{name: profile}`
    pub fn from_json_str(json: &str) -> Result<Self, FoodDatabaseError> {
        let raw: HashMap<String, NutrientProfile> = serde_json::from_str(json)?;

        let mut db = Self::new();
        for (name, profile) in raw {
            if !profile.is_valid() {
                return Err(FoodDatabaseError::InvalidProfile { food: name });
            }
            db.insert(&name, profile);
        }
        Ok(db)
    }

    /// Load a database from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FoodDatabaseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Look up a food by name (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<&NutrientProfile> {
        self.foods.get(&name.trim().to_lowercase())
    }

    /// Check whether a food exists in the database
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of foods in the database
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
