//! Macronutrient aggregation
//!
//! Folds a daily log against the food database into absolute totals and a
//! percentage distribution.

use serde::{Deserialize, Serialize};

use crate::models::{DailyLog, FoodDatabase};

/// Absolute macronutrient totals for a day (grams, kcal)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub carbohydrates: f64,
    pub proteins: f64,
    pub fats: f64,
    pub calories: f64,
}

impl MacroTotals {
    /// Sum of the three macro totals in grams (excludes calories)
    pub fn macro_sum(&self) -> f64 {
        self.carbohydrates + self.proteins + self.fats
    }
}

/// Percentage distribution of the three macros, each rounded to 1 decimal
///
/// The three values are rounded independently, so they are not guaranteed
/// to sum to exactly 100.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroPercentages {
    pub carbohydrates: f64,
    pub proteins: f64,
    pub fats: f64,
}

/// Compute absolute nutrient totals from a log and a database
///
/// Deterministic fold in entry insertion order. An entry whose food is
/// missing from the database contributes nothing; the log's add-time
/// validation makes that unreachable in normal use, so it is only logged.
pub fn compute_totals(log: &DailyLog, db: &FoodDatabase) -> MacroTotals {
    let mut totals = MacroTotals::default();

    for entry in log.entries() {
        let Some(profile) = db.lookup(&entry.name) else {
            tracing::warn!(food = %entry.name, "Logged food missing from database; skipping");
            continue;
        };

        let factor = entry.quantity_grams / 100.0;
        totals.carbohydrates += profile.carbohydrates * factor;
        totals.proteins += profile.proteins * factor;
        totals.fats += profile.fats * factor;
        totals.calories += profile.calories_per_100g() * factor;
    }

    totals
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize totals into a percentage distribution
///
/// Returns None when the macro sum is zero (empty log, or only
/// zero-nutrient foods): there is no distribution to report, and callers
/// must not attempt goal classification.
pub fn compute_percentages(totals: &MacroTotals) -> Option<MacroPercentages> {
    let sum = totals.macro_sum();
    if sum == 0.0 {
        return None;
    }

    Some(MacroPercentages {
        carbohydrates: round1(totals.carbohydrates / sum * 100.0),
        proteins: round1(totals.proteins / sum * 100.0),
        fats: round1(totals.fats / sum * 100.0),
    })
}
