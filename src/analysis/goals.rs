//! Goal evaluation
//!
//! Classifies a macronutrient distribution against goal-specific target
//! ranges, or a daily calorie total against a fixed benchmark.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MacroPercentages;

/// Reference daily calorie intake for benchmark mode
pub const DAILY_CALORIE_BENCHMARK: f64 = 2000.0;

/// Raised when a goal name from user input matches none of the fixed goals
#[derive(Debug, Error)]
#[error("Unknown goal '{0}'")]
pub struct UnknownGoalError(pub String);

/// Dietary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    EnduranceTraining,
    KetogenicDiet,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::EnduranceTraining,
        Goal::KetogenicDiet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::EnduranceTraining => "Endurance Training",
            Goal::KetogenicDiet => "Ketogenic Diet",
        }
    }

    /// Parse a goal from user input (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, UnknownGoalError> {
        match s.trim().to_lowercase().as_str() {
            "weight loss" => Ok(Goal::WeightLoss),
            "muscle gain" => Ok(Goal::MuscleGain),
            "endurance training" => Ok(Goal::EnduranceTraining),
            "ketogenic diet" => Ok(Goal::KetogenicDiet),
            _ => Err(UnknownGoalError(s.to_string())),
        }
    }

    /// Target range for a macro under this goal
    pub fn target_range(&self, macro_kind: Macro) -> TargetRange {
        use Macro::*;
        let (min, max) = match (self, macro_kind) {
            (Goal::WeightLoss, Carbohydrates) => (20.0, 40.0),
            (Goal::WeightLoss, Proteins) => (30.0, 40.0),
            (Goal::WeightLoss, Fats) => (30.0, 40.0),
            (Goal::MuscleGain, Carbohydrates) => (45.0, 55.0),
            (Goal::MuscleGain, Proteins) => (20.0, 30.0),
            (Goal::MuscleGain, Fats) => (20.0, 30.0),
            (Goal::EnduranceTraining, Carbohydrates) => (55.0, 65.0),
            (Goal::EnduranceTraining, Proteins) => (15.0, 20.0),
            (Goal::EnduranceTraining, Fats) => (20.0, 25.0),
            (Goal::KetogenicDiet, Carbohydrates) => (5.0, 10.0),
            (Goal::KetogenicDiet, Proteins) => (20.0, 25.0),
            (Goal::KetogenicDiet, Fats) => (65.0, 75.0),
        };
        TargetRange { min, max }
    }
}

/// Macronutrient kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Carbohydrates,
    Proteins,
    Fats,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Carbohydrates, Macro::Proteins, Macro::Fats];

    pub fn as_str(&self) -> &'static str {
        match self {
            Macro::Carbohydrates => "Carbohydrates",
            Macro::Proteins => "Proteins",
            Macro::Fats => "Fats",
        }
    }
}

/// Closed target interval in percentage points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

/// How a macro percentage sits relative to its target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    TooLow,
    WithinRange,
    TooHigh,
}

/// Classify a percentage against a closed target range (boundaries inclusive)
pub fn classify(percent: f64, range: TargetRange) -> Classification {
    if percent < range.min {
        Classification::TooLow
    } else if percent > range.max {
        Classification::TooHigh
    } else {
        Classification::WithinRange
    }
}

/// One macro's evaluation against its goal range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroAssessment {
    pub macro_kind: Macro,
    pub percent: f64,
    pub range: TargetRange,
    pub classification: Classification,
}

/// Evaluate a full percentage distribution against a goal
pub fn assess(percentages: &MacroPercentages, goal: Goal) -> Vec<MacroAssessment> {
    Macro::ALL
        .iter()
        .map(|&macro_kind| {
            let percent = match macro_kind {
                Macro::Carbohydrates => percentages.carbohydrates,
                Macro::Proteins => percentages.proteins,
                Macro::Fats => percentages.fats,
            };
            let range = goal.target_range(macro_kind);
            MacroAssessment {
                macro_kind,
                percent,
                range,
                classification: classify(percent, range),
            }
        })
        .collect()
}

/// Calorie position relative to the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyBalance {
    Surplus,
    Deficit,
    Exact,
}

/// Benchmark comparison result; `difference` is signed (total - benchmark)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub balance: EnergyBalance,
    pub difference: f64,
}

impl BenchmarkResult {
    /// Absolute size of the surplus or deficit
    pub fn magnitude(&self) -> f64 {
        self.difference.abs()
    }
}

/// Compare a daily calorie total to a benchmark value
pub fn compare_to_benchmark(total_calories: f64, benchmark: f64) -> BenchmarkResult {
    let difference = total_calories - benchmark;
    let balance = if difference == 0.0 {
        EnergyBalance::Exact
    } else if difference > 0.0 {
        EnergyBalance::Surplus
    } else {
        EnergyBalance::Deficit
    };
    BenchmarkResult {
        balance,
        difference,
    }
}
