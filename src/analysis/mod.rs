//! Nutrition analysis
//!
//! Pure computations: aggregation of daily totals, percentage
//! distribution, and goal evaluation.

mod aggregator;
mod goals;

pub use aggregator::{compute_percentages, compute_totals, MacroPercentages, MacroTotals};
pub use goals::{
    assess, classify, compare_to_benchmark, BenchmarkResult, Classification, EnergyBalance, Goal,
    Macro, MacroAssessment, TargetRange, UnknownGoalError, DAILY_CALORIE_BENCHMARK,
};
