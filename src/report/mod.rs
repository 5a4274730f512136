//! Daily summary reports
//!
//! Serializable, presentation-ready structures built from a log, the food
//! database, and a goal, plus plain-text rendering for the CLI.

use serde::Serialize;

use crate::analysis::{
    assess, compare_to_benchmark, compute_percentages, compute_totals, BenchmarkResult,
    Classification, EnergyBalance, Goal, MacroAssessment, MacroPercentages, MacroTotals,
    DAILY_CALORIE_BENCHMARK,
};
use crate::models::{DailyLog, FoodDatabase};

/// One logged food line
#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub food: String,
    pub quantity_grams: f64,
}

/// Full daily summary
///
/// `percentages` and `assessments` are None when nothing with nutrient
/// content was logged; front ends must not chart or classify in that case.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub goal: Goal,
    pub entries: Vec<LogLine>,
    pub totals: MacroTotals,
    pub percentages: Option<MacroPercentages>,
    pub assessments: Option<Vec<MacroAssessment>>,
    pub benchmark: BenchmarkResult,
}

/// Build a summary with a full recomputation pass over the log
pub fn build_summary(date: &str, goal: Goal, log: &DailyLog, db: &FoodDatabase) -> DailySummary {
    let entries = log
        .entries()
        .iter()
        .map(|e| LogLine {
            food: e.name.clone(),
            quantity_grams: e.quantity_grams,
        })
        .collect();

    let totals = compute_totals(log, db);
    let percentages = compute_percentages(&totals);
    let assessments = percentages.as_ref().map(|p| assess(p, goal));
    let benchmark = compare_to_benchmark(totals.calories, DAILY_CALORIE_BENCHMARK);

    DailySummary {
        date: date.to_string(),
        goal,
        entries,
        totals,
        percentages,
        assessments,
        benchmark,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Message for one macro's assessment, mirroring the app's UI strings
pub fn assessment_message(a: &MacroAssessment) -> String {
    let range = format!("{}-{}%", a.range.min, a.range.max);
    match a.classification {
        Classification::TooLow => format!(
            "{} intake {}%: too LOW compared to the target range {}",
            a.macro_kind.as_str(),
            a.percent,
            range
        ),
        Classification::TooHigh => format!(
            "{} intake {}%: too HIGH compared to the target range {}",
            a.macro_kind.as_str(),
            a.percent,
            range
        ),
        Classification::WithinRange => format!(
            "{} intake {}%: WITHIN the target range {}",
            a.macro_kind.as_str(),
            a.percent,
            range
        ),
    }
}

/// Message for the calorie benchmark comparison
pub fn benchmark_message(result: &BenchmarkResult) -> String {
    match result.balance {
        EnergyBalance::Surplus => format!(
            "Calorie SURPLUS: {:.0} kcal above the {:.0} kcal benchmark",
            result.magnitude(),
            DAILY_CALORIE_BENCHMARK
        ),
        EnergyBalance::Deficit => format!(
            "Calorie DEFICIT: {:.0} kcal below the {:.0} kcal benchmark",
            result.magnitude(),
            DAILY_CALORIE_BENCHMARK
        ),
        EnergyBalance::Exact => format!(
            "Calorie intake EXACTLY matches the {:.0} kcal benchmark",
            DAILY_CALORIE_BENCHMARK
        ),
    }
}

/// Render a summary as plain text for the CLI
pub fn render_text(summary: &DailySummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("Daily Nutrition Data for {}\n", summary.date));

    if summary.entries.is_empty() {
        out.push_str("No food recorded today.\n");
    } else {
        for line in &summary.entries {
            out.push_str(&format!(
                "  {}: {}g\n",
                capitalize(&line.food),
                line.quantity_grams
            ));
        }
    }

    out.push_str(&format!(
        "Totals: {:.1}g carbohydrates, {:.1}g proteins, {:.1}g fats, {:.0} kcal\n",
        summary.totals.carbohydrates,
        summary.totals.proteins,
        summary.totals.fats,
        summary.totals.calories
    ));

    match (&summary.percentages, &summary.assessments) {
        (Some(pct), Some(assessments)) => {
            out.push_str(&format!(
                "Distribution: {}% carbohydrates, {}% proteins, {}% fats\n",
                pct.carbohydrates, pct.proteins, pct.fats
            ));
            out.push_str(&format!(
                "Macronutrient comparison for {}:\n",
                summary.goal.as_str()
            ));
            for a in assessments {
                out.push_str(&format!("  {}\n", assessment_message(a)));
            }
        }
        _ => {
            out.push_str("No food added yet: macronutrient distribution unavailable.\n");
        }
    }

    out.push_str(&format!("{}\n", benchmark_message(&summary.benchmark)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientProfile;

    fn rice_db() -> FoodDatabase {
        let mut db = FoodDatabase::new();
        db.insert(
            "rice",
            NutrientProfile {
                carbohydrates: 28.0,
                proteins: 2.7,
                fats: 0.3,
                calories: None,
            },
        );
        db
    }

    #[test]
    fn test_summary_for_logged_day() {
        let db = rice_db();
        let mut log = DailyLog::new();
        log.add(&db, "rice", 200.0).unwrap();

        let summary = build_summary("2025-01-09", Goal::KetogenicDiet, &log, &db);

        assert_eq!(summary.entries.len(), 1);
        assert!((summary.totals.carbohydrates - 56.0).abs() < 1e-9);
        let pct = summary.percentages.as_ref().unwrap();
        assert_eq!(pct.carbohydrates, 90.3);

        let assessments = summary.assessments.as_ref().unwrap();
        assert_eq!(assessments[0].classification, Classification::TooHigh);
        assert_eq!(summary.benchmark.balance, EnergyBalance::Deficit);
    }

    #[test]
    fn test_summary_for_empty_day_has_no_distribution() {
        let db = rice_db();
        let summary = build_summary("2025-01-09", Goal::WeightLoss, &DailyLog::new(), &db);

        assert!(summary.entries.is_empty());
        assert!(summary.percentages.is_none());
        assert!(summary.assessments.is_none());
    }

    #[test]
    fn test_assessment_messages() {
        let db = rice_db();
        let mut log = DailyLog::new();
        log.add(&db, "rice", 200.0).unwrap();

        let summary = build_summary("2025-01-09", Goal::KetogenicDiet, &log, &db);
        let assessments = summary.assessments.unwrap();

        let msg = assessment_message(&assessments[0]);
        assert!(msg.contains("Carbohydrates"));
        assert!(msg.contains("too HIGH"));
        assert!(msg.contains("5-10%"));
    }

    #[test]
    fn test_benchmark_messages() {
        let surplus = compare_to_benchmark(2200.0, DAILY_CALORIE_BENCHMARK);
        assert!(benchmark_message(&surplus).contains("SURPLUS"));
        assert!(benchmark_message(&surplus).contains("200"));

        let exact = compare_to_benchmark(2000.0, DAILY_CALORIE_BENCHMARK);
        assert!(benchmark_message(&exact).contains("EXACTLY"));
    }

    #[test]
    fn test_render_text_empty_day() {
        let db = rice_db();
        let summary = build_summary("2025-01-09", Goal::WeightLoss, &DailyLog::new(), &db);
        let text = render_text(&summary);

        assert!(text.contains("No food recorded today."));
        assert!(text.contains("distribution unavailable"));
    }

    #[test]
    fn test_render_text_capitalizes_food_names() {
        let db = rice_db();
        let mut log = DailyLog::new();
        log.add(&db, "rice", 200.0).unwrap();

        let summary = build_summary("2025-01-09", Goal::WeightLoss, &log, &db);
        assert!(render_text(&summary).contains("Rice: 200g"));
    }
}
