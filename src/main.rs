//! Macrotrack
//!
//! Daily nutrition tracker: log foods, review macronutrient totals and
//! distribution, and compare against a dietary goal or calorie benchmark.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use macrotrack::analysis::Goal;
use macrotrack::models::FoodDatabase;
use macrotrack::report::render_text;
use macrotrack::session::Session;
use macrotrack::store::{FileStore, GithubConfig, GithubStore, LogStore};

const USAGE: &str = "Usage:
  macrotrack add <food> <grams>   Log a quantity of a food
  macrotrack remove <food>        Remove a food from today's log
  macrotrack show                 Show today's summary
  macrotrack goals                List the available goals

Environment:
  MACROTRACK_FOOD_DB        Path to the food database JSON (default: nutritional_data.json)
  MACROTRACK_DATA_DIR       Local daily-log directory (default: daily_logs)
  MACROTRACK_DATE           Override the tracked date (default: today)
  MACROTRACK_GOAL           Dietary goal (default: Weight Loss)
  MACROTRACK_GITHUB_REPO    owner/name of the repo for remote storage
  MACROTRACK_GITHUB_TOKEN   Access token for remote storage
  MACROTRACK_GITHUB_FOLDER  Folder in the repo (default: daily_logs)";

/// Get the food database path from environment or use default
fn get_food_db_path() -> PathBuf {
    std::env::var("MACROTRACK_FOOD_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("nutritional_data.json"))
}

/// Pick the store: GitHub when configured, local files otherwise
fn open_store() -> Result<Box<dyn LogStore>, Box<dyn std::error::Error>> {
    if GithubConfig::env_configured() {
        let config = GithubConfig::from_env()?;
        tracing::info!(repo = %config.repo, "Using GitHub daily-log store");
        return Ok(Box::new(GithubStore::new(config)?));
    }

    let dir = std::env::var("MACROTRACK_DATA_DIR").unwrap_or_else(|_| "daily_logs".to_string());
    tracing::info!(dir = %dir, "Using local daily-log store");
    Ok(Box::new(FileStore::new(dir)?))
}

fn report_save(save: &macrotrack::session::SaveStatus) {
    if let Some(warning) = &save.warning {
        eprintln!("Warning: {}", warning);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrotrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    if command == "goals" {
        for goal in Goal::ALL {
            println!("{}", goal.as_str());
        }
        return Ok(());
    }

    let db_path = get_food_db_path();
    let db = FoodDatabase::from_path(&db_path)?;
    tracing::info!(path = %db_path.display(), foods = db.len(), "Loaded food database");

    let date = std::env::var("MACROTRACK_DATE")
        .unwrap_or_else(|_| chrono::Local::now().format("%Y-%m-%d").to_string());
    let goal = Goal::parse(
        &std::env::var("MACROTRACK_GOAL").unwrap_or_else(|_| "Weight Loss".to_string()),
    )?;

    let store = open_store()?;
    let mut session = Session::open(store, db, &date, goal);

    match command {
        "add" => {
            let (Some(food), Some(grams)) = (args.get(1), args.get(2)) else {
                eprintln!("{}", USAGE);
                std::process::exit(2);
            };
            let quantity: f64 = grams.parse()?;

            match session.add_food(food, quantity) {
                Ok(outcome) => {
                    println!("Added {}g of {} (total {}g)", quantity, food, outcome.new_quantity);
                    report_save(&outcome.save);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        "remove" => {
            let Some(food) = args.get(1) else {
                eprintln!("{}", USAGE);
                std::process::exit(2);
            };

            let outcome = session.remove_food(food);
            if outcome.removed {
                println!("Removed {} from today's log", food);
            } else {
                println!("{} was not in today's log", food);
            }
            report_save(&outcome.save);
        }
        "show" => {
            print!("{}", render_text(&session.summary()));
        }
        _ => {
            eprintln!("Unknown command '{}'\n{}", command, USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
