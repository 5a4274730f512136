//! Tracking session
//!
//! Owns one day's log and drives the mutate-then-persist cycle: every
//! successful mutation triggers a synchronous save, and the summary is
//! recomputed in full on demand. Persistence failures never invalidate
//! the in-memory log; they are surfaced as warnings and the next
//! mutation retries the save.

use crate::analysis::Goal;
use crate::models::{DailyLog, FoodDatabase, LogError};
use crate::report::{build_summary, DailySummary};
use crate::store::{LogStore, StoreError, VersionToken};

/// Result of the save attempt following a mutation
#[derive(Debug, Clone)]
pub struct SaveStatus {
    pub persisted: bool,
    pub warning: Option<String>,
}

impl SaveStatus {
    fn ok() -> Self {
        Self {
            persisted: true,
            warning: None,
        }
    }

    fn failed(warning: String) -> Self {
        Self {
            persisted: false,
            warning: Some(warning),
        }
    }
}

/// Outcome of adding a food
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// The entry's cumulative quantity after the addition
    pub new_quantity: f64,
    pub save: SaveStatus,
}

/// Outcome of removing a food
#[derive(Debug, Clone)]
pub struct RemoveOutcome {
    pub removed: bool,
    pub save: SaveStatus,
}

/// One user's tracking session for a single date
pub struct Session {
    date: String,
    goal: Goal,
    db: FoodDatabase,
    store: Box<dyn LogStore>,
    log: DailyLog,
    token: Option<VersionToken>,
}

impl Session {
    /// Open a session, loading the day's log from the store
    ///
    /// A failed load starts the session with an empty log; the in-memory
    /// state is authoritative for the rest of the session either way.
    pub fn open(store: Box<dyn LogStore>, db: FoodDatabase, date: &str, goal: Goal) -> Self {
        let (log, token) = match store.load(date) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(date, error = %e, "Failed to load daily log; starting empty");
                (DailyLog::new(), None)
            }
        };

        Self {
            date: date.to_string(),
            goal,
            db,
            store,
            log,
            token,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn log(&self) -> &DailyLog {
        &self.log
    }

    /// Add a food, then persist
    ///
    /// Validation errors leave both the log and the store untouched.
    pub fn add_food(&mut self, name: &str, quantity_grams: f64) -> Result<AddOutcome, LogError> {
        let new_quantity = self.log.add(&self.db, name, quantity_grams)?;
        Ok(AddOutcome {
            new_quantity,
            save: self.persist(),
        })
    }

    /// Remove a food, then persist (only when something was removed)
    pub fn remove_food(&mut self, name: &str) -> RemoveOutcome {
        let removed = self.log.remove(name);
        let save = if removed {
            self.persist()
        } else {
            SaveStatus::ok()
        };
        RemoveOutcome { removed, save }
    }

    /// Build the day's full summary
    pub fn summary(&self) -> DailySummary {
        build_summary(&self.date, self.goal, &self.log, &self.db)
    }

    fn persist(&mut self) -> SaveStatus {
        match self.store.save(&self.date, &self.log, self.token.as_ref()) {
            Ok(token) => {
                self.token = Some(token);
                SaveStatus::ok()
            }
            Err(StoreError::Conflict) => self.retry_after_conflict(),
            Err(e) => {
                tracing::warn!(date = %self.date, error = %e, "Failed to persist daily log");
                SaveStatus::failed(format!("Daily log not saved: {}", e))
            }
        }
    }

    // Another writer updated the document. Pick up its revision token and
    // write our log over it once (last-write-wins).
    fn retry_after_conflict(&mut self) -> SaveStatus {
        tracing::warn!(date = %self.date, "Version conflict on save; retrying with fresh token");

        let fresh = match self.store.load(&self.date) {
            Ok((_, token)) => token,
            Err(e) => {
                tracing::warn!(date = %self.date, error = %e, "Reload after conflict failed");
                return SaveStatus::failed(format!("Daily log not saved: {}", e));
            }
        };

        match self.store.save(&self.date, &self.log, fresh.as_ref()) {
            Ok(token) => {
                self.token = Some(token);
                SaveStatus::ok()
            }
            Err(e) => {
                tracing::warn!(date = %self.date, error = %e, "Retry after conflict failed");
                SaveStatus::failed(format!("Daily log not saved: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientProfile;
    use crate::store::{FileStore, StoreResult};

    fn test_db() -> FoodDatabase {
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

    /// Store whose saves always fail
    struct BrokenStore;

    impl LogStore for BrokenStore {
        fn load(&self, _date: &str) -> StoreResult<(DailyLog, Option<VersionToken>)> {
            Ok((DailyLog::new(), None))
        }

        fn save(
            &self,
            _date: &str,
            _log: &DailyLog,
            _token: Option<&VersionToken>,
        ) -> StoreResult<VersionToken> {
            Err(StoreError::Api {
                status: 500,
                message: "remote unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::new(dir.path()).unwrap();
            let mut session =
                Session::open(Box::new(store), test_db(), "2025-01-09", Goal::WeightLoss);
            let outcome = session.add_food("rice", 200.0).unwrap();
            assert_eq!(outcome.new_quantity, 200.0);
            assert!(outcome.save.persisted);
        }

        // A new session sees the persisted log
        let store = FileStore::new(dir.path()).unwrap();
        let session = Session::open(Box::new(store), test_db(), "2025-01-09", Goal::WeightLoss);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().entries()[0].quantity_grams, 200.0);
    }

    #[test]
    fn test_add_rejects_unknown_food_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let mut session = Session::open(Box::new(store), test_db(), "2025-01-09", Goal::WeightLoss);

        assert!(session.add_food("dragonfruit", 100.0).is_err());
        assert!(session.log().is_empty());

        // Nothing was written
        let store = FileStore::new(dir.path()).unwrap();
        let (log, token) = store.load("2025-01-09").unwrap();
        assert!(log.is_empty());
        assert!(token.is_none());
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let mut session =
            Session::open(Box::new(BrokenStore), test_db(), "2025-01-09", Goal::WeightLoss);

        let outcome = session.add_food("rice", 150.0).unwrap();
        assert!(!outcome.save.persisted);
        assert!(outcome.save.warning.is_some());

        // In-memory log stays authoritative
        assert_eq!(session.log().len(), 1);
        let summary = session.summary();
        assert!((summary.totals.carbohydrates - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_absent_food_skips_save() {
        let mut session =
            Session::open(Box::new(BrokenStore), test_db(), "2025-01-09", Goal::WeightLoss);

        // BrokenStore saves always fail, so a save attempt would surface
        let outcome = session.remove_food("rice");
        assert!(!outcome.removed);
        assert!(outcome.save.persisted);
    }

    #[test]
    fn test_conflict_resolved_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path()).unwrap();
        let mut session = Session::open(Box::new(store), test_db(), "2025-01-09", Goal::WeightLoss);
        session.add_food("rice", 100.0).unwrap();

        // A concurrent writer replaces the document
        let other = FileStore::new(dir.path()).unwrap();
        let (mut other_log, other_token) = other.load("2025-01-09").unwrap();
        other_log.add(&test_db(), "rice", 500.0).unwrap();
        other.save("2025-01-09", &other_log, other_token.as_ref()).unwrap();

        // The session's next save conflicts, reloads the token, and wins
        let outcome = session.add_food("rice", 50.0).unwrap();
        assert!(outcome.save.persisted);

        let (final_log, _) = other.load("2025-01-09").unwrap();
        assert_eq!(final_log.entries()[0].quantity_grams, 150.0);
    }
}
