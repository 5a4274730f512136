//! Local file store
//!
//! One pretty-printed JSON document per date in a data directory. The
//! version token is the exact document text last observed; a save against
//! a file whose current contents differ is rejected as a conflict.

use std::path::{Path, PathBuf};

use super::{LogStore, StoreError, StoreResult, VersionToken};
use crate::models::DailyLog;

/// File-backed daily log store
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at a directory, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, date: &str) -> PathBuf {
        self.dir.join(format!("{}.json", date))
    }
}

impl LogStore for FileStore {
    fn load(&self, date: &str) -> StoreResult<(DailyLog, Option<VersionToken>)> {
        let path = self.path_for(date);

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(date, "No daily log file yet; starting empty");
                return Ok((DailyLog::new(), None));
            }
            Err(e) => return Err(e.into()),
        };

        let doc: serde_json::Value = serde_json::from_str(&text)?;
        Ok((DailyLog::from_document(&doc), Some(VersionToken::new(text))))
    }

    fn save(
        &self,
        date: &str,
        log: &DailyLog,
        token: Option<&VersionToken>,
    ) -> StoreResult<VersionToken> {
        let path = self.path_for(date);

        let current = match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        match (&current, token) {
            (Some(text), Some(token)) if text != token.as_str() => {
                return Err(StoreError::Conflict);
            }
            (Some(_), None) => return Err(StoreError::Conflict),
            _ => {}
        }

        let text = serde_json::to_string_pretty(&log.to_document())?;
        std::fs::write(&path, &text)?;
        tracing::debug!(date, path = %path.display(), "Saved daily log");
        Ok(VersionToken::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodDatabase, NutrientProfile};

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

    #[test]
    fn test_load_missing_file_yields_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        let (log, token) = store.load("2025-01-09").unwrap();
        assert!(log.is_empty());
        assert!(token.is_none());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let db = test_db();

        let mut log = DailyLog::new();
        log.add(&db, "rice", 200.0).unwrap();

        let token = store.save("2025-01-09", &log, None).unwrap();
        let (reloaded, reloaded_token) = store.load("2025-01-09").unwrap();

        assert_eq!(reloaded, log);
        assert_eq!(reloaded_token, Some(token));
    }

    #[test]
    fn test_save_with_stale_token_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let db = test_db();

        let mut log = DailyLog::new();
        log.add(&db, "rice", 100.0).unwrap();
        let stale = store.save("2025-01-09", &log, None).unwrap();

        // A second writer updates the document
        log.add(&db, "rice", 50.0).unwrap();
        store.save("2025-01-09", &log, Some(&stale)).unwrap();

        // First writer retries with the stale token
        let result = store.save("2025-01-09", &log, Some(&stale));
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[test]
    fn test_save_without_token_over_existing_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let db = test_db();

        let mut log = DailyLog::new();
        log.add(&db, "rice", 100.0).unwrap();
        store.save("2025-01-09", &log, None).unwrap();

        let result = store.save("2025-01-09", &log, None);
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[test]
    fn test_dates_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let db = test_db();

        let mut log = DailyLog::new();
        log.add(&db, "rice", 100.0).unwrap();
        store.save("2025-01-09", &log, None).unwrap();

        let (other, token) = store.load("2025-01-10").unwrap();
        assert!(other.is_empty());
        assert!(token.is_none());
    }
}
