//! Daily log persistence
//!
//! Stores one JSON document per calendar date behind the `LogStore`
//! trait, with an opaque version token for optimistic concurrency.

mod file;
mod github;

pub use file::FileStore;
pub use github::{GithubConfig, GithubStore};

use thiserror::Error;

use crate::models::DailyLog;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version conflict: the daily log was modified since it was loaded")]
    Conflict,

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid document content: {0}")]
    InvalidContent(String),

    #[error("Store API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque version token identifying the document revision last observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Persistence provider for daily logs, keyed by ISO date string
pub trait LogStore {
    /// Load the log for a date
    ///
    /// An absent document yields an empty log and no token.
    fn load(&self, date: &str) -> StoreResult<(DailyLog, Option<VersionToken>)>;

    /// Save the log for a date
    ///
    /// The token must match the stored revision when the document already
    /// exists; a stale or missing token fails with `StoreError::Conflict`.
    /// Returns the new revision's token.
    fn save(
        &self,
        date: &str,
        log: &DailyLog,
        token: Option<&VersionToken>,
    ) -> StoreResult<VersionToken>;
}
