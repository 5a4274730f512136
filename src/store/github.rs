//! GitHub-backed remote store
//!
//! Persists each day's log as a JSON file in a repository folder via the
//! GitHub contents API. The blob `sha` returned by the API serves as the
//! version token; GitHub rejects writes carrying a stale sha.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{LogStore, StoreError, StoreResult, VersionToken};
use crate::models::DailyLog;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_FOLDER: &str = "daily_logs";

const ENV_REPO: &str = "MACROTRACK_GITHUB_REPO";
const ENV_TOKEN: &str = "MACROTRACK_GITHUB_TOKEN";
const ENV_FOLDER: &str = "MACROTRACK_GITHUB_FOLDER";

/// Configuration for the GitHub store
///
/// The access token is injected from the environment, never embedded.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Repository in `owner/name` form
    pub repo: String,
    /// Folder inside the repository holding the per-date documents
    pub folder: String,
    /// Personal access token with contents read/write scope
    pub token: String,
    /// API base URL, overridable for testing
    pub api_base: String,
}

impl GithubConfig {
    /// Build a config from `MACROTRACK_GITHUB_*` environment variables
    pub fn from_env() -> StoreResult<Self> {
        let repo = std::env::var(ENV_REPO).map_err(|_| StoreError::MissingConfig(ENV_REPO))?;
        let token = std::env::var(ENV_TOKEN).map_err(|_| StoreError::MissingConfig(ENV_TOKEN))?;
        let folder = std::env::var(ENV_FOLDER).unwrap_or_else(|_| DEFAULT_FOLDER.to_string());

        Ok(Self {
            repo,
            folder,
            token,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Whether the environment selects the GitHub store
    pub fn env_configured() -> bool {
        std::env::var(ENV_REPO).is_ok() && std::env::var(ENV_TOKEN).is_ok()
    }
}

/// Remote daily log store backed by a GitHub repository
pub struct GithubStore {
    config: GithubConfig,
    client: Client,
}

impl GithubStore {
    pub fn new(config: GithubConfig) -> StoreResult<Self> {
        let client = Client::builder().user_agent("macrotrack").build()?;
        Ok(Self { config, client })
    }

    fn contents_url(&self, date: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}/{}.json",
            self.config.api_base, self.config.repo, self.config.folder, date
        )
    }
}

/// Decode the document text from a contents-API response
pub(crate) fn parse_contents_response(body: &Value) -> StoreResult<(DailyLog, VersionToken)> {
    let sha = body
        .get("sha")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidContent("response has no sha".to_string()))?;

    let content = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidContent("response has no content".to_string()))?;

    // GitHub wraps base64 content across lines
    let stripped: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(stripped)
        .map_err(|e| StoreError::InvalidContent(format!("bad base64 content: {}", e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| StoreError::InvalidContent(format!("content is not UTF-8: {}", e)))?;

    let doc: Value = serde_json::from_str(&text)?;
    Ok((DailyLog::from_document(&doc), VersionToken::new(sha)))
}

/// Encode a log into the base64 payload the contents API expects
pub(crate) fn encode_document(log: &DailyLog) -> StoreResult<String> {
    let text = serde_json::to_string_pretty(&log.to_document())?;
    Ok(BASE64.encode(text.as_bytes()))
}

impl LogStore for GithubStore {
    fn load(&self, date: &str) -> StoreResult<(DailyLog, Option<VersionToken>)> {
        let response = self
            .client
            .get(self.contents_url(date))
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .send()?;

        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json()?;
                let (log, token) = parse_contents_response(&body)?;
                Ok((log, Some(token)))
            }
            StatusCode::NOT_FOUND => {
                tracing::debug!(date, "No remote daily log yet; starting empty");
                Ok((DailyLog::new(), None))
            }
            status => Err(StoreError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            }),
        }
    }

    fn save(
        &self,
        date: &str,
        log: &DailyLog,
        token: Option<&VersionToken>,
    ) -> StoreResult<VersionToken> {
        let mut payload = json!({
            "message": format!("Update daily log {}", date),
            "content": encode_document(log)?,
        });
        if let Some(token) = token {
            payload["sha"] = json!(token.as_str());
        }

        let response = self
            .client
            .put(self.contents_url(date))
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let body: Value = response.json()?;
                let sha = body
                    .pointer("/content/sha")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        StoreError::InvalidContent("save response has no content sha".to_string())
                    })?;
                tracing::debug!(date, "Saved daily log to GitHub");
                Ok(VersionToken::new(sha))
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Err(StoreError::Conflict),
            status => Err(StoreError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodDatabase, NutrientProfile};

    #[test]
    fn test_parse_contents_response() {
        let text = r#"{"rice": {"quantity": 200.0}}"#;
        let body = json!({
            "sha": "abc123",
            "content": BASE64.encode(text.as_bytes()),
        });

        let (log, token) = parse_contents_response(&body).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].name, "rice");
        assert_eq!(log.entries()[0].quantity_grams, 200.0);
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_parse_contents_response_with_wrapped_base64() {
        let text = r#"{"rice": {"quantity": 200.0}}"#;
        let mut encoded = BASE64.encode(text.as_bytes());
        encoded.insert(10, '\n');
        let body = json!({ "sha": "abc123", "content": encoded });

        let (log, _) = parse_contents_response(&body).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_parse_contents_response_missing_fields() {
        let result = parse_contents_response(&json!({ "sha": "abc123" }));
        assert!(matches!(result, Err(StoreError::InvalidContent(_))));

        let result = parse_contents_response(&json!({ "content": "" }));
        assert!(matches!(result, Err(StoreError::InvalidContent(_))));
    }

    #[test]
    fn test_encode_document_round_trips() {
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
        let mut log = DailyLog::new();
        log.add(&db, "rice", 200.0).unwrap();

        let encoded = encode_document(&log).unwrap();
        let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        let doc: Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(DailyLog::from_document(&doc), log);
    }
}
