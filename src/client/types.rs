use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ResolvedUriScore, ScoreEntry};

/// Body returned by the scanning backend. `scores` missing means the scan failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    #[serde(default)]
    pub scores: Option<Vec<ScoreEntry>>,
    #[serde(default)]
    pub resolved_uri_score: Option<ResolvedUriScore>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubmissionResponse {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl StatusResponse {
    /// Details flattened to text: strings verbatim, structured payloads as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match &self.details {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Error body shape shared by both backends.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub details: Option<Value>,
}
