use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::{ResolvedUriScore, ScoreEntry};
use super::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Safe,
    Threat,
    Error,
}

impl From<Verdict> for ScanStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Safe => ScanStatus::Safe,
            Verdict::Risky => ScanStatus::Threat,
        }
    }
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Safe => "safe",
            ScanStatus::Threat => "threat",
            ScanStatus::Error => "error",
        }
    }
}

/// Outcome of one scan call. Immutable once built and kept only for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Time-ordered UUID (v7), unique within and across sessions.
    pub id: String,
    pub url: String,
    pub status: ScanStatus,
    pub timestamp: DateTime<Utc>,
    /// Absent when the scan errored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<ScoreEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_uri_score: Option<ResolvedUriScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ScanResult {
    pub fn scored(
        url: &str,
        verdict: Verdict,
        scores: Vec<ScoreEntry>,
        resolved_uri_score: Option<ResolvedUriScore>,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            url: url.to_string(),
            status: verdict.into(),
            timestamp: Utc::now(),
            scores: Some(scores),
            resolved_uri_score,
            error_detail: None,
        }
    }

    pub fn errored(url: &str, detail: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            url: url.to_string(),
            status: ScanStatus::Error,
            timestamp: Utc::now(),
            scores: None,
            resolved_uri_score: None,
            error_detail: Some(detail.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ScanStatus::Error
    }

    /// Scores for the submitted URL, empty for errored results.
    pub fn scores(&self) -> &[ScoreEntry] {
        self.scores.as_deref().unwrap_or(&[])
    }
}
