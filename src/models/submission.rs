use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::RiskError;
use super::score::ThreatType;

static REGION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}$").unwrap()
});

/// Evidence shorter than this is accepted but flagged as unlikely to be actioned.
pub const MIN_SUGGESTED_EVIDENCE_CHARS: usize = 10;

/// Evidence naming fewer of the abuse type's policy terms than this gets a hint.
const MIN_POLICY_KEYWORDS: usize = 2;

pub const DEFAULT_REGION_CODE: &str = "US";

/// Platform on which the abuse was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    #[default]
    #[serde(rename = "PLATFORM_UNSPECIFIED", alias = "UNSPECIFIED")]
    Unspecified,
    Android,
    Ios,
    Macos,
    Windows,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Unspecified => "PLATFORM_UNSPECIFIED",
            Platform::Android => "ANDROID",
            Platform::Ios => "IOS",
            Platform::Macos => "MACOS",
            Platform::Windows => "WINDOWS",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLATFORM_UNSPECIFIED" | "UNSPECIFIED" | "" => Ok(Platform::Unspecified),
            "ANDROID" => Ok(Platform::Android),
            "IOS" => Ok(Platform::Ios),
            "MACOS" => Ok(Platform::Macos),
            "WINDOWS" => Ok(Platform::Windows),
            other => Err(RiskError::Validation(format!(
                "Unknown platform: {}. Use one of: UNSPECIFIED, ANDROID, IOS, MACOS, WINDOWS",
                other
            ))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state of a submission on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Succeeded,
    Closed,
}

impl SubmissionStatus {
    /// Map a backend status string. Anything other than a terminal state means
    /// the backend is still processing, which is tracked as PENDING.
    pub fn from_remote(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUCCEEDED" => SubmissionStatus::Succeeded,
            "CLOSED" => SubmissionStatus::Closed,
            _ => SubmissionStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded | SubmissionStatus::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "PENDING",
            SubmissionStatus::Succeeded => "SUCCEEDED",
            SubmissionStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend handle for an asynchronous submission, e.g. `projects/42/operations/abc123`.
///
/// The handle is one or more `/`-separated segments; the trailing segment is the
/// identifier used to poll for status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(String);

impl OperationId {
    pub fn parse(handle: &str) -> Result<Self, RiskError> {
        let id = Self(handle.to_string());
        id.poll_id()?;
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing path segment of the handle.
    pub fn poll_id(&self) -> Result<&str, RiskError> {
        let handle = self.0.as_str();
        if handle.is_empty() {
            return Err(RiskError::Data("Operation handle is empty".into()));
        }
        if handle.chars().any(char::is_whitespace) {
            return Err(RiskError::Data(format!(
                "Operation handle contains whitespace: {:?}",
                handle
            )));
        }
        if handle.split('/').any(str::is_empty) {
            return Err(RiskError::Data(format!(
                "Operation handle has an empty segment: {:?}",
                handle
            )));
        }
        // split always yields at least one item
        Ok(handle.rsplit('/').next().unwrap_or(handle))
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operator input for a new abuse submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    pub url: String,
    pub evidence: String,
    pub abuse_type: ThreatType,
    pub platform: Platform,
    pub region_codes: Vec<String>,
}

impl SubmissionForm {
    pub fn new(url: &str, evidence: &str, abuse_type: ThreatType) -> Self {
        Self {
            url: url.to_string(),
            evidence: evidence.to_string(),
            abuse_type,
            platform: Platform::default(),
            region_codes: vec![DEFAULT_REGION_CODE.to_string()],
        }
    }

    /// Check every field the backend requires. Runs before any network call.
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.url.trim().is_empty() {
            return Err(RiskError::Validation("URL is required".into()));
        }
        if self.evidence.trim().is_empty() {
            return Err(RiskError::Validation("Evidence is required".into()));
        }
        if !self.abuse_type.is_known() {
            return Err(RiskError::Validation(format!(
                "Unsupported abuse type: {}. Use one of: MALWARE, SOCIAL_ENGINEERING, UNWANTED_SOFTWARE",
                self.abuse_type
            )));
        }
        if let Some(code) = self.region_codes.iter().find(|c| !REGION_CODE.is_match(c)) {
            return Err(RiskError::Validation(format!(
                "Invalid region code: {:?} (expected two uppercase letters, e.g. US)",
                code
            )));
        }
        Ok(())
    }

    /// Non-blocking quality hints about the evidence text.
    pub fn evidence_warnings(&self) -> Vec<String> {
        let meaningful = self.evidence.chars().filter(|c| !c.is_whitespace()).count();
        if meaningful == 0 {
            return Vec::new();
        }
        if meaningful < MIN_SUGGESTED_EVIDENCE_CHARS {
            return vec![format!(
                "Evidence is very short ({} chars); describe how the URL violates policy so reviewers can act on it",
                meaningful
            )];
        }

        let keywords = policy_keywords(&self.abuse_type);
        if keywords.is_empty() {
            return Vec::new();
        }
        let evidence = self.evidence.to_lowercase();
        let found = keywords.iter().filter(|k| evidence.contains(*k)).count();
        if found < MIN_POLICY_KEYWORDS {
            vec![format!(
                "Evidence should describe how this violates {} policies (e.g. {})",
                self.abuse_type,
                keywords.join(", ")
            )]
        } else {
            Vec::new()
        }
    }
}

/// Terms reviewers look for when judging evidence for an abuse type.
fn policy_keywords(abuse_type: &ThreatType) -> &'static [&'static str] {
    match abuse_type {
        ThreatType::SocialEngineering => &["brand", "impersonating", "legitimate", "credentials"],
        ThreatType::Malware => &["executable", "malware", "infection", "behavior"],
        _ => &[],
    }
}

/// A locally tracked abuse submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    pub url: String,
    /// Assigned once by the backend at creation and never changed.
    pub operation_id: OperationId,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub evidence: String,
    pub abuse_type: ThreatType,
    pub platform: Platform,
    pub region_codes: Vec<String>,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
}

impl SubmissionRecord {
    pub fn from_form(form: SubmissionForm, operation_id: OperationId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            url: form.url,
            operation_id,
            created_at,
            last_updated: Utc::now(),
            evidence: form.evidence,
            abuse_type: form.abuse_type,
            platform: form.platform,
            region_codes: form.region_codes,
            status: SubmissionStatus::Pending,
            status_detail: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SubmissionForm {
        SubmissionForm::new(
            "https://evil.example",
            "Login page impersonating a bank and harvesting credentials",
            ThreatType::SocialEngineering,
        )
    }

    #[test]
    fn test_poll_id_is_trailing_segment() {
        let id = OperationId::parse("projects/42/operations/abc123").unwrap();
        assert_eq!(id.poll_id().unwrap(), "abc123");

        let id = OperationId::parse("submissions/123").unwrap();
        assert_eq!(id.poll_id().unwrap(), "123");

        let id = OperationId::parse("op-7").unwrap();
        assert_eq!(id.poll_id().unwrap(), "op-7");
    }

    #[test]
    fn test_malformed_operation_handles_rejected() {
        for bad in ["", "submissions/", "/123", "a//b", "sub missions/1"] {
            let err = OperationId::parse(bad).unwrap_err();
            assert!(matches!(err, RiskError::Data(_)), "expected DataError for {:?}", bad);
        }
    }

    #[test]
    fn test_status_mapping_treats_unknown_as_pending() {
        assert_eq!(SubmissionStatus::from_remote("SUCCEEDED"), SubmissionStatus::Succeeded);
        assert_eq!(SubmissionStatus::from_remote("closed"), SubmissionStatus::Closed);
        assert_eq!(SubmissionStatus::from_remote("RUNNING"), SubmissionStatus::Pending);
        assert_eq!(SubmissionStatus::from_remote(""), SubmissionStatus::Pending);
        assert!(SubmissionStatus::Succeeded.is_terminal());
        assert!(!SubmissionStatus::Pending.is_terminal());
    }

    #[test]
    fn test_platform_wire_names() {
        let p: Platform = serde_json::from_str("\"PLATFORM_UNSPECIFIED\"").unwrap();
        assert_eq!(p, Platform::Unspecified);
        let p: Platform = serde_json::from_str("\"UNSPECIFIED\"").unwrap();
        assert_eq!(p, Platform::Unspecified);
        assert_eq!(serde_json::to_string(&Platform::Macos).unwrap(), "\"MACOS\"");
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert!(matches!("BEOS".parse::<Platform>(), Err(RiskError::Validation(_))));
    }

    #[test]
    fn test_form_validation() {
        assert!(valid_form().validate().is_ok());

        let mut form = valid_form();
        form.evidence = "   ".into();
        assert!(matches!(form.validate(), Err(RiskError::Validation(_))));

        let mut form = valid_form();
        form.url = String::new();
        assert!(matches!(form.validate(), Err(RiskError::Validation(_))));

        let mut form = valid_form();
        form.abuse_type = ThreatType::Other("SPAM".into());
        assert!(matches!(form.validate(), Err(RiskError::Validation(_))));

        let mut form = valid_form();
        form.region_codes = vec!["usa".into()];
        assert!(matches!(form.validate(), Err(RiskError::Validation(_))));
    }

    #[test]
    fn test_form_wire_body() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert_eq!(json["abuseType"], "SOCIAL_ENGINEERING");
        assert_eq!(json["platform"], "PLATFORM_UNSPECIFIED");
        assert_eq!(json["regionCodes"][0], "US");
    }

    #[test]
    fn test_short_evidence_warns_but_validates() {
        let mut form = valid_form();
        form.evidence = "phish".into();
        assert!(form.validate().is_ok());
        assert_eq!(form.evidence_warnings().len(), 1);
        assert!(valid_form().evidence_warnings().is_empty());
    }

    #[test]
    fn test_evidence_without_policy_terms_warns() {
        let mut form = valid_form();
        form.evidence = "This page looks really suspicious to me".into();
        assert!(form.validate().is_ok());
        let warnings = form.evidence_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("SOCIAL_ENGINEERING"));

        // one term is not enough
        form.evidence = "Copies the Contoso brand on a lookalike domain".into();
        assert_eq!(form.evidence_warnings().len(), 1);
    }

    #[test]
    fn test_policy_terms_match_case_insensitively() {
        let mut form = valid_form();
        form.abuse_type = ThreatType::Malware;
        form.evidence = "Drops an EXECUTABLE that shows ransomware Behavior".into();
        assert!(form.evidence_warnings().is_empty());

        form.evidence = "Serves a download nobody asked for".into();
        assert_eq!(form.evidence_warnings().len(), 1);
    }

    #[test]
    fn test_unwanted_software_has_no_policy_terms() {
        let mut form = valid_form();
        form.abuse_type = ThreatType::UnwantedSoftware;
        form.evidence = "Bundles a toolbar installer".into();
        assert!(form.evidence_warnings().is_empty());
    }

    #[test]
    fn test_record_from_form_starts_pending() {
        let op = OperationId::parse("submissions/123").unwrap();
        let created = Utc::now();
        let record = SubmissionRecord::from_form(valid_form(), op.clone(), created);
        assert_eq!(record.status, SubmissionStatus::Pending);
        assert_eq!(record.operation_id, op);
        assert_eq!(record.created_at, created);
        assert!(record.status_detail.is_none());
    }
}
