use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of threat evaluated by the reputation backend.
///
/// Unrecognised wire values are kept verbatim in `Other` so a scan result
/// never fails to parse just because the backend learned a new threat type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThreatType {
    Malware,
    SocialEngineering,
    UnwantedSoftware,
    Other(String),
}

impl ThreatType {
    /// Threat types the submission backend accepts as an abuse type.
    pub const KNOWN: [ThreatType; 3] = [
        ThreatType::Malware,
        ThreatType::SocialEngineering,
        ThreatType::UnwantedSoftware,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Malware => "MALWARE",
            Self::SocialEngineering => "SOCIAL_ENGINEERING",
            Self::UnwantedSoftware => "UNWANTED_SOFTWARE",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ThreatType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MALWARE" => Self::Malware,
            "SOCIAL_ENGINEERING" | "PHISHING" => Self::SocialEngineering,
            "UNWANTED_SOFTWARE" => Self::UnwantedSoftware,
            _ => Self::Other(raw),
        }
    }
}

impl From<ThreatType> for String {
    fn from(threat: ThreatType) -> Self {
        threat.as_str().to_string()
    }
}

impl std::str::FromStr for ThreatType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence that a URL carries a given threat, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Safe,
    Low,
    Medium,
    High,
    Higher,
    ExtremelyHigh,
}

impl ConfidenceLevel {
    /// SAFE and LOW are the only levels that keep a result safe.
    pub fn is_benign(&self) -> bool {
        *self <= ConfidenceLevel::Low
    }

    /// MEDIUM and above warrant offering an abuse submission.
    pub fn is_submittable(&self) -> bool {
        *self >= ConfidenceLevel::Medium
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Higher => "HIGHER",
            Self::ExtremelyHigh => "EXTREMELY_HIGH",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub threat_type: ThreatType,
    pub confidence_level: ConfidenceLevel,
}

impl ScoreEntry {
    pub fn new(threat_type: ThreatType, confidence_level: ConfidenceLevel) -> Self {
        Self { threat_type, confidence_level }
    }
}

/// Scores evaluated separately for the final destination of a redirect or shortlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUriScore {
    pub resolved_uri: String,
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}
