use serde::{Deserialize, Serialize};

/// Tri-state outcome of a scan as presented to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Every score is SAFE or LOW.
    Safe,
    /// At least one score, for the URL or the URL it resolved to, is MEDIUM or above.
    Risky,
}

impl Verdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}
