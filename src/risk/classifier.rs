//! Pure mapping from per-threat confidence scores to a verdict.
//!
//! Two thresholds are deliberately kept apart: a result is RISKY as soon as any
//! score leaves {SAFE, LOW}, while the submission shortcut is only offered for
//! scores at MEDIUM or above on the submitted URL itself.

use crate::models::{ResolvedUriScore, ScoreEntry, ThreatType, Verdict};

/// SAFE iff every score (and every resolved-URL score, when present) is SAFE or LOW.
pub fn classify(scores: &[ScoreEntry], resolved: Option<&ResolvedUriScore>) -> Verdict {
    let all_benign = |entries: &[ScoreEntry]| entries.iter().all(|e| e.confidence_level.is_benign());

    let resolved_benign = resolved.map_or(true, |r| all_benign(&r.scores));
    if all_benign(scores) && resolved_benign {
        Verdict::Safe
    } else {
        Verdict::Risky
    }
}

/// True iff at least one score is MEDIUM, HIGH, HIGHER or EXTREMELY_HIGH.
pub fn has_submittable_risk(scores: &[ScoreEntry]) -> bool {
    scores.iter().any(|e| e.confidence_level.is_submittable())
}

/// Threat type of the first MEDIUM+ score in input order. Only a pre-fill hint.
pub fn recommend_abuse_type(scores: &[ScoreEntry]) -> Option<ThreatType> {
    scores
        .iter()
        .find(|e| e.confidence_level.is_submittable())
        .map(|e| e.threat_type.clone())
}
