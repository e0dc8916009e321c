use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::ScanningService;
use crate::models::{ScanResult, SubmissionForm};
use crate::risk;
use crate::utils::normalize_url;

pub(crate) const MISSING_SCORES: &str = "Scan response did not include scores";

/// Run one scan against the backend. Always yields a terminal result: transport,
/// parse and data failures become a result with status `error`.
pub async fn run_scan(service: &dyn ScanningService, raw_url: &str) -> ScanResult {
    let url = normalize_url(raw_url);
    if url.is_empty() {
        return ScanResult::errored(raw_url, "URL is required");
    }

    debug!(url = %url, service = service.service_name(), "Scanning URL");
    match service.scan(&url).await {
        Ok(resp) => match resp.scores {
            Some(scores) => {
                let verdict = risk::classify(&scores, resp.resolved_uri_score.as_ref());
                if let Some(resolved) = &resp.resolved_uri_score {
                    info!(url = %url, resolved = %resolved.resolved_uri, "Shortlink resolved");
                }
                info!(url = %url, verdict = ?verdict, "Scan completed");
                ScanResult::scored(&url, verdict, scores, resp.resolved_uri_score)
            }
            None => {
                let detail = resp.error.unwrap_or_else(|| MISSING_SCORES.to_string());
                warn!(url = %url, detail = %detail, "Scan returned no scores");
                ScanResult::errored(&url, detail)
            }
        },
        Err(e) => {
            warn!(url = %url, error = %e, "Scan failed");
            ScanResult::errored(&url, e.to_string())
        }
    }
}

/// In-memory scan history for one session, newest first.
pub struct ScanSession {
    service: Arc<dyn ScanningService>,
    results: Vec<ScanResult>,
}

impl ScanSession {
    pub fn new(service: Arc<dyn ScanningService>) -> Self {
        Self { service, results: Vec::new() }
    }

    pub fn service(&self) -> Arc<dyn ScanningService> {
        self.service.clone()
    }

    /// Scan `url` and prepend the result. Identical URLs are never de-duplicated.
    pub async fn scan(&mut self, url: &str) -> ScanResult {
        let result = run_scan(self.service.as_ref(), url).await;
        self.record(result.clone());
        result
    }

    /// Prepend a result produced elsewhere, e.g. by a concurrently spawned scan.
    pub fn record(&mut self, result: ScanResult) {
        self.results.insert(0, result);
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn get(&self, id: &str) -> Option<&ScanResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Pre-filled submission for a result whose own scores reach MEDIUM or above.
    /// Evidence is left for the operator to write.
    pub fn prepare_submission(&self, result_id: &str) -> Option<SubmissionForm> {
        let result = self.get(result_id)?;
        if !risk::has_submittable_risk(result.scores()) {
            return None;
        }
        let abuse_type = risk::recommend_abuse_type(result.scores())?;
        Some(SubmissionForm::new(&result.url, "", abuse_type))
    }
}
