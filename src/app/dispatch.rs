use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::client::{ScanningService, SubmissionService};
use crate::models::ScanResult;
use crate::risk;
use crate::session::{run_scan, ScanSession, SubmissionManager};
use crate::store::SubmissionStore;
use super::command::Command;
use super::events::AppEvent;
use super::state::AppState;

/// Owns the scan session and submission manager and routes every command
/// through one place.
pub struct App {
    scans: ScanSession,
    submissions: SubmissionManager,
    state: AppState,
}

impl App {
    pub fn new(
        scanner: Arc<dyn ScanningService>,
        submitter: Arc<dyn SubmissionService>,
        store: SubmissionStore,
    ) -> Self {
        let submissions = SubmissionManager::new(submitter, store);
        let state = AppState::with_submissions(submissions.records().to_vec());
        Self {
            scans: ScanSession::new(scanner),
            submissions,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn submissions(&self) -> &SubmissionManager {
        &self.submissions
    }

    /// Run `cmd`, fold the resulting events into the state and hand them back
    /// for rendering.
    pub async fn dispatch(&mut self, cmd: Command) -> Vec<AppEvent> {
        debug!(command = ?cmd, "Dispatching command");
        let events = self.execute(cmd).await;
        for event in &events {
            self.state.apply(event);
        }
        events
    }

    async fn execute(&mut self, cmd: Command) -> Vec<AppEvent> {
        match cmd {
            Command::Scan { url } => {
                let result = self.scans.scan(&url).await;
                vec![scan_completed(result)]
            }

            Command::ScanMany { urls } => {
                let service = self.scans.service();
                let mut pending: FuturesUnordered<_> = urls
                    .iter()
                    .map(|url| run_scan(service.as_ref(), url))
                    .collect();

                // record each result as it settles so the list stays newest-first
                let mut events = Vec::with_capacity(urls.len());
                while let Some(result) = pending.next().await {
                    self.scans.record(result.clone());
                    events.push(scan_completed(result));
                }
                events
            }

            Command::PrepareSubmission { result_id } => {
                match self.scans.prepare_submission(&result_id) {
                    Some(form) => vec![AppEvent::DraftPrepared { form }],
                    None => {
                        let reason = if self.scans.get(&result_id).is_some() {
                            "Result has no MEDIUM or higher scores to report".to_string()
                        } else {
                            format!("No scan result with id {}", result_id)
                        };
                        vec![AppEvent::DraftUnavailable { result_id, reason }]
                    }
                }
            }

            Command::Submit { form } => {
                let warnings = form.evidence_warnings();
                match self.submissions.create(&form).await {
                    Ok(record) => vec![AppEvent::SubmissionCreated { record, warnings }],
                    Err(e) => {
                        let class = e.classify();
                        vec![AppEvent::SubmissionRejected {
                            form,
                            error_type: class.error_type,
                            error: e.to_string(),
                            exit_code: class.exit_code,
                        }]
                    }
                }
            }

            Command::Refresh { id } => match self.submissions.refresh_one(&id).await {
                Ok(record) => vec![AppEvent::SubmissionRefreshed { record }],
                Err(e) => vec![AppEvent::RefreshFailed {
                    id,
                    error: e.to_string(),
                    exit_code: e.classify().exit_code,
                }],
            },

            Command::RefreshAll => {
                let report = self.submissions.refresh_all().await;
                vec![AppEvent::SubmissionsRefreshed {
                    records: report.records,
                    refreshed: report.refreshed.len(),
                    failures: report
                        .failures
                        .into_iter()
                        .map(|(id, e)| (id, e.to_string()))
                        .collect(),
                    persisted: report.persisted,
                }]
            }

            Command::ClearAll { confirmed } => {
                let count = self.submissions.records().len();
                if self.submissions.clear_all(confirmed) {
                    vec![AppEvent::SubmissionsCleared { count }]
                } else {
                    vec![AppEvent::ClearCancelled]
                }
            }
        }
    }
}

fn scan_completed(result: ScanResult) -> AppEvent {
    let submittable = risk::has_submittable_risk(result.scores());
    let recommended = risk::recommend_abuse_type(result.scores());
    AppEvent::ScanCompleted { result, submittable, recommended }
}
