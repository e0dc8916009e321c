use crate::models::{ScanResult, SubmissionForm, SubmissionRecord};
use super::events::AppEvent;

/// Everything the presentation layer shows, rebuilt only through `apply`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Scan results for this session, newest first
    pub results: Vec<ScanResult>,
    /// Tracked submissions, newest first
    pub submissions: Vec<SubmissionRecord>,
    /// Form being edited; survives a rejected submission
    pub draft: Option<SubmissionForm>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn with_submissions(submissions: Vec<SubmissionRecord>) -> Self {
        Self { submissions, ..Default::default() }
    }

    /// Reducer: fold one event into the view state.
    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ScanCompleted { result, .. } => {
                self.results.insert(0, result.clone());
                self.last_error = result.error_detail.clone();
            }
            AppEvent::DraftPrepared { form } => {
                self.draft = Some(form.clone());
                self.last_error = None;
            }
            AppEvent::DraftUnavailable { reason, .. } => {
                self.last_error = Some(reason.clone());
            }
            AppEvent::SubmissionCreated { record, .. } => {
                self.submissions.insert(0, record.clone());
                self.draft = None;
                self.last_error = None;
            }
            AppEvent::SubmissionRejected { form, error, .. } => {
                self.draft = Some(form.clone());
                self.last_error = Some(error.clone());
            }
            AppEvent::SubmissionRefreshed { record } => {
                if let Some(slot) = self.submissions.iter_mut().find(|r| r.id == record.id) {
                    *slot = record.clone();
                }
                self.last_error = None;
            }
            AppEvent::RefreshFailed { error, .. } => {
                self.last_error = Some(error.clone());
            }
            AppEvent::SubmissionsRefreshed { records, failures, .. } => {
                self.submissions = records.clone();
                self.last_error = failures.first().map(|(_, e)| e.clone());
            }
            AppEvent::SubmissionsCleared { .. } => {
                self.submissions.clear();
                self.last_error = None;
            }
            AppEvent::ClearCancelled => {}
        }
    }
}
