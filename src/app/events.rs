use crate::models::{ScanResult, SubmissionForm, SubmissionRecord, ThreatType};

/// State deltas produced by `App::dispatch`, applied by `AppState::apply`
/// and rendered by the presentation layer.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A scan call finished (successfully or not)
    ScanCompleted {
        result: ScanResult,
        /// Whether the submission shortcut should be offered
        submittable: bool,
        recommended: Option<ThreatType>,
    },
    /// A submission draft was pre-filled from a scan result
    DraftPrepared {
        form: SubmissionForm,
    },
    /// No draft could be offered for the requested result
    DraftUnavailable {
        result_id: String,
        reason: String,
    },
    /// A submission was accepted by the backend and is being tracked
    SubmissionCreated {
        record: SubmissionRecord,
        warnings: Vec<String>,
    },
    /// A submission was not filed; the draft is kept for another attempt
    SubmissionRejected {
        form: SubmissionForm,
        error_type: &'static str,
        error: String,
        exit_code: i32,
    },
    /// One submission's status was refreshed (or was already terminal)
    SubmissionRefreshed {
        record: SubmissionRecord,
    },
    /// Refreshing one submission failed; its stale status is kept
    RefreshFailed {
        id: String,
        error: String,
        exit_code: i32,
    },
    /// A bulk refresh settled
    SubmissionsRefreshed {
        records: Vec<SubmissionRecord>,
        refreshed: usize,
        failures: Vec<(String, String)>,
        persisted: bool,
    },
    /// Submission history was erased
    SubmissionsCleared {
        count: usize,
    },
    /// The operator declined to clear history
    ClearCancelled,
}

impl AppEvent {
    /// Process exit code for events that report a failed command.
    pub fn failure_code(&self) -> Option<i32> {
        match self {
            AppEvent::SubmissionRejected { exit_code, .. } | AppEvent::RefreshFailed { exit_code, .. } => {
                Some(*exit_code)
            }
            AppEvent::DraftUnavailable { .. } => Some(1),
            _ => None,
        }
    }
}
