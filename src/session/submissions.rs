use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::client::SubmissionService;
use crate::errors::RiskError;
use crate::models::{OperationId, SubmissionForm, SubmissionRecord, SubmissionStatus};
use crate::store::SubmissionStore;
use crate::utils::normalize_url;

/// Poll the backend once for `record`'s status. Works on a copy: the caller
/// decides when to merge and persist.
///
/// Records that are no longer PENDING come back unchanged without a network call.
pub async fn poll_status(
    service: &dyn SubmissionService,
    record: SubmissionRecord,
) -> Result<SubmissionRecord, RiskError> {
    if !record.is_pending() {
        return Ok(record);
    }

    let poll_id = record.operation_id.poll_id()?;
    debug!(operation_id = %record.operation_id, poll_id = %poll_id, "Polling submission status");
    let resp = service.status(poll_id).await?;

    let raw_status = resp.status.as_deref()
        .ok_or_else(|| RiskError::Data(format!("Status response for {} has no status", record.operation_id)))?;
    let status = SubmissionStatus::from_remote(raw_status);
    if status == SubmissionStatus::Pending && !raw_status.eq_ignore_ascii_case("PENDING") {
        debug!(operation_id = %record.operation_id, remote_status = %raw_status, "Submission still processing");
    }

    let mut updated = record;
    updated.status = status;
    updated.status_detail = resp.detail_text();
    updated.last_updated = Utc::now();
    Ok(updated)
}

enum PollOutcome {
    Skipped,
    Refreshed,
    Failed(RiskError),
}

/// Outcome of a bulk refresh. `records` is always the full list.
#[derive(Debug)]
pub struct RefreshReport {
    pub records: Vec<SubmissionRecord>,
    /// Ids of records that were polled successfully.
    pub refreshed: Vec<String>,
    /// Records whose poll failed, left as they were.
    pub failures: Vec<(String, RiskError)>,
    pub persisted: bool,
}

/// Creates submissions and drives them from PENDING to a terminal state.
///
/// The in-memory list mirrors the store: it is loaded once at construction and
/// written back as a whole after every mutation.
pub struct SubmissionManager {
    service: Arc<dyn SubmissionService>,
    store: SubmissionStore,
    records: Vec<SubmissionRecord>,
}

impl SubmissionManager {
    /// Reconcile in-memory state from the store.
    pub fn new(service: Arc<dyn SubmissionService>, store: SubmissionStore) -> Self {
        let records = store.load();
        info!(count = records.len(), "Submission history loaded");
        Self { service, store, records }
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_pending()).count()
    }

    /// Look a record up by full id or unique id prefix.
    pub fn find(&self, id: &str) -> Result<&SubmissionRecord, RiskError> {
        if let Some(exact) = self.records.iter().find(|r| r.id == id) {
            return Ok(exact);
        }
        let mut matches = self.records.iter().filter(|r| !id.is_empty() && r.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (Some(_), Some(_)) => Err(RiskError::Validation(format!("Submission id prefix {} is ambiguous", id))),
            (None, _) => Err(RiskError::NotFound(format!("No submission with id {}", id))),
        }
    }

    /// Validate `form`, file it with the backend and track the new record.
    ///
    /// On any failure nothing is mutated and `form` is untouched, so the caller
    /// can retry with the same input.
    pub async fn create(&mut self, form: &SubmissionForm) -> Result<SubmissionRecord, RiskError> {
        form.validate()?;
        for warning in form.evidence_warnings() {
            warn!(url = %form.url, "{}", warning);
        }

        let mut outgoing = form.clone();
        outgoing.url = normalize_url(&form.url);

        info!(url = %outgoing.url, abuse_type = %outgoing.abuse_type, "Filing submission");
        let resp = self.service.create(&outgoing).await?;

        let handle = resp.operation
            .ok_or_else(|| RiskError::Data("Submission response has no operation handle".into()))?;
        let created_at = resp.timestamp
            .ok_or_else(|| RiskError::Data("Submission response has no timestamp".into()))?;
        let operation_id = OperationId::parse(&handle)?;

        let record = SubmissionRecord::from_form(outgoing, operation_id, created_at);
        info!(id = %record.id, operation_id = %record.operation_id, "Submission accepted");

        self.records.insert(0, record.clone());
        self.store.save(&self.records);
        Ok(record)
    }

    /// Refresh a single record. Terminal records are returned as-is with no
    /// network call; a failed poll leaves the record unchanged.
    pub async fn refresh_one(&mut self, id: &str) -> Result<SubmissionRecord, RiskError> {
        let record = self.find(id)?.clone();
        if !record.is_pending() {
            debug!(id = %record.id, status = %record.status, "Skipping refresh of terminal submission");
            return Ok(record);
        }

        let updated = poll_status(self.service.as_ref(), record).await?;
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated.clone();
        }
        info!(id = %updated.id, status = %updated.status, "Submission refreshed");
        self.store.save(&self.records);
        Ok(updated)
    }

    /// Poll every PENDING record concurrently, merge the outcomes and write the
    /// list back once. Individual failures never abort the others.
    pub async fn refresh_all(&mut self) -> RefreshReport {
        let service = self.service.clone();
        let polls = self.records.iter().cloned().map(|record| {
            let service = service.clone();
            async move {
                if !record.is_pending() {
                    return (record, PollOutcome::Skipped);
                }
                match poll_status(service.as_ref(), record.clone()).await {
                    Ok(updated) => (updated, PollOutcome::Refreshed),
                    Err(e) => (record, PollOutcome::Failed(e)),
                }
            }
        });
        let outcomes = join_all(polls).await;

        let mut refreshed = Vec::new();
        let mut failures = Vec::new();
        let mut records = Vec::with_capacity(outcomes.len());
        for (record, outcome) in outcomes {
            match outcome {
                PollOutcome::Refreshed => refreshed.push(record.id.clone()),
                PollOutcome::Failed(e) => {
                    warn!(id = %record.id, error = %e, "Submission refresh failed");
                    failures.push((record.id.clone(), e));
                }
                PollOutcome::Skipped => {}
            }
            records.push(record);
        }

        self.records = records;
        let persisted = self.store.save(&self.records);
        info!(refreshed = refreshed.len(), failed = failures.len(), "Bulk refresh finished");

        RefreshReport {
            records: self.records.clone(),
            refreshed,
            failures,
            persisted,
        }
    }

    /// Drop every record, in memory and in the store. A no-op unless `confirmed`.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Clear cancelled");
            return false;
        }
        let count = self.records.len();
        self.records.clear();
        self.store.clear();
        info!(count, "Submission history cleared");
        true
    }
}
