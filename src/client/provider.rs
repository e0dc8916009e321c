use async_trait::async_trait;
use crate::errors::RiskError;
use crate::models::SubmissionForm;
use super::types::{CreateSubmissionResponse, ScanResponse, StatusResponse};

/// Remote reputation backend that scores a URL per threat type.
#[async_trait]
pub trait ScanningService: Send + Sync {
    /// One request, one decoded response. Non-success statuses and bodies that
    /// fail to decode are `RiskError::Transport`.
    async fn scan(&self, url: &str) -> Result<ScanResponse, RiskError>;

    /// Backend name for logging
    fn service_name(&self) -> &str;
}

/// Remote abuse-report backend.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn create(&self, form: &SubmissionForm) -> Result<CreateSubmissionResponse, RiskError>;

    /// Poll the processing status of a submission by its poll identifier.
    async fn status(&self, poll_id: &str) -> Result<StatusResponse, RiskError>;

    fn service_name(&self) -> &str;
}
