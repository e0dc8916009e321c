//! In-process stand-ins for the remote backends, shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::client::{CreateSubmissionResponse, ScanResponse, ScanningService, StatusResponse, SubmissionService};
use crate::errors::RiskError;
use crate::models::SubmissionForm;

pub struct MockScanner {
    reply: Result<ScanResponse, String>,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl MockScanner {
    pub fn returning(resp: ScanResponse) -> Self {
        Self { reply: Ok(resp), calls: AtomicUsize::new(0), last_url: Mutex::new(None) }
    }

    pub fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0), last_url: Mutex::new(None) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScanningService for MockScanner {
    async fn scan(&self, url: &str) -> Result<ScanResponse, RiskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        self.reply.clone().map_err(RiskError::Transport)
    }

    fn service_name(&self) -> &str { "mock-scan" }
}

pub struct MockSubmissions {
    create_reply: Mutex<Result<CreateSubmissionResponse, String>>,
    statuses: Mutex<HashMap<String, Result<StatusResponse, String>>>,
    create_calls: AtomicUsize,
    status_calls: AtomicUsize,
    polled: Mutex<Vec<String>>,
}

impl MockSubmissions {
    /// Accepts every submission as `submissions/123`.
    pub fn new() -> Self {
        Self::accepting("submissions/123")
    }

    pub fn accepting(operation: &str) -> Self {
        Self::with_create(CreateSubmissionResponse {
            operation: Some(operation.to_string()),
            timestamp: Some(Utc::now()),
            status: Some("submitted".into()),
            message: Some("URL submitted successfully for review".into()),
        })
    }

    pub fn with_create(resp: CreateSubmissionResponse) -> Self {
        Self {
            create_reply: Mutex::new(Ok(resp)),
            statuses: Mutex::new(HashMap::new()),
            create_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            polled: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_create(message: &str) -> Self {
        let mock = Self::new();
        *mock.create_reply.lock().unwrap() = Err(message.to_string());
        mock
    }

    /// Hand out `operation` for the next create call.
    pub fn next_operation(&self, operation: &str) {
        *self.create_reply.lock().unwrap() = Ok(CreateSubmissionResponse {
            operation: Some(operation.to_string()),
            timestamp: Some(Utc::now()),
            status: Some("submitted".into()),
            message: None,
        });
    }

    pub fn set_status(&self, poll_id: &str, status: &str, details: Option<serde_json::Value>) {
        self.statuses.lock().unwrap().insert(
            poll_id.to_string(),
            Ok(StatusResponse { status: Some(status.to_string()), details }),
        );
    }

    pub fn fail_status(&self, poll_id: &str, message: &str) {
        self.statuses.lock().unwrap().insert(poll_id.to_string(), Err(message.to_string()));
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn polled(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionService for MockSubmissions {
    async fn create(&self, _form: &SubmissionForm) -> Result<CreateSubmissionResponse, RiskError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_reply.lock().unwrap().clone().map_err(RiskError::Transport)
    }

    async fn status(&self, poll_id: &str) -> Result<StatusResponse, RiskError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.polled.lock().unwrap().push(poll_id.to_string());
        match self.statuses.lock().unwrap().get(poll_id) {
            Some(reply) => reply.clone().map_err(RiskError::Transport),
            None => Err(RiskError::Transport(format!("status failed with HTTP 404: {}", poll_id))),
        }
    }

    fn service_name(&self) -> &str { "mock-submission" }
}
