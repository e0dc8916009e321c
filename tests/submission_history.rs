use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;

use riskscope::client::{CreateSubmissionResponse, StatusResponse, SubmissionService};
use riskscope::db::Database;
use riskscope::errors::RiskError;
use riskscope::models::{SubmissionForm, SubmissionStatus, ThreatType};
use riskscope::session::SubmissionManager;
use riskscope::store::SubmissionStore;

/// Hands out `submissions/1`, `submissions/2`, ... and answers status polls from a table.
#[derive(Default)]
struct FakeBackend {
    created: AtomicUsize,
    statuses: Mutex<HashMap<String, String>>,
}

impl FakeBackend {
    fn set_status(&self, poll_id: &str, status: &str) {
        self.statuses.lock().unwrap().insert(poll_id.to_string(), status.to_string());
    }
}

#[async_trait]
impl SubmissionService for FakeBackend {
    async fn create(&self, _form: &SubmissionForm) -> Result<CreateSubmissionResponse, RiskError> {
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CreateSubmissionResponse {
            operation: Some(format!("submissions/{}", n)),
            timestamp: Some(Utc::now()),
            ..Default::default()
        })
    }

    async fn status(&self, poll_id: &str) -> Result<StatusResponse, RiskError> {
        match self.statuses.lock().unwrap().get(poll_id) {
            Some(status) => Ok(StatusResponse {
                status: Some(status.clone()),
                details: Some(serde_json::json!("reviewed")),
            }),
            None => Err(RiskError::Transport(format!("unknown submission {}", poll_id))),
        }
    }

    fn service_name(&self) -> &str {
        "fake"
    }
}

fn open_store(dir: &TempDir) -> SubmissionStore {
    let path = dir.path().join("nested").join("history.db");
    let db = Database::new(path.to_str().unwrap()).unwrap();
    SubmissionStore::new(Arc::new(db))
}

fn form(url: &str) -> SubmissionForm {
    SubmissionForm::new(url, "Cloned bank sign-in page", ThreatType::SocialEngineering)
}

#[tokio::test]
async fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());

    let first_id = {
        let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
        let first = manager.create(&form("phish.example")).await.unwrap();
        manager.create(&form("https://second.example/")).await.unwrap();
        first.id
    };

    let manager = SubmissionManager::new(backend.clone(), open_store(&dir));
    let records = manager.records();
    assert_eq!(records.len(), 2);
    // newest first, URLs normalized at creation
    assert_eq!(records[0].url, "https://second.example");
    assert_eq!(records[1].url, "https://phish.example");
    assert_eq!(records[1].id, first_id);
    assert!(records.iter().all(|r| r.status == SubmissionStatus::Pending));
}

#[tokio::test]
async fn test_restart_then_refresh_reconciles_pending() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());

    {
        let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
        manager.create(&form("https://a.example")).await.unwrap();
        manager.create(&form("https://b.example")).await.unwrap();
        manager.create(&form("https://c.example")).await.unwrap();
    }

    backend.set_status("1", "SUCCEEDED");
    backend.set_status("2", "SOMETHING_NEW");
    // "3" unknown to the backend: its poll fails

    let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
    let report = manager.refresh_all().await;
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.refreshed.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.persisted);

    let reopened = SubmissionManager::new(backend.clone(), open_store(&dir));
    let by_url = |url: &str| {
        reopened
            .records()
            .iter()
            .find(|r| r.url == url)
            .cloned()
            .unwrap()
    };
    let a = by_url("https://a.example");
    assert_eq!(a.status, SubmissionStatus::Succeeded);
    assert_eq!(a.status_detail.as_deref(), Some("reviewed"));
    assert_eq!(by_url("https://b.example").status, SubmissionStatus::Pending);
    let c = by_url("https://c.example");
    assert_eq!(c.status, SubmissionStatus::Pending);
    assert!(c.status_detail.is_none());
}

#[tokio::test]
async fn test_clear_persists_empty_history() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());

    {
        let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
        manager.create(&form("https://a.example")).await.unwrap();
        assert!(!manager.clear_all(false));
        assert!(manager.clear_all(true));
    }

    let manager = SubmissionManager::new(backend, open_store(&dir));
    assert!(manager.records().is_empty());
}

#[tokio::test]
async fn test_refresh_by_prefix_after_restart() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());

    let id = {
        let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
        manager.create(&form("https://a.example")).await.unwrap().id
    };
    backend.set_status("1", "CLOSED");

    let mut manager = SubmissionManager::new(backend.clone(), open_store(&dir));
    let refreshed = manager.refresh_one(&id[..18]).await.unwrap();
    assert_eq!(refreshed.status, SubmissionStatus::Closed);

    // terminal now: no further polls
    backend.set_status("1", "PENDING");
    let again = manager.refresh_one(&id).await.unwrap();
    assert_eq!(again.status, SubmissionStatus::Closed);
}
