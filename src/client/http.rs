use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::errors::RiskError;
use crate::models::SubmissionForm;
use super::provider::{ScanningService, SubmissionService};
use super::types::{CreateSubmissionResponse, ErrorBody, ScanResponse, StatusResponse};

/// JSON-over-HTTP client for the scan and submission endpoints of one backend.
pub struct HttpRiskClient {
    client: Client,
    base_url: String,
}

impl HttpRiskClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RiskError> {
        Url::parse(base_url)
            .map_err(|e| RiskError::Config(format!("Invalid service base_url {}: {}", base_url, e)))?;

        let mut builder = Client::builder().user_agent(concat!("riskscope/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RiskError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn status_url(&self, poll_id: &str) -> Result<Url, RiskError> {
        let mut url = Url::parse(&self.endpoint("api/submission"))
            .map_err(|e| RiskError::Config(format!("Invalid status endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| RiskError::Config(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .push(poll_id);
        Ok(url)
    }
}

/// Decode a success body, or turn a non-success status into a transport error
/// that carries the backend's own message when it sent one.
async fn read_json<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T, RiskError> {
    let status = resp.status();
    debug!(status = status.as_u16(), request = what, "Backend responded");

    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| match (body.error, body.details) {
                (Some(error), Some(serde_json::Value::String(details))) => Some(format!("{} ({})", error, details)),
                (Some(error), _) => Some(error),
                _ => None,
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("no reason").to_string());
        return Err(RiskError::Transport(format!(
            "{} failed with HTTP {}: {}",
            what,
            status.as_u16(),
            message
        )));
    }

    resp.json::<T>()
        .await
        .map_err(|e| RiskError::Transport(format!("Invalid {} response: {}", what, e)))
}

#[async_trait]
impl ScanningService for HttpRiskClient {
    async fn scan(&self, url: &str) -> Result<ScanResponse, RiskError> {
        let resp = self.client
            .post(self.endpoint("api/scan"))
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(|e| RiskError::Transport(format!("Scan request failed: {}", e)))?;

        read_json(resp, "scan").await
    }

    fn service_name(&self) -> &str { "http-scan" }
}

#[async_trait]
impl SubmissionService for HttpRiskClient {
    async fn create(&self, form: &SubmissionForm) -> Result<CreateSubmissionResponse, RiskError> {
        let resp = self.client
            .post(self.endpoint("api/submit"))
            .json(form)
            .send()
            .await
            .map_err(|e| RiskError::Transport(format!("Submission request failed: {}", e)))?;

        read_json(resp, "submission").await
    }

    async fn status(&self, poll_id: &str) -> Result<StatusResponse, RiskError> {
        let url = self.status_url(poll_id)?;
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| RiskError::Transport(format!("Status request failed: {}", e)))?;

        read_json(resp, "status").await
    }

    fn service_name(&self) -> &str { "http-submission" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpRiskClient::new("not a url", None);
        assert!(matches!(result, Err(RiskError::Config(_))));
    }

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let client = HttpRiskClient::new("https://risk.example/", None).unwrap();
        assert_eq!(client.base_url(), "https://risk.example");
        assert_eq!(client.endpoint("api/scan"), "https://risk.example/api/scan");
    }

    #[test]
    fn test_status_url_appends_poll_id() {
        let client = HttpRiskClient::new("https://risk.example/proxy", None).unwrap();
        let url = client.status_url("abc123").unwrap();
        assert_eq!(url.as_str(), "https://risk.example/proxy/api/submission/abc123");
    }

    #[test]
    fn test_status_url_escapes_reserved_characters() {
        let client = HttpRiskClient::new("https://risk.example", None).unwrap();
        let url = client.status_url("a?b#c").unwrap();
        assert_eq!(url.as_str(), "https://risk.example/api/submission/a%3Fb%23c");
    }

    /// Answer a single HTTP request with a canned response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // drain headers and body before answering
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_error_status_carries_backend_message() {
        let base = serve_once(
            "502 Bad Gateway",
            r#"{"error":"Upstream reputation lookup failed","details":"quota exceeded"}"#,
        )
        .await;
        let client = HttpRiskClient::new(&base, None).unwrap();

        match client.scan("https://bad.example").await {
            Err(RiskError::Transport(msg)) => {
                assert!(msg.contains("HTTP 502"), "{}", msg);
                assert!(msg.contains("Upstream reputation lookup failed (quota exceeded)"), "{}", msg);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_becomes_scan_error_detail() {
        let base = serve_once(
            "502 Bad Gateway",
            r#"{"error":"Upstream reputation lookup failed","details":"quota exceeded"}"#,
        )
        .await;
        let client = HttpRiskClient::new(&base, None).unwrap();

        let result = crate::session::run_scan(&client, "bad.example").await;
        assert!(result.is_error());
        let detail = result.error_detail.unwrap();
        assert!(detail.contains("Upstream reputation lookup failed"), "{}", detail);
        assert!(detail.contains("quota exceeded"), "{}", detail);
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_reason() {
        let base = serve_once("404 Not Found", "").await;
        let client = HttpRiskClient::new(&base, None).unwrap();

        match client.status("123").await {
            Err(RiskError::Transport(msg)) => {
                assert!(msg.contains("HTTP 404: Not Found"), "{}", msg);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_transport_error() {
        let base = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = HttpRiskClient::new(&base, None).unwrap();

        match client.scan("https://ok.example").await {
            Err(RiskError::Transport(msg)) => assert!(msg.contains("Invalid scan response"), "{}", msg),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_without_scores_is_error_result() {
        let base = serve_once("200 OK", "{}").await;
        let client = HttpRiskClient::new(&base, None).unwrap();

        let result = crate::session::run_scan(&client, "ok.example").await;
        assert!(result.is_error());
        assert!(result.scores.is_none());
        assert_eq!(
            result.error_detail.as_deref(),
            Some(crate::session::scan::MISSING_SCORES)
        );
    }

    #[tokio::test]
    async fn test_create_decodes_operation() {
        let base = serve_once(
            "200 OK",
            r#"{"operation":"projects/p/operations/42","timestamp":"2026-01-02T03:04:05Z"}"#,
        )
        .await;
        let client = HttpRiskClient::new(&base, None).unwrap();
        let form = SubmissionForm::new("https://bad.example", "cloned login page", crate::models::ThreatType::Malware);

        let resp = client.create(&form).await.unwrap();
        assert_eq!(resp.operation.as_deref(), Some("projects/p/operations/42"));
        assert!(resp.timestamp.is_some());
    }
}
