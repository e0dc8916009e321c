pub mod provider;
pub mod http;
pub mod types;

pub use provider::{ScanningService, SubmissionService};
pub use http::HttpRiskClient;
pub use types::{CreateSubmissionResponse, ScanResponse, StatusResponse};
