pub mod scan;
pub mod submissions;

pub use scan::{run_scan, ScanSession};
pub use submissions::{poll_status, RefreshReport, SubmissionManager};
