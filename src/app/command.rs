use crate::models::SubmissionForm;

/// Everything an operator can ask the client to do.
#[derive(Debug, Clone)]
pub enum Command {
    /// Scan a URL against the reputation backend
    Scan { url: String },
    /// Scan several URLs concurrently; results are reported as each scan finishes
    ScanMany { urls: Vec<String> },
    /// Pre-fill a submission draft from a scan result
    PrepareSubmission { result_id: String },
    /// File an abuse submission
    Submit { form: SubmissionForm },
    /// Refresh one submission's status
    Refresh { id: String },
    /// Refresh every pending submission
    RefreshAll,
    /// Erase submission history. `confirmed` comes from the operator prompt.
    ClearAll { confirmed: bool },
}
