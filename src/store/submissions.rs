use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::SubmissionRecord;
use super::slot::SlotStorage;

/// Slot holding the JSON-serialized submission list.
pub const SUBMISSIONS_KEY: &str = "riskscope.submissions";

/// Durable copy of the submission list, newest first.
///
/// Reads never fail the caller and writes are best-effort: a storage problem is
/// logged and reported as `false`, and the in-memory list stays authoritative
/// for the rest of the session.
#[derive(Clone)]
pub struct SubmissionStore {
    storage: Arc<dyn SlotStorage>,
    key: String,
}

impl SubmissionStore {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self::with_key(storage, SUBMISSIONS_KEY)
    }

    pub fn with_key(storage: Arc<dyn SlotStorage>, key: &str) -> Self {
        Self { storage, key: key.to_string() }
    }

    /// Stored list, or empty if the slot is absent, unreadable or unparsable.
    pub fn load(&self) -> Vec<SubmissionRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read submission slot");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SubmissionRecord>>(&raw) {
            Ok(records) => {
                debug!(count = records.len(), "Loaded submissions");
                records
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unparsable submission slot");
                Vec::new()
            }
        }
    }

    /// Replace the stored list with `records`. Returns whether the write landed.
    pub fn save(&self, records: &[SubmissionRecord]) -> bool {
        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize submissions");
                return false;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => {
                debug!(count = records.len(), "Persisted submissions");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to persist submissions");
                false
            }
        }
    }

    /// Erase the slot. Returns whether the removal landed.
    pub fn clear(&self) -> bool {
        match self.storage.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to erase submission slot");
                false
            }
        }
    }
}
