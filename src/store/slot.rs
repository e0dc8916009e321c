use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::RiskError;

/// Named string slots that outlive the process. Writes replace the whole value.
pub trait SlotStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, RiskError>;
    fn set(&self, key: &str, value: &str) -> Result<(), RiskError>;
    fn remove(&self, key: &str) -> Result<(), RiskError>;
}

/// Process-local slots for `--ephemeral` sessions and tests.
#[derive(Default)]
pub struct MemorySlot {
    slots: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, RiskError> {
        self.slots
            .lock()
            .map_err(|_| RiskError::Internal("Slot map lock poisoned".into()))
    }
}

impl SlotStorage for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, RiskError> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RiskError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RiskError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.slots()?.remove(key);
        Ok(())
    }
}
