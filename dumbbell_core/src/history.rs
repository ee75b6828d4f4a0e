//! Workout history persisted as a single JSON list.
//!
//! The whole list is rewritten on every append. A missing or unreadable
//! blob is treated as an empty history so a bad file never blocks a workout.

use crate::storage::KeyValueStore;
use crate::{HistoryRecord, Result};

/// Storage key of the history blob
pub const HISTORY_KEY: &str = "workoutHistory";

/// Reads and appends completed-session records
#[derive(Debug)]
pub struct HistoryRecorder<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records, oldest first
    ///
    /// Returns an empty list if nothing was stored or the stored value is
    /// unreadable; the problem is logged, not returned.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let contents = match self.store.get(HISTORY_KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::info!("No workout history found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Unable to read workout history: {}. Starting empty.", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryRecord>>(&contents) {
            Ok(records) => {
                tracing::debug!("Loaded {} history records", records.len());
                records
            }
            Err(e) => {
                tracing::warn!("Failed to parse workout history: {}. Starting empty.", e);
                Vec::new()
            }
        }
    }

    /// Append a record and persist the whole list
    ///
    /// Returns the updated list.
    pub fn append(&mut self, record: HistoryRecord) -> Result<Vec<HistoryRecord>> {
        let mut records = self.load();
        records.push(record);

        let contents = serde_json::to_string(&records)?;
        self.store.set(HISTORY_KEY, &contents)?;

        tracing::info!("Recorded workout, {} in history", records.len());
        Ok(records)
    }
}
