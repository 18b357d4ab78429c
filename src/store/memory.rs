use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{RecordStore, StoreError};
use crate::models::minifigure::Minifigure;

/// In-process store, used where file I/O is unwanted (tests, dry runs).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Minifigure>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Minifigure>) -> Self {
        Self {
            records: Mutex::new(records),
            saves: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current contents
    pub fn records(&self) -> Vec<Minifigure> {
        self.records.lock().clone()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Minifigure>, StoreError> {
        Ok(self.records.lock().clone())
    }

    async fn save(&self, records: &[Minifigure]) -> Result<(), StoreError> {
        *self.records.lock() = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
