pub mod json_file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::minifigure::Minifigure;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-collection persistence.
///
/// Every operation loads the full collection and, when it mutates it,
/// saves the full collection back. Nothing is cached between calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Minifigure>, StoreError>;

    async fn save(&self, records: &[Minifigure]) -> Result<(), StoreError>;
}
