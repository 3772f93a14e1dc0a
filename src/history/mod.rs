//! History store abstraction.
//!
//! The chat transcript lives behind [`HistoryStore`] so the dispatcher never
//! cares where lines go. Every store keeps only the most recent `capacity`
//! lines; `append` trims as a side effect.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{HistoryBackend, HistoryConfig};

pub mod memory;
pub mod noop;
pub mod redb;

pub use memory::MemoryHistory;
pub use noop::NoOpHistory;
pub use redb::RedbHistory;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one chat line, dropping the oldest lines beyond capacity.
    async fn append(&self, line: &str) -> Result<(), HistoryError>;

    /// All retained lines, oldest first. Fails as a whole, never partially.
    async fn read_all(&self) -> Result<Vec<String>, HistoryError>;
}

/// Build the store selected by `config`.
pub fn from_config(config: &HistoryConfig) -> Result<Arc<dyn HistoryStore>, HistoryError> {
    let store: Arc<dyn HistoryStore> = match config.backend {
        HistoryBackend::Memory => Arc::new(MemoryHistory::new(config.capacity)),
        HistoryBackend::Redb => Arc::new(RedbHistory::new(&config.path, config.capacity)?),
        HistoryBackend::None => Arc::new(NoOpHistory),
    };
    Ok(store)
}
