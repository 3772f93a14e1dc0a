//! No-op history store that discards all lines.
//!
//! Used when history is disabled. Appends succeed but store nothing.

use super::{HistoryError, HistoryStore};
use async_trait::async_trait;

pub struct NoOpHistory;

#[async_trait]
impl HistoryStore for NoOpHistory {
    async fn append(&self, _line: &str) -> Result<(), HistoryError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, HistoryError> {
        Ok(vec![])
    }
}
