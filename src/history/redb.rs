//! Redb-backed persistent history storage.
//!
//! Implements [`HistoryStore`] on the redb embedded database. Lines are keyed
//! by a monotonically increasing sequence number so key order is append
//! order; each append trims the oldest keys in the same write transaction.

use super::{HistoryError, HistoryStore};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const HISTORY_TABLE: TableDefinition<u64, &str> = TableDefinition::new("chat_history");

pub struct RedbHistory {
    db: Arc<Database>,
    capacity: usize,
}

impl RedbHistory {
    pub fn new(path: impl AsRef<Path>, capacity: usize) -> Result<Self, HistoryError> {
        let db = Database::create(path).map_err(|e| HistoryError::Database(e.to_string()))?;

        // Create the table up front so a read before the first append succeeds.
        let write_txn = db
            .begin_write()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        write_txn
            .open_table(HISTORY_TABLE)
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        write_txn
            .commit()
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            capacity,
        })
    }
}

#[async_trait]
impl HistoryStore for RedbHistory {
    async fn append(&self, line: &str) -> Result<(), HistoryError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(HISTORY_TABLE)
                .map_err(|e| HistoryError::Database(e.to_string()))?;

            let next = match table
                .last()
                .map_err(|e| HistoryError::Database(e.to_string()))?
            {
                Some((k, _v)) => k.value() + 1,
                None => 0,
            };
            table
                .insert(next, line)
                .map_err(|e| HistoryError::Database(e.to_string()))?;

            let mut keys = Vec::new();
            for item in table
                .iter()
                .map_err(|e| HistoryError::Database(e.to_string()))?
            {
                let (k, _v) = item.map_err(|e| HistoryError::Database(e.to_string()))?;
                keys.push(k.value());
            }
            let excess = keys.len().saturating_sub(self.capacity);
            for k in &keys[..excess] {
                table
                    .remove(*k)
                    .map_err(|e| HistoryError::Database(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, HistoryError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        let table = read_txn
            .open_table(HISTORY_TABLE)
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        let mut lines = Vec::with_capacity(self.capacity);
        for item in table
            .iter()
            .map_err(|e| HistoryError::Database(e.to_string()))?
        {
            let (_k, v) = item.map_err(|e| HistoryError::Database(e.to_string()))?;
            lines.push(v.value().to_string());
        }
        Ok(lines)
    }
}
