//! In-process bounded history.

use super::{HistoryError, HistoryStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Ring of the most recent chat lines. Lost on restart.
pub struct MemoryHistory {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl MemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, line: &str) -> Result<(), HistoryError> {
        let mut lines = self.lines.lock();
        lines.push_back(line.to_string());
        while lines.len() > self.capacity {
            lines.pop_front();
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.lines.lock().iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_most_recent_lines_oldest_first() {
        let store = MemoryHistory::new(50);
        for i in 0..60 {
            store.append(&format!("Alice: {i}")).await.unwrap();
        }
        let lines = store.read_all().await.unwrap();
        assert_eq!(lines.len(), 50);
        assert_eq!(lines.first().unwrap(), "Alice: 10");
        assert_eq!(lines.last().unwrap(), "Alice: 59");
    }

    #[tokio::test]
    async fn empty_store_reads_empty() {
        let store = MemoryHistory::new(3);
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
