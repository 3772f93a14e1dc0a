//! The Hub - shared state handed to every connection task.

use crate::config::{Config, LimitsConfig};
use crate::history::HistoryStore;
use crate::security::ModerationPolicy;
use crate::state::{Registry, SessionIdGenerator, broadcast};
use std::sync::Arc;

/// Everything a connection needs beyond its own socket.
///
/// Built once at startup and shared behind an `Arc`; there are no globals.
pub struct Hub {
    /// Online sessions and moderation sets.
    pub registry: Registry,
    /// Chat transcript backend.
    pub history: Arc<dyn HistoryStore>,
    /// Privilege checks.
    pub policy: ModerationPolicy,
    /// Per-session limits.
    pub limits: LimitsConfig,
    /// Server name for logs.
    pub server_name: String,
    /// Connection id generator.
    pub session_ids: SessionIdGenerator,
}

impl Hub {
    pub fn new(config: &Config, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            registry: Registry::new(),
            history,
            policy: ModerationPolicy::new(config.server.admin.clone()),
            limits: config.limits.clone(),
            server_name: config.server.name.clone(),
            session_ids: SessionIdGenerator::new(),
        }
    }

    /// Fan `line` out to every online session.
    pub async fn broadcast(&self, line: &str) -> usize {
        broadcast::broadcast(&self.registry, line).await
    }
}
