//! Command handler context and core types.

use crate::error::HandlerResult;
use crate::state::{Hub, SessionHandle};
use async_trait::async_trait;
use chatd_proto::Command;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Shared server state.
    pub hub: &'a Hub,
    /// The sending session (always named).
    pub session: &'a SessionHandle,
}

impl<'a> Context<'a> {
    pub fn new(hub: &'a Hub, session: &'a SessionHandle) -> Self {
        Self { hub, session }
    }

    /// The sender's registered display name.
    pub fn name(&self) -> &'a str {
        self.session.name()
    }

    /// Queue a line for the sender only.
    pub async fn reply(&self, line: impl Into<String>) -> bool {
        self.session.send(line).await
    }
}

/// Trait implemented by all command handlers.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult;
}
