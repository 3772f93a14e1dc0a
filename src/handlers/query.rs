//! Read-only commands: `/help`, `/list_users`, `/history`.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use async_trait::async_trait;
use chatd_proto::{Command, reply};
use tracing::warn;

pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &Context<'_>, _cmd: Command<'_>) -> HandlerResult {
        for line in reply::HELP {
            ctx.reply(line).await;
        }
        Ok(())
    }
}

/// Handler for `/list_users`. Names come from one registry snapshot.
pub struct ListUsersHandler;

#[async_trait]
impl Handler for ListUsersHandler {
    async fn handle(&self, ctx: &Context<'_>, _cmd: Command<'_>) -> HandlerResult {
        let names = ctx.hub.registry.enumerate();
        ctx.reply(reply::ONLINE_USERS_HEADER).await;
        for name in &names {
            ctx.reply(reply::user_entry(name)).await;
        }
        Ok(())
    }
}

/// Handler for `/history`.
///
/// The whole transcript is read before anything is sent, so a store
/// failure produces one notice and never a partial dump.
pub struct HistoryHandler;

#[async_trait]
impl Handler for HistoryHandler {
    async fn handle(&self, ctx: &Context<'_>, _cmd: Command<'_>) -> HandlerResult {
        let lines = match ctx.hub.history.read_all().await {
            Ok(lines) => lines,
            Err(e) => {
                metrics::record_history_failure("read");
                warn!(name = %ctx.name(), error = %e, "history read failed");
                return Err(HandlerError::HistoryLoad(e));
            }
        };

        ctx.reply(reply::HISTORY_HEADER).await;
        for line in lines {
            ctx.reply(line).await;
        }
        Ok(())
    }
}
