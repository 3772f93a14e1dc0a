//! Chat, `/pm` and `/broadcast`.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use async_trait::async_trait;
use chatd_proto::{Command, reply};
use tracing::{debug, warn};

/// Default handler for lines that are not commands.
///
/// Broadcast first, then persist, with no registry lock held for either.
pub struct ChatHandler;

#[async_trait]
impl Handler for ChatHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Plain(text) = cmd else {
            return Ok(());
        };
        ctx.hub.policy.check_chat(&ctx.hub.registry, ctx.name())?;

        let line = reply::chat(ctx.name(), text);
        let recipients = ctx.hub.broadcast(&line).await;
        debug!(name = %ctx.name(), recipients, "chat line");

        if let Err(e) = ctx.hub.history.append(&line).await {
            metrics::record_history_failure("append");
            warn!(name = %ctx.name(), error = %e, "history append failed");
            return Err(HandlerError::HistorySave(e));
        }
        Ok(())
    }
}

/// Handler for `/pm <user> <text>`.
///
/// The admin, when online and not the sender, receives a mirror of every
/// private message.
pub struct PrivMsgHandler;

#[async_trait]
impl Handler for PrivMsgHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::PrivMsg { target, text } = cmd else {
            return Ok(());
        };
        let sender = ctx.name();

        let Some(receiver) = ctx.hub.registry.lookup(target) else {
            return Err(HandlerError::NotFound(target.to_string()));
        };
        receiver.send(reply::private_message(sender, text)).await;
        metrics::inc_private_messages();
        debug!(from = %sender, to = %target, "private message");

        let admin = ctx.hub.policy.admin();
        if sender != admin
            && let Some(admin_session) = ctx.hub.registry.lookup(admin)
        {
            admin_session
                .send(reply::private_message_mirror(sender, target, text))
                .await;
        }
        Ok(())
    }
}

/// Handler for `/broadcast <text>`. Not persisted to history.
pub struct BroadcastHandler;

#[async_trait]
impl Handler for BroadcastHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Broadcast(text) = cmd else {
            return Ok(());
        };
        let recipients = ctx.hub.broadcast(&reply::broadcast(ctx.name(), text)).await;
        debug!(name = %ctx.name(), recipients, "broadcast");
        Ok(())
    }
}
