//! Admin commands: `/ban`, `/unban`, `/mute`, `/unmute`.
//!
//! Authorization has already been checked by the dispatcher.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use crate::state::CloseReason;
use async_trait::async_trait;
use chatd_proto::{Command, reply};
use tracing::info;

/// Handler for `/ban <user>`.
///
/// Bans the name and closes its session. The banned session's own task
/// unregisters it and announces the ban on its way out.
pub struct BanHandler;

#[async_trait]
impl Handler for BanHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Ban(target) = cmd else {
            return Ok(());
        };
        let admin = ctx.name();

        let Some(victim) = ctx.hub.registry.ban_online(target) else {
            return Err(HandlerError::NotFound(target.to_string()));
        };
        metrics::record_moderation("ban");
        info!(admin = %admin, target = %target, "user banned");

        victim.send(reply::banned_by(admin)).await;
        victim.close(CloseReason::Banned {
            by: admin.to_string(),
        });
        Ok(())
    }
}

/// Handler for `/unban <user>`. Affects future connections only.
pub struct UnbanHandler;

#[async_trait]
impl Handler for UnbanHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Unban(target) = cmd else {
            return Ok(());
        };
        let admin = ctx.name();

        ctx.hub.registry.unban(target);
        metrics::record_moderation("unban");
        info!(admin = %admin, target = %target, "user unbanned");

        ctx.hub.broadcast(&reply::was_unbanned(target, admin)).await;
        Ok(())
    }
}

pub struct MuteHandler;

#[async_trait]
impl Handler for MuteHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Mute(target) = cmd else {
            return Ok(());
        };

        if !ctx.hub.registry.mute_online(target) {
            return Err(HandlerError::NotFound(target.to_string()));
        }
        metrics::record_moderation("mute");
        info!(admin = %ctx.name(), target = %target, "user muted");

        ctx.reply(reply::muted(target)).await;
        Ok(())
    }
}

pub struct UnmuteHandler;

#[async_trait]
impl Handler for UnmuteHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: Command<'_>) -> HandlerResult {
        let Command::Unmute(target) = cmd else {
            return Ok(());
        };

        ctx.hub.registry.unmute(target);
        metrics::record_moderation("unmute");
        info!(admin = %ctx.name(), target = %target, "user unmuted");

        ctx.reply(reply::unmuted(target)).await;
        Ok(())
    }
}
