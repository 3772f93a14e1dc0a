//! Command handlers and dispatch.
//!
//! Every active-state line goes through [`Dispatcher::dispatch`]: classify,
//! authorize, then hand off to the handler registered for the verb. Lines
//! that are not commands go to [`ChatHandler`].

mod context;
mod messaging;
mod moderation;
mod query;

pub use context::{Context, Handler};
pub use messaging::{BroadcastHandler, ChatHandler, PrivMsgHandler};
pub use moderation::{BanHandler, MuteHandler, UnbanHandler, UnmuteHandler};
pub use query::{HelpHandler, HistoryHandler, ListUsersHandler};

use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use crate::state::CloseReason;
use crate::telemetry::CommandTimer;
use async_trait::async_trait;
use chatd_proto::{Command, Verb, reply};
use std::collections::HashMap;
use tracing::debug;

/// Handler for `/exit`.
pub struct ExitHandler;

#[async_trait]
impl Handler for ExitHandler {
    async fn handle(&self, ctx: &Context<'_>, _cmd: Command<'_>) -> HandlerResult {
        ctx.reply(reply::GOODBYE).await;
        ctx.session.close(CloseReason::Exit);
        Ok(())
    }
}

/// Verb-to-handler table for named sessions.
pub struct Dispatcher {
    handlers: HashMap<Verb, Box<dyn Handler>>,
    chat: ChatHandler,
}

impl Dispatcher {
    /// Create a dispatcher with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<Verb, Box<dyn Handler>> = HashMap::new();

        // Queries
        handlers.insert(Verb::Help, Box::new(HelpHandler));
        handlers.insert(Verb::ListUsers, Box::new(ListUsersHandler));
        handlers.insert(Verb::History, Box::new(HistoryHandler));

        // Messaging
        handlers.insert(Verb::Pm, Box::new(PrivMsgHandler));
        handlers.insert(Verb::Broadcast, Box::new(BroadcastHandler));

        // Moderation (admin only)
        handlers.insert(Verb::Ban, Box::new(BanHandler));
        handlers.insert(Verb::Unban, Box::new(UnbanHandler));
        handlers.insert(Verb::Mute, Box::new(MuteHandler));
        handlers.insert(Verb::Unmute, Box::new(UnmuteHandler));

        handlers.insert(Verb::Exit, Box::new(ExitHandler));

        Self {
            handlers,
            chat: ChatHandler,
        }
    }

    /// Process one line from a named session.
    ///
    /// Blank lines are ignored. A malformed privileged command from a
    /// non-admin is reported as denied rather than as a usage error.
    pub async fn dispatch(&self, ctx: &Context<'_>, line: &str) -> HandlerResult {
        if line.trim().is_empty() {
            return Ok(());
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                let verb = err.verb();
                let error = match ctx.hub.policy.authorize(ctx.name(), verb) {
                    Ok(()) => HandlerError::from(err),
                    Err(denied) => denied,
                };
                metrics::record_command_error(verb.as_str(), error.error_code());
                return Err(error);
            }
        };

        let label = command.verb().map_or("chat", Verb::as_str);
        let _timer = CommandTimer::new(label);
        debug!(name = %ctx.name(), command = label, "dispatch");

        let result = self.execute(ctx, command).await;
        if let Err(e) = &result {
            metrics::record_command_error(label, e.error_code());
        }
        result
    }

    async fn execute(&self, ctx: &Context<'_>, command: Command<'_>) -> HandlerResult {
        let Some(verb) = command.verb() else {
            return self.chat.handle(ctx, command).await;
        };
        ctx.hub.policy.authorize(ctx.name(), verb)?;

        match self.handlers.get(&verb) {
            Some(handler) => handler.handle(ctx, command).await,
            None => self.chat.handle(ctx, command).await,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
