//! Moderation policy.
//!
//! Privilege is a single configured display name compared against the
//! sender's registered name. Every privilege decision goes through here.

use crate::error::HandlerError;
use crate::state::Registry;
use chatd_proto::Verb;

#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    admin: String,
}

impl ModerationPolicy {
    pub fn new(admin: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
        }
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn is_admin(&self, name: &str) -> bool {
        name == self.admin
    }

    /// Check `sender` may run `verb`. Denial has no side effects.
    pub fn authorize(&self, sender: &str, verb: Verb) -> Result<(), HandlerError> {
        if verb.is_privileged() && !self.is_admin(sender) {
            return Err(HandlerError::AuthorizationDenied(verb));
        }
        Ok(())
    }

    /// Check `sender` may post plain chat. Mute gates nothing else.
    pub fn check_chat(&self, registry: &Registry, sender: &str) -> Result<(), HandlerError> {
        if registry.is_muted(sender) {
            return Err(HandlerError::Muted);
        }
        Ok(())
    }
}
