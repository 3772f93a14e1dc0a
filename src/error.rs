//! Unified error handling for chatd.
//!
//! Command handlers return [`HandlerError`]; the connection loop turns each
//! one into a single sender-only notice and labels it for metrics. None of
//! them ends the session.

use crate::history::HistoryError;
use chatd_proto::{CommandError, Verb, reply};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Malformed command; the client may retry.
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] CommandError),

    /// Non-admin invoked a privileged command.
    #[error("{} requires admin", .0.keyword())]
    AuthorizationDenied(Verb),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("sender is muted")]
    Muted,

    #[error("history load failed: {0}")]
    HistoryLoad(#[source] HistoryError),

    #[error("history save failed: {0}")]
    HistorySave(#[source] HistoryError),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProtocolViolation(_) => "protocol_violation",
            Self::AuthorizationDenied(_) => "authorization_denied",
            Self::NotFound(_) => "not_found",
            Self::Muted => "muted",
            Self::HistoryLoad(_) => "history_load",
            Self::HistorySave(_) => "history_save",
        }
    }

    /// Convert to the notice sent back to the sender.
    pub fn to_reply(&self) -> String {
        match self {
            Self::ProtocolViolation(err) => reply::usage(err.verb()),
            Self::AuthorizationDenied(verb) => reply::admin_only(*verb),
            Self::NotFound(_) => reply::USER_NOT_FOUND.to_string(),
            Self::Muted => reply::MUTED.to_string(),
            Self::HistoryLoad(_) => reply::HISTORY_UNAVAILABLE.to_string(),
            Self::HistorySave(_) => reply::HISTORY_NOT_SAVED.to_string(),
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_has_a_distinct_reply() {
        let cases = [
            HandlerError::ProtocolViolation(CommandError::MissingArgument(Verb::Pm)),
            HandlerError::AuthorizationDenied(Verb::Ban),
            HandlerError::NotFound("Bob".into()),
            HandlerError::Muted,
            HandlerError::HistoryLoad(HistoryError::Database("down".into())),
            HandlerError::HistorySave(HistoryError::Database("down".into())),
        ];
        let replies: std::collections::HashSet<String> =
            cases.iter().map(HandlerError::to_reply).collect();
        assert_eq!(replies.len(), cases.len());
    }

    #[test]
    fn replies_use_wire_text() {
        assert_eq!(
            HandlerError::AuthorizationDenied(Verb::Ban).to_reply(),
            "❌ Only the admin can use /ban."
        );
        assert_eq!(
            HandlerError::NotFound("Bob".into()).to_reply(),
            "❌ User not found."
        );
        assert_eq!(
            HandlerError::ProtocolViolation(CommandError::MissingArgument(Verb::Pm))
                .to_reply(),
            "❌ Usage: /pm <user> <message>"
        );
    }

    #[test]
    fn error_codes_are_metric_labels() {
        assert_eq!(HandlerError::Muted.error_code(), "muted");
        assert_eq!(
            HandlerError::HistorySave(HistoryError::Database("down".into())).error_code(),
            "history_save"
        );
    }
}
