//! Naming phase: prompt, read `/name`, register.
//!
//! Runs before the session exists in the registry, so replies go straight
//! onto the connection's own queue.

use super::error_handling::{ReadErrorAction, classify_read_error};
use super::reader::LineReader;
use crate::state::{CloseReason, Closer, Hub, RegisterError, SessionHandle, SessionId};
use chatd_proto::{NameError, parse_name, reply};
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How the naming phase ended.
pub(super) enum NamingOutcome {
    /// Registered and announced; the session is active.
    Registered(SessionHandle),
    /// The connection ends without ever becoming active.
    Closed(CloseReason),
}

/// Queue a line for this connection, waiting at most `timeout`.
pub(super) async fn queue(tx: &mpsc::Sender<String>, line: impl Into<String>, timeout: Duration) {
    if tx.send_timeout(line.into(), timeout).await.is_err() {
        debug!("naming reply dropped");
    }
}

pub(super) async fn run<R>(
    reader: &mut LineReader<R>,
    tx: &mpsc::Sender<String>,
    closer: &Closer,
    hub: &Hub,
    id: &SessionId,
) -> NamingOutcome
where
    R: AsyncRead + Unpin,
{
    let limits = &hub.limits;
    let send_timeout = limits.send_timeout();
    let deadline = limits.naming_timeout().map(|d| Instant::now() + d);

    queue(tx, reply::NAME_PROMPT, send_timeout).await;

    loop {
        let next = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, reader.next_line()).await {
                Ok(next) => next,
                Err(_) => {
                    info!("naming timed out");
                    queue(tx, reply::NAMING_TIMEOUT, send_timeout).await;
                    return NamingOutcome::Closed(CloseReason::NamingTimeout);
                }
            },
            None => reader.next_line().await,
        };

        let line = match next {
            None => return NamingOutcome::Closed(CloseReason::Eof),
            Some(Ok(line)) => line,
            Some(Err(e)) => match classify_read_error(&e) {
                ReadErrorAction::InputTooLong => {
                    queue(tx, reply::INPUT_TOO_LONG, send_timeout).await;
                    continue;
                }
                ReadErrorAction::IllegalCharacters => {
                    queue(tx, reply::ILLEGAL_CHARACTERS, send_timeout).await;
                    continue;
                }
                ReadErrorAction::FatalProtocolError { error_msg } => {
                    warn!(error = %error_msg, "protocol error before naming");
                    return NamingOutcome::Closed(CloseReason::TransportError);
                }
                ReadErrorAction::IoError => {
                    debug!(error = %e, "read failed before naming");
                    return NamingOutcome::Closed(CloseReason::TransportError);
                }
            },
        };

        let name = match parse_name(&line, limits.max_name_length) {
            Ok(name) => name,
            Err(NameError::Whitespace) => {
                queue(tx, reply::NAME_HAS_WHITESPACE, send_timeout).await;
                continue;
            }
            Err(NameError::TooLong(max)) => {
                queue(tx, reply::name_too_long(max), send_timeout).await;
                continue;
            }
            Err(NameError::NotNameCommand | NameError::Empty) => {
                queue(tx, reply::INVALID_NAME_COMMAND, send_timeout).await;
                continue;
            }
        };

        let handle = SessionHandle::new(
            id.clone(),
            name,
            tx.clone(),
            send_timeout,
            closer.clone(),
        );
        match hub.registry.register(handle.clone()) {
            Ok(()) => {
                info!(name = %name, "registered");
                return NamingOutcome::Registered(handle);
            }
            Err(RegisterError::Banned) => {
                info!(name = %name, "banned name refused");
                queue(tx, reply::BANNED, send_timeout).await;
                return NamingOutcome::Closed(CloseReason::Refused);
            }
            Err(RegisterError::AlreadyOnline) => {
                debug!(name = %name, "name taken");
                queue(tx, reply::name_taken(name), send_timeout).await;
            }
        }
    }
}
