//! Per-connection session handle.
//!
//! A [`SessionHandle`] is what other tasks hold to reach a connection: a
//! bounded outbound queue drained by the connection's writer task, plus a
//! [`Closer`] to ask the connection to end. Cloning a handle never clones the
//! socket.

use crate::metrics;
use crate::state::SessionId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Client sent `/exit`.
    Exit,
    /// Peer closed the stream.
    Eof,
    /// Read or write failed, or the peer sent undecodable input.
    TransportError,
    /// Banned by the admin while online.
    Banned { by: String },
    /// Too many consecutive flood strikes.
    Flood,
    /// `/name` not completed in time.
    NamingTimeout,
    /// Registration refused because the name is banned.
    Refused,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::Eof => "eof",
            Self::TransportError => "transport_error",
            Self::Banned { .. } => "banned",
            Self::Flood => "flood",
            Self::NamingTimeout => "naming_timeout",
            Self::Refused => "refused",
        }
    }
}

/// Shared close signal. The first reason recorded wins.
#[derive(Debug, Clone, Default)]
pub struct Closer {
    token: CancellationToken,
    reason: Arc<Mutex<Option<CloseReason>>>,
}

impl Closer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self, reason: CloseReason) {
        {
            let mut slot = self.reason.lock();
            if slot.is_none() {
                *slot = Some(reason);
            }
        }
        self.token.cancel();
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        self.token.cancelled().await;
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn reason(&self) -> Option<CloseReason> {
        self.reason.lock().clone()
    }
}

/// Handle to one named session, as stored in the registry.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    name: String,
    outbound: mpsc::Sender<String>,
    send_timeout: Duration,
    closer: Closer,
    joined_at: DateTime<Utc>,
}

impl SessionHandle {
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        outbound: mpsc::Sender<String>,
        send_timeout: Duration,
        closer: Closer,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            outbound,
            send_timeout,
            closer,
            joined_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub fn closer(&self) -> &Closer {
        &self.closer
    }

    /// Queue one line for this session.
    ///
    /// Waits at most `send_timeout` for queue space. Returns `false` if the
    /// line was dropped; the caller carries on either way.
    pub async fn send(&self, line: impl Into<String>) -> bool {
        match self.outbound.send_timeout(line.into(), self.send_timeout).await {
            Ok(()) => true,
            Err(SendTimeoutError::Timeout(_)) => {
                metrics::inc_lines_dropped();
                warn!(session = %self.id, name = %self.name, "outbound queue full, line dropped");
                false
            }
            Err(SendTimeoutError::Closed(_)) => {
                debug!(session = %self.id, name = %self.name, "writer gone, line dropped");
                false
            }
        }
    }

    /// Ask the owning connection task to end.
    pub fn close(&self, reason: CloseReason) {
        self.closer.close(reason);
    }
}
