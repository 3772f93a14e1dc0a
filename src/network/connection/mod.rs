//! Connection - handles a single client connection.
//!
//! ```text
//!            ┌────────────┐   lines    ┌──────────────┐
//!  socket ──►│ LineReader │──────────► │ handshake    │── /name ok ──┐
//!  (read)    └────────────┘            └──────────────┘              ▼
//!                                                          ┌──────────────────┐
//!                                      closer ───────────► │ event_loop       │
//!                                                          │ select! + flood  │
//!                                                          └────────┬─────────┘
//!                                                                   │ Dispatcher
//!  socket ◄── writer task ◄── bounded mpsc ◄── replies, PMs, broadcasts
//!  (write)
//! ```
//!
//! Every line bound for this client, from any task, goes through the
//! bounded queue, so per-session order is preserved and no task ever
//! writes to a socket it does not own.

mod error_handling;
mod event_loop;
mod handshake;
mod reader;
mod writer;

use crate::handlers::Dispatcher;
use crate::state::{CloseReason, Closer, Hub, SessionId};
use crate::telemetry::spans;
use chatd_proto::{LineCodec, reply};
use handshake::NamingOutcome;
use reader::LineReader;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::FramedWrite;
use tracing::{Instrument, debug, info, warn};

/// A client connection handler.
pub struct Connection {
    id: SessionId,
    stream: TcpStream,
    addr: SocketAddr,
    hub: Arc<Hub>,
    dispatcher: Arc<Dispatcher>,
}

impl Connection {
    pub fn new(
        id: SessionId,
        stream: TcpStream,
        addr: SocketAddr,
        hub: Arc<Hub>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            id,
            stream,
            addr,
            hub,
            dispatcher,
        }
    }

    /// Run the connection until the session closes.
    pub async fn run(self) -> anyhow::Result<()> {
        let span = spans::connection(&self.id, self.addr);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(self) -> anyhow::Result<()> {
        let Self {
            id,
            stream,
            addr: _,
            hub,
            dispatcher,
        } = self;
        let limits = &hub.limits;

        stream.set_nodelay(true)?;
        let (read_half, write_half) = stream.into_split();
        let mut reader = LineReader::new(read_half, LineCodec::with_max_len(limits.max_line_length));

        let (tx, rx) = mpsc::channel(limits.outbound_queue);
        let closer = Closer::new();
        let mut writer = tokio::spawn(writer::run(
            FramedWrite::new(write_half, LineCodec::new()),
            rx,
            closer.clone(),
        ));

        let outcome = handshake::run(&mut reader, &tx, &closer, &hub, &id).await;
        let reason = match outcome {
            NamingOutcome::Registered(session) => {
                let name = session.name().to_string();
                tracing::Span::current().record("name", name.as_str());
                hub.broadcast(&reply::joined(&name)).await;

                let reason = event_loop::run(&mut reader, &session, &hub, &dispatcher).await;

                // Departure: unregister, then announce to whoever is left.
                hub.registry.unregister(&name);
                let announcement = match &reason {
                    CloseReason::Banned { by } => reply::was_banned(&name, by),
                    _ => reply::left(&name),
                };
                hub.broadcast(&announcement).await;

                let online_secs = (chrono::Utc::now() - session.joined_at()).num_seconds();
                info!(name = %name, reason = reason.as_str(), online_secs, "session ended");
                reason
            }
            NamingOutcome::Closed(reason) => {
                debug!(reason = reason.as_str(), "closed before naming");
                reason
            }
        };

        // The writer exits once every sender is dropped; give it a bounded
        // window to flush what is queued (the ban notice, "Goodbye!").
        drop(tx);
        match tokio::time::timeout(limits.flush_timeout(), &mut writer).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "writer task failed"),
            Err(_) => {
                debug!(reason = reason.as_str(), "flush timed out");
                writer.abort();
            }
        }
        Ok(())
    }
}
