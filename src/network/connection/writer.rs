//! Outbound writer task.
//!
//! Sole owner of the socket's write half. Drains the session's queue in
//! order, batching whatever is already queued into one flush.

use crate::state::{CloseReason, Closer};
use chatd_proto::{LineCodec, ProtocolError};
use futures_util::SinkExt;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio_util::codec::FramedWrite;
use tracing::debug;

pub(super) async fn run<W>(
    mut sink: FramedWrite<W, LineCodec>,
    mut rx: mpsc::Receiver<String>,
    closer: Closer,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        if let Err(e) = write_batch(&mut sink, &mut rx, line).await {
            debug!(error = %e, "write failed");
            closer.close(CloseReason::TransportError);
            return;
        }
    }

    // Every sender is gone; shut down our half of the stream.
    if let Err(e) = sink.close().await {
        debug!(error = %e, "shutdown failed");
    }
}

async fn write_batch<W>(
    sink: &mut FramedWrite<W, LineCodec>,
    rx: &mut mpsc::Receiver<String>,
    first: String,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    sink.feed(first).await?;
    while let Ok(next) = rx.try_recv() {
        sink.feed(next).await?;
    }
    sink.flush().await
}
