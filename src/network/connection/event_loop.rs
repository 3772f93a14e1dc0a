//! Active phase: read, rate-limit, dispatch until closed.

use super::error_handling::{ReadErrorAction, classify_read_error};
use super::reader::LineReader;
use crate::handlers::{Context, Dispatcher};
use crate::metrics;
use crate::security::{FloodGuard, FloodVerdict};
use crate::state::{CloseReason, Hub, SessionHandle};
use chatd_proto::reply;
use tokio::io::AsyncRead;
use tracing::{debug, warn};

/// Run the active loop for a registered session. Returns why it ended.
pub(super) async fn run<R>(
    reader: &mut LineReader<R>,
    session: &SessionHandle,
    hub: &Hub,
    dispatcher: &Dispatcher,
) -> CloseReason
where
    R: AsyncRead + Unpin,
{
    let ctx = Context::new(hub, session);
    let closer = session.closer();
    let limits = &hub.limits;
    let mut flood = FloodGuard::new(
        limits.message_rate_per_second,
        limits.message_burst,
        limits.max_flood_violations,
    );

    loop {
        let next = tokio::select! {
            biased;
            _ = closer.closed() => break,
            next = reader.next_line() => next,
        };

        let line = match next {
            None => {
                closer.close(CloseReason::Eof);
                break;
            }
            Some(Ok(line)) => line,
            Some(Err(e)) => match classify_read_error(&e) {
                ReadErrorAction::InputTooLong => {
                    ctx.reply(reply::INPUT_TOO_LONG).await;
                    continue;
                }
                ReadErrorAction::IllegalCharacters => {
                    debug!(error = %e, "line dropped");
                    ctx.reply(reply::ILLEGAL_CHARACTERS).await;
                    continue;
                }
                ReadErrorAction::FatalProtocolError { error_msg } => {
                    warn!(error = %error_msg, "protocol error, disconnecting");
                    closer.close(CloseReason::TransportError);
                    break;
                }
                ReadErrorAction::IoError => {
                    debug!(error = %e, "read failed");
                    closer.close(CloseReason::TransportError);
                    break;
                }
            },
        };

        match flood.check() {
            FloodVerdict::Allowed => {}
            FloodVerdict::Warned(strikes) => {
                metrics::inc_flood_strikes();
                ctx.reply(reply::flood_warning(strikes, flood.max_strikes()))
                    .await;
                continue;
            }
            FloodVerdict::Exceeded => {
                metrics::inc_flood_strikes();
                warn!("excess flood, disconnecting");
                ctx.reply(reply::EXCESS_FLOOD).await;
                closer.close(CloseReason::Flood);
                break;
            }
        }

        debug!(line = %line, "recv");
        if let Err(e) = dispatcher.dispatch(&ctx, &line).await {
            ctx.reply(e.to_reply()).await;
        }

        if closer.is_closed() {
            break;
        }
    }

    closer.reason().unwrap_or(CloseReason::Eof)
}
