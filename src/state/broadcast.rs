//! Fan-out of one line to every online session.

use crate::metrics;
use crate::state::Registry;
use futures_util::future::join_all;
use tracing::debug;

/// Deliver `line` to every session online at the time of the call.
///
/// The registry lock is held only to take the snapshot. Sends run
/// concurrently, so one slow peer delays nobody else by more than its own
/// send timeout. Returns how many sessions accepted the line.
pub async fn broadcast(registry: &Registry, line: &str) -> usize {
    let recipients = registry.snapshot();
    let total = recipients.len();

    let delivered = join_all(recipients.iter().map(|session| session.send(line)))
        .await
        .into_iter()
        .filter(|ok| *ok)
        .count();

    metrics::record_fanout(total);
    if delivered < total {
        debug!(delivered, total, "broadcast partially delivered");
    }
    delivered
}
