//! Outbound queue drain.
//!
//! Works the snapshot taken at call time; items enqueued mid-run by other
//! producers wait for the next run. Per item: structurally invalid
//! entries are deleted without touching the transport, delivered entries
//! are deleted, failed deliveries stay put. No backoff state survives
//! between runs — the next run simply reattempts whatever remains.

use tracing::{info, warn};

use common::{Mailer, QueueStore, Result};

/// Outcome counters for one drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    pub sent: usize,
    pub discarded_invalid: usize,
    pub retry_pending: usize,
}

/// Drain the queue. A store failure on the initial list is fatal for the
/// run; anything after that is isolated per item.
pub async fn drain_queue<Q, M>(queue: &Q, mailer: &M, dry_run: bool) -> Result<DrainReport>
where
    Q: QueueStore,
    M: Mailer,
{
    let items = queue.list_queue_items().await?;
    info!("Draining mail queue: {} pending item(s)", items.len());

    let mut report = DrainReport::default();

    for item in &items {
        if !item.is_structurally_valid() {
            warn!(
                "Discarding malformed queue item {} (missing recipient or content)",
                item.id
            );
            if !dry_run {
                if let Err(e) = queue.delete_queue_item(&item.id).await {
                    warn!("Failed to delete malformed queue item {}: {}", item.id, e);
                }
            }
            report.discarded_invalid += 1;
            continue;
        }

        if dry_run {
            info!("[dry-run] would send queued mail {} to {}", item.id, item.to);
            report.sent += 1;
            continue;
        }

        match mailer.send(&item.to, &item.subject, &item.content).await {
            Ok(()) => {
                if let Err(e) = queue.delete_queue_item(&item.id).await {
                    // Leaves a duplicate for the next run; at-least-once
                    // delivery already allows that.
                    warn!("Sent queue item {} but failed to delete it: {}", item.id, e);
                }
                report.sent += 1;
            }
            Err(e) => {
                warn!(
                    "Delivery failed for queue item {} (to {}): {}; leaving for retry",
                    item.id, item.to, e
                );
                report.retry_pending += 1;
            }
        }
    }

    info!(
        "Queue drain complete: sent={} discarded={} retry={}",
        report.sent, report.discarded_invalid, report.retry_pending
    );

    Ok(report)
}
