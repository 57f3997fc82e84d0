/**
 * Notification Dispatcher
 *
 * Background task draining the notifier queue. For each notification it
 * looks up the recipients' device tokens and sends the payload to each
 * device in turn. A failed device is logged and skipped; the remaining
 * devices are still attempted.
 */

use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::notifications::gateway::{NotifyError, PushGateway};
use crate::backend::notifications::notifier::Notification;
use crate::backend::notifications::tokens::tokens_for;

/// Outcome of delivering one notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Spawn the dispatcher loop
///
/// The task ends once every `Notifier` clone has been dropped and the
/// queue is drained.
pub fn spawn_dispatcher<G>(
    pool: SqlitePool,
    gateway: G,
    mut receiver: mpsc::UnboundedReceiver<Notification>,
) -> JoinHandle<()>
where
    G: PushGateway,
{
    tokio::spawn(async move {
        tracing::info!("Notification dispatcher started");
        while let Some(notification) = receiver.recv().await {
            let kind = notification.payload.kind();
            match deliver(&pool, &gateway, &notification).await {
                Ok(report) => tracing::debug!(
                    kind,
                    delivered = report.delivered,
                    failed = report.failed,
                    "Notification dispatched"
                ),
                Err(e) => tracing::error!(kind, "Failed to dispatch notification: {}", e),
            }
        }
        tracing::info!("Notification dispatcher stopped");
    })
}

/// Deliver one notification to every registered device of its recipients
pub async fn deliver<G>(
    pool: &SqlitePool,
    gateway: &G,
    notification: &Notification,
) -> Result<DeliveryReport, NotifyError>
where
    G: PushGateway,
{
    let tokens = {
        let mut conn = pool.acquire().await?;
        tokens_for(&mut conn, &notification.recipients).await?
    };

    let mut report = DeliveryReport::default();
    for token in &tokens {
        match gateway.send(token, &notification.payload).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(token = %token, "Push delivery failed: {}", e);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
