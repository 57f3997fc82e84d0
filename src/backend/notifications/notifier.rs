/**
 * Notifier Handle
 *
 * Workflows hand finished events to the notifier after their store
 * changes are committed. Emission never blocks and never fails the
 * workflow: the event is queued on an unbounded channel and delivered by
 * the dispatcher task in the background.
 */

use tokio::sync::mpsc;

use crate::shared::{MemberId, PushPayload};

/// One event addressed to a set of members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Members whose devices receive the payload, deduplicated
    pub recipients: Vec<MemberId>,
    pub payload: PushPayload,
}

/// Cloneable handle for emitting push notifications
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiving end of its queue
    ///
    /// The receiver is normally handed to `spawn_dispatcher`; tests keep it
    /// to inspect what a workflow emitted.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Queue `payload` for every member in `recipients`
    ///
    /// Duplicate recipients are collapsed, keeping first-seen order. A
    /// closed queue is logged and otherwise ignored.
    pub fn notify<I>(&self, recipients: I, payload: PushPayload)
    where
        I: IntoIterator<Item = MemberId>,
    {
        let mut unique = Vec::new();
        for id in recipients {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return;
        }

        tracing::debug!(kind = payload.kind(), recipients = ?unique, "Queueing notification");
        let notification = Notification {
            recipients: unique,
            payload,
        };
        if let Err(e) = self.sender.send(notification) {
            tracing::warn!(kind = e.0.payload.kind(), "Notification dropped, dispatcher stopped");
        }
    }
}
