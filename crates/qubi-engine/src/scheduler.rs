//! Deferred reply delivery.
//!
//! Each scheduled reply is a tokio task that sleeps for the reply delay and
//! then sends a [`DueReply`] over a channel. The owner of the controller
//! drains that channel, so the controller itself is only ever touched from
//! one task. Abort handles are kept per conversation so replies can be
//! cancelled one conversation at a time, or all at once on teardown.

use crate::chat::ConversationId;
use crate::controller::PendingReply;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// A reply whose delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReply {
    /// Ticket issued by [`ReplyScheduler::schedule`].
    pub ticket: u64,
    /// The reply to deliver.
    pub reply: PendingReply,
}

#[derive(Debug)]
struct Scheduled {
    ticket: u64,
    handle: AbortHandle,
}

/// Runs reply timers and tracks which are still live.
#[derive(Debug)]
pub struct ReplyScheduler {
    tx: mpsc::UnboundedSender<DueReply>,
    pending: HashMap<ConversationId, Vec<Scheduled>>,
    next_ticket: u64,
}

impl ReplyScheduler {
    /// Create a scheduler and the receiver its due replies arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DueReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            pending: HashMap::new(),
            next_ticket: 0,
        };
        (scheduler, rx)
    }

    /// Start the timer for `reply`. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, reply: PendingReply) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let conversation_id = reply.conversation_id.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(reply.delay).await;
            // Receiver gone means the session was torn down.
            let _ = tx.send(DueReply { ticket, reply });
        });

        debug!(conversation = %conversation_id, ticket, "reply scheduled");
        self.pending
            .entry(conversation_id)
            .or_default()
            .push(Scheduled {
                ticket,
                handle: handle.abort_handle(),
            });
        ticket
    }

    /// Mark a due reply as handled.
    ///
    /// Returns `false` if the reply was cancelled after its timer fired, in
    /// which case it must not be delivered.
    pub fn complete(&mut self, due: &DueReply) -> bool {
        let Some(entries) = self.pending.get_mut(&due.reply.conversation_id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|s| s.ticket != due.ticket);
        let live = entries.len() != before;
        if entries.is_empty() {
            self.pending.remove(&due.reply.conversation_id);
        }
        live
    }

    /// Cancel every pending reply for one conversation.
    pub fn cancel(&mut self, conversation_id: &ConversationId) -> usize {
        let cancelled = self
            .pending
            .remove(conversation_id)
            .map_or(0, |entries| abort_all(&entries));
        if cancelled > 0 {
            debug!(conversation = %conversation_id, cancelled, "pending replies cancelled");
        }
        cancelled
    }

    /// Cancel every pending reply.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.drain().map(|(_, entries)| abort_all(&entries)).sum();
        if cancelled > 0 {
            debug!(cancelled, "all pending replies cancelled");
        }
        cancelled
    }

    /// Number of replies scheduled and not yet completed or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Number of pending replies for one conversation.
    #[cfg(test)]
    pub(crate) fn pending_for(&self, conversation_id: &ConversationId) -> usize {
        self.pending.get(conversation_id).map_or(0, Vec::len)
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn abort_all(entries: &[Scheduled]) -> usize {
    for entry in entries {
        entry.handle.abort();
    }
    entries.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Sender;
    use std::time::Duration;

    fn reply(conversation: &str, delay_ms: u64) -> PendingReply {
        PendingReply {
            conversation_id: ConversationId::new(conversation),
            counterpart: Sender::Counterpart("Alice".into()),
            delay: Duration::from_millis(delay_ms),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (mut scheduler, mut rx) = ReplyScheduler::new();
        let ticket = scheduler.schedule(reply("1", 1000));
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let due = rx.recv().await.unwrap();
        assert_eq!(due.ticket, ticket);
        assert!(scheduler.complete(&due));
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_one_conversation() {
        let (mut scheduler, mut rx) = ReplyScheduler::new();
        scheduler.schedule(reply("1", 1000));
        scheduler.schedule(reply("1", 1000));
        scheduler.schedule(reply("2", 1000));
        assert_eq!(scheduler.pending_for(&ConversationId::new("1")), 2);

        assert_eq!(scheduler.cancel(&ConversationId::new("1")), 2);
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let due = rx.recv().await.unwrap();
        assert_eq!(due.reply.conversation_id.as_str(), "2");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_then_cancelled_is_not_live() {
        let (mut scheduler, mut rx) = ReplyScheduler::new();
        scheduler.schedule(reply("1", 10));

        tokio::time::sleep(Duration::from_millis(20)).await;
        let due = rx.recv().await.unwrap();

        scheduler.cancel(&ConversationId::new("1"));
        assert!(!scheduler.complete(&due));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_everything() {
        let (mut scheduler, mut rx) = ReplyScheduler::new();
        scheduler.schedule(reply("1", 1000));
        scheduler.schedule(reply("2", 1000));
        drop(scheduler);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        // All senders are gone and nothing was sent.
        assert!(rx.recv().await.is_none());
    }
}
