//! Owned chat state for a view.
//!
//! A [`ChatSession`] bundles the controller with the reply scheduler and the
//! channel replies come back on. A view holds exactly one session and routes
//! every chat interaction through it.

use crate::chat::{ConversationId, MessageId};
use crate::config::Config;
use crate::controller::{ChatController, SendOutcome};
use crate::scheduler::{DueReply, ReplyScheduler};
use tokio::sync::mpsc;
use tracing::debug;

/// A reply that was appended to its conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredReply {
    /// Conversation the reply landed on.
    pub conversation_id: ConversationId,
    /// Id of the appended message.
    pub message_id: MessageId,
}

/// Controller plus deferred reply delivery.
#[derive(Debug)]
pub struct ChatSession {
    controller: ChatController,
    scheduler: ReplyScheduler,
    replies_rx: mpsc::UnboundedReceiver<DueReply>,
    cancel_on_close: bool,
}

impl ChatSession {
    /// Wrap a controller.
    pub fn new(controller: ChatController, cancel_on_close: bool) -> Self {
        let (scheduler, replies_rx) = ReplyScheduler::new();
        Self {
            controller,
            scheduler,
            replies_rx,
            cancel_on_close,
        }
    }

    /// Session over the demo conversations.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ChatController::from_config(config),
            config.cancel_pending_on_close,
        )
    }

    /// Read access to the conversations.
    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    /// Open a conversation.
    pub fn open_conversation(&mut self, id: &ConversationId) -> bool {
        self.controller.open_conversation(id)
    }

    /// Close the open conversation.
    ///
    /// Pending replies for it keep running unless the session was built
    /// with `cancel_on_close`.
    pub fn close_conversation(&mut self) -> Option<ConversationId> {
        let closed = self.controller.close_conversation();
        if self.cancel_on_close {
            if let Some(id) = &closed {
                self.scheduler.cancel(id);
            }
        }
        closed
    }

    /// Send a message and schedule the reply. Must be called inside a tokio runtime.
    pub fn send_message(&mut self, text: &str) -> SendOutcome {
        let outcome = self.controller.send_message(text);
        if let SendOutcome::Sent { reply, .. } = &outcome {
            self.scheduler.schedule(reply.clone());
        }
        outcome
    }

    /// Deliver every reply that is already due, without waiting.
    ///
    /// Returns where each reply landed.
    pub fn poll_replies(&mut self) -> Vec<DeliveredReply> {
        let mut delivered = Vec::new();
        while let Ok(due) = self.replies_rx.try_recv() {
            if let Some(id) = self.deliver(&due) {
                delivered.push(id);
            }
        }
        delivered
    }

    /// Wait for the next reply and deliver it.
    ///
    /// Returns `None` straight away when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<DeliveredReply> {
        loop {
            if self.scheduler.pending() == 0 {
                return None;
            }
            let due = self.replies_rx.recv().await?;
            if let Some(id) = self.deliver(&due) {
                return Some(id);
            }
        }
    }

    /// Number of replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.scheduler.pending()
    }

    /// Cancel all pending replies.
    pub fn cancel_pending(&mut self) -> usize {
        self.scheduler.cancel_all()
    }

    fn deliver(&mut self, due: &DueReply) -> Option<DeliveredReply> {
        if !self.scheduler.complete(due) {
            debug!(ticket = due.ticket, "dropping cancelled reply");
            return None;
        }
        let message_id = self.controller.deliver_reply(&due.reply)?;
        Some(DeliveredReply {
            conversation_id: due.reply.conversation_id.clone(),
            message_id,
        })
    }
}
