//! Mock conversation controller.
//!
//! Owns the conversation set and the selection state. All mutation goes
//! through [`ChatController::open_conversation`],
//! [`ChatController::close_conversation`], [`ChatController::send_message`]
//! and [`ChatController::deliver_reply`]. Invalid calls are no-ops.

use crate::chat::{
    format_timestamp, Conversation, ConversationId, ConversationSummary, Message, MessageId,
    Sender,
};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::replies::ReplyPicker;
use crate::seed::demo_conversations;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// A reply waiting to be delivered.
///
/// Captures the conversation that was open when the user message was sent,
/// so delivery never depends on what is open later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Conversation the reply belongs to.
    pub conversation_id: ConversationId,
    /// Counterpart the reply is attributed to.
    pub counterpart: Sender,
    /// How long after the send the reply is due.
    pub delay: Duration,
}

/// Why a send did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No conversation is open.
    NoConversationOpen,
    /// The text is empty after trimming.
    EmptyText,
}

/// Result of [`ChatController::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was appended and a reply is due.
    Sent {
        message_id: MessageId,
        reply: PendingReply,
    },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl SendOutcome {
    /// Whether the message was appended.
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Holds the conversations and which one is open.
#[derive(Debug)]
pub struct ChatController {
    conversations: BTreeMap<ConversationId, Conversation>,
    open: Option<ConversationId>,
    clock: Box<dyn Clock>,
    replies: ReplyPicker,
    reply_delay: Duration,
}

impl ChatController {
    /// Create a controller over `conversations`.
    pub fn new(
        conversations: impl IntoIterator<Item = Conversation>,
        replies: ReplyPicker,
        clock: Box<dyn Clock>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            conversations: conversations
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
            open: None,
            clock,
            replies,
            reply_delay,
        }
    }

    /// Controller seeded with the demo conversations and the wall clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            demo_conversations(),
            ReplyPicker::new(config.replies.clone(), config.reply_seed),
            Box::new(SystemClock),
            config.reply_delay(),
        )
    }

    /// Open a conversation. Unknown ids are ignored.
    ///
    /// Returns whether the conversation is now open.
    pub fn open_conversation(&mut self, id: &ConversationId) -> bool {
        if !self.conversations.contains_key(id) {
            warn!(conversation = %id, "ignoring open of unknown conversation");
            return false;
        }
        debug!(conversation = %id, "conversation opened");
        self.open = Some(id.clone());
        true
    }

    /// Close whatever is open. Returns the id that was open, if any.
    pub fn close_conversation(&mut self) -> Option<ConversationId> {
        let closed = self.open.take();
        if let Some(id) = &closed {
            debug!(conversation = %id, "conversation closed");
        }
        closed
    }

    /// Id of the open conversation.
    pub fn open_id(&self) -> Option<&ConversationId> {
        self.open.as_ref()
    }

    /// The open conversation.
    pub fn open(&self) -> Option<&Conversation> {
        self.open.as_ref().and_then(|id| self.conversations.get(id))
    }

    /// Look up a conversation.
    pub fn conversation(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// All conversations in id order.
    pub fn conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.values()
    }

    /// Conversation ids in list order.
    pub fn ids(&self) -> Vec<ConversationId> {
        self.conversations.keys().cloned().collect()
    }

    /// List rows in id order.
    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.conversations.values().map(Conversation::summary).collect()
    }

    /// The reply set used by [`Self::deliver_reply`].
    pub fn replies(&self) -> &ReplyPicker {
        &self.replies
    }

    /// Send `text` as the local user to the open conversation.
    ///
    /// The text is stored as given; it only has to be non-empty after
    /// trimming. On success the returned [`PendingReply`] must be handed to
    /// a scheduler (or delivered directly) for the counterpart to answer.
    pub fn send_message(&mut self, text: &str) -> SendOutcome {
        let Some(id) = self.open.clone() else {
            debug!("send ignored: no conversation open");
            return SendOutcome::Ignored(IgnoreReason::NoConversationOpen);
        };
        if text.trim().is_empty() {
            debug!(conversation = %id, "send ignored: empty text");
            return SendOutcome::Ignored(IgnoreReason::EmptyText);
        }

        let Some(counterpart) = self.conversations.get(&id).map(Conversation::counterpart) else {
            return SendOutcome::Ignored(IgnoreReason::NoConversationOpen);
        };
        let Some(message_id) = self.append(&id, text.to_string(), Sender::LocalUser) else {
            return SendOutcome::Ignored(IgnoreReason::NoConversationOpen);
        };

        debug!(conversation = %id, message = %message_id, "message sent");
        SendOutcome::Sent {
            message_id,
            reply: PendingReply {
                conversation_id: id,
                counterpart,
                delay: self.reply_delay,
            },
        }
    }

    /// Append the counterpart's reply for `reply`.
    ///
    /// The text is picked now and the timestamp is taken now, not at send
    /// time. Returns the new message id, or `None` if the conversation no
    /// longer exists.
    pub fn deliver_reply(&mut self, reply: &PendingReply) -> Option<MessageId> {
        let text = self.replies.pick();
        let id = self.append(&reply.conversation_id, text, reply.counterpart.clone());
        match id {
            Some(message_id) => {
                debug!(
                    conversation = %reply.conversation_id,
                    message = %message_id,
                    "reply delivered"
                );
            }
            None => {
                warn!(conversation = %reply.conversation_id, "reply for unknown conversation dropped");
            }
        }
        id
    }

    fn append(&mut self, id: &ConversationId, text: String, sender: Sender) -> Option<MessageId> {
        let now = self.clock.now();
        let conversation = self.conversations.get_mut(id)?;

        // Clock millis keep ids time-ordered; last + 1 keeps them strictly increasing.
        let clock_id = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next = conversation.last_id().map_or(clock_id, |last| clock_id.max(last.0 + 1));
        let message_id = MessageId(next);

        conversation.push(Message::new(message_id, text, sender, format_timestamp(&now)));
        Some(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Local, TimeZone};

    fn controller_with_clock() -> (ChatController, ManualClock) {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 5, 1, 15, 7, 0).unwrap());
        let controller = ChatController::new(
            demo_conversations(),
            ReplyPicker::seeded(11),
            Box::new(clock.clone()),
            Duration::from_millis(1000),
        );
        (controller, clock)
    }

    fn id(s: &str) -> ConversationId {
        ConversationId::new(s)
    }

    fn count(controller: &ChatController, conversation: &str) -> usize {
        controller.conversation(&id(conversation)).unwrap().messages().len()
    }

    #[test]
    fn test_initially_nothing_open() {
        let (controller, _) = controller_with_clock();
        assert!(controller.open_id().is_none());
        assert!(controller.open().is_none());
    }

    #[test]
    fn test_open_and_close() {
        let (mut controller, _) = controller_with_clock();
        assert!(controller.open_conversation(&id("2")));
        assert_eq!(controller.open().unwrap().name, "Bob");

        assert_eq!(controller.close_conversation(), Some(id("2")));
        assert!(controller.open_id().is_none());

        // Closing again is harmless.
        assert_eq!(controller.close_conversation(), None);
    }

    #[test]
    fn test_open_unknown_is_ignored() {
        let (mut controller, _) = controller_with_clock();
        controller.open_conversation(&id("1"));
        assert!(!controller.open_conversation(&id("404")));
        assert_eq!(controller.open_id(), Some(&id("1")));
    }

    #[test]
    fn test_send_without_open_conversation() {
        let (mut controller, _) = controller_with_clock();
        let outcome = controller.send_message("hello");
        assert_eq!(outcome, SendOutcome::Ignored(IgnoreReason::NoConversationOpen));
        assert_eq!(count(&controller, "1"), 2);
        assert_eq!(count(&controller, "2"), 2);
    }

    #[test]
    fn test_send_whitespace_is_ignored() {
        let (mut controller, _) = controller_with_clock();
        controller.open_conversation(&id("1"));
        for text in ["", "   ", "\n\t "] {
            let outcome = controller.send_message(text);
            assert_eq!(outcome, SendOutcome::Ignored(IgnoreReason::EmptyText));
        }
        assert_eq!(count(&controller, "1"), 2);
    }

    #[test]
    fn test_send_appends_user_message() {
        let (mut controller, _) = controller_with_clock();
        controller.open_conversation(&id("1"));

        let outcome = controller.send_message("  hello ");
        let SendOutcome::Sent { message_id, reply } = outcome else {
            panic!("expected send");
        };

        let conversation = controller.conversation(&id("1")).unwrap();
        assert_eq!(conversation.messages().len(), 3);
        let last = conversation.last_message().unwrap();
        assert_eq!(last.id, message_id);
        assert_eq!(last.text, "  hello ");
        assert_eq!(last.sender, Sender::LocalUser);
        assert_eq!(last.timestamp, "03:07 PM");

        assert_eq!(reply.conversation_id, id("1"));
        assert_eq!(reply.counterpart, Sender::Counterpart("Alice".into()));
        assert_eq!(reply.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_deliver_reply_uses_fire_time() {
        let (mut controller, clock) = controller_with_clock();
        controller.open_conversation(&id("1"));
        let SendOutcome::Sent { reply, .. } = controller.send_message("hello") else {
            panic!("expected send");
        };

        clock.advance(chrono::Duration::minutes(1));
        let reply_id = controller.deliver_reply(&reply).unwrap();

        let conversation = controller.conversation(&id("1")).unwrap();
        let last = conversation.last_message().unwrap();
        assert_eq!(last.id, reply_id);
        assert_eq!(last.sender.label(), "Alice");
        assert_eq!(last.timestamp, "03:08 PM");
        assert!(controller.replies().contains(&last.text));
    }

    #[test]
    fn test_reply_lands_on_captured_conversation() {
        let (mut controller, _) = controller_with_clock();
        controller.open_conversation(&id("1"));
        let SendOutcome::Sent { reply, .. } = controller.send_message("hello") else {
            panic!("expected send");
        };

        controller.close_conversation();
        controller.open_conversation(&id("2"));
        controller.deliver_reply(&reply);

        assert_eq!(count(&controller, "1"), 4);
        assert_eq!(count(&controller, "2"), 2);
    }

    #[test]
    fn test_ids_strictly_increase_with_stalled_clock() {
        let (mut controller, _) = controller_with_clock();
        controller.open_conversation(&id("2"));
        for i in 0..5 {
            let SendOutcome::Sent { reply, .. } = controller.send_message(&format!("msg {i}"))
            else {
                panic!("expected send");
            };
            controller.deliver_reply(&reply);
        }

        let ids: Vec<u64> = controller
            .conversation(&id("2"))
            .unwrap()
            .messages()
            .iter()
            .map(|m| m.id.0)
            .collect();
        assert_eq!(ids.len(), 12);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deliver_to_unknown_conversation() {
        let (mut controller, _) = controller_with_clock();
        let reply = PendingReply {
            conversation_id: id("ghost"),
            counterpart: Sender::Counterpart("Ghost".into()),
            delay: Duration::ZERO,
        };
        assert!(controller.deliver_reply(&reply).is_none());
    }

    #[test]
    fn test_summaries_in_id_order() {
        let (controller, _) = controller_with_clock();
        let names: Vec<String> = controller.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }
}
