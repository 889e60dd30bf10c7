//! Demo conversations loaded at startup.

use crate::chat::{Conversation, Message, MessageId, Sender};

/// The fixed demo conversations, in list order.
pub fn demo_conversations() -> Vec<Conversation> {
    vec![
        Conversation::new(
            "1",
            "Alice",
            "https://placehold.co/80x80/A0AEC0/FFFFFF?text=A",
        )
        .with_messages(vec![
            Message::new(
                MessageId(1),
                "Hey, how is the Qubi project going?",
                Sender::Counterpart("Alice".into()),
                "10:00 AM",
            ),
            Message::new(
                MessageId(2),
                "It's going great! Making good progress on the quantum resistance layer.",
                Sender::LocalUser,
                "10:01 AM",
            ),
        ]),
        Conversation::new(
            "2",
            "Bob",
            "https://placehold.co/80x80/F6AD55/FFFFFF?text=B",
        )
        .with_messages(vec![
            Message::new(
                MessageId(1),
                "Did you see the latest market trends?",
                Sender::Counterpart("Bob".into()),
                "Yesterday",
            ),
            Message::new(
                MessageId(2),
                "Yeah, pretty volatile. But our long-term vision is solid.",
                Sender::LocalUser,
                "Yesterday",
            ),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data_shape() {
        let conversations = demo_conversations();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].name, "Alice");
        assert_eq!(conversations[1].name, "Bob");
        for conversation in &conversations {
            let ids: Vec<u64> = conversation.messages().iter().map(|m| m.id.0).collect();
            assert_eq!(ids, vec![1, 2]);
        }
    }

    #[test]
    fn test_demo_counterpart_names_match_senders() {
        for conversation in demo_conversations() {
            let first = &conversation.messages()[0];
            assert_eq!(first.sender, conversation.counterpart());
        }
    }
}
