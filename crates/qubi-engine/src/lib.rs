//! qubi-engine: Headless engine for the qubi mock conversation demo
//!
//! This crate provides the chat core for qubi, including:
//! - Conversation and message types
//! - The conversation controller (open, close, send, reply)
//! - Cancellable deferred replies
//! - Configuration and demo data
//! - The static project showcase

pub mod chat;
pub mod clock;
pub mod config;
pub mod controller;
pub mod replies;
pub mod scheduler;
pub mod seed;
pub mod session;
pub mod showcase;

// Re-export commonly used types
pub use chat::{
    format_timestamp, Conversation, ConversationId, ConversationSummary, Message, MessageId,
    Sender, LOCAL_USER_LABEL,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError, MIN_TICK_RATE_MS, QUBI_DIR};
pub use controller::{ChatController, IgnoreReason, PendingReply, SendOutcome};
pub use replies::{ReplyPicker, DEFAULT_REPLIES};
pub use scheduler::{DueReply, ReplyScheduler};
pub use seed::demo_conversations;
pub use session::{ChatSession, DeliveredReply};
pub use showcase::{Chapter, Section, Showcase, SHOWCASE};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
