//! Application state and update logic for the qubi TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use qubi_engine::{
    ChatSession, Config, ConversationId, DeliveredReply, IgnoreReason, SendOutcome,
};
use tracing::{debug, info};

/// Lines scrolled by page up / page down.
const PAGE_SCROLL: usize = 10;

/// Ticks a notification stays visible (about 3 seconds at 4 Hz).
const NOTIFICATION_TICKS: usize = 12;

/// The current top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Static project showcase.
    #[default]
    Showcase,
    /// Conversation list or open conversation.
    Chat,
}

/// What the chat screen shows, derived from the session's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatView {
    /// No conversation open.
    List,
    /// A conversation is open.
    Conversation,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Current screen.
    pub screen: Screen,

    /// Conversations and pending replies.
    pub session: ChatSession,

    /// Message input.
    pub input_state: TextInputState,

    /// Highlighted row in the conversation list.
    pub selected: usize,

    /// Lines scrolled up from the bottom of the open conversation.
    pub transcript_scroll: usize,

    /// Lines scrolled down on the showcase page.
    pub showcase_scroll: usize,

    /// Tick counter.
    pub tick: usize,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    notification_ttl: usize,
}

impl App {
    /// Create the app over the demo conversations.
    pub fn new(config: &Config) -> Self {
        Self::with_session(ChatSession::from_config(config))
    }

    /// Create the app over an existing session.
    pub fn with_session(session: ChatSession) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            screen: Screen::default(),
            session,
            input_state: TextInputState::new(),
            selected: 0,
            transcript_scroll: 0,
            showcase_scroll: 0,
            tick: 0,
            notification: None,
            notification_ttl: 0,
        }
    }

    /// Create an app with a stopped clock and seeded replies.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        use chrono::TimeZone;
        use qubi_engine::{demo_conversations, ChatController, ManualClock, ReplyPicker};

        let clock = ManualClock::new(
            chrono::Local
                .with_ymd_and_hms(2024, 5, 1, 15, 7, 0)
                .single()
                .expect("valid test time"),
        );
        let controller = ChatController::new(
            demo_conversations(),
            ReplyPicker::seeded(1),
            Box::new(clock),
            std::time::Duration::from_millis(1000),
        );
        Self::with_session(ChatSession::new(controller, false))
    }

    /// What the chat screen currently shows.
    pub fn chat_view(&self) -> ChatView {
        if self.session.controller().open_id().is_some() {
            ChatView::Conversation
        } else {
            ChatView::List
        }
    }

    /// Whether typed characters go to the message input.
    pub fn input_active(&self) -> bool {
        self.screen == Screen::Chat && self.chat_view() == ChatView::Conversation && !self.show_help
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match (self.screen, self.chat_view()) {
            (Screen::Showcase, _) => self.handle_showcase_action(action),
            (Screen::Chat, ChatView::List) => self.handle_list_action(action),
            (Screen::Chat, ChatView::Conversation) => self.handle_conversation_action(action),
        }
    }

    fn handle_showcase_action(&mut self, action: Action) {
        match action {
            Action::Chat | Action::NextTab | Action::Select => self.screen = Screen::Chat,
            Action::Up => self.showcase_scroll = self.showcase_scroll.saturating_sub(1),
            Action::Down => self.showcase_scroll += 1,
            Action::PageUp => {
                self.showcase_scroll = self.showcase_scroll.saturating_sub(PAGE_SCROLL);
            }
            Action::PageDown => self.showcase_scroll += PAGE_SCROLL,
            _ => {}
        }
    }

    fn handle_list_action(&mut self, action: Action) {
        let count = self.session.controller().ids().len();
        match action {
            Action::Showcase | Action::NextTab | Action::Back => self.screen = Screen::Showcase,
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            Action::Select => self.open_selected(),
            _ => {}
        }
    }

    fn handle_conversation_action(&mut self, action: Action) {
        match action {
            Action::Back => self.close_conversation(),
            Action::Up => self.transcript_scroll += 1,
            Action::Down => self.transcript_scroll = self.transcript_scroll.saturating_sub(1),
            Action::PageUp => self.transcript_scroll += PAGE_SCROLL,
            Action::PageDown => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(PAGE_SCROLL);
            }
            Action::Select => self.submit_input(),
            _ => {}
        }
    }

    /// Route a key to the message input.
    ///
    /// Returns `true` if the key was consumed and should not become an action.
    pub fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if !self.input_active() {
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) => self.input_state.insert(c),
            KeyCode::Backspace => self.input_state.backspace(),
            KeyCode::Delete => self.input_state.delete(),
            KeyCode::Left => self.input_state.move_left(),
            KeyCode::Right => self.input_state.move_right(),
            KeyCode::Home => self.input_state.move_home(),
            KeyCode::End => self.input_state.move_end(),
            // History when the input is empty or already showing an entry,
            // otherwise let Up/Down scroll.
            KeyCode::Up if self.history_keys_active() => self.input_state.history_prev(),
            KeyCode::Down if self.history_keys_active() => self.input_state.history_next(),
            _ => return false,
        }
        true
    }

    fn history_keys_active(&self) -> bool {
        self.input_state.is_empty() || self.input_state.is_browsing_history()
    }

    /// Open the highlighted conversation.
    pub fn open_selected(&mut self) {
        let ids = self.session.controller().ids();
        if let Some(id) = ids.get(self.selected) {
            self.open_conversation(&id.clone());
        }
    }

    /// Open a conversation by id.
    pub fn open_conversation(&mut self, id: &ConversationId) {
        if self.session.open_conversation(id) {
            self.screen = Screen::Chat;
            self.transcript_scroll = 0;
        }
    }

    /// Return to the conversation list.
    pub fn close_conversation(&mut self) {
        self.session.close_conversation();
        self.transcript_scroll = 0;
    }

    /// Send the input as a message.
    ///
    /// The input is only cleared when the message was actually sent. Must be
    /// called inside a tokio runtime.
    pub fn submit_input(&mut self) {
        match self.session.send_message(self.input_state.content()) {
            SendOutcome::Sent { .. } => {
                self.input_state.submit();
                self.transcript_scroll = 0;
            }
            SendOutcome::Ignored(IgnoreReason::EmptyText) => {}
            SendOutcome::Ignored(IgnoreReason::NoConversationOpen) => {
                debug!("submit with no conversation open");
            }
        }
    }

    /// Deliver replies that are due.
    pub fn poll_replies(&mut self) {
        for delivered in self.session.poll_replies() {
            self.reply_delivered(&delivered);
        }
    }

    /// React to a reply that landed. Replies to a conversation that is not
    /// on screen raise a notification.
    pub fn reply_delivered(&mut self, delivered: &DeliveredReply) {
        debug!(
            conversation = %delivered.conversation_id,
            message = %delivered.message_id,
            "reply delivered"
        );
        let on_screen = self.screen == Screen::Chat
            && self.session.controller().open_id() == Some(&delivered.conversation_id);
        if on_screen {
            return;
        }
        let name = self
            .session
            .controller()
            .conversation(&delivered.conversation_id)
            .map_or_else(|| delivered.conversation_id.to_string(), |c| c.name.clone());
        self.set_notification(format!("Reply from {name}"));
    }

    /// Set a temporary notification message.
    pub fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }

        self.poll_replies();
    }

    /// Release pending replies before exit.
    pub fn shutdown(&mut self) {
        let cancelled = self.session.cancel_pending();
        info!(cancelled, "shutting down");
    }
}
