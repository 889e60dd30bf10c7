//! qubi-tui: Terminal UI for the qubi mock conversation demo
//!
//! This crate provides the TUI layer for qubi, including:
//! - Showcase page with the project overview
//! - Conversation list and message view
//! - Shared widgets (status bar, message input)

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::{App, ChatView, Screen};
pub use event::{Action, Event, EventHandler};
pub use qubi_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use qubi_engine::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let mut events = EventHandler::new(config.tick_rate());
    info!("tui started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    app.shutdown();

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render(app, area, frame.buffer_mut());
        })?;

        let waiting = app.session.pending_replies() > 0;
        tokio::select! {
            event = events.next() => match event {
                Some(event) => handle_event(app, event),
                None => break,
            },
            // Deliver replies as soon as they are due instead of on the next tick.
            delivered = app.session.next_reply(), if waiting => {
                if let Some(delivered) = delivered {
                    app.reply_delivered(&delivered);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => {
            if app.handle_input_key(key) {
                return;
            }
            app.handle_action(event::key_to_action(key));
        }
        Event::Mouse(mouse) => {
            use crossterm::event::MouseEventKind;
            match mouse.kind {
                MouseEventKind::ScrollUp => app.handle_action(Action::Up),
                MouseEventKind::ScrollDown => app.handle_action(Action::Down),
                _ => {}
            }
        }
        Event::Tick => app.tick(),
        Event::Resize(_, _) => {}
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod snapshot_tests {
    use crate::test_utils::*;
    use insta::assert_snapshot;

    #[test]
    fn test_snapshot_conversation_summaries() {
        let app = create_test_app();
        let rows: Vec<String> = app
            .session
            .controller()
            .summaries()
            .iter()
            .map(|s| format!("{} {} | {}", s.id, s.name, s.preview))
            .collect();
        assert_snapshot!(rows.join("\n"), @r"
        1 Alice | It's going great! Making good progress on the quantum resistance layer.
        2 Bob | Yeah, pretty volatile. But our long-term vision is solid.
        ");
    }

    #[test]
    fn test_snapshot_help_overlay_title() {
        let mut app = create_test_app();
        app.show_help = true;
        let text = render_app_to_string(&app);
        assert!(text.contains(" Help "));
        assert!(text.contains("Toggle this help"));
    }
}

/// Navigation and messaging flows driven through actions and key events.
#[cfg(test)]
mod navigation_tests {
    use crate::app::{ChatView, Screen};
    use crate::event::Action;
    use crate::test_utils::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use qubi_engine::{ConversationId, Sender};
    use std::time::Duration;

    fn press(app: &mut crate::App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if !app.handle_input_key(key) {
            app.handle_action(crate::event::key_to_action(key));
        }
    }

    #[test]
    fn test_showcase_to_chat_navigation() {
        let mut app = create_test_app();
        assert_eq!(app.screen, Screen::Showcase);

        app.handle_action(Action::Chat);
        assert_eq!(app.screen, Screen::Chat);
        assert_eq!(app.chat_view(), ChatView::List);

        app.handle_action(Action::Showcase);
        assert_eq!(app.screen, Screen::Showcase);
    }

    #[test]
    fn test_open_then_close_returns_to_list() {
        let mut app = create_test_app_at_screen(Screen::Chat);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.session.controller().open_id(),
            Some(&ConversationId::new("2"))
        );
        assert!(render_app_to_string(&app).contains("(B) Bob"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.chat_view(), ChatView::List);
        assert!(render_app_to_string(&app).contains("Chat Dashboard"));
    }

    #[test]
    fn test_q_types_inside_conversation() {
        let mut app = create_test_app_in_conversation("1");
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.input_state.content(), "q");
    }

    #[test]
    fn test_help_toggle() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);
        app.handle_action(Action::Down);
        assert!(!app.show_help);
        assert_eq!(app.showcase_scroll, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_lands_after_navigating_away() {
        let mut app = create_test_app_in_conversation("1");
        for c in "ping".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Esc);
        app.open_conversation(&ConversationId::new("2"));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(app.session.next_reply().await.is_some());

        let alice = app
            .session
            .controller()
            .conversation(&ConversationId::new("1"))
            .unwrap();
        assert_eq!(alice.messages().len(), 4);
        assert_eq!(
            alice.last_message().unwrap().sender,
            Sender::Counterpart("Alice".into())
        );
        let bob = app.session.controller().open().unwrap();
        assert_eq!(bob.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reply_before_delay() {
        let mut app = create_test_app_in_conversation("2");
        for c in "hey".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        tokio::time::sleep(Duration::from_millis(999)).await;
        app.poll_replies();
        assert_eq!(app.session.controller().open().unwrap().messages().len(), 3);

        tokio::time::sleep(Duration::from_millis(2)).await;
        app.poll_replies();
        assert_eq!(app.session.controller().open().unwrap().messages().len(), 4);
    }
}
