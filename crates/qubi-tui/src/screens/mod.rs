//! Screen definitions for the qubi TUI.

pub mod chat_list;
pub mod conversation;
pub mod showcase;

use crate::app::{self, App, ChatView};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render whatever the app is currently showing, help overlay included.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    match (app.screen, app.chat_view()) {
        (app::Screen::Showcase, _) => showcase::ShowcaseScreen.render(app, area, buf),
        (app::Screen::Chat, ChatView::List) => chat_list::ChatListScreen.render(app, area, buf),
        (app::Screen::Chat, ChatView::Conversation) => {
            conversation::ConversationScreen.render(app, area, buf);
        }
    }

    if app.show_help {
        render_help_overlay(area, buf);
    }
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::Styles;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Navigation
    1 / 2             Showcase / Chat
    j/k or Up/Down    Select or scroll
    Enter             Open / send
    Esc               Back to list
    q or Ctrl+C       Quit
    ?                 Toggle this help

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 14.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    Paragraph::new(help_text)
        .block(block)
        .style(Styles::default())
        .render(overlay_area, buf);
}

/// Short badge standing in for an avatar image.
pub(crate) fn avatar_badge(name: &str) -> String {
    let initial = name.chars().next().map_or('?', |c| c.to_ascii_uppercase());
    format!("({initial})")
}
