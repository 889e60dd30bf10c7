//! Conversation list ("Chat Dashboard").

use crate::app::App;
use crate::screens::{avatar_badge, Screen};
use crate::ui::main_layout;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The conversation list screen.
pub struct ChatListScreen;

impl Screen for ChatListScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let block = Block::default()
            .title(" Chat Dashboard ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());
        let inner = block.inner(main_area);
        block.render(main_area, buf);

        let width = usize::from(inner.width);
        let mut lines = Vec::new();
        for (i, summary) in app.session.controller().summaries().iter().enumerate() {
            let selected = i == app.selected;
            let (marker, name_style) = if selected {
                ("> ", Styles::highlight())
            } else {
                ("  ", Styles::default())
            };

            let badge = avatar_badge(&summary.name);
            let head = format!("{marker}{badge} {}", summary.name);
            let room = width.saturating_sub(head.width() + 2);

            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{badge} "), Styles::active()),
                Span::styled(summary.name.clone(), name_style),
                Span::styled("  ", Styles::default()),
                Span::styled(truncate(&summary.preview, room), Styles::dim()),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled("No conversations", Styles::dim())));
        }

        Paragraph::new(lines).style(Styles::default()).render(inner, buf);

        StatusBar::new("Chat")
            .hints(vec![
                KeyHint::new("Enter", "Open"),
                KeyHint::new("j/k", "Select"),
                KeyHint::new("1", "Showcase"),
                KeyHint::new("q", "Quit"),
            ])
            .right(app.notification.as_deref())
            .render(status_area, buf);
    }
}

/// Cut `text` to `max` columns, ending in "..." when shortened.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max >= 3 {
        out.push_str("...");
    }
    out
}
