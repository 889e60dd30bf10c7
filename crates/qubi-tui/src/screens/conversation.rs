//! Open conversation: header, message bubbles and input.

use crate::app::App;
use crate::screens::{avatar_badge, Screen};
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar, TextInput};
use crate::ui::{conversation_layout, main_layout};
use qubi_engine::{Conversation, Message};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Smallest bubble text width, whatever the terminal size.
const MIN_BUBBLE_WIDTH: usize = 10;

/// The open conversation screen.
pub struct ConversationScreen;

impl Screen for ConversationScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);
        let layout = conversation_layout(main_area);

        if let Some(conversation) = app.session.controller().open() {
            render_header(conversation, layout.header, buf);
            render_timeline(conversation, app.transcript_scroll, layout.timeline, buf);
        }

        let input_block = Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());
        TextInput::new(&app.input_state)
            .block(input_block)
            .focused(!app.show_help)
            .placeholder("Type a message...")
            .render(layout.input, buf);

        StatusBar::new("Chat")
            .hints(vec![
                KeyHint::new("Enter", "Send"),
                KeyHint::new("Esc", "Back"),
                KeyHint::new("Ctrl+C", "Quit"),
            ])
            .right(app.notification.as_deref())
            .render(status_area, buf);
    }
}

fn render_header(conversation: &Conversation, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let line = Line::from(vec![
        Span::styled(" Esc ", Styles::key_hint()),
        Span::styled(" Back   ", Styles::dim()),
        Span::styled(avatar_badge(&conversation.name), Styles::active()),
        Span::styled(" ", Styles::default()),
        Span::styled(conversation.name.clone(), Styles::title()),
    ]);

    Paragraph::new(line).block(block).render(area, buf);
}

fn render_timeline(conversation: &Conversation, scroll_up: usize, area: Rect, buf: &mut Buffer) {
    let lines = timeline_lines(conversation.messages(), usize::from(area.width));

    // Pinned to the bottom; scrolling moves the window up.
    let height = usize::from(area.height);
    let offset = lines
        .len()
        .saturating_sub(height)
        .saturating_sub(scroll_up);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    Paragraph::new(lines)
        .style(Styles::default())
        .scroll((offset, 0))
        .render(area, buf);
}

/// Lay out messages as bubbles: local messages on the right, others on the left.
fn timeline_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let max_text = (width * 2 / 3).max(MIN_BUBBLE_WIDTH);
    let mut lines = Vec::new();

    for message in messages {
        let (alignment, style) = if message.is_local() {
            (Alignment::Right, Styles::bubble_self())
        } else {
            (Alignment::Left, Styles::bubble_other())
        };

        let wrapped = textwrap::wrap(&message.text, max_text);
        let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
        for piece in &wrapped {
            let pad = " ".repeat(inner - piece.width());
            let text = if message.is_local() {
                format!(" {pad}{piece} ")
            } else {
                format!(" {piece}{pad} ")
            };
            lines.push(Line::from(Span::styled(text, style)).alignment(alignment));
        }

        let meta = if message.is_local() {
            message.timestamp.clone()
        } else {
            format!("{}  {}", message.sender.label(), message.timestamp)
        };
        lines.push(Line::from(Span::styled(meta, Styles::dim())).alignment(alignment));
        lines.push(Line::default());
    }

    lines.pop();
    lines
}
