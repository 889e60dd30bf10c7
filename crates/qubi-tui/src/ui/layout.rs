//! Layout helpers for the qubi TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the message input area, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Height of the conversation header, borders included.
pub const HEADER_HEIGHT: u16 = 3;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Areas of the open conversation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationLayout {
    pub header: Rect,
    pub timeline: Rect,
    pub input: Rect,
}

/// Split the main area into header, timeline and input.
pub fn conversation_layout(area: Rect) -> ConversationLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(area);
    ConversationLayout {
        header: chunks[0],
        timeline: chunks[1],
        input: chunks[2],
    }
}
