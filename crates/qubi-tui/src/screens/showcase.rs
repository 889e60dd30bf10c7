//! Showcase screen - the static project overview.

use crate::app::App;
use crate::screens::Screen;
use crate::ui::main_layout;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar};
use qubi_engine::SHOWCASE;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

/// The Showcase screen.
pub struct ShowcaseScreen;

impl Screen for ShowcaseScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let mut lines = vec![
            Line::from(Span::styled(SHOWCASE.hero_subtitle, Styles::dim())),
            Line::from(Span::styled(SHOWCASE.hero_title, Styles::title())),
            Line::from(Span::styled(SHOWCASE.hero_description, Styles::default())),
            Line::default(),
            Line::from(Span::styled("Abstract", Styles::heading())),
            Line::from(Span::styled(SHOWCASE.summary, Styles::default())),
        ];

        for chapter in SHOWCASE.chapters {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(chapter.heading, Styles::heading())));
            for section in chapter.sections {
                lines.push(Line::from(vec![
                    Span::styled(section.title, Styles::highlight()),
                    Span::styled(": ", Styles::dim()),
                    Span::styled(section.description, Styles::default()),
                ]));
            }
        }

        let block = Block::default()
            .title(" qubi ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .padding(Padding::horizontal(1))
            .style(Styles::default());

        let scroll = u16::try_from(app.showcase_scroll).unwrap_or(u16::MAX);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0))
            .render(main_area, buf);

        StatusBar::new("Showcase")
            .hints(vec![
                KeyHint::new("2", "Chat"),
                KeyHint::new("j/k", "Scroll"),
                KeyHint::new("?", "Help"),
                KeyHint::new("q", "Quit"),
            ])
            .right(app.notification.as_deref())
            .render(status_area, buf);
    }
}
