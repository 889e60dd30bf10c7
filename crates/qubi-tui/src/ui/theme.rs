//! Theme and styling definitions for the qubi TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(17, 24, 39);
    pub const FG: Color = Color::Rgb(229, 231, 235);
    pub const DIM: Color = Color::Rgb(156, 163, 175);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(56, 189, 248);
    pub const ACCENT_ALT: Color = Color::Rgb(147, 51, 234);

    // Bubbles
    pub const BUBBLE_SELF: Color = Color::Rgb(14, 116, 144);
    pub const BUBBLE_OTHER: Color = Color::Rgb(55, 65, 81);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(31, 41, 55);
    pub const STATUS_KEY_BG: Color = Color::Rgb(75, 85, 140);

    // Border colors
    pub const BORDER: Color = Color::Rgb(75, 85, 99);
    pub const BORDER_ACTIVE: Color = Color::Rgb(56, 189, 248);
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Section heading on the showcase page.
    pub fn heading() -> Style {
        Style::default()
            .fg(Palette::ACCENT_ALT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Bubble for messages the local user wrote.
    pub fn bubble_self() -> Style {
        Style::default().fg(Color::White).bg(Palette::BUBBLE_SELF)
    }

    /// Bubble for counterpart messages.
    pub fn bubble_other() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BUBBLE_OTHER)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}
