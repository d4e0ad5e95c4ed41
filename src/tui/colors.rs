//! Colour palettes for the terminal user interface.

use ratatui::style::{Color, Style};

use crate::fields::{NotificationKind, Priority, Theme, TaskStatus};

pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
pub const BRAND_BLUE: Color = Color::Rgb(37, 99, 235);

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub error: Color,
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn bar(&self) -> Style {
        Style::default().bg(self.bar_bg).fg(self.bar_fg)
    }

    pub fn highlight(&self) -> Style {
        Style::default().bg(self.highlight_bg).fg(self.highlight_fg)
    }
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(229, 231, 235),
            muted: Color::Gray,
            accent: GOLD,
            highlight_bg: Color::Gray,
            highlight_fg: Color::Black,
            bar_bg: BRAND_BLUE,
            bar_fg: Color::White,
            error: Color::LightRed,
        },
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Rgb(17, 24, 39),
            muted: Color::DarkGray,
            accent: BRAND_BLUE,
            highlight_bg: Color::Rgb(219, 234, 254),
            highlight_fg: Color::Black,
            bar_bg: Color::Rgb(229, 231, 235),
            bar_fg: Color::Black,
            error: Color::Red,
        },
    }
}

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn task_status_color(s: TaskStatus) -> Color {
    match s {
        TaskStatus::Feedback => Color::Magenta,
        TaskStatus::Bug => Color::Red,
        TaskStatus::Progress => Color::Cyan,
        TaskStatus::Completed => Color::Green,
    }
}

pub fn notification_color(k: NotificationKind) -> Color {
    match k {
        NotificationKind::Info => Color::Cyan,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
    }
}
