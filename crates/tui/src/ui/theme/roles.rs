use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used by the sidebar.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    /// Soft fill behind the rows covered by the visible-section highlight.
    pub highlight_bg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    fn group_title_style(&self) -> Style {
        self.text_secondary_style().add_modifier(Modifier::BOLD)
    }

    /// Active top-level page.
    fn active_link_style(&self) -> Style {
        Style::default().fg(self.roles().text).add_modifier(Modifier::BOLD)
    }

    /// Active nested entry; nested matches get the accent color.
    fn active_nested_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }

    fn marker_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }

    fn track_style(&self) -> Style {
        Style::default().fg(self.roles().border)
    }

    fn highlight_style(&self) -> Style {
        Style::default().bg(self.roles().highlight_bg)
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn tag_style(&self) -> Style {
        Style::default().fg(self.roles().accent_secondary)
    }
}
