use ratatui::style::{Color, Modifier, Style};

use crate::providers::EffectiveTheme;

/// Application theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,

    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    pub background: Color,
    pub background_alt: Color,

    pub border: Color,
    pub border_focused: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub selection: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(147, 51, 234),      // Purple
            accent: Color::Rgb(2, 132, 199),        // Sky-600
            text: Color::Rgb(248, 250, 252),        // Slate-50
            text_dim: Color::Rgb(148, 163, 184),    // Slate-400
            text_bright: Color::Rgb(255, 255, 255), // White
            background: Color::Rgb(15, 23, 42),     // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800
            border: Color::Rgb(71, 85, 105),        // Slate-600
            border_focused: Color::Rgb(147, 51, 234),
            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(239, 68, 68),
            selection: Color::Rgb(30, 58, 138),    // Blue-900
            disabled: Color::Rgb(100, 116, 139),   // Slate-500
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(126, 34, 206),       // Purple-700
            accent: Color::Rgb(2, 132, 199),
            text: Color::Rgb(15, 23, 42),            // Slate-900
            text_dim: Color::Rgb(71, 85, 105),       // Slate-600
            text_bright: Color::Rgb(0, 0, 0),
            background: Color::Rgb(255, 255, 255),
            background_alt: Color::Rgb(241, 245, 249), // Slate-100
            border: Color::Rgb(203, 213, 225),       // Slate-300
            border_focused: Color::Rgb(126, 34, 206),
            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            error: Color::Rgb(220, 38, 38),
            selection: Color::Rgb(219, 234, 254),    // Blue-100
            disabled: Color::Rgb(148, 163, 184),
        }
    }

    pub fn for_effective(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Dark => Self::dark(),
            EffectiveTheme::Light => Self::light(),
        }
    }

    /// Base style for normal elements
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.disabled)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Primary call to action, such as the alert's action button
    pub fn button_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Color::White)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text).bg(self.background_alt)
        }
    }
}
