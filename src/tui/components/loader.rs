use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::tui::{styles::Theme, utils::layout::centered_rect, Frame};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner drawn over the page while the full screen loader is visible
#[derive(Debug, Default)]
pub struct LoaderOverlay {
    frame: usize,
}

impl LoaderOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spinner
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, theme: &Theme) {
        let width = label.chars().count() as u16 + 8;
        let rect = centered_rect(width, 3, area);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(FRAMES[self.frame], theme.title_style()),
                Span::raw(" "),
                Span::styled(label.to_string(), theme.text_style()),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_style())
                    .style(theme.base_style()),
            ),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        let mut loader = LoaderOverlay::new();
        for _ in 0..FRAMES.len() {
            loader.tick();
        }
        assert_eq!(loader.frame, 0);
    }
}
