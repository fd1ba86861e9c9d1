//! Toast stack
//!
//! Toasts are drawn in the top right corner, newest on top. The actions of
//! the newest toast are bound to F1, F2, ... in order; Alt+X dismisses it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::Command;
use crate::providers::{Toast, ToastVariant, Toaster};
use crate::tui::{styles::Theme, Frame};

const WIDTH: u16 = 48;

pub struct ToastStack {
    toaster: Toaster,
}

impl ToastStack {
    pub fn new(toaster: &Toaster) -> Self {
        Self {
            toaster: toaster.clone(),
        }
    }

    /// Handle keys aimed at the newest toast; `None` leaves the key to others
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Option<Option<Command>> {
        let toast = self.toaster.latest()?;
        match event.code {
            KeyCode::F(n) if n >= 1 => {
                let action = toast.actions.get(n as usize - 1)?;
                self.toaster.dismiss(toast.id);
                Some(Some(action.command.clone()))
            }
            KeyCode::Char('x') if event.modifiers.contains(KeyModifiers::ALT) => {
                self.toaster.dismiss(toast.id);
                Some(None)
            }
            _ => None,
        }
    }

    fn height(toast: &Toast) -> u16 {
        let description = toast
            .description
            .as_ref()
            .map(|d| textwrap::wrap(d, (WIDTH - 4) as usize).len() as u16)
            .unwrap_or(0);
        let actions = if toast.actions.is_empty() { 0 } else { 1 };
        2 + 1 + description + actions
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut toasts = self.toaster.toasts();
        toasts.reverse();
        let width = WIDTH.min(area.width);
        let mut y = area.y + 1;

        for (index, toast) in toasts.iter().enumerate() {
            let height = Self::height(toast);
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect::new(area.x + area.width - width, y, width, height);
            y += height;

            let border = match toast.variant {
                ToastVariant::Default => theme.focused_border_style(),
                ToastVariant::Error => theme.error_style(),
            };
            let mut lines = vec![Line::from(Span::styled(toast.title.clone(), theme.title_style()))];
            if let Some(description) = &toast.description {
                lines.push(Line::from(Span::styled(description.clone(), theme.text_style())));
            }
            if !toast.actions.is_empty() {
                let mut spans = Vec::new();
                for (i, action) in toast.actions.iter().enumerate() {
                    // Only the newest toast has live shortcuts
                    let key = if index == 0 {
                        format!("F{} ", i + 1)
                    } else {
                        String::new()
                    };
                    spans.push(Span::styled(key, theme.dim_style()));
                    spans.push(Span::styled(
                        format!(" {} ", action.label),
                        theme.button_style(index == 0),
                    ));
                    spans.push(Span::raw("  "));
                }
                let used: usize = spans.iter().map(|s| s.content.width()).sum();
                if used <= (width - 2) as usize {
                    lines.push(Line::from(spans));
                }
            }

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border)
                        .style(theme.base_style()),
                ),
                rect,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::providers::ToastAction;

    #[test]
    fn test_function_keys_trigger_newest_toast_actions() {
        let toaster = Toaster::new(EventSink::detached());
        toaster.toast(Toast::new("older").action(ToastAction::new("Old", Command::Undo)));
        toaster.toast(
            Toast::new("Multiple Schemas")
                .action(ToastAction::new("Don't show again", Command::HideMultiSchemaNotification))
                .action(ToastAction::new("Change schema", Command::ChangeSchema { desktop: true })),
        );
        let mut stack = ToastStack::new(&toaster);

        let command = stack.handle_key_event(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE));
        assert_eq!(command, Some(Some(Command::ChangeSchema { desktop: true })));
        assert_eq!(toaster.toasts().len(), 1);
    }

    #[test]
    fn test_unbound_key_passes_through() {
        let toaster = Toaster::new(EventSink::detached());
        toaster.toast(Toast::new("Saved"));
        let mut stack = ToastStack::new(&toaster);

        assert_eq!(
            stack.handle_key_event(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            stack.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            Some(None)
        );
        assert!(toaster.toasts().is_empty());
    }
}
