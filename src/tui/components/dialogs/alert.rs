//! Alert dialog
//!
//! Shows a title, an optional description and up to two buttons. The action
//! button closes the alert and hands its command back for dispatch.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::providers::{AlertParams, DialogHandle, DialogKind};
use crate::tui::{components::Component, styles::Theme, Frame};

const WIDTH: u16 = 56;

pub struct AlertDialog {
    dialogs: DialogHandle,
    params: AlertParams,
    /// Focus starts on the close button
    action_focused: bool,
    lines: Vec<String>,
}

impl AlertDialog {
    pub fn new(services: &EditorServices, params: AlertParams) -> Self {
        let lines = params
            .description
            .as_deref()
            .map(|d| {
                textwrap::wrap(d, (WIDTH - 4) as usize)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            dialogs: services.dialogs.clone(),
            params,
            action_focused: false,
            lines,
        }
    }

    fn has_action(&self) -> bool {
        self.params.on_action.is_some()
    }

    fn confirm(&mut self) -> Option<Command> {
        self.dialogs.close_alert();
        if self.action_focused {
            self.params.on_action.clone()
        } else {
            None
        }
    }
}

impl Component for AlertDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                if self.has_action() {
                    self.action_focused = !self.action_focused;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm(),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inner = render_frame(frame, area, &self.params.title, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let text: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), theme.text_style())))
            .collect();
        frame.render_widget(Paragraph::new(text), chunks[0]);

        let mut buttons = vec![Span::styled(
            format!(" {} ", self.params.close_label),
            theme.button_style(!self.action_focused),
        )];
        if let Some(label) = &self.params.action_label {
            buttons.push(Span::raw("  "));
            buttons.push(Span::styled(
                format!(" {} ", label),
                theme.button_style(self.action_focused),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(buttons)).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

impl DialogView for AlertDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::Alert
    }

    fn size(&self) -> (u16, u16) {
        (WIDTH, self.lines.len() as u16 + 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::providers::DialogProvider;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog(params: AlertParams) -> (AlertDialog, DialogHandle) {
        let handle = DialogProvider::new(EventSink::detached()).handle();
        handle.show_alert(params.clone());
        let dialog = AlertDialog {
            dialogs: handle.clone(),
            params,
            action_focused: false,
            lines: Vec::new(),
        };
        (dialog, handle)
    }

    #[test]
    fn test_action_button_closes_then_dispatches() {
        let (mut alert, handle) =
            dialog(AlertParams::new("Delete").action("Delete", Command::ConfirmDeleteDiagram));

        alert.handle_key_event(key(KeyCode::Tab));
        let command = alert.handle_key_event(key(KeyCode::Enter));

        assert_eq!(command, Some(Command::ConfirmDeleteDiagram));
        assert!(!handle.is_open(DialogKind::Alert));
    }

    #[test]
    fn test_close_button_dispatches_nothing() {
        let (mut alert, handle) =
            dialog(AlertParams::new("Delete").action("Delete", Command::ConfirmDeleteDiagram));

        assert_eq!(alert.handle_key_event(key(KeyCode::Enter)), None);
        assert!(!handle.is_open(DialogKind::Alert));
    }

    #[test]
    fn test_focus_stays_on_close_without_action() {
        let (mut alert, _) = dialog(AlertParams::new("Limit reached"));
        alert.handle_key_event(key(KeyCode::Tab));
        assert!(!alert.action_focused);
    }
}
