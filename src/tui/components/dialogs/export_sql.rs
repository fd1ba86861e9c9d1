use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::warn;

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::i18n::Translator;
use crate::providers::{DialogKind, ExportSqlParams};
use crate::tui::{components::Component, styles::Theme, Frame};

/// Read-only view of the generated script
pub struct ExportSqlDialog {
    translator: Translator,
    params: ExportSqlParams,
    script: String,
    scroll: u16,
    status: Option<String>,
}

impl ExportSqlDialog {
    pub fn new(services: &EditorServices, params: ExportSqlParams, script: String) -> Self {
        Self {
            translator: services.translator.clone(),
            params,
            script,
            scroll: 0,
            status: None,
        }
    }

    fn copy(&mut self) {
        let result = arboard::Clipboard::new().and_then(|mut c| c.set_text(self.script.clone()));
        self.status = Some(match result {
            Ok(()) => self.translator.t("export_sql_dialog.copied"),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                e.to_string()
            }
        });
    }

    fn max_scroll(&self) -> u16 {
        self.script.lines().count().saturating_sub(1) as u16
    }
}

impl Component for ExportSqlDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(self.max_scroll())
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = (self.scroll + 10).min(self.max_scroll()),
            KeyCode::Char('c') => self.copy(),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let inner = render_frame(frame, area, &t.t("export_sql_dialog.title"), theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(t.t_with(
                "export_sql_dialog.subtitle",
                &[("database", self.params.target_database_type.label().to_string())],
            ))
            .style(theme.dim_style()),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(self.script.as_str())
                .style(theme.text_style())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()))
                .scroll((self.scroll, 0)),
            chunks[1],
        );

        let footer = match &self.status {
            Some(status) => Line::from(Span::styled(status.clone(), theme.dim_style())),
            None => Line::from(Span::styled(t.t("export_sql_dialog.copy"), theme.dim_style())),
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }
}

impl DialogView for ExportSqlDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::ExportSql
    }

    fn size(&self) -> (u16, u16) {
        (80, 28)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::domain::DatabaseType;
    use crate::providers::LocalConfigProvider;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_scroll_stops_at_last_line() {
        let local_config = LocalConfigProvider::in_memory(EventSink::detached());
        let mut dialog = ExportSqlDialog {
            translator: Translator::new(&local_config),
            params: ExportSqlParams {
                target_database_type: DatabaseType::Mysql,
            },
            script: "a\nb\nc".into(),
            scroll: 0,
            status: None,
        };
        for _ in 0..5 {
            dialog.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        assert_eq!(dialog.scroll, 2);
    }
}
