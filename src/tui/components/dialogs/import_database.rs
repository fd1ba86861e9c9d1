use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::i18n::Translator;
use crate::providers::{DialogKind, ImportDatabaseParams};
use crate::sql::import_metadata;
use crate::tui::{components::Component, styles::Theme, Frame};
use tui_textarea::TextArea;

/// Paste database metadata JSON and import its tables
pub struct ImportDatabaseDialog {
    translator: Translator,
    params: ImportDatabaseParams,
    input: TextArea<'static>,
    error: Option<String>,
}

impl ImportDatabaseDialog {
    pub fn new(services: &EditorServices, params: ImportDatabaseParams) -> Self {
        Self {
            translator: services.translator.clone(),
            params,
            input: TextArea::default(),
            error: None,
        }
    }

    fn submit(&mut self) -> Option<Command> {
        let text = self.input.lines().join("\n");
        match import_metadata(&text, self.params.database_type) {
            Ok(tables) => {
                self.error = None;
                Some(Command::ImportTables(tables))
            }
            Err(e) => {
                self.error = Some(
                    self.translator
                        .t_with("import_database_dialog.error", &[("error", e.to_string())]),
                );
                None
            }
        }
    }
}

impl Component for ImportDatabaseDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        if event.code == KeyCode::Char('s') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }
        self.input.input(event);
        None
    }

    fn handle_paste(&mut self, text: &str) {
        self.input.insert_str(text);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let title = t.t_with(
            "import_database_dialog.title",
            &[("database", self.params.database_type.label().to_string())],
        );
        let inner = render_frame(frame, area, &title, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(2)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(t.t("import_database_dialog.instructions")).style(theme.dim_style()),
            chunks[0],
        );

        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.focused_border_style()),
        );
        frame.render_widget(self.input.widget(), chunks[1]);

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(theme.error_style())
                    .wrap(Wrap { trim: true }),
                chunks[2],
            );
        }
    }
}

impl DialogView for ImportDatabaseDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::ImportDatabase
    }

    fn size(&self) -> (u16, u16) {
        (76, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::domain::DatabaseType;
    use crate::providers::LocalConfigProvider;

    fn dialog() -> ImportDatabaseDialog {
        let local_config = LocalConfigProvider::in_memory(EventSink::detached());
        ImportDatabaseDialog {
            translator: Translator::new(&local_config),
            params: ImportDatabaseParams {
                database_type: DatabaseType::Postgresql,
            },
            input: TextArea::default(),
            error: None,
        }
    }

    fn save() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_invalid_json_shows_error_inline() {
        let mut dialog = dialog();
        dialog.handle_paste("not json");
        assert_eq!(dialog.handle_key_event(save()), None);
        assert!(dialog.error.as_deref().unwrap().starts_with("Invalid metadata"));
    }

    #[test]
    fn test_valid_metadata_imports_tables() {
        let mut dialog = dialog();
        dialog.handle_paste(
            r#"{"tables":[{"schema":"public","name":"users","columns":[{"name":"id","type":"int"}]}]}"#,
        );
        match dialog.handle_key_event(save()) {
            Some(Command::ImportTables(tables)) => {
                assert_eq!(tables.len(), 1);
                assert_eq!(tables[0].name, "users");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
