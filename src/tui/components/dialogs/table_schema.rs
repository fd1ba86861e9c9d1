use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::i18n::Translator;
use crate::providers::{DialogKind, TableSchemaParams};
use crate::tui::{
    components::{Component, Selection},
    styles::Theme,
    Frame,
};

/// Move a table to another schema of the diagram
pub struct TableSchemaDialog {
    translator: Translator,
    params: TableSchemaParams,
    selection: Selection,
}

impl TableSchemaDialog {
    pub fn new(services: &EditorServices, params: TableSchemaParams) -> Self {
        let mut selection = Selection::default();
        let current = params
            .current_schema
            .as_ref()
            .and_then(|c| params.schemas.iter().position(|s| &s.name == c))
            .map(|i| i + 1)
            .unwrap_or(0);
        selection.select(current, params.schemas.len() + 1);
        Self {
            translator: services.translator.clone(),
            params,
            selection,
        }
    }

    /// "No schema" first, then the diagram schemas
    fn options(&self) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(self.params.schemas.iter().map(|s| Some(s.name.clone())))
            .collect()
    }
}

impl Component for TableSchemaDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let options = self.options();
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.selection.previous(options.len()),
            KeyCode::Down | KeyCode::Char('j') => self.selection.next(options.len()),
            KeyCode::Enter => {
                let schema = options.get(self.selection.get(options.len())?)?.clone();
                return Some(Command::SetTableSchema {
                    table_id: self.params.table_id.clone(),
                    schema,
                });
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let inner = render_frame(frame, area, &t.t("table_schema_dialog.title"), theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(t.t_with(
                "table_schema_dialog.description",
                &[("table", self.params.table_name.clone())],
            ))
            .style(theme.dim_style()),
            chunks[0],
        );

        let options = self.options();
        let items: Vec<ListItem> = options
            .iter()
            .map(|o| match o {
                Some(name) => ListItem::new(name.clone()).style(theme.text_style()),
                None => ListItem::new(t.t("table_schema_dialog.none")).style(theme.dim_style()),
            })
            .collect();
        let mut state = ListState::default().with_selected(self.selection.get(options.len()));
        frame.render_stateful_widget(
            List::new(items)
                .highlight_style(theme.selection_style())
                .highlight_symbol("› "),
            chunks[1],
            &mut state,
        );
    }
}

impl DialogView for TableSchemaDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::TableSchema
    }

    fn size(&self) -> (u16, u16) {
        (48, (self.params.schemas.len() as u16 + 6).min(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::domain::DbSchema;
    use crate::providers::LocalConfigProvider;
    use crossterm::event::KeyModifiers;

    fn dialog(current: Option<&str>) -> TableSchemaDialog {
        let local_config = LocalConfigProvider::in_memory(EventSink::detached());
        let params = TableSchemaParams {
            table_id: "t1".into(),
            table_name: "users".into(),
            schemas: vec![DbSchema::new("public"), DbSchema::new("sales")],
            current_schema: current.map(String::from),
        };
        let mut selection = Selection::default();
        let index = match current {
            Some("public") => 1,
            Some("sales") => 2,
            _ => 0,
        };
        selection.select(index, 3);
        TableSchemaDialog {
            translator: Translator::new(&local_config),
            params,
            selection,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_moves_table_to_next_schema() {
        let mut dialog = dialog(Some("public"));
        dialog.handle_key_event(key(KeyCode::Down));
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)),
            Some(Command::SetTableSchema {
                table_id: "t1".into(),
                schema: Some("sales".into()),
            })
        );
    }

    #[test]
    fn test_first_option_removes_schema() {
        let mut dialog = dialog(None);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)),
            Some(Command::SetTableSchema {
                table_id: "t1".into(),
                schema: None,
            })
        );
    }
}
