use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tui_textarea::TextArea;

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::domain::DatabaseType;
use crate::i18n::Translator;
use crate::providers::DialogKind;
use crate::tui::{
    components::{Component, Selection},
    styles::Theme,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Database,
    Name,
}

/// Pick a database type and a name for a new diagram
pub struct CreateDiagramDialog {
    translator: Translator,
    database: Selection,
    name: TextArea<'static>,
    focus: Focus,
}

impl CreateDiagramDialog {
    pub fn new(services: &EditorServices) -> Self {
        let translator = services.translator.clone();
        let mut name = TextArea::default();
        name.set_placeholder_text(translator.t("create_diagram_dialog.default_name"));
        Self {
            translator,
            database: Selection::default(),
            name,
            focus: Focus::Database,
        }
    }

    fn selected_database(&self) -> DatabaseType {
        let index = self.database.get(DatabaseType::ALL.len()).unwrap_or(0);
        DatabaseType::ALL[index]
    }

    fn submit(&self) -> Command {
        Command::CreateDiagram {
            name: self.name.lines().join(" "),
            database_type: self.selected_database(),
        }
    }
}

impl Component for CreateDiagramDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        match (self.focus, event.code) {
            (_, KeyCode::Tab | KeyCode::BackTab) => {
                self.focus = match self.focus {
                    Focus::Database => Focus::Name,
                    Focus::Name => Focus::Database,
                };
                None
            }
            (_, KeyCode::Enter) => Some(self.submit()),
            (Focus::Database, KeyCode::Up | KeyCode::Char('k')) => {
                self.database.previous(DatabaseType::ALL.len());
                None
            }
            (Focus::Database, KeyCode::Down | KeyCode::Char('j')) => {
                self.database.next(DatabaseType::ALL.len());
                None
            }
            (Focus::Database, _) => None,
            (Focus::Name, _) => {
                self.name.input(event);
                None
            }
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Name {
            self.name.insert_str(text.replace('\n', " "));
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let inner = render_frame(frame, area, &t.t("create_diagram_dialog.title"), theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(3), Constraint::Length(1)])
            .split(inner);

        let border = |focused: bool| {
            if focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            }
        };

        let items: Vec<ListItem> = DatabaseType::ALL
            .iter()
            .map(|db| ListItem::new(db.label()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(t.t("create_diagram_dialog.database"))
                    .borders(Borders::ALL)
                    .border_style(border(self.focus == Focus::Database)),
            )
            .highlight_style(theme.selection_style())
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(self.database.get(DatabaseType::ALL.len()));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        self.name.set_block(
            Block::default()
                .title(t.t("create_diagram_dialog.name"))
                .borders(Borders::ALL)
                .border_style(border(self.focus == Focus::Name)),
        );
        frame.render_widget(self.name.widget(), chunks[1]);

        let hint = Line::from(vec![
            Span::styled("Tab", theme.title_style()),
            Span::styled(" switch  ", theme.dim_style()),
            Span::styled("Enter", theme.title_style()),
            Span::styled(format!(" {}", t.t("common.create")), theme.dim_style()),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
}

impl DialogView for CreateDiagramDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::CreateDiagram
    }

    fn size(&self) -> (u16, u16) {
        (48, DatabaseType::ALL.len() as u16 + 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::providers::LocalConfigProvider;
    use crossterm::event::KeyModifiers;

    fn dialog() -> CreateDiagramDialog {
        let local_config = LocalConfigProvider::in_memory(EventSink::detached());
        let translator = Translator::new(&local_config);
        CreateDiagramDialog {
            name: TextArea::default(),
            translator,
            database: Selection::default(),
            focus: Focus::Database,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_submit_uses_selection_and_typed_name() {
        let mut dialog = dialog();
        dialog.handle_key_event(key(KeyCode::Down));
        dialog.handle_key_event(key(KeyCode::Tab));
        for c in "shop".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c)));
        }

        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)),
            Some(Command::CreateDiagram {
                name: "shop".into(),
                database_type: DatabaseType::ALL[1],
            })
        );
    }

    #[test]
    fn test_letters_do_not_type_while_database_focused() {
        let mut dialog = dialog();
        dialog.handle_key_event(key(KeyCode::Char('x')));
        assert_eq!(dialog.name.lines().join(""), "");
    }
}
