use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::{Component, Selection};
use crate::app::{Command, EditorServices};
use crate::tui::{styles::Theme, utils::truncate, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Schemas,
    Tables,
}

/// Schema filter and table list of the current diagram
pub struct SidePanel {
    services: EditorServices,
    section: Section,
    schema_selection: Selection,
    table_selection: Selection,
}

impl SidePanel {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            section: Section::Tables,
            schema_selection: Selection::default(),
            table_selection: Selection::default(),
        }
    }

    /// Move focus to the schema list, as the schema selector asks
    pub fn focus_schemas(&mut self) {
        self.section = Section::Schemas;
        self.schema_selection.select(0, 1);
    }

    /// "All schemas" followed by each schema name
    fn schema_options(&self) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(
                self.services
                    .schema
                    .schemas()
                    .into_iter()
                    .map(|s| Some(s.name)),
            )
            .collect()
    }

    fn is_filtered_in(&self, option: &Option<String>) -> bool {
        let filter = self.services.schema.filtered_schemas();
        match (option, filter) {
            (None, None) => true,
            (Some(name), Some(filter)) => filter.contains(name),
            _ => false,
        }
    }
}

impl Component for SidePanel {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let schema_options = self.schema_options();
        let tables = self.services.schema.visible_tables();
        match event.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Schemas => Section::Tables,
                    Section::Tables => Section::Schemas,
                };
            }
            KeyCode::Esc if self.services.layout.is_select_schema_open() => {
                self.services.layout.close_select_schema();
                self.section = Section::Tables;
            }
            KeyCode::Up | KeyCode::Char('k') => match self.section {
                Section::Schemas => self.schema_selection.previous(schema_options.len()),
                Section::Tables => self.table_selection.previous(tables.len()),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.section {
                Section::Schemas => self.schema_selection.next(schema_options.len()),
                Section::Tables => self.table_selection.next(tables.len()),
            },
            KeyCode::Enter => match self.section {
                Section::Schemas => {
                    let option = schema_options.get(self.schema_selection.get(schema_options.len())?)?;
                    self.section = Section::Tables;
                    return Some(Command::FilterSchemas(option.clone().map(|s| vec![s])));
                }
                Section::Tables => {
                    let table = tables.get(self.table_selection.get(tables.len())?)?;
                    return Some(Command::ChangeTableSchema(table.id.clone()));
                }
            },
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.services.translator;
        let schema_options = self.schema_options();
        let selecting = self.services.layout.is_select_schema_open();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((schema_options.len() as u16 + 2).min(area.height / 2)),
                Constraint::Min(3),
            ])
            .split(area);

        let width = area.width.saturating_sub(6) as usize;
        let schema_items: Vec<ListItem> = schema_options
            .iter()
            .map(|option| {
                let mark = if self.is_filtered_in(option) { "● " } else { "○ " };
                let label = match option {
                    Some(name) => name.clone(),
                    None => t.t("side_panel.all_schemas"),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, theme.title_style()),
                    Span::styled(truncate(&label, width), theme.text_style()),
                ]))
            })
            .collect();
        let schema_border = if selecting || self.section == Section::Schemas {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let mut schema_state = ListState::default();
        if self.section == Section::Schemas {
            schema_state.select(self.schema_selection.get(schema_options.len()));
        }
        frame.render_stateful_widget(
            List::new(schema_items)
                .block(
                    Block::default()
                        .title(t.t("side_panel.schemas"))
                        .borders(Borders::ALL)
                        .border_style(schema_border),
                )
                .highlight_style(theme.selection_style()),
            chunks[0],
            &mut schema_state,
        );

        let tables = self.services.schema.visible_tables();
        let table_items: Vec<ListItem> = tables
            .iter()
            .map(|table| {
                ListItem::new(Line::from(vec![
                    Span::styled(truncate(&table.name, width), theme.text_style()),
                    Span::styled(
                        table
                            .schema
                            .as_ref()
                            .map(|s| format!("  {}", s))
                            .unwrap_or_default(),
                        theme.dim_style(),
                    ),
                ]))
            })
            .collect();
        let mut table_state = ListState::default();
        if self.section == Section::Tables {
            table_state.select(self.table_selection.get(tables.len()));
        }
        frame.render_stateful_widget(
            List::new(table_items)
                .block(
                    Block::default()
                        .title(format!("{} ({})", t.t("side_panel.tables"), tables.len()))
                        .borders(Borders::ALL)
                        .border_style(if self.section == Section::Tables {
                            theme.focused_border_style()
                        } else {
                            theme.border_style()
                        }),
                )
                .highlight_style(theme.selection_style()),
            chunks[1],
            &mut table_state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::config::Settings;
    use crate::domain::{DatabaseType, DbTable, Diagram};
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    async fn services_with_schemas(dir: &tempfile::TempDir) -> EditorServices {
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let services = EditorServices::compose(Arc::new(settings), EventSink::detached())
            .await
            .unwrap();
        let mut diagram = Diagram::new("shop", DatabaseType::Postgresql);
        diagram.tables.push(DbTable::new("users", Some("public".into())));
        diagram.tables.push(DbTable::new("orders", Some("sales".into())));
        services.storage.add_diagram(&diagram).await.unwrap();
        services.schema.load_diagram(&diagram.id).await.unwrap();
        services
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_schema_selector_filters_schemas() {
        let dir = tempfile::tempdir().unwrap();
        let services = services_with_schemas(&dir).await;
        let mut panel = SidePanel::new(&services);

        panel.focus_schemas();
        panel.handle_key_event(key(KeyCode::Down));
        panel.handle_key_event(key(KeyCode::Down));
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Enter)),
            Some(Command::FilterSchemas(Some(vec!["sales".into()])))
        );

        panel.focus_schemas();
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Enter)),
            Some(Command::FilterSchemas(None))
        );
    }

    #[tokio::test]
    async fn test_enter_on_table_changes_its_schema() {
        let dir = tempfile::tempdir().unwrap();
        let services = services_with_schemas(&dir).await;
        services.schema.filter_schemas(None);
        let mut panel = SidePanel::new(&services);
        let first = services.schema.visible_tables()[0].id.clone();

        assert_eq!(
            panel.handle_key_event(key(KeyCode::Enter)),
            Some(Command::ChangeTableSchema(first))
        );
    }
}
