use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::domain::DbTable;
use crate::i18n::Translator;
use crate::providers::DialogKind;
use crate::tui::{
    components::{Component, Selection},
    styles::Theme,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Target,
}

/// Link two tables of the current diagram
pub struct CreateRelationshipDialog {
    translator: Translator,
    tables: Vec<DbTable>,
    source: Selection,
    target: Selection,
    side: Side,
}

impl CreateRelationshipDialog {
    pub fn new(services: &EditorServices, tables: Vec<DbTable>) -> Self {
        let mut target = Selection::default();
        target.select(1, tables.len());
        Self {
            translator: services.translator.clone(),
            tables,
            source: Selection::default(),
            target,
            side: Side::Source,
        }
    }

    fn submit(&self) -> Option<Command> {
        let source = self.tables.get(self.source.get(self.tables.len())?)?;
        let target = self.tables.get(self.target.get(self.tables.len())?)?;
        if source.id == target.id {
            return None;
        }
        Some(Command::AddRelationship {
            source_table_id: source.id.clone(),
            target_table_id: target.id.clone(),
        })
    }

    fn render_side(&self, frame: &mut Frame, area: Rect, theme: &Theme, side: Side) {
        let (title, selection) = match side {
            Side::Source => ("create_relationship_dialog.source", self.source),
            Side::Target => ("create_relationship_dialog.target", self.target),
        };
        let items: Vec<ListItem> = self
            .tables
            .iter()
            .map(|t| ListItem::new(t.qualified_name()))
            .collect();
        let border = if self.side == side {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let mut state = ListState::default().with_selected(selection.get(self.tables.len()));
        frame.render_stateful_widget(
            List::new(items)
                .block(
                    Block::default()
                        .title(self.translator.t(title))
                        .borders(Borders::ALL)
                        .border_style(border),
                )
                .highlight_style(theme.selection_style())
                .highlight_symbol("› "),
            area,
            &mut state,
        );
    }
}

impl Component for CreateRelationshipDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let len = self.tables.len();
        let selection = match self.side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        };
        match event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.side = match self.side {
                    Side::Source => Side::Target,
                    Side::Target => Side::Source,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => selection.previous(len),
            KeyCode::Down | KeyCode::Char('j') => selection.next(len),
            KeyCode::Enter => return self.submit(),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inner = render_frame(
            frame,
            area,
            &self.translator.t("create_relationship_dialog.title"),
            theme,
        );
        if self.tables.len() < 2 {
            frame.render_widget(
                Paragraph::new(self.translator.t("create_relationship_dialog.need_tables"))
                    .style(theme.dim_style()),
                inner,
            );
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);
        self.render_side(frame, columns[0], theme, Side::Source);
        self.render_side(frame, columns[1], theme, Side::Target);
    }
}

impl DialogView for CreateRelationshipDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::CreateRelationship
    }

    fn size(&self) -> (u16, u16) {
        (64, (self.tables.len() as u16 + 4).clamp(6, 20))
    }
}
