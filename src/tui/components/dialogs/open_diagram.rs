use crossterm::event::{KeyCode, KeyEvent};
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tui_textarea::TextArea;

use super::{render_frame, DialogView};
use crate::app::{Command, EditorServices};
use crate::domain::Diagram;
use crate::i18n::Translator;
use crate::providers::DialogKind;
use crate::tui::{
    components::{Component, Selection},
    styles::Theme,
    Frame,
};

/// Saved diagrams, most recently updated first, narrowed by a fuzzy filter
pub struct OpenDiagramDialog {
    translator: Translator,
    diagrams: Vec<Diagram>,
    filter: TextArea<'static>,
    matcher: SkimMatcherV2,
    selection: Selection,
}

impl OpenDiagramDialog {
    pub fn new(services: &EditorServices, mut diagrams: Vec<Diagram>) -> Self {
        let translator = services.translator.clone();
        diagrams.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let mut filter = TextArea::default();
        filter.set_placeholder_text(translator.t("open_diagram_dialog.filter"));
        Self {
            translator,
            diagrams,
            filter,
            matcher: SkimMatcherV2::default(),
            selection: Selection::default(),
        }
    }

    fn query(&self) -> String {
        self.filter.lines().join("")
    }

    /// Diagrams matching the filter, best match first
    fn visible(&self) -> Vec<&Diagram> {
        let query = self.query();
        if query.trim().is_empty() {
            return self.diagrams.iter().collect();
        }
        let mut scored: Vec<(i64, &Diagram)> = self
            .diagrams
            .iter()
            .filter_map(|d| self.matcher.fuzzy_match(&d.name, &query).map(|s| (s, d)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, d)| d).collect()
    }
}

impl Component for OpenDiagramDialog {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let len = self.visible().len();
        match event.code {
            KeyCode::Up => self.selection.previous(len),
            KeyCode::Down => self.selection.next(len),
            KeyCode::Enter => {
                let index = self.selection.get(len)?;
                return self
                    .visible()
                    .get(index)
                    .map(|d| Command::GoToDiagram(d.id.clone()));
            }
            _ => {
                if self.filter.input(event) {
                    self.selection.select(0, len);
                }
            }
        }
        None
    }

    fn handle_paste(&mut self, text: &str) {
        self.filter.insert_str(text.replace('\n', " "));
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = &self.translator;
        let inner = render_frame(frame, area, &t.t("open_diagram_dialog.title"), theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        self.filter.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.focused_border_style()),
        );
        frame.render_widget(self.filter.widget(), chunks[0]);

        let visible = self.visible();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(t.t("open_diagram_dialog.empty")).style(theme.dim_style()),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|d| {
                ListItem::new(Line::from(vec![
                    Span::styled(d.name.clone(), theme.text_style()),
                    Span::raw("  "),
                    Span::styled(
                        format!(
                            "{} · {}",
                            d.database_type.label(),
                            t.t_with("open_diagram_dialog.tables", &[("count", d.tables.len().to_string())])
                        ),
                        theme.dim_style(),
                    ),
                ]))
            })
            .collect();
        let mut state = ListState::default().with_selected(self.selection.get(visible.len()));
        frame.render_stateful_widget(
            List::new(items)
                .highlight_style(theme.selection_style())
                .highlight_symbol("› "),
            chunks[1],
            &mut state,
        );
    }
}

impl DialogView for OpenDiagramDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::OpenDiagram
    }

    fn size(&self) -> (u16, u16) {
        (60, 20)
    }
}
