//! Examples page
//!
//! A grid of bundled diagrams. Opening one stores a copy under a fresh id
//! and navigates to it, so the example itself is never edited.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tracing::info;

use super::Page;
use crate::app::{AppEvent, GalleryServices};
use crate::domain::Route;
use crate::gallery::{examples, Example};
use crate::tui::{
    components::{
        logo::{render_logo, LogoOpts},
        Selection,
    },
    styles::Theme,
    utils::Breakpoint,
    Frame,
};

const CARD_HEIGHT: u16 = 5;

pub struct ExamplesPage {
    services: GalleryServices,
    examples: Vec<Example>,
    selection: Selection,
    columns: usize,
}

impl ExamplesPage {
    pub fn new(services: GalleryServices) -> Self {
        Self {
            services,
            examples: examples(),
            selection: Selection::default(),
            columns: 2,
        }
    }

    /// Store a copy of the selected example and open it
    async fn open_selected(&mut self) -> Result<()> {
        let Some(index) = self.selection.get(self.examples.len()) else {
            return Ok(());
        };
        let copy = self.examples[index].diagram.duplicate();
        self.services.storage.add_diagram(&copy).await?;
        info!("Opened example {} as {}", copy.name, copy.id);
        self.services.events.navigate(Route::Diagram(copy.id));
        Ok(())
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.examples.len() as isize;
        let target = self.selection.index() as isize + delta;
        if (0..len).contains(&target) {
            self.selection.select(target as usize, self.examples.len());
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, index: usize, theme: &Theme) {
        let example = &self.examples[index];
        let selected = self.selection.index() == index;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if selected {
                theme.focused_border_style()
            } else {
                theme.border_style()
            })
            .title(Span::styled(
                format!(" {} ", example.name),
                theme.title_style(),
            ));
        let body = vec![
            Line::from(Span::styled(example.description, theme.text_style())),
            Line::from(Span::styled(
                format!(
                    "{} · {} tables",
                    example.diagram.database_type.label(),
                    example.diagram.tables.len()
                ),
                theme.dim_style(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

#[async_trait]
impl Page for ExamplesPage {
    fn title(&self) -> String {
        "SchemaX - Example Database Diagrams & Schemas".to_string()
    }

    fn handles_route(&self, route: &Route) -> bool {
        matches!(route, Route::Examples)
    }

    fn theme(&self) -> Theme {
        Theme::for_effective(self.services.theme.effective_theme())
    }

    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        let columns = self.columns as isize;
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-columns),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(columns),
            KeyCode::Enter => self.open_selected().await?,
            KeyCode::Esc => self.services.events.navigate(Route::Home),
            KeyCode::Char('q') => self.services.events.emit(AppEvent::Shutdown),
            _ => {}
        }
        Ok(())
    }

    fn on_resize(&mut self, area: Rect) {
        self.columns = if Breakpoint::is_md(area.width) { 2 } else { 1 };
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.on_resize(area);
        let theme = self.theme();
        let t = &self.services.translator;
        frame.render_widget(Block::default().style(theme.base_style()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let logo = render_logo(
            &t.t("app.name"),
            &LogoOpts {
                gradient_start: theme.primary,
                gradient_end: theme.accent,
                tagline_color: theme.text_dim,
            },
        );
        frame.render_widget(Paragraph::new(logo).alignment(Alignment::Center), rows[0]);

        let heading = vec![
            Line::from(Span::styled(
                t.t("examples_page.title"),
                theme.title_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(t.t("examples_page.subtitle"), theme.dim_style())),
        ];
        frame.render_widget(Paragraph::new(heading).alignment(Alignment::Center), rows[1]);

        let grid = rows[2];
        let card_width = grid.width / self.columns as u16;
        for index in 0..self.examples.len() {
            let column = (index % self.columns) as u16;
            let row = (index / self.columns) as u16;
            let y = grid.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > grid.y + grid.height {
                break;
            }
            let card = Rect::new(grid.x + column * card_width, y, card_width, CARD_HEIGHT);
            self.render_card(frame, card, index, &theme);
        }

        frame.render_widget(
            Paragraph::new(t.t("examples_page.hint"))
                .style(theme.dim_style())
                .alignment(Alignment::Center),
            rows[3],
        );
    }

    fn help_text(&self) -> Vec<(&str, &str)> {
        vec![
            ("Arrows", "Select example"),
            ("Enter", "Open a copy"),
            ("Esc", "Back to editor"),
            ("q", "Quit"),
        ]
    }
}
