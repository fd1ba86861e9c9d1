//! Diagram canvas
//!
//! Tables are laid out in canvas cells by `providers::canvas::layout_tables`
//! and projected through the shared viewport. Zoom scales positions; a card
//! never gets narrower than its header needs.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::Component;
use crate::app::{Command, EditorServices};
use crate::domain::DbTable;
use crate::providers::{canvas::layout_tables, TableBox, Viewport};
use crate::tui::{styles::Theme, utils::truncate, Frame};

const MIN_CARD_WIDTH: i32 = 12;
const PAN_STEP: i32 = 4;

/// Screen rectangle of a table card, clipped to `area`; `None` when off
/// screen
pub fn project(table: &TableBox, viewport: &Viewport, area: Rect) -> Option<Rect> {
    let zoom = viewport.zoom;
    let x = ((table.x - viewport.x) as f32 * zoom).round() as i32 + area.x as i32;
    let y = ((table.y - viewport.y) as f32 * zoom).round() as i32 + area.y as i32;
    let width = ((table.width as f32 * zoom).round() as i32).max(MIN_CARD_WIDTH);
    let height = table.height;

    let left = x.max(area.x as i32);
    let top = y.max(area.y as i32);
    let right = (x + width).min((area.x + area.width) as i32);
    let bottom = (y + height).min((area.y + area.height) as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

pub struct CanvasView {
    services: EditorServices,
    focused: bool,
}

impl CanvasView {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            focused: true,
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) {
        let action = self.services.local_config.scroll_action();
        match event.kind {
            MouseEventKind::ScrollUp => self.services.canvas.scroll(-1, action),
            MouseEventKind::ScrollDown => self.services.canvas.scroll(1, action),
            _ => {}
        }
    }

    fn render_card(&self, frame: &mut Frame, rect: Rect, table: &DbTable, theme: &Theme) {
        let title = truncate(&table.name, rect.width.saturating_sub(4) as usize);
        let block = Block::default()
            .title(Span::styled(format!(" {} ", title), theme.title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style())
            .style(theme.base_style());

        let inner_width = rect.width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = table
            .fields
            .iter()
            .map(|field| {
                let key = if field.primary_key { "◆" } else { " " };
                let name_width = inner_width.saturating_sub(field.data_type.len() + 3);
                let name = truncate(&field.name, name_width);
                let gap = inner_width
                    .saturating_sub(name.chars().count() + field.data_type.len() + 3)
                    .max(1);
                let mut name_style = theme.text_style();
                if field.primary_key {
                    name_style = name_style.add_modifier(Modifier::BOLD);
                }
                Line::from(vec![
                    Span::raw(key),
                    Span::raw(" "),
                    Span::styled(name, name_style),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(field.data_type.clone(), theme.dim_style()),
                ])
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("—", theme.dim_style())));
        }

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }

    /// Dotted elbow connector between two card centers
    fn render_connector(
        &self,
        frame: &mut Frame,
        area: Rect,
        from: (i32, i32),
        to: (i32, i32),
        show_cardinality: bool,
        theme: &Theme,
    ) {
        let inside = |x: i32, y: i32| {
            x >= area.x as i32
                && y >= area.y as i32
                && x < (area.x + area.width) as i32
                && y < (area.y + area.height) as i32
        };
        let style = theme.dim_style();
        let buffer = frame.buffer_mut();
        let (x0, x1) = (from.0.min(to.0), from.0.max(to.0));
        for x in x0..=x1 {
            if inside(x, from.1) {
                buffer.get_mut(x as u16, from.1 as u16).set_symbol("·").set_style(style);
            }
        }
        let (y0, y1) = (from.1.min(to.1), from.1.max(to.1));
        for y in y0..=y1 {
            if inside(to.0, y) {
                buffer.get_mut(to.0 as u16, y as u16).set_symbol("·").set_style(style);
            }
        }
        if show_cardinality {
            if inside(from.0, from.1) {
                buffer.get_mut(from.0 as u16, from.1 as u16).set_symbol("1");
            }
            if inside(to.0, to.1) {
                buffer.get_mut(to.0 as u16, to.1 as u16).set_symbol("∗");
            }
        }
    }
}

impl Component for CanvasView {
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let canvas = &self.services.canvas;
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => canvas.pan(-PAN_STEP, 0),
            KeyCode::Right | KeyCode::Char('l') => canvas.pan(PAN_STEP, 0),
            KeyCode::Up | KeyCode::Char('k') => canvas.pan(0, -PAN_STEP / 2),
            KeyCode::Down | KeyCode::Char('j') => canvas.pan(0, PAN_STEP / 2),
            KeyCode::Char('+') | KeyCode::Char('=') => canvas.zoom_in(),
            KeyCode::Char('-') => canvas.zoom_out(),
            KeyCode::Char('0') => canvas.reset(),
            KeyCode::Char('r') => return Some(Command::CreateRelationship),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let s = &self.services;
        let border = if self.focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let viewport = s.canvas.viewport();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {:.0}% ", viewport.zoom * 100.0),
                theme.dim_style(),
            ))
            .title_alignment(Alignment::Right)
            .style(theme.base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let diagram = s.schema.current_diagram();
        if diagram.id.is_empty() {
            let text = if s.loader.is_visible() {
                s.translator.t("editor.loading")
            } else {
                s.translator.t("editor.no_diagram")
            };
            let y = inner.y + inner.height / 2;
            frame.render_widget(
                Paragraph::new(text)
                    .style(theme.dim_style())
                    .alignment(Alignment::Center),
                Rect::new(inner.x, y, inner.width, 1.min(inner.height)),
            );
            return;
        }

        let tables = s.schema.visible_tables();
        let boxes = layout_tables(&tables);
        let local = s.local_config.get();

        if local.show_dependencies_on_canvas {
            for relationship in &diagram.relationships {
                let source = tables.iter().position(|t| t.id == relationship.source_table_id);
                let target = tables.iter().position(|t| t.id == relationship.target_table_id);
                if let (Some(source), Some(target)) = (source, target) {
                    let center = |b: &TableBox| {
                        let (cx, cy) = b.center();
                        (
                            ((cx - viewport.x) as f32 * viewport.zoom).round() as i32 + inner.x as i32,
                            ((cy - viewport.y) as f32 * viewport.zoom).round() as i32 + inner.y as i32,
                        )
                    };
                    self.render_connector(
                        frame,
                        inner,
                        center(&boxes[source]),
                        center(&boxes[target]),
                        local.show_cardinality,
                        theme,
                    );
                }
            }
        }

        for (table, table_box) in tables.iter().zip(boxes.iter()) {
            if let Some(rect) = project(table_box, &viewport, inner) {
                self.render_card(frame, rect, table, theme);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_box(x: i32, y: i32) -> TableBox {
        TableBox {
            x,
            y,
            width: 24,
            height: 5,
        }
    }

    #[test]
    fn test_project_offsets_by_area_and_viewport() {
        let area = Rect::new(2, 3, 100, 40);
        let viewport = Viewport {
            x: 10,
            y: 0,
            zoom: 1.0,
        };
        let rect = project(&table_box(20, 4), &viewport, area).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (12, 7, 24, 5));
    }

    #[test]
    fn test_project_clips_and_hides() {
        let area = Rect::new(0, 0, 30, 10);
        let viewport = Viewport::default();

        let clipped = project(&table_box(20, 0), &viewport, area).unwrap();
        assert_eq!(clipped.width, 10);
        assert!(project(&table_box(40, 0), &viewport, area).is_none());
    }

    #[test]
    fn test_zoom_scales_positions() {
        let area = Rect::new(0, 0, 200, 50);
        let viewport = Viewport {
            x: 0,
            y: 0,
            zoom: 0.5,
        };
        let rect = project(&table_box(40, 10), &viewport, area).unwrap();
        assert_eq!((rect.x, rect.y, rect.width), (20, 5, 12));
    }
}
